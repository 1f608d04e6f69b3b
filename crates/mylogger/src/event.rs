//! Event model shared by the pipeline and the renderers

use mylogger_core_types::Level;
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error;

/// Flat key/value fields carried by an event
pub type Fields = Map<String, Value>;

/// Convert any serializable value into a field value.
///
/// Values that fail to serialize (maps with non-string keys, failing
/// `Serialize` impls) are recorded as a descriptive string instead.
pub fn to_field_value<T: Serialize + ?Sized>(value: &T) -> Value {
    serde_json::to_value(value)
        .unwrap_or_else(|err| Value::String(format!("<unserializable: {err}>")))
}

/// A fixed `key=value` pair added by a semantic helper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub key: &'static str,
    pub value: &'static str,
}

/// One entry of an error chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExceptionFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exc_type: Option<String>,
    pub exc_value: String,
    pub is_cause: bool,
}

/// An error and its `source()` chain, outermost first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ExceptionInfo {
    pub chain: Vec<ExceptionFrame>,
}

impl ExceptionInfo {
    /// Capture an error, naming its concrete type.
    pub fn from_error<E: Error + 'static>(err: &E) -> Self {
        let mut info = Self::from_dyn(err);
        if let Some(head) = info.chain.first_mut() {
            head.exc_type = Some(std::any::type_name::<E>().to_string());
        }
        info
    }

    /// Capture a type-erased error.
    pub fn from_dyn(err: &(dyn Error + 'static)) -> Self {
        let mut chain = vec![ExceptionFrame {
            exc_type: None,
            exc_value: err.to_string(),
            is_cause: false,
        }];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(ExceptionFrame {
                exc_type: None,
                exc_value: cause.to_string(),
                is_cause: true,
            });
            source = cause.source();
        }
        Self { chain }
    }
}

/// What a call site hands to the pipeline
#[derive(Debug)]
pub struct Record<'a> {
    pub level: Level,
    pub message: &'a str,
    pub logger: &'a str,
    pub bound: Option<&'a Fields>,
    pub fields: Fields,
    pub tag: Option<Tag>,
    pub exception: Option<ExceptionInfo>,
}

impl<'a> Record<'a> {
    pub fn new(level: Level, message: &'a str, logger: &'a str) -> Self {
        Self {
            level,
            message,
            logger,
            bound: None,
            fields: Fields::new(),
            tag: None,
            exception: None,
        }
    }

    pub fn with_bound(mut self, bound: &'a Fields) -> Self {
        self.bound = Some(bound);
        self
    }

    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_tag(mut self, tag: Option<Tag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }
}

/// A fully processed event, ready for a renderer
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    pub event: String,
    pub level: Level,
    pub timestamp: Option<String>,
    pub fields: Fields,
    pub exception: Option<ExceptionInfo>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "query failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection reset")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    impl Error for Inner {}

    #[test]
    fn test_exception_chain_follows_sources() {
        let info = ExceptionInfo::from_error(&Outer(Inner));
        assert_eq!(info.chain.len(), 2);
        assert_eq!(info.chain[0].exc_value, "query failed");
        assert!(info.chain[0].exc_type.as_deref().unwrap().ends_with("Outer"));
        assert!(!info.chain[0].is_cause);
        assert_eq!(info.chain[1].exc_value, "connection reset");
        assert!(info.chain[1].is_cause);
    }

    #[test]
    fn test_exception_serializes_as_list() {
        let info = ExceptionInfo::from_dyn(&Inner);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "exc_value": "connection reset", "is_cause": false }])
        );
    }

    #[test]
    fn test_to_field_value() {
        assert_eq!(to_field_value(&42), Value::from(42));
        assert_eq!(to_field_value("abc"), Value::from("abc"));
        assert_eq!(to_field_value(&vec![1, 2]), serde_json::json!([1, 2]));
    }
}
