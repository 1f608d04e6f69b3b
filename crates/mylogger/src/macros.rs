//! Call-site macros
//!
//! These wrap the `log_*` helper functions so fields can be written inline.

/// Build a `Fields` map from `key = value` pairs.
///
/// Keys are identifiers or string literals; values are anything `Serialize`.
///
/// # Example
///
/// ```
/// use mylogger::fields;
///
/// let fields = fields! { user_id = 123, action = "login", "http.status" = 200 };
/// assert_eq!(fields["user_id"], 123);
/// assert_eq!(fields["http.status"], 200);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:tt = $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $(
            fields.insert(
                ::std::string::String::from($crate::__field_key!($key)),
                $crate::to_field_value(&$value),
            );
        )+
        fields
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __field_key {
    ($key:ident) => {
        stringify!($key)
    };
    ($key:literal) => {
        $key
    };
}

/// Bind ambient context fields.
///
/// ```
/// mylogger::bind_context!(request_id = "abc-123");
/// # mylogger::clear_context();
/// ```
#[macro_export]
macro_rules! bind_context {
    ($($fields:tt)+) => {
        $crate::context::bind_context($crate::fields!($($fields)+))
    };
}

/// Unbind ambient context fields by name.
#[macro_export]
macro_rules! unbind_context {
    ($($key:expr),+ $(,)?) => {
        $crate::context::unbind_context([$($key),+])
    };
}

/// Log a success: `log_success!("saved", id = 7)`
#[macro_export]
macro_rules! log_success {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_success($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_success($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_error {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_error($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_error($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_warning($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_warning($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_info($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_info($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_debug($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_debug($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_start {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_start($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_start($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_end {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_end($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_end($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_db {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_db($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_db($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_progress {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_progress($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_progress($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_completion {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_completion($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_completion($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_extract {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_extract($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_extract($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_input {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_input($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_input($msg, $crate::fields!($($fields)+))
    };
}

#[macro_export]
macro_rules! log_output {
    ($msg:expr $(,)?) => {
        $crate::helpers::log_output($msg, $crate::Fields::new())
    };
    ($msg:expr, $($fields:tt)+) => {
        $crate::helpers::log_output($msg, $crate::fields!($($fields)+))
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    #[test]
    fn test_fields_macro_empty() {
        let fields = fields!();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_fields_macro_mixed_keys() {
        let user = String::from("alice");
        let fields = fields! { user = user, count = 3, "err.code" = "E1", tags = vec!["a", "b"] };
        assert_eq!(fields["user"], "alice");
        assert_eq!(fields["count"], 3);
        assert_eq!(fields["err.code"], "E1");
        assert_eq!(fields["tags"], json!(["a", "b"]));
    }

    #[test]
    fn test_fields_macro_trailing_comma() {
        let fields = fields! { a = 1, };
        assert_eq!(fields.len(), 1);
    }
}
