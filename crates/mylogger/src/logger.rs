//! Logger handle
//!
//! A `Logger` carries a name, optional bound fields and optionally an
//! explicit pipeline. Without an explicit pipeline it resolves the façade's
//! active pipeline at every emission.

use crate::event::{ExceptionInfo, Fields, Record, Tag};
use crate::facade;
use crate::helpers::Helper;
use crate::pipeline::Pipeline;
use mylogger_core_types::Level;
use std::error::Error;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    bound: Fields,
    pipeline: Option<Arc<Pipeline>>,
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: Fields::new(),
            pipeline: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields carried by this logger
    pub fn bound(&self) -> &Fields {
        &self.bound
    }

    /// Log through `pipeline` instead of the façade's active pipeline.
    pub fn with_pipeline(mut self, pipeline: Arc<Pipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// A copy of this logger carrying extra fields on every event.
    ///
    /// Bound fields override ambient context; call-site fields override both.
    pub fn bind(&self, fields: Fields) -> Self {
        let mut logger = self.clone();
        logger.bound.extend(fields);
        logger
    }

    /// A copy of this logger without the named bound fields.
    pub fn unbind<I, K>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut logger = self.clone();
        for key in keys {
            logger.bound.remove(key.as_ref());
        }
        logger
    }

    /// The pipeline the next event will go through.
    pub fn pipeline(&self) -> Arc<Pipeline> {
        self.pipeline.clone().unwrap_or_else(facade::current)
    }

    pub fn log(&self, level: Level, msg: impl AsRef<str>, fields: Fields) {
        self.dispatch(level, msg.as_ref(), fields, None, None);
    }

    pub fn debug(&self, msg: impl AsRef<str>, fields: Fields) {
        self.log(Level::Debug, msg, fields);
    }

    pub fn info(&self, msg: impl AsRef<str>, fields: Fields) {
        self.log(Level::Info, msg, fields);
    }

    pub fn warning(&self, msg: impl AsRef<str>, fields: Fields) {
        self.log(Level::Warning, msg, fields);
    }

    pub fn error(&self, msg: impl AsRef<str>, fields: Fields) {
        self.log(Level::Error, msg, fields);
    }

    pub fn critical(&self, msg: impl AsRef<str>, fields: Fields) {
        self.log(Level::Critical, msg, fields);
    }

    /// Error-level event carrying `err` and its source chain.
    pub fn exception<E: Error + 'static>(&self, msg: impl AsRef<str>, err: &E, fields: Fields) {
        self.dispatch(
            Level::Error,
            msg.as_ref(),
            fields,
            None,
            Some(ExceptionInfo::from_error(err)),
        );
    }

    /// Emit through a semantic helper: its level and its reserved tag.
    pub fn helper(&self, helper: Helper, msg: impl AsRef<str>, fields: Fields) {
        self.dispatch(helper.level(), msg.as_ref(), fields, helper.tag(), None);
    }

    pub fn success(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Success, msg, fields);
    }

    pub fn start(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Start, msg, fields);
    }

    pub fn end(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::End, msg, fields);
    }

    pub fn db(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Db, msg, fields);
    }

    pub fn progress(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Progress, msg, fields);
    }

    pub fn completion(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Completion, msg, fields);
    }

    pub fn extract(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Extract, msg, fields);
    }

    pub fn input(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Input, msg, fields);
    }

    pub fn output(&self, msg: impl AsRef<str>, fields: Fields) {
        self.helper(Helper::Output, msg, fields);
    }

    fn dispatch(
        &self,
        level: Level,
        msg: &str,
        fields: Fields,
        tag: Option<Tag>,
        exception: Option<ExceptionInfo>,
    ) {
        let mut record = Record::new(level, msg, &self.name)
            .with_bound(&self.bound)
            .with_fields(fields)
            .with_tag(tag);
        if let Some(exception) = exception {
            record = record.with_exception(exception);
        }
        self.pipeline().emit(record);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{LogConfig, Overrides};
    use crate::test_capture::TestCapture;
    use mylogger_core_types::Format;
    use serde_json::json;

    fn logger() -> (Logger, TestCapture) {
        let config = LogConfig::default().apply(Overrides::new().format(Format::Json));
        let (pipeline, capture) = Pipeline::with_capture(config);
        (Logger::new("test").with_pipeline(Arc::new(pipeline)), capture)
    }

    fn one(key: &str, value: serde_json::Value) -> Fields {
        let mut fields = Fields::new();
        fields.insert(key.to_string(), value);
        fields
    }

    #[test]
    fn test_logger_name_is_static_field() {
        let (logger, capture) = logger();
        logger.info("hello", Fields::new());
        assert_eq!(capture.json_lines()[0]["logger"], "test");
    }

    #[test]
    fn test_bind_returns_new_logger() {
        let (logger, capture) = logger();
        let bound = logger.bind(one("tenant", json!("acme")));
        bound.info("with", Fields::new());
        logger.info("without", Fields::new());

        let lines = capture.json_lines();
        assert_eq!(lines[0]["tenant"], "acme");
        assert!(lines[1].get("tenant").is_none());
    }

    #[test]
    fn test_unbind() {
        let (logger, capture) = logger();
        let logger = logger
            .bind(one("a", json!(1)))
            .bind(one("b", json!(2)))
            .unbind(["a"]);
        logger.info("msg", Fields::new());

        let line = &capture.json_lines()[0];
        assert!(line.get("a").is_none());
        assert_eq!(line["b"], 2);
    }

    #[test]
    fn test_exception_logs_error_with_chain() {
        let (logger, capture) = logger();
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
        logger.exception("load failed", &err, Fields::new());

        let line = &capture.json_lines()[0];
        assert_eq!(line["level"], "error");
        assert_eq!(line["exception"][0]["exc_value"], "config missing");
        assert!(line["exception"][0]["exc_type"]
            .as_str()
            .unwrap()
            .ends_with("Error"));
    }

    #[test]
    fn test_generic_levels() {
        let (logger, capture) = logger();
        logger.debug("d", Fields::new());
        logger.warning("w", Fields::new());
        logger.critical("c", Fields::new());

        let levels: Vec<_> = capture
            .json_lines()
            .iter()
            .map(|l| l["level"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, ["debug", "warning", "critical"]);
    }

    #[test]
    fn test_semantic_methods_tag_events() {
        let (logger, capture) = logger();
        logger.success("s", Fields::new());
        logger.db("q", one("component", json!("cache")));
        logger.output("o", Fields::new());

        let lines = capture.json_lines();
        assert_eq!(lines[0]["status"], "success");
        assert_eq!(lines[1]["component"], "database");
        assert_eq!(lines[2]["direction"], "output");
    }
}
