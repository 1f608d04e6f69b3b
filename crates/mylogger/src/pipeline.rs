//! The processing pipeline
//!
//! A `Pipeline` is built once from a `LogConfig` and never changes. Every
//! event runs through the same fixed stages:
//!
//! 1. merge ambient context, bound fields, call-site fields and the helper tag
//! 2. attach the severity level
//! 3. drop the event if its level is excluded
//! 4. attach an ISO-8601 timestamp
//! 5. attach static fields (logger name, configured static fields)
//! 6. render and write one line

use crate::config::LogConfig;
use crate::context;
use crate::errors::Result;
use crate::event::{LogEvent, Record};
use crate::render::{self, Renderer};
use crate::test_capture::TestCapture;
use chrono::{SecondsFormat, Utc};
use mylogger_core_types::schema::{self, FIELD_LOGGER};
use serde_json::Value;
use std::fmt;
use std::io::Write;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;

pub struct Pipeline {
    config: LogConfig,
    renderer: Box<dyn Renderer>,
    writer: BoxMakeWriter,
}

impl Pipeline {
    /// Pipeline writing to stdout.
    pub fn new(config: LogConfig) -> Self {
        Self::with_writer(config, std::io::stdout)
    }

    /// Pipeline writing to any `MakeWriter`.
    pub fn with_writer<W>(config: LogConfig, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let renderer = render::for_config(&config);
        Self {
            config,
            renderer,
            writer: BoxMakeWriter::new(writer),
        }
    }

    /// Pipeline writing into memory, plus the handle to read it back.
    pub fn with_capture(config: LogConfig) -> (Self, TestCapture) {
        let capture = TestCapture::new();
        (Self::with_writer(config, capture.clone()), capture)
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Run stages 1-5. Returns `None` when the event is excluded.
    pub fn process(&self, record: Record<'_>) -> Option<LogEvent> {
        let Record {
            level,
            message,
            logger,
            bound,
            fields: call_fields,
            tag,
            exception,
        } = record;

        let mut fields = context::context_snapshot();
        if let Some(bound) = bound {
            fields.extend(bound.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        fields.extend(call_fields);
        if let Some(tag) = tag {
            fields.insert(tag.key.to_string(), Value::from(tag.value));
        }
        fields.retain(|key, _| !schema::is_reserved(key));

        if self.config.is_excluded(level) {
            return None;
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        fields
            .entry(FIELD_LOGGER)
            .or_insert_with(|| Value::from(logger));
        for (key, value) in &self.config.static_fields {
            if !schema::is_reserved(key) {
                fields.entry(key.as_str()).or_insert_with(|| value.clone());
            }
        }

        Some(LogEvent {
            event: message.to_string(),
            level,
            timestamp: Some(timestamp),
            fields,
            exception,
        })
    }

    /// Render an event into a newline-terminated line.
    ///
    /// # Errors
    ///
    /// Returns the renderer's serialization or formatting error.
    pub fn render(&self, event: &LogEvent) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.renderer.render(event, &mut buffer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }

    /// Process, render and write one record. Never fails: sink and renderer
    /// errors are dropped here.
    pub fn emit(&self, record: Record<'_>) {
        if let Some(event) = self.process(record) {
            let _ = self.write(&event);
        }
    }

    fn write(&self, event: &LogEvent) -> Result<()> {
        let line = self.render(event)?;
        // Single write_all so concurrent lines do not interleave
        self.writer.make_writer().write_all(&line)?;
        Ok(())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use crate::event::{Fields, Tag};
    use mylogger_core_types::{Format, Level};
    use serde_json::json;

    fn json_config() -> LogConfig {
        LogConfig::default().apply(Overrides::new().format(Format::Json))
    }

    #[test]
    fn test_process_attaches_level_timestamp_and_logger() {
        let (pipeline, _) = Pipeline::with_capture(json_config());
        let event = pipeline
            .process(Record::new(Level::Info, "hello", "app"))
            .unwrap();

        assert_eq!(event.event, "hello");
        assert_eq!(event.level, Level::Info);
        let timestamp = event.timestamp.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
        assert_eq!(event.fields.get("logger"), Some(&json!("app")));
    }

    #[test]
    fn test_excluded_level_short_circuits() {
        let config = json_config().apply(Overrides::new().exclude(["debug"]));
        let (pipeline, capture) = Pipeline::with_capture(config);

        assert!(pipeline
            .process(Record::new(Level::Debug, "x", "app"))
            .is_none());
        pipeline.emit(Record::new(Level::Debug, "x", "app"));
        assert!(capture.lines().is_empty());
    }

    #[test]
    fn test_tag_wins_over_call_site_field() {
        let (pipeline, _) = Pipeline::with_capture(json_config());
        let mut fields = Fields::new();
        fields.insert("phase".to_string(), json!("bogus"));

        let event = pipeline
            .process(
                Record::new(Level::Info, "go", "app")
                    .with_fields(fields)
                    .with_tag(Some(Tag {
                        key: "phase",
                        value: "start",
                    })),
            )
            .unwrap();
        assert_eq!(event.fields.get("phase"), Some(&json!("start")));
    }

    #[test]
    fn test_reserved_keys_are_dropped_from_fields() {
        let (pipeline, _) = Pipeline::with_capture(json_config());
        let mut fields = Fields::new();
        fields.insert("level".to_string(), json!("critical"));
        fields.insert("event".to_string(), json!("other"));

        let event = pipeline
            .process(Record::new(Level::Info, "msg", "app").with_fields(fields))
            .unwrap();
        assert!(event.fields.get("level").is_none());
        assert!(event.fields.get("event").is_none());
        assert_eq!(event.event, "msg");
    }

    #[test]
    fn test_static_fields_do_not_overwrite() {
        let config = json_config().apply(
            Overrides::new()
                .static_field("service", "billing")
                .static_field("region", "eu"),
        );
        let (pipeline, _) = Pipeline::with_capture(config);
        let mut fields = Fields::new();
        fields.insert("region".to_string(), json!("us"));

        let event = pipeline
            .process(Record::new(Level::Info, "msg", "app").with_fields(fields))
            .unwrap();
        assert_eq!(event.fields.get("service"), Some(&json!("billing")));
        assert_eq!(event.fields.get("region"), Some(&json!("us")));
    }

    #[test]
    fn test_call_site_fields_override_bound_fields() {
        let (pipeline, _) = Pipeline::with_capture(json_config());
        let mut bound = Fields::new();
        bound.insert("user_id".to_string(), json!(1));
        bound.insert("tenant".to_string(), json!("acme"));
        let mut fields = Fields::new();
        fields.insert("user_id".to_string(), json!(2));

        let event = pipeline
            .process(
                Record::new(Level::Info, "msg", "app")
                    .with_bound(&bound)
                    .with_fields(fields),
            )
            .unwrap();
        assert_eq!(event.fields.get("user_id"), Some(&json!(2)));
        assert_eq!(event.fields.get("tenant"), Some(&json!("acme")));
    }

    #[test]
    fn test_emit_writes_one_line() {
        let (pipeline, capture) = Pipeline::with_capture(json_config());
        pipeline.emit(Record::new(Level::Warning, "careful", "app"));

        let lines = capture.json_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["event"], "careful");
        assert_eq!(lines[0]["level"], "warning");
    }

    #[test]
    fn test_debug_shows_config() {
        let (pipeline, _) = Pipeline::with_capture(json_config());
        let debug = format!("{:?}", pipeline);
        assert!(debug.contains("Pipeline"));
        assert!(debug.contains("Json"));
    }
}
