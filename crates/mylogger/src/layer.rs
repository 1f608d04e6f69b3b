//! tracing bridge
//!
//! `FacadeLayer` routes ordinary `tracing` events through the façade
//! pipeline so libraries instrumented with `tracing` share the same format,
//! exclusion set and ambient context.

use crate::errors::Result;
use crate::event::{Fields, Record};
use crate::facade;
use crate::pipeline::Pipeline;
use mylogger_core_types::Level;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const MESSAGE: &str = "message";

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Fields,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == MESSAGE {
            self.message = Some(match value {
                Value::String(s) => s,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        // `log` crate metadata forwarded by tracing-log
        if field.name().starts_with("log.") {
            return;
        }
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}

/// Map a tracing level onto the façade's levels. `TRACE` folds into debug.
pub fn level_from_tracing(level: &tracing::Level) -> Level {
    if *level == tracing::Level::ERROR {
        Level::Error
    } else if *level == tracing::Level::WARN {
        Level::Warning
    } else if *level == tracing::Level::INFO {
        Level::Info
    } else {
        Level::Debug
    }
}

/// Layer forwarding tracing events into a pipeline
#[derive(Debug, Default, Clone)]
pub struct FacadeLayer {
    pipeline: Option<Arc<Pipeline>>,
}

impl FacadeLayer {
    /// Forward into the façade's active pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward into an explicit pipeline.
    pub fn with_pipeline(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline: Some(pipeline),
        }
    }
}

impl<S> Layer<S> for FacadeLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let message = visitor.message.take().unwrap_or_default();
        let pipeline = self.pipeline.clone().unwrap_or_else(facade::current);
        pipeline.emit(
            Record::new(
                level_from_tracing(metadata.level()),
                &message,
                metadata.target(),
            )
            .with_fields(visitor.fields),
        );
    }
}

/// Install `registry + EnvFilter + FacadeLayer` as the global tracing
/// subscriber. `RUST_LOG` narrows what reaches the façade; the façade's own
/// exclusion set still applies afterwards.
///
/// # Errors
///
/// Returns `LogError::Subscriber` if a global subscriber is already set.
pub fn init_tracing_bridge() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(FacadeLayer::new())
        .try_init()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(level_from_tracing(&tracing::Level::TRACE), Level::Debug);
        assert_eq!(level_from_tracing(&tracing::Level::DEBUG), Level::Debug);
        assert_eq!(level_from_tracing(&tracing::Level::INFO), Level::Info);
        assert_eq!(level_from_tracing(&tracing::Level::WARN), Level::Warning);
        assert_eq!(level_from_tracing(&tracing::Level::ERROR), Level::Error);
    }
}
