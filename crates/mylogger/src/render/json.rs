use super::Renderer;
use crate::errors::Result;
use crate::event::LogEvent;
use mylogger_core_types::schema::{FIELD_EVENT, FIELD_EXCEPTION, FIELD_LEVEL, FIELD_TIMESTAMP};
use serde::ser::{SerializeMap, Serializer};

/// One flat JSON object per event
///
/// `event`, `level` and `timestamp` come first, then the merged fields in key
/// order, then `exception` when the event carries an error chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, event: &LogEvent, buf: &mut Vec<u8>) -> Result<()> {
        let mut serializer = serde_json::Serializer::new(buf);
        let mut map = serializer.serialize_map(None)?;

        map.serialize_entry(FIELD_EVENT, &event.event)?;
        map.serialize_entry(FIELD_LEVEL, event.level.as_str())?;
        if let Some(timestamp) = &event.timestamp {
            map.serialize_entry(FIELD_TIMESTAMP, timestamp)?;
        }
        for (key, value) in &event.fields {
            map.serialize_entry(key, value)?;
        }
        if let Some(exception) = &event.exception {
            map.serialize_entry(FIELD_EXCEPTION, exception)?;
        }

        map.end()?;
        Ok(())
    }
}
