//! Canonical schema constants for structured log events
//!
//! These constants keep the JSON wire shape and the semantic helper tags
//! consistent across the façade, the renderers and the tracing bridge.

// Reserved keys written by the pipeline itself
pub const FIELD_EVENT: &str = "event";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_EXCEPTION: &str = "exception";

// Static fields
pub const FIELD_LOGGER: &str = "logger";

// Semantic tag keys
pub const FIELD_STATUS: &str = "status";
pub const FIELD_PHASE: &str = "phase";
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OPERATION: &str = "operation";
pub const FIELD_DIRECTION: &str = "direction";

// Semantic tag values
pub const STATUS_SUCCESS: &str = "success";
pub const PHASE_START: &str = "start";
pub const PHASE_END: &str = "end";
pub const PHASE_PROGRESS: &str = "progress";
pub const PHASE_COMPLETE: &str = "complete";
pub const COMPONENT_DATABASE: &str = "database";
pub const OPERATION_EXTRACT: &str = "extract";
pub const DIRECTION_INPUT: &str = "input";
pub const DIRECTION_OUTPUT: &str = "output";

/// Name of the logger used by the module-level helpers.
pub const DEFAULT_LOGGER_NAME: &str = "app";

/// Keys the pipeline owns. Caller-supplied fields with these names are dropped.
pub const RESERVED_FIELDS: [&str; 4] = [FIELD_EVENT, FIELD_LEVEL, FIELD_TIMESTAMP, FIELD_EXCEPTION];

/// Returns true if `key` is owned by the pipeline.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_FIELDS.contains(&key)
}
