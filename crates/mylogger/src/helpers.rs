//! Named semantic helpers
//!
//! Each helper emits at a fixed level and, for most, adds one fixed tag. The
//! tag key is reserved for that call: a caller field with the same key never
//! replaces it.
//!
//! The `log_*` functions here log through the default `app` logger.

use crate::event::{Fields, Tag};
use crate::logger::Logger;
use mylogger_core_types::schema::{
    COMPONENT_DATABASE, DEFAULT_LOGGER_NAME, DIRECTION_INPUT, DIRECTION_OUTPUT, FIELD_COMPONENT,
    FIELD_DIRECTION, FIELD_OPERATION, FIELD_PHASE, FIELD_STATUS, OPERATION_EXTRACT,
    PHASE_COMPLETE, PHASE_END, PHASE_PROGRESS, PHASE_START, STATUS_SUCCESS,
};
use mylogger_core_types::Level;
use std::sync::OnceLock;

/// Catalogue of semantic helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    Success,
    Error,
    Warning,
    Info,
    Debug,
    Start,
    End,
    Db,
    Progress,
    Completion,
    Extract,
    Input,
    Output,
}

impl Helper {
    pub const ALL: [Helper; 13] = [
        Helper::Success,
        Helper::Error,
        Helper::Warning,
        Helper::Info,
        Helper::Debug,
        Helper::Start,
        Helper::End,
        Helper::Db,
        Helper::Progress,
        Helper::Completion,
        Helper::Extract,
        Helper::Input,
        Helper::Output,
    ];

    pub fn level(&self) -> Level {
        match self {
            Helper::Error => Level::Error,
            Helper::Warning => Level::Warning,
            Helper::Debug => Level::Debug,
            _ => Level::Info,
        }
    }

    pub fn tag(&self) -> Option<Tag> {
        let (key, value) = match self {
            Helper::Success => (FIELD_STATUS, STATUS_SUCCESS),
            Helper::Start => (FIELD_PHASE, PHASE_START),
            Helper::End => (FIELD_PHASE, PHASE_END),
            Helper::Db => (FIELD_COMPONENT, COMPONENT_DATABASE),
            Helper::Progress => (FIELD_PHASE, PHASE_PROGRESS),
            Helper::Completion => (FIELD_PHASE, PHASE_COMPLETE),
            Helper::Extract => (FIELD_OPERATION, OPERATION_EXTRACT),
            Helper::Input => (FIELD_DIRECTION, DIRECTION_INPUT),
            Helper::Output => (FIELD_DIRECTION, DIRECTION_OUTPUT),
            Helper::Error | Helper::Warning | Helper::Info | Helper::Debug => return None,
        };
        Some(Tag { key, value })
    }
}

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The `app` logger used by the module-level helpers.
///
/// The pipeline is looked up at each emission, so reconfiguring affects this
/// logger immediately.
pub fn logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(|| Logger::new(DEFAULT_LOGGER_NAME))
}

/// Status update: `status=success`, info level
pub fn log_success(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Success, msg, fields);
}

/// Error level, no tag
pub fn log_error(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Error, msg, fields);
}

/// Warning level, no tag
pub fn log_warning(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Warning, msg, fields);
}

/// Info level, no tag
pub fn log_info(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Info, msg, fields);
}

/// Debug level, no tag
pub fn log_debug(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Debug, msg, fields);
}

/// Operation start: `phase=start`
pub fn log_start(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Start, msg, fields);
}

/// Operation end: `phase=end`
pub fn log_end(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::End, msg, fields);
}

/// Database operation: `component=database`
pub fn log_db(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Db, msg, fields);
}

/// Progress: `phase=progress`
pub fn log_progress(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Progress, msg, fields);
}

/// Completion: `phase=complete`
pub fn log_completion(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Completion, msg, fields);
}

/// Data extraction: `operation=extract`
pub fn log_extract(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Extract, msg, fields);
}

/// Incoming request: `direction=input`
pub fn log_input(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Input, msg, fields);
}

/// Outgoing response: `direction=output`
pub fn log_output(msg: impl AsRef<str>, fields: Fields) {
    logger().helper(Helper::Output, msg, fields);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(Helper::Error.level(), Level::Error);
        assert_eq!(Helper::Warning.level(), Level::Warning);
        assert_eq!(Helper::Debug.level(), Level::Debug);
        for helper in [Helper::Success, Helper::Info, Helper::Start, Helper::Db, Helper::Output] {
            assert_eq!(helper.level(), Level::Info);
        }
    }

    #[test]
    fn test_catalogue_tags() {
        let tag = |h: Helper| h.tag().map(|t| (t.key, t.value));
        assert_eq!(tag(Helper::Success), Some(("status", "success")));
        assert_eq!(tag(Helper::Start), Some(("phase", "start")));
        assert_eq!(tag(Helper::End), Some(("phase", "end")));
        assert_eq!(tag(Helper::Db), Some(("component", "database")));
        assert_eq!(tag(Helper::Progress), Some(("phase", "progress")));
        assert_eq!(tag(Helper::Completion), Some(("phase", "complete")));
        assert_eq!(tag(Helper::Extract), Some(("operation", "extract")));
        assert_eq!(tag(Helper::Input), Some(("direction", "input")));
        assert_eq!(tag(Helper::Output), Some(("direction", "output")));
        assert_eq!(tag(Helper::Error), None);
        assert_eq!(tag(Helper::Warning), None);
        assert_eq!(tag(Helper::Info), None);
        assert_eq!(tag(Helper::Debug), None);
    }

    #[test]
    fn test_default_logger_name() {
        assert_eq!(logger().name(), "app");
    }
}
