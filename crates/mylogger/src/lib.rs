//! mylogger - structured logging with hybrid output
//!
//! This crate provides a small logging façade with:
//! - Two renderers: coloured console lines (default) or one JSON object per line
//! - Level exclusion applied before timestamping and rendering
//! - Ambient key/value context scoped to the current thread or task
//! - Named semantic helpers (`log_start!`, `log_db!`, `log_success!`, ...)
//! - A `tracing` layer routing ordinary tracing events through the same pipeline
//! - Test capture mode for deterministic assertions
//!
//! # Configuration
//!
//! - `MYLOGGER_FORMAT`: `console` or `json`
//! - `MYLOGGER_EXCLUDE`: comma-separated levels to drop (e.g. `debug,info`)
//! - `MYLOGGER_COLORS` / `NO_COLOR`: console colours
//!
//! Variables may also come from a `.env` file. The first emission configures
//! from the environment if `configure` has not been called.
//!
//! # Usage
//!
//! ```rust
//! use mylogger::{configure, log_info, log_start, Overrides};
//!
//! configure(Overrides::new().format("json").exclude(["debug"]));
//!
//! mylogger::bind_context!(request_id = "abc-123");
//! log_start!("import", source = "s3");
//! log_info!("user action", user_id = 123, action = "login");
//! mylogger::clear_context();
//! ```

pub mod config;
pub mod context;
pub mod errors;
pub mod event;
pub mod facade;
pub mod helpers;
pub mod layer;
pub mod logger;
pub mod macros;
pub mod pipeline;
pub mod render;
pub mod test_capture;

pub use config::{load_env_file, LogConfig, Overrides};
pub use context::{
    bind_context, clear_context, context_snapshot, scoped_context, spawn_with_context,
    unbind_context, with_isolated_context,
};
pub use errors::{LogError, Result};
pub use event::{to_field_value, ExceptionInfo, Fields, LogEvent, Record, Tag};
pub use facade::{configure, current, get_logger, init_test_capture, install, is_configured, reset};
pub use helpers::{
    log_completion, log_db, log_debug, log_end, log_error, log_extract, log_info, log_input,
    log_output, log_progress, log_start, log_success, log_warning, logger, Helper,
};
pub use layer::{init_tracing_bridge, FacadeLayer};
pub use logger::Logger;
pub use mylogger_core_types::{Format, Level};
pub use pipeline::Pipeline;
pub use test_capture::TestCapture;
