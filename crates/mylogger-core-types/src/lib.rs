//! Core types shared across the mylogger crates
//!
//! This crate provides the vocabulary used by the logging façade:
//!
//! - **Levels**: `Level` with lenient, case-insensitive parsing
//! - **Formats**: `Format` selecting the console or JSON renderer
//! - **Schema constants**: Canonical field keys and semantic tags

pub mod format;
pub mod level;
pub mod schema;

pub use format::{Format, ParseFormatError};
pub use level::{Level, ParseLevelError};
