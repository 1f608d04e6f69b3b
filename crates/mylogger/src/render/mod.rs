//! Renderers turn a processed `LogEvent` into one line of output

mod console;
mod json;

pub use console::ConsoleRenderer;
pub use json::JsonRenderer;

use crate::config::LogConfig;
use crate::errors::Result;
use crate::event::LogEvent;
use mylogger_core_types::Format;

/// Final stage of a pipeline
///
/// Implementations append the rendered event to `buf` without a trailing
/// newline; the pipeline terminates the line.
pub trait Renderer: Send + Sync {
    fn render(&self, event: &LogEvent, buf: &mut Vec<u8>) -> Result<()>;
}

/// Select the renderer for a configuration.
pub fn for_config(config: &LogConfig) -> Box<dyn Renderer> {
    match config.format {
        Format::Console => Box::new(ConsoleRenderer::new(config.colors)),
        Format::Json => Box::new(JsonRenderer),
    }
}
