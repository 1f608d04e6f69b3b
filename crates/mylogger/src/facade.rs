//! Process-wide pipeline
//!
//! The active pipeline lives in one atomically swappable slot. `configure`
//! builds a complete pipeline first and then swaps it in, so concurrent
//! emitters see either the old or the new pipeline, never a mix. The first
//! emission on an empty slot installs a default pipeline resolved from the
//! environment; threads racing on an empty slot wait for that one pipeline.

use crate::config::{LogConfig, Overrides};
use crate::event::Record;
use crate::fields;
use crate::logger::Logger;
use crate::pipeline::Pipeline;
use crate::test_capture::TestCapture;
use arc_swap::ArcSwapOption;
use mylogger_core_types::Level;
use std::sync::{Arc, Mutex, PoisonError};

pub(crate) const FACADE_LOGGER: &str = "mylogger";

static PIPELINE: ArcSwapOption<Pipeline> = ArcSwapOption::const_empty();

// Held while building the default pipeline so the environment is read once
static FIRST_USE: Mutex<()> = Mutex::new(());

/// Resolve a configuration (overrides first, environment second) and make it
/// the active pipeline for every subsequent emission.
pub fn configure(overrides: Overrides) -> Arc<Pipeline> {
    install(Pipeline::new(LogConfig::resolve(overrides)))
}

/// Make a ready-built pipeline the active one.
pub fn install(pipeline: Pipeline) -> Arc<Pipeline> {
    let pipeline = Arc::new(pipeline);
    PIPELINE.store(Some(pipeline.clone()));
    warn_on_format_fallback(&pipeline);
    pipeline
}

/// Configure like `configure`, but capture output in memory.
pub fn init_test_capture(overrides: Overrides) -> TestCapture {
    let (pipeline, capture) = Pipeline::with_capture(LogConfig::resolve(overrides));
    install(pipeline);
    capture
}

pub fn is_configured() -> bool {
    PIPELINE.load().is_some()
}

/// Forget the active pipeline. The next emission configures from the
/// environment again.
pub fn reset() {
    PIPELINE.store(None);
}

/// The active pipeline, configuring with defaults on first use.
pub fn current() -> Arc<Pipeline> {
    if let Some(pipeline) = PIPELINE.load_full() {
        return pipeline;
    }

    let _guard = FIRST_USE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(pipeline) = PIPELINE.load_full() {
        return pipeline;
    }
    let pipeline = Arc::new(Pipeline::new(LogConfig::from_env()));
    // An explicit `configure` may land while the default is being built
    let previous = PIPELINE.compare_and_swap(&None::<Arc<Pipeline>>, Some(pipeline.clone()));
    if let Some(configured) = &*previous {
        return configured.clone();
    }
    warn_on_format_fallback(&pipeline);
    pipeline
}

/// A named logger. Ensures the façade is configured.
pub fn get_logger(name: impl Into<String>) -> Logger {
    current();
    Logger::new(name)
}

fn warn_on_format_fallback(pipeline: &Pipeline) {
    if let Some(raw) = &pipeline.config().format_fallback {
        pipeline.emit(
            Record::new(
                Level::Warning,
                "unrecognized log format, falling back to json",
                FACADE_LOGGER,
            )
            .with_fields(fields! { format = raw }),
        );
    }
}
