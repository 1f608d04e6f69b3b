//! In-memory output capture for deterministic logging assertions
//!
//! `TestCapture` is a `MakeWriter`: hand it to `Pipeline::with_writer` (or
//! use `Pipeline::with_capture`) and read the rendered lines back.

use serde_json::Value;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Handle for accessing captured output
#[derive(Clone, Debug, Default)]
pub struct TestCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

/// Writer handed out by `TestCapture::make_writer`
#[derive(Debug)]
pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("capture buffer poisoned"))?;
        buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for TestCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: self.buffer.clone(),
        }
    }
}

impl TestCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far
    pub fn output(&self) -> String {
        self.buffer
            .lock()
            .map(|b| String::from_utf8_lossy(&b).into_owned())
            .unwrap_or_default()
    }

    /// Non-empty output lines, in write order
    pub fn lines(&self) -> Vec<String> {
        self.output()
            .lines()
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Output lines that parse as JSON objects
    pub fn json_lines(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .filter(Value::is_object)
            .collect()
    }

    /// Count JSON events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&Value) -> bool,
    {
        self.json_lines().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that a JSON event with the given `event` message was written
    ///
    /// # Panics
    ///
    /// Panics if no such event is found
    pub fn assert_event_exists(&self, event: &str) {
        let events = self.json_lines();
        let found = events.iter().any(|e| e["event"] == event);
        assert!(
            found,
            "Expected event {:?} not found in {} captured events",
            event,
            events.len()
        );
    }

    /// Discard everything captured so far
    pub fn clear(&self) {
        self.buffer.lock().map(|mut b| b.clear()).ok();
    }
}
