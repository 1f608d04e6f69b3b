use super::Renderer;
use crate::errors::Result;
use crate::event::LogEvent;
use mylogger_core_types::Level;
use nu_ansi_term::{Color, Style};
use serde_json::Value;
use std::io::Write;

const LEVEL_WIDTH: usize = 8;
const EVENT_WIDTH: usize = 30;

/// Human-oriented lines for interactive terminals
///
/// `2024-05-01T10:00:00.000000Z [info    ] user action                    action=login user_id=123`
///
/// Fields are sorted by key. An error chain, if any, follows on indented
/// lines. No machine-readable contract.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleRenderer {
    colors: bool,
}

impl ConsoleRenderer {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}

fn level_style(level: Level) -> Style {
    match level {
        Level::Debug => Color::Blue.normal(),
        Level::Info => Color::Green.normal(),
        Level::Warning => Color::Yellow.normal(),
        Level::Error => Color::Red.normal(),
        Level::Critical => Color::Red.bold(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&self, event: &LogEvent, buf: &mut Vec<u8>) -> Result<()> {
        if let Some(timestamp) = &event.timestamp {
            write!(buf, "{} ", self.paint(Style::new().dimmed(), timestamp))?;
        }

        let level = format!("{:<width$}", event.level.as_str(), width = LEVEL_WIDTH);
        write!(buf, "[{}] ", self.paint(level_style(event.level), &level))?;

        if event.fields.is_empty() {
            write!(buf, "{}", self.paint(Style::new().bold(), &event.event))?;
        } else {
            let message = format!("{:<width$}", event.event, width = EVENT_WIDTH);
            write!(buf, "{}", self.paint(Style::new().bold(), &message))?;
        }

        let mut fields: Vec<_> = event.fields.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in fields {
            write!(
                buf,
                " {}={}",
                self.paint(Color::Cyan.normal(), key),
                self.paint(Color::Magenta.normal(), &value_text(value))
            )?;
        }

        if let Some(exception) = &event.exception {
            for frame in &exception.chain {
                match (&frame.exc_type, frame.is_cause) {
                    (_, true) => write!(buf, "\n  caused by: {}", frame.exc_value)?,
                    (Some(exc_type), false) => {
                        write!(buf, "\n  {}: {}", exc_type, frame.exc_value)?
                    }
                    (None, false) => write!(buf, "\n  {}", frame.exc_value)?,
                }
            }
        }

        Ok(())
    }
}
