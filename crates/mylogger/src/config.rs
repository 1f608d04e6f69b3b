//! Configuration resolution
//!
//! A `LogConfig` is resolved from `MYLOGGER_*` environment variables (and a
//! `.env` file, if present) and then patched with explicit `Overrides`.
//! Resolution never fails on this path: unreadable values fall back to their
//! defaults and unknown formats degrade to JSON.

use crate::errors::Result;
use crate::event::{to_field_value, Fields};
use config::{Config, ConfigError, Environment};
use mylogger_core_types::{Format, Level};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Once;

/// Prefix of every environment variable read by the resolver
pub const ENV_PREFIX: &str = "MYLOGGER";

const KEY_FORMAT: &str = "format";
const KEY_EXCLUDE: &str = "exclude";
const KEY_COLORS: &str = "colors";
const NO_COLOR: &str = "NO_COLOR";

static DOTENV_ONCE: Once = Once::new();

/// Immutable configuration of one pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    pub format: Format,
    /// Lowercased level names whose events are dropped
    pub excluded_levels: BTreeSet<String>,
    /// ANSI colours in console output
    pub colors: bool,
    /// Fields attached to every event unless the event already has the key
    pub static_fields: Fields,
    /// The raw value when an unrecognised format degraded to JSON
    pub format_fallback: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: Format::Console,
            excluded_levels: BTreeSet::new(),
            colors: true,
            static_fields: Fields::new(),
            format_fallback: None,
        }
    }
}

impl LogConfig {
    /// Resolve from the process environment, falling back to defaults for
    /// anything missing or unreadable.
    pub fn from_env() -> Self {
        load_dotenv();
        let mut config =
            Self::from_source(Environment::with_prefix(ENV_PREFIX), false).unwrap_or_default();
        if std::env::var_os(NO_COLOR).is_some() {
            config.colors = false;
        }
        config
    }

    /// Resolve from the process environment, reporting unreadable values.
    ///
    /// # Errors
    ///
    /// Returns `LogError::Config` if the environment source cannot be read or
    /// `MYLOGGER_COLORS` is not a boolean.
    pub fn try_from_env() -> Result<Self> {
        load_dotenv();
        let mut config = Self::from_source(Environment::with_prefix(ENV_PREFIX), true)?;
        if std::env::var_os(NO_COLOR).is_some() {
            config.colors = false;
        }
        Ok(config)
    }

    /// Resolve from an explicit set of variables instead of the process
    /// environment. Keys use the same names as the environment
    /// (`MYLOGGER_FORMAT`, `MYLOGGER_EXCLUDE`, `MYLOGGER_COLORS`, `NO_COLOR`).
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let no_color = vars.contains_key(NO_COLOR);
        let source = Environment::with_prefix(ENV_PREFIX).source(Some(vars));
        let mut config = Self::from_source(source, false).unwrap_or_default();
        if no_color {
            config.colors = false;
        }
        config
    }

    /// Environment defaults patched with explicit overrides.
    pub fn resolve(overrides: Overrides) -> Self {
        Self::from_env().apply(overrides)
    }

    /// Apply explicit overrides on top of this configuration.
    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(format) = overrides.format {
            self.set_format(&format);
        }
        if let Some(exclude) = overrides.exclude {
            self.excluded_levels = parse_excluded_levels(exclude);
        }
        if let Some(colors) = overrides.colors {
            self.colors = colors;
        }
        self.static_fields.extend(overrides.static_fields);
        self
    }

    pub fn is_excluded(&self, level: Level) -> bool {
        self.excluded_levels.contains(level.as_str())
    }

    fn set_format(&mut self, raw: &str) {
        self.format = Format::parse_lossy(raw);
        self.format_fallback = match raw.parse::<Format>() {
            Ok(_) => None,
            Err(_) => Some(raw.to_string()),
        };
    }

    fn from_source(source: Environment, strict: bool) -> Result<Self> {
        let settings = Config::builder().add_source(source).build()?;
        let mut config = Self::default();

        if let Some(raw) = lookup(settings.get_string(KEY_FORMAT), strict)? {
            // An empty variable counts as unset.
            if !raw.trim().is_empty() {
                config.set_format(&raw);
            }
        }
        if let Some(raw) = lookup(settings.get_string(KEY_EXCLUDE), strict)? {
            config.excluded_levels = parse_excluded_levels(raw.split(','));
        }
        if let Some(colors) = lookup(settings.get_bool(KEY_COLORS), strict)? {
            config.colors = colors;
        }
        Ok(config)
    }
}

fn lookup<T>(value: std::result::Result<T, ConfigError>, strict: bool) -> Result<Option<T>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(_) if !strict => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Load variables from an env file into the process environment. Variables
/// already set in the environment keep their values.
///
/// The working directory's `.env` is loaded automatically on first
/// resolution; this loads any other file.
///
/// # Errors
///
/// Returns `LogError::EnvFile` if the file is missing or malformed.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<()> {
    dotenvy::from_path(path)?;
    Ok(())
}

fn load_dotenv() {
    DOTENV_ONCE.call_once(|| {
        // Missing .env is the normal case
        let _ = dotenvy::dotenv();
    });
}

/// Normalise a list of level names into an exclusion set.
///
/// Entries are trimmed and lowercased, empty entries are ignored, and known
/// aliases map to their canonical name (`WARN` excludes `warning`). Unknown
/// names are kept as written, lowercased.
pub fn parse_excluded_levels<I, S>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    entries
        .into_iter()
        .filter_map(|entry| {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                return None;
            }
            Some(match entry.parse::<Level>() {
                Ok(level) => level.as_str().to_string(),
                Err(_) => entry.to_ascii_lowercase(),
            })
        })
        .collect()
}

/// Explicit arguments to `configure`; anything left unset comes from the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    format: Option<String>,
    exclude: Option<Vec<String>>,
    colors: Option<bool>,
    static_fields: Fields,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any string; see `Format::parse_lossy`.
    pub fn format(mut self, format: impl AsRef<str>) -> Self {
        self.format = Some(format.as_ref().to_string());
        self
    }

    pub fn exclude<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = Some(levels.into_iter().map(|l| l.as_ref().to_string()).collect());
        self
    }

    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn static_field<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Self {
        self.static_fields.insert(key.into(), to_field_value(value));
        self
    }
}
