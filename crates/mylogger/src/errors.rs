use thiserror::Error;

/// Result type alias using LogError
pub type Result<T> = std::result::Result<T, LogError>;

/// Failures inside the façade
///
/// None of these reach callers of the emission API: renderer and sink errors
/// are discarded inside `Pipeline::emit`. They surface from
/// `LogConfig::try_from_env`, `load_env_file`, `Pipeline::render` and
/// `init_tracing_bridge`.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to write log line: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize log event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to read logging configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("failed to install tracing bridge: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
