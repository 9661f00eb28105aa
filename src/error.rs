//! Error types for QuantumSink
//!
//! Sink write paths return [`std::io::Result`] so that destination failures
//! reach the caller exactly as the destination reported them. Everything
//! around the sinks (configuration, the global facade) uses
//! [`QuantumSinkError`].

use thiserror::Error;

/// Main error type for QuantumSink operations
#[derive(Error, Debug)]
pub enum QuantumSinkError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    ConfigFileMissing(String),

    /// A prefix that cannot head a log line
    #[error("Invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    /// The global logger was initialized twice
    #[error("Logger already initialized")]
    AlreadyInitialized,

    /// A thread panicked while holding a global handle
    #[error("Log handle poisoned: {0}")]
    HandlePoisoned(&'static str),

    /// I/O errors (file operations, destination streams)
    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlError {
        #[from]
        source: toml::de::Error,
    },

    /// Layered configuration (file + environment) errors
    #[error("Configuration source error: {source}")]
    ConfigSourceError {
        #[from]
        source: ::config::ConfigError,
    },
}

/// Result type alias for QuantumSink operations
pub type Result<T> = std::result::Result<T, QuantumSinkError>;

impl QuantumSinkError {
    /// Create a new invalid prefix error
    pub fn invalid_prefix<P: Into<String>, R: Into<String>>(prefix: P, reason: R) -> Self {
        Self::InvalidPrefix {
            prefix: prefix.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IoError { .. })
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigFileMissing(_)
            | Self::InvalidPrefix { .. }
            | Self::ConfigSourceError { .. } => "config",
            Self::AlreadyInitialized => "initialization",
            Self::HandlePoisoned(_) => "handle",
            Self::IoError { .. } => "io",
            Self::TomlError { .. } => "toml",
        }
    }
}
