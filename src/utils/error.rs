//! The `error` module defines the fatal error types of the daemon.
//!
//! Only startup can fail: a configuration that cannot be loaded, a
//! configuration without targets, or a query interface that cannot bind.
//! Errors raised while the pipeline runs are absorbed by the worker that
//! hit them and turned into an `offline` classification or a log line.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No targets configured")]
    NoTargets,

    #[error("Failed to bind query interface on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type AppResult<T> = Result<T, AppError>;
