//! Error types for readiness waiting.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`Poller::wait_ready`](crate::Poller::wait_ready) and
/// config loading.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The deadline elapsed before any probe succeeded.
    #[error("{target} not ready after {timeout:?} ({attempts} probe attempt(s))")]
    TimedOut {
        target: String,
        timeout: Duration,
        attempts: u32,
        #[source]
        last_error: Option<io::Error>,
    },

    /// The caller cancelled the wait.
    #[error("waiting for {target} was cancelled")]
    Cancelled { target: String },

    /// Config file I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Config file parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`WaitError`].
pub type Result<T> = std::result::Result<T, WaitError>;
