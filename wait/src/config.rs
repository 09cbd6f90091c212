//! Wait configuration.
//!
//! # Example YAML
//!
//! ```yaml
//! timeout_ms: 30000
//! interval_ms: 500
//! ```

use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default overall budget for one wait.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default delay between probe attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// Poller timing, in milliseconds so it reads naturally from YAML.
///
/// Missing keys fall back to [`DEFAULT_TIMEOUT`] and [`DEFAULT_INTERVAL`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use v8_args_wait::WaitConfig;
///
/// let config: WaitConfig = serde_yaml::from_str("interval_ms: 250").unwrap();
/// assert_eq!(config.interval(), Duration::from_millis(250));
/// assert_eq!(config.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitConfig {
    /// Overall deadline, measured from the start of the wait.
    pub timeout_ms: u64,
    /// Delay between probe attempts.
    pub interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            interval_ms: DEFAULT_INTERVAL.as_millis() as u64,
        }
    }
}

impl WaitConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::WaitError::IoError) if the file cannot be
    /// read, or [`YamlError`](crate::WaitError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::WaitError;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms: 30000\ninterval_ms: 500").unwrap();

        let config = WaitConfig::load(file.path()).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = WaitConfig::load("/definitely/not/here.yml").unwrap_err();
        assert!(matches!(err, WaitError::IoError(_)));
    }

    #[test]
    fn test_load_invalid_yaml_is_yaml_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_ms: [not a number]").unwrap();
        let err = WaitConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, WaitError::YamlError(_)));
    }

    #[test]
    fn test_defaults() {
        let config = WaitConfig::default();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.interval(), DEFAULT_INTERVAL);
    }
}
