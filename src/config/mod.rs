use crate::error::{IlogError, Result};
use crate::level::Level;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

/// What a logging call does when a destination write fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteErrorPolicy {
    /// Return the error from the logging call
    #[default]
    Propagate,
    /// Report on stderr and abort the process
    Abort,
}

/// Writable byte stream used as the direct (stdout-style) destination.
///
/// Cloning shares the underlying writer.
#[derive(Clone)]
pub struct Destination {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Destination {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Destination writing to the process's standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Write a whole record and flush it
    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        let mut writer = self.inner.lock();
        writer.write_all(buf)?;
        writer.flush()
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination").finish_non_exhaustive()
    }
}

/// Logger settings. A snapshot of this is used for each record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum severity that is written
    #[serde(default)]
    pub level: Level,

    /// Direct destination, standard output unless replaced
    #[serde(skip)]
    pub stdout: Destination,

    /// Whether records go to the direct destination
    #[serde(default = "default_true")]
    pub stdout_enabled: bool,

    /// Directory of the log file; file output needs both this and `log_file`
    #[serde(default)]
    pub log_dir: String,

    /// Log file name inside `log_dir`
    #[serde(default)]
    pub log_file: String,

    /// Written before the timestamp block of every record
    #[serde(default)]
    pub prefix: String,

    /// Rotate once the file reaches this many bytes (0 disables rotation)
    #[serde(default)]
    pub rotate_size: u64,

    /// Keep rotated files under a timestamped name instead of deleting them
    #[serde(default = "default_true")]
    pub rotate_backup: bool,

    /// Include microseconds in record timestamps
    #[serde(default)]
    pub millisecond_precision: bool,

    #[serde(default)]
    pub write_error_policy: WriteErrorPolicy,
}

fn default_true() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::Debug,
            stdout: Destination::stdout(),
            stdout_enabled: true,
            log_dir: String::new(),
            log_file: String::new(),
            prefix: String::new(),
            rotate_size: 0,
            rotate_backup: true,
            millisecond_precision: false,
            write_error_policy: WriteErrorPolicy::Propagate,
        }
    }
}

impl LoggerConfig {
    /// Full path of the log file, if the file destination is configured
    pub fn file_path(&self) -> Option<PathBuf> {
        if self.log_dir.is_empty() || self.log_file.is_empty() {
            return None;
        }
        Some(Path::new(&self.log_dir).join(&self.log_file))
    }

    /// Load a configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<LoggerConfig> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IlogError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let mut config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(IlogError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.log_dir = trim_dir(&config.log_dir);
        config.validate()?;

        Ok(config)
    }

    pub fn parse_toml(contents: &str) -> Result<LoggerConfig> {
        toml::from_str(contents)
            .map_err(|e| IlogError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    pub fn parse_json(contents: &str) -> Result<LoggerConfig> {
        serde_json::from_str(contents)
            .map_err(|e| IlogError::InvalidConfig(format!("Failed to parse JSON: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self)
            .map_err(|e| IlogError::ConfigError(format!("Failed to serialize TOML: {}", e)))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| IlogError::ConfigError(format!("Failed to serialize JSON: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.log_dir.is_empty() && self.log_dir.trim().is_empty() {
            return Err(IlogError::InvalidConfig(
                "log_dir must not be blank".to_string(),
            ));
        }

        if !self.log_file.is_empty() {
            if self.log_file.trim().is_empty() {
                return Err(IlogError::InvalidConfig(
                    "log_file must not be blank".to_string(),
                ));
            }
            if self.log_file.contains('/') || self.log_file.contains(MAIN_SEPARATOR) {
                return Err(IlogError::InvalidConfig(format!(
                    "log_file must be a bare file name: {}",
                    self.log_file
                )));
            }
        }

        Ok(())
    }
}

/// Strip trailing path separators, keeping a lone root
pub(crate) fn trim_dir(dir: &str) -> String {
    let trimmed = dir.trim_end_matches(['/', MAIN_SEPARATOR]);
    if trimmed.is_empty() && !dir.is_empty() {
        return MAIN_SEPARATOR.to_string();
    }
    trimmed.to_string()
}
