use crate::config::{self, Destination, LoggerConfig, WriteErrorPolicy};
use crate::error::{IlogError, Result};
use crate::fs;
use crate::level::Level;
use crate::logs::format::{self, CallSite, HeaderStyle};
use crate::logs::writer::{self, RotatePolicy};
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt;
use std::path::{Path, PathBuf};

/// Leveled logger writing single-line records to stdout and/or a file.
///
/// All state sits behind one lock held for the whole header, write and
/// rotate sequence of a call, so records from different threads never
/// interleave. Share it with `Arc<Logger>`.
pub struct Logger {
    inner: Mutex<Inner>,
}

struct Inner {
    config: LoggerConfig,
    /// Scratch buffer reused by every record
    buf: Vec<u8>,
}

impl Logger {
    /// Create a logger from a config as is
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                config,
                buf: Vec::with_capacity(256),
            }),
        }
    }

    /// Create a logger after validating the config and creating its
    /// log directory
    pub fn try_new(mut config: LoggerConfig) -> Result<Self> {
        config.validate()?;
        if !config.log_dir.is_empty() {
            config.log_dir = config::trim_dir(&config.log_dir);
            ensure_dir(Path::new(&config.log_dir))?;
        }
        Ok(Self::new(config))
    }

    /// Create a logger from a TOML or JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::try_new(LoggerConfig::from_file(path)?)
    }

    /// Replace the whole configuration
    pub fn set_config(&self, config: LoggerConfig) {
        self.inner.lock().config = config;
    }

    /// Snapshot of the current configuration
    pub fn config(&self) -> LoggerConfig {
        self.inner.lock().config.clone()
    }

    /// Full path of the log file, if file output is configured
    pub fn file_path(&self) -> Option<PathBuf> {
        self.inner.lock().config.file_path()
    }

    /// Whether a record at `level` would be written
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.inner.lock().config.level
    }

    pub fn set_level(&self, level: Level) {
        self.inner.lock().config.level = level;
    }

    /// Replace the direct destination (standard output by default)
    pub fn set_stdout(&self, dest: Destination) {
        self.inner.lock().config.stdout = dest;
    }

    pub fn set_stdout_enabled(&self, enabled: bool) {
        self.inner.lock().config.stdout_enabled = enabled;
    }

    /// Set the log directory, creating it if it does not exist.
    ///
    /// Trailing separators are trimmed. An empty string is rejected and the
    /// previous directory is kept.
    pub fn set_log_dir(&self, dir: &str) -> Result<()> {
        if dir.is_empty() {
            return Err(IlogError::InvalidArgument("log dir is empty".to_string()));
        }
        ensure_dir(Path::new(dir))?;

        self.inner.lock().config.log_dir = config::trim_dir(dir);
        Ok(())
    }

    /// Set the log file name. An empty string is rejected.
    pub fn set_log_file(&self, file: &str) -> Result<()> {
        if file.is_empty() {
            return Err(IlogError::InvalidArgument("log file is empty".to_string()));
        }

        self.inner.lock().config.log_file = file.to_string();
        Ok(())
    }

    pub fn set_prefix(&self, prefix: &str) {
        self.inner.lock().config.prefix = prefix.to_string();
    }

    /// Size in bytes at which the log file is rotated; 0 disables rotation
    pub fn set_rotate_size(&self, size: u64) {
        self.inner.lock().config.rotate_size = size;
    }

    /// Keep rotated files (true) or delete them (false)
    pub fn set_rotate_backup(&self, enabled: bool) {
        self.inner.lock().config.rotate_backup = enabled;
    }

    pub fn set_millisecond_precision(&self, enabled: bool) {
        self.inner.lock().config.millisecond_precision = enabled;
    }

    pub fn set_write_error_policy(&self, policy: WriteErrorPolicy) {
        self.inner.lock().config.write_error_policy = policy;
    }

    /// Write one record at `level`.
    ///
    /// Records below the configured level are dropped before any
    /// formatting. The message is rendered before the lock is taken, so a
    /// `Display` impl may itself log through this logger. Every enabled
    /// destination is attempted; the first failure is returned, or the
    /// process aborts under `WriteErrorPolicy::Abort`.
    pub fn log(&self, level: Level, site: CallSite, message: fmt::Arguments<'_>) -> Result<()> {
        if !self.enabled(level) {
            return Ok(());
        }
        let message = format::render_message(message).map_err(|_| IlogError::MessageFormat)?;
        self.write_record(level, site, &message)
    }

    fn write_record(&self, level: Level, site: CallSite, message: &str) -> Result<()> {
        let mut guard = self.inner.lock();
        // Level may have changed while the message was rendered
        if level < guard.config.level {
            return Ok(());
        }

        let now = Utc::now();
        let Inner { config, buf } = &mut *guard;

        buf.clear();
        let style = HeaderStyle {
            prefix: &config.prefix,
            millis: config.millisecond_precision,
        };
        format::format_record(buf, style, &now, &site, level, message)?;

        let result = fan_out(config, buf);
        if let Err(ref e) = result {
            if config.write_error_policy == WriteErrorPolicy::Abort {
                eprintln!("ilog: aborting on write failure: {}", e);
                std::process::abort();
            }
        }
        result
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) -> Result<()> {
        self.log(Level::Debug, CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Debug, CallSite::caller(), args)
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) -> Result<()> {
        self.log(Level::Info, CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Info, CallSite::caller(), args)
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) -> Result<()> {
        self.log(Level::Warn, CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Warn, CallSite::caller(), args)
    }

    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) -> Result<()> {
        self.log(Level::Error, CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log(Level::Error, CallSite::caller(), args)
    }

    /// Write a FATAL record, then exit the process with status 1
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) -> ! {
        self.fatal_at(CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal_at(CallSite::caller(), args)
    }

    /// Write a FATAL record for an explicit call site, then exit with status 1.
    ///
    /// The exit happens even if the record was filtered out or failed to write.
    pub fn fatal_at(&self, site: CallSite, args: fmt::Arguments<'_>) -> ! {
        if let Err(e) = self.log(Level::Fatal, site, args) {
            eprintln!("ilog: failed to write fatal record: {}", e);
        }
        std::process::exit(1)
    }

    /// Write a PANIC record, then panic with the message as payload
    #[track_caller]
    pub fn panic(&self, msg: impl fmt::Display) -> ! {
        self.panic_at(CallSite::caller(), format_args!("{}", msg))
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.panic_at(CallSite::caller(), args)
    }

    /// Write a PANIC record for an explicit call site, then unwind with the
    /// formatted message (a `String`) as the panic payload.
    pub fn panic_at(&self, site: CallSite, args: fmt::Arguments<'_>) -> ! {
        let message = match format::render_message(args) {
            Ok(message) => message,
            Err(_) => IlogError::MessageFormat.to_string(),
        };
        if let Err(e) = self.write_record(Level::Panic, site, &message) {
            eprintln!("ilog: failed to write panic record: {}", e);
        }
        std::panic::panic_any(message)
    }
}

impl Default for Logger {
    /// DEBUG level, standard output only
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.inner.lock().config)
            .finish()
    }
}

/// Send the record to every enabled destination, attempting all of them
fn fan_out(config: &LoggerConfig, record: &[u8]) -> Result<()> {
    let mut first_err = None;

    if config.stdout_enabled {
        if let Err(e) = writer::write_stdout(&config.stdout, record) {
            first_err.get_or_insert(e);
        }
    }

    if let Some(path) = config.file_path() {
        let policy = RotatePolicy {
            max_size: config.rotate_size,
            backup: config.rotate_backup,
        };
        if let Err(e) = writer::append_to_file(&path, policy, record) {
            first_err.get_or_insert(e);
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if fs::exists(dir) {
        return Ok(());
    }
    fs::mkdir_all(dir)
        .map_err(|e| IlogError::LogDirError(format!("{}: {}", dir.display(), e)))?;
    tracing::debug!("Created log directory {}", dir.display());
    Ok(())
}
