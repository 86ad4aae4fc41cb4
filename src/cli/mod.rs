// CLI module - Command-line front end for the logger

mod output;

use crate::config::LoggerConfig;
use crate::error::Result;
use crate::level::Level;
use crate::logs::{CallSite, Logger};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub use output::print_error;

const ARGV_SITE: CallSite = CallSite::new("argv", 0);

/// ilog - A minimal leveled logger with size-based rotation
#[derive(Parser)]
#[command(name = "ilog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print the logger's own diagnostics (rotation, directory creation)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write records, from the arguments or one per stdin line
    Write {
        #[command(flatten)]
        logger: LoggerArgs,

        /// Severity of the written records
        #[arg(short, long, default_value = "info", value_parser = parse_level)]
        severity: Level,

        /// Message to write (reads stdin when omitted)
        message: Vec<String>,
    },

    /// Print the effective configuration
    Config {
        #[command(flatten)]
        logger: LoggerArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "toml")]
        format: ConfigFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ConfigFormat {
    Toml,
    Json,
}

/// Logger settings; flags override the config file
#[derive(Args)]
struct LoggerArgs {
    /// Config file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Minimum level written
    #[arg(short, long, value_parser = parse_level)]
    level: Option<Level>,

    /// Log directory (created if missing)
    #[arg(short, long)]
    dir: Option<String>,

    /// Log file name inside the directory
    #[arg(short, long)]
    file: Option<String>,

    /// Prefix written before every record
    #[arg(short, long)]
    prefix: Option<String>,

    /// Rotate the log file at this many bytes (0 disables)
    #[arg(long)]
    rotate_size: Option<u64>,

    /// Delete rotated files instead of keeping timestamped backups
    #[arg(long)]
    no_backup: bool,

    /// Microsecond timestamps
    #[arg(long)]
    millis: bool,

    /// Do not write records to stdout
    #[arg(short, long)]
    quiet: bool,
}

fn parse_level(s: &str) -> std::result::Result<Level, String> {
    s.parse::<Level>().map_err(|e| e.to_string())
}

impl LoggerArgs {
    fn to_config(&self) -> Result<LoggerConfig> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_file(path)?,
            None => LoggerConfig::default(),
        };

        if let Some(level) = self.level {
            config.level = level;
        }
        if let Some(ref dir) = self.dir {
            config.log_dir = dir.clone();
        }
        if let Some(ref file) = self.file {
            config.log_file = file.clone();
        }
        if let Some(ref prefix) = self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(size) = self.rotate_size {
            config.rotate_size = size;
        }
        if self.no_backup {
            config.rotate_backup = false;
        }
        if self.millis {
            config.millisecond_precision = true;
        }
        if self.quiet {
            config.stdout_enabled = false;
        }

        Ok(config)
    }
}

impl Cli {
    /// Run the CLI application
    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        cli.init_tracing();
        cli.execute()
    }

    fn init_tracing(&self) {
        let default = if self.verbose { "ilog=debug" } else { "warn" };
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
            )
            .with_writer(io::stderr)
            .try_init();
    }

    /// Execute the parsed command
    fn execute(self) -> Result<()> {
        match self.command {
            Commands::Write {
                logger,
                severity,
                message,
            } => {
                let logger = Logger::try_new(logger.to_config()?)?;
                if message.is_empty() {
                    write_stdin(&logger, severity)
                } else {
                    write_message(&logger, severity, ARGV_SITE, &message.join(" "))
                }
            }

            Commands::Config { logger, format } => {
                let config = logger.to_config()?;
                config.validate()?;
                let rendered = match format {
                    ConfigFormat::Toml => config.to_toml()?,
                    ConfigFormat::Json => config.to_json()?,
                };
                println!("{}", rendered.trim_end());
                Ok(())
            }
        }
    }
}

/// Records from the command line name their input, not this file:
/// `argv:0` for the message arguments, `stdin:<n>` for input lines.
fn write_message(logger: &Logger, severity: Level, site: CallSite, message: &str) -> Result<()> {
    match severity {
        Level::Fatal => logger.fatal_at(site, format_args!("{}", message)),
        Level::Panic => logger.panic_at(site, format_args!("{}", message)),
        level => logger.log(level, site, format_args!("{}", message)),
    }
}

fn write_stdin(logger: &Logger, severity: Level) -> Result<()> {
    let stdin = io::stdin();
    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        write_message(logger, severity, CallSite::new("stdin", line_no), &line)?;
    }
    Ok(())
}
