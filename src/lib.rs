// Library exports for the ilog structured logger

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod level;
pub mod logs;
mod macros;

pub use config::{Destination, LoggerConfig, WriteErrorPolicy};
pub use error::{IlogError, Result};
pub use level::Level;
pub use logs::{CallSite, Logger};
