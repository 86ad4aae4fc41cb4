use crate::error::IlogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Log severity, totally ordered from `Debug` to `Panic`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Level {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
    Fatal = 4,
    Panic = 5,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Name as it appears in a record
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Panic => "PANIC",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = IlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            "PANIC" => Ok(Level::Panic),
            _ => Err(IlogError::InvalidArgument(format!(
                "Unknown level: {}. Must be one of: debug, info, warn, error, fatal, panic",
                s
            ))),
        }
    }
}

impl TryFrom<String> for Level {
    type Error = IlogError;

    fn try_from(value: String) -> Result<Self, IlogError> {
        value.parse()
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        level.as_str().to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        for pair in Level::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Level::Debug as u8, 0);
        assert_eq!(Level::Panic as u8, 5);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" Panic ".parse::<Level>().unwrap(), Level::Panic);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(Level::try_from("error".to_string()).unwrap(), Level::Error);
        assert!(matches!(
            Level::try_from("loud".to_string()),
            Err(IlogError::InvalidArgument(_))
        ));
        assert_eq!(String::from(Level::Fatal), "fatal");
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Level::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(names, ["DEBUG", "INFO", "WARN", "ERROR", "FATAL", "PANIC"]);
    }
}
