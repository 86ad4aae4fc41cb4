use crate::level::Level;
use chrono::{DateTime, Datelike, Timelike, Utc};
use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

/// Source location of the application code that issued a log call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    /// Placeholder used when no location is known
    pub const UNKNOWN: CallSite = CallSite {
        file: "???",
        line: 0,
    };

    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller, following `#[track_caller]` frames
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), location.line())
    }

    /// Final path segment of the file
    pub fn short_file(&self) -> &'static str {
        match self.file.rfind(['/', '\\']) {
            Some(idx) => &self.file[idx + 1..],
            None => self.file,
        }
    }
}

/// Header settings taken from the logger config
#[derive(Debug, Clone, Copy)]
pub struct HeaderStyle<'a> {
    pub prefix: &'a str,
    pub millis: bool,
}

/// Render the message arguments of a call.
///
/// Runs user `Display` code, so it must not be called with the logger lock held.
pub fn render_message(args: fmt::Arguments<'_>) -> Result<String, fmt::Error> {
    // Plain literals need no formatting pass
    if let Some(s) = args.as_str() {
        return Ok(s.to_string());
    }
    let mut message = String::new();
    fmt::write(&mut message, args)?;
    Ok(message)
}

/// Render one record into `buf`.
///
/// Format: `<prefix>[YYYY-MM-DDTHH:MM:SS[.ffffff]] LEVEL file:line => message\n`.
/// The buffer is appended to, so callers clear it first.
pub fn format_record(
    buf: &mut Vec<u8>,
    style: HeaderStyle<'_>,
    time: &DateTime<Utc>,
    site: &CallSite,
    level: Level,
    message: &str,
) -> io::Result<()> {
    format_header(buf, style, time, site, level)?;

    buf.extend_from_slice(message.as_bytes());
    if !message.ends_with('\n') {
        buf.push(b'\n');
    }
    Ok(())
}

fn format_header(
    buf: &mut Vec<u8>,
    style: HeaderStyle<'_>,
    time: &DateTime<Utc>,
    site: &CallSite,
    level: Level,
) -> io::Result<()> {
    buf.extend_from_slice(style.prefix.as_bytes());

    write!(
        buf,
        "[{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        time.year(),
        time.month(),
        time.day(),
        time.hour(),
        time.minute(),
        time.second()
    )?;
    if style.millis {
        // nanosecond() exceeds 1e9 during a leap second
        let micros = (time.nanosecond() / 1_000).min(999_999);
        write!(buf, ".{:06}", micros)?;
    }
    buf.extend_from_slice(b"] ");

    buf.extend_from_slice(level.as_str().as_bytes());
    buf.push(b' ');

    write!(buf, "{}:{} => ", site.short_file(), site.line)
}
