use crate::error::{IlogError, Result};
use crate::fs;
use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Backup names tried before giving up on a rotation
pub const MAX_ROTATE_ATTEMPTS: usize = 16;

const COLLISION_BACKOFF: Duration = Duration::from_millis(1);

/// What happened to the full log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rotation {
    /// Old file removed
    Deleted,
    /// Old file kept under this name
    Renamed(PathBuf),
}

/// Timestamped sibling name for a rotated file.
///
/// `app.log` becomes `app.20200401222430.123.log`; a path not ending in
/// `log` gets the timestamp appended as is.
pub fn backup_path(active: &Path, now: &DateTime<Utc>) -> PathBuf {
    let stamp = now.format("%Y%m%d%H%M%S%.3f").to_string();
    let full = active.as_os_str();

    let mut name = OsString::with_capacity(full.len() + stamp.len() + 4);
    match full.to_str().and_then(|s| s.strip_suffix("log")) {
        Some(stem) => {
            name.push(stem);
            name.push(&stamp);
            name.push(".log");
        }
        None => {
            name.push(full);
            name.push(&stamp);
        }
    }
    PathBuf::from(name)
}

/// Rotate the file at `active`, deleting it or moving it aside
pub fn rotate(active: &Path, backup: bool) -> Result<Rotation> {
    rotate_with_clock(active, backup, Utc::now)
}

/// Rotation with an injectable clock; the clock is sampled once per
/// backup name candidate.
pub fn rotate_with_clock<F>(active: &Path, backup: bool, mut clock: F) -> Result<Rotation>
where
    F: FnMut() -> DateTime<Utc>,
{
    if !backup {
        fs::remove(active).map_err(|e| {
            IlogError::LogRotationError(format!(
                "Failed to remove {}: {}",
                active.display(),
                e
            ))
        })?;
        return Ok(Rotation::Deleted);
    }

    for attempt in 1..=MAX_ROTATE_ATTEMPTS {
        let candidate = backup_path(active, &clock());
        if !fs::exists(&candidate) {
            fs::rename(active, &candidate).map_err(|e| {
                IlogError::LogRotationError(format!(
                    "Failed to rename {} to {}: {}",
                    active.display(),
                    candidate.display(),
                    e
                ))
            })?;
            return Ok(Rotation::Renamed(candidate));
        }

        tracing::warn!(
            "Backup name {} already taken (attempt {}/{})",
            candidate.display(),
            attempt,
            MAX_ROTATE_ATTEMPTS
        );
        std::thread::sleep(COLLISION_BACKOFF);
    }

    Err(IlogError::RotationCollision {
        path: active.to_path_buf(),
        attempts: MAX_ROTATE_ATTEMPTS,
    })
}
