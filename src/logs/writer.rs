use crate::config::Destination;
use crate::error::{IlogError, Result};
use crate::fs;
use crate::logs::rotate::{self, Rotation};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Rotation settings for the file destination
#[derive(Debug, Clone, Copy)]
pub struct RotatePolicy {
    /// Rotate once the file holds at least this many bytes (0 disables)
    pub max_size: u64,
    pub backup: bool,
}

/// Write a formatted record to the direct destination
pub fn write_stdout(dest: &Destination, record: &[u8]) -> Result<()> {
    dest.write_record(record)
        .map_err(|e| IlogError::StdoutError(e.to_string()))
}

/// Append a formatted record to the log file, rotating it first when it
/// has reached the size threshold.
///
/// # Returns
/// * `Ok(Some(rotation))` - The file was rotated before the append
/// * `Ok(None)` - Plain append
/// * `Err(IlogError)` - Directory, open, rotation or write failure
pub fn append_to_file(
    path: &Path,
    policy: RotatePolicy,
    record: &[u8],
) -> Result<Option<Rotation>> {
    // Recreate the directory if it vanished since configuration
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !fs::exists(dir) {
            fs::mkdir_all(dir).map_err(|e| {
                IlogError::LogDirError(format!("{}: {}", dir.display(), e))
            })?;
            tracing::debug!("Created log directory {}", dir.display());
        }
    }

    let mut file = open_file(path)?;
    let mut rotated = None;

    if policy.max_size > 0 {
        let size = fs::size(&file).map_err(|e| {
            IlogError::LogFileError(format!("Failed to stat {}: {}", path.display(), e))
        })?;

        if size >= policy.max_size {
            // Close before rename/remove
            drop(file);
            let rotation = rotate::rotate(path, policy.backup)?;
            tracing::debug!(
                "Rotated {} at {} bytes: {:?}",
                path.display(),
                size,
                rotation
            );
            file = open_file(path)?;
            rotated = Some(rotation);
        }
    }

    file.write_all(record).map_err(|e| {
        IlogError::LogFileError(format!("Failed to write to {}: {}", path.display(), e))
    })?;

    Ok(rotated)
}

fn open_file(path: &Path) -> Result<File> {
    fs::open_for_append(path).map_err(|e| {
        IlogError::LogFileError(format!("Failed to open {}: {}", path.display(), e))
    })
}
