// Filesystem primitives used by the logger's file destination

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

/// Check whether a path exists
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Create a directory and all missing parents
pub fn mkdir_all(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}

/// Open a file for appending, creating it if absent
pub fn open_for_append(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Current size in bytes of an open file
pub fn size(file: &File) -> io::Result<u64> {
    file.metadata().map(|m| m.len())
}

pub fn rename(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to)
}

pub fn remove(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
