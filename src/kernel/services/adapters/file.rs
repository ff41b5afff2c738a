//! Local filesystem implementation of `DocumentFiles`.

use crate::kernel::services::ports::file::{DocumentFiles, FileError, Result};
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFiles;

impl LocalFiles {
    pub fn new() -> Self {
        Self
    }
}

fn map_io(path: &Path, err: io::Error) -> FileError {
    match err.kind() {
        io::ErrorKind::NotFound => FileError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::InvalidData => FileError::InvalidEncoding(path.to_path_buf()),
        _ => FileError::Io(err),
    }
}

impl DocumentFiles for LocalFiles {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        if path.exists() && !path.is_file() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path).map_err(|e| map_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::NotAFile(path.to_path_buf()));
        }
        fs::write(path, content).map_err(|e| map_io(path, e))
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file.rs"]
mod tests;
