//! Filesystem operations
//!
//! Handles directory and symlink operations.

use std::ffi::OsString;
use std::path::Path;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// List the names of the immediate entries of a directory, sorted
pub fn list_dir(path: &Path) -> Result<Vec<OsString>, FilesystemError> {
    let read_err = |e: std::io::Error| FilesystemError::ReadDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    let mut names = std::fs::read_dir(path)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    names.sort();
    Ok(names)
}

/// Create a symbolic link at `link` pointing to `target`
pub fn symlink(target: &Path, link: &Path) -> Result<(), FilesystemError> {
    platform_symlink(target, link).map_err(|e| FilesystemError::Symlink {
        link: link.to_path_buf(),
        target: target.to_path_buf(),
        error: e.to_string(),
    })
}

#[cfg(unix)]
fn platform_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn platform_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
