//! Filesystem primitives used by the publish assembler.
//!
//! These are generic copy/move/remove operations over UTF-8 paths. Copies
//! overwrite their destination; directory copies recurse.

use crate::error::{Result, SoyoError};
use camino::Utf8Path;
use log::trace;
use std::fs;
use std::io;

/// Remove a file or directory tree when it exists.
///
/// # Errors
///
/// Returns an error when removal fails for a reason other than absence.
pub fn remove_if_exists(path: &Utf8Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    trace!("remove {path}");
    if path.is_dir() {
        fs::remove_dir_all(path)?;
    } else {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Copy a file or directory tree, replacing any existing destination.
///
/// Parent directories of the destination are created as needed.
///
/// # Errors
///
/// Returns an error when the destination cannot be cleared or the copy fails.
pub fn force_copy(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    remove_if_exists(to)?;
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    copy_recursive(from, to)
}

/// Recursively copy a file or directory tree.
///
/// # Errors
///
/// Returns an error when any directory or file copy fails.
pub fn copy_recursive(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    if from.is_dir() {
        fs::create_dir_all(to)?;
        for name in read_dir_names(from)? {
            copy_recursive(&from.join(&name), &to.join(&name))?;
        }
        return Ok(());
    }

    trace!("copy {from} to {to}");
    fs::copy(from, to)?;
    Ok(())
}

/// Move a file or directory tree into a new location.
///
/// Falls back to copy-and-remove when a rename is not possible (for example
/// across filesystems).
///
/// # Errors
///
/// Returns an error when both the rename and the fallback copy fail.
pub fn move_entry(from: &Utf8Path, to: &Utf8Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    trace!("move {from} to {to}");
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    copy_recursive(from, to)?;
    remove_if_exists(from)
}

/// List the entry names of a directory, sorted for deterministic iteration.
///
/// # Errors
///
/// Returns an error when the directory cannot be read or an entry name is
/// not valid UTF-8.
pub fn read_dir_names(dir: &Utf8Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().into_string().map_err(|name| {
            SoyoError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non-UTF-8 entry {name:?} in {dir}"),
            ))
        })?;
        names.push(name);
    }
    names.sort_unstable();
    Ok(names)
}
