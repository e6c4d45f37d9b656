//! Upward search for the config file.
//!
//! # Search Order
//!
//! ```text
//! /home/me/project/sdks/go   ← start here
//! /home/me/project/sdks
//! /home/me/project           ← first directory holding gen.yaml wins
//! /home/me
//! /
//! ```
//!
//! If no ancestor holds the file, the start directory is designated as the
//! place to create it.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the nearest directory at or above `start` that contains `file_name`.
///
/// A `start` that does not exist is not an error; the search simply continues
/// with its ancestors.
pub fn find_config_dir(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        if dir.join(file_name).is_file() {
            debug!(dir = %dir.display(), file = file_name, "Found config file");
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }

    None
}

/// Returns the directory the loader reads from and writes to.
///
/// This is the directory found by [`find_config_dir`], or `start` itself when
/// no ancestor holds the file.
pub fn resolve_config_dir(start: &Path, file_name: &str) -> PathBuf {
    find_config_dir(start, file_name).unwrap_or_else(|| {
        debug!(dir = %start.display(), file = file_name, "No config file found, designating start directory");
        start.to_path_buf()
    })
}
