//! CLI commands

pub mod build;
pub mod new;
pub mod watch;

use std::fs;
use std::path::Path;

/// Create a directory and its parents
///
/// Failures are logged and swallowed; a later write into the directory
/// reports the real problem.
pub(crate) fn ensure_dir(dir: &Path) {
    if let Err(e) = fs::create_dir_all(dir) {
        tracing::error!("Failed to create directory {:?}: {}", dir, e);
    }
}
