//! Filesystem path checks shared by the locator and component validation.

use std::path::Path;

/// Whether anything exists at `path` (file, directory, or resolvable link)
pub fn exists(path: &Path) -> bool {
    path.exists()
}

/// Whether `path` itself is a directory, without following a final symlink
pub fn is_directory(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|meta| meta.file_type().is_dir())
        .unwrap_or(false)
}
