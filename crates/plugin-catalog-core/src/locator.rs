//! Manifest discovery
//!
//! Walks a plugins tree depth-first, siblings sorted by file name, and returns
//! every file whose name contains the manifest marker. The order is therefore
//! the same on every platform and filesystem. Symlinks below the root are never
//! followed; a link is judged by its own name like any other file.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanConfig;
use crate::error::{CatalogError, Result};
use crate::fs_util;

/// Locate manifest files below `root`, in discovery order
pub fn locate_manifests(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(CatalogError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut manifests = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry, &scan.exclude));

    for entry in walker {
        let entry = entry.map_err(walk_error)?;
        if fs_util::is_directory(entry.path()) {
            continue;
        }
        if is_manifest(entry.path(), &scan.marker) {
            debug!("Found manifest: {}", entry.path().display());
            manifests.push(entry.into_path());
        }
    }

    Ok(manifests)
}

/// Whether a file name carries the manifest marker
pub fn is_manifest(path: &Path, marker: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().contains(marker))
        .unwrap_or(false)
}

fn is_excluded(entry: &DirEntry, exclude: &[String]) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    exclude.iter().any(|excluded| *excluded == name)
}

/// A directory that vanished mid-walk is reported like a missing root
fn walk_error(err: walkdir::Error) -> CatalogError {
    let path = err.path().map(Path::to_path_buf);
    classify_io_error(err.into(), path)
}

fn classify_io_error(err: io::Error, path: Option<PathBuf>) -> CatalogError {
    match (err.kind(), path) {
        (io::ErrorKind::NotFound, Some(path)) => CatalogError::DirectoryNotFound { path },
        _ => CatalogError::Io(err),
    }
}
