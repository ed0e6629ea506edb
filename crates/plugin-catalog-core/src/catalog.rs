//! Combined catalog artifact (`manifests.json`)
//!
//! Reading a catalog back re-runs validation on every entry, so a hand-edited
//! or stale file never yields manifests that [`PluginManifest::from_raw`]
//! would have refused.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::codec::{decode_catalog, encode_catalog};
use crate::config::OutputConfig;
use crate::error::{CatalogError, Result};
use crate::manifest::{PluginManifest, ValidationContext};

/// `{ "manifests": [...] }` as written to disk
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Catalog<'a> {
    pub manifests: &'a [PluginManifest],
}

impl<'a> Catalog<'a> {
    pub fn new(manifests: &'a [PluginManifest]) -> Self {
        Self { manifests }
    }
}

/// Write `manifests.json` into `dir` with default output settings
pub fn create_manifest_json(manifests: &[PluginManifest], dir: &Path) -> Result<PathBuf> {
    write_catalog(manifests, dir, &OutputConfig::default())
}

/// Write the catalog into `dir`, replacing any previous file
pub fn write_catalog(
    manifests: &[PluginManifest],
    dir: &Path,
    output: &OutputConfig,
) -> Result<PathBuf> {
    let path = dir.join(&output.catalog_file);
    let content = encode_catalog(&Catalog::new(manifests), output.pretty)?;

    fs::write(&path, content).map_err(|source| CatalogError::Write {
        path: path.clone(),
        source,
    })?;

    info!("Wrote {} manifest(s) to {}", manifests.len(), path.display());
    Ok(path)
}

/// Read `manifests.json` from `dir`, resolving component paths against the
/// working directory
pub fn read_manifest_json(dir: &Path) -> Result<Vec<PluginManifest>> {
    read_catalog(
        &dir.join(OutputConfig::default().catalog_file),
        &ValidationContext::default(),
    )
}

/// Read a catalog file and validate each entry against `ctx`
pub fn read_catalog(path: &Path, ctx: &ValidationContext) -> Result<Vec<PluginManifest>> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let manifests = decode_catalog(&content, path)?
        .manifests
        .into_iter()
        .map(|raw| PluginManifest::from_raw(raw, ctx))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|source| CatalogError::Validation {
            manifest: Some(path.to_path_buf()),
            source,
        })?;

    debug!("Read {} manifest(s) from {}", manifests.len(), path.display());
    Ok(manifests)
}
