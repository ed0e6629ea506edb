//! Manifest aggregation
//!
//! Locates every manifest under a root, decodes it and validates it into a
//! [`PluginManifest`]. The first failing file aborts the whole run.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::decode_manifest;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::locator::locate_manifests;
use crate::manifest::{PluginManifest, ValidationContext};

/// Collect manifests below `root` with default settings
///
/// Component paths are resolved against the working directory.
pub fn collect_manifests(root: &Path) -> Result<Vec<PluginManifest>> {
    ManifestAggregator::new(Config::default()).collect(root)
}

/// Discovery and validation pipeline over one configuration
#[derive(Debug, Clone)]
pub struct ManifestAggregator {
    config: Config,
    context: ValidationContext,
}

impl ManifestAggregator {
    pub fn new(config: Config) -> Self {
        let context = ValidationContext::from_config(&config.validation);
        Self { config, context }
    }

    /// Resolve component paths against `dir` instead of the working directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.context = self.context.with_base_dir(dir);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validated manifests in discovery order
    pub fn collect(&self, root: &Path) -> Result<Vec<PluginManifest>> {
        let paths = locate_manifests(root, &self.config.scan)?;
        debug!("Located {} manifest file(s) under {}", paths.len(), root.display());

        let manifests = paths
            .iter()
            .map(|path| self.load(path))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Collected {} plugin manifest(s) from {}",
            manifests.len(),
            root.display()
        );
        Ok(manifests)
    }

    /// Decode and validate a single manifest file
    pub fn load(&self, path: &Path) -> Result<PluginManifest> {
        let raw = decode_manifest(path)?;
        let manifest =
            PluginManifest::from_raw(raw, &self.context).map_err(|source| CatalogError::Validation {
                manifest: Some(path.to_path_buf()),
                source,
            })?;

        debug!(
            "Validated plugin '{}' ({} component(s)) from {}",
            manifest.name(),
            manifest.components().len(),
            path.display()
        );
        Ok(manifest)
    }
}
