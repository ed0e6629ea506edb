//! Marketplace map
//!
//! Flattens every component of every plugin into a single
//! `component name -> component path` lookup. Later declarations of a name
//! overwrite earlier ones; each overwrite is kept as a [`ComponentCollision`]
//! so callers can warn or refuse.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::OutputConfig;
use crate::error::{CatalogError, Result};
use crate::manifest::PluginManifest;

/// Two components sharing a name; `path` replaced `previous_path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCollision {
    pub name: String,
    pub previous_path: String,
    pub path: String,
}

/// Component name to source path, in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarketplaceMap {
    entries: IndexMap<String, String>,
    collisions: Vec<ComponentCollision>,
}

impl MarketplaceMap {
    /// Path registered for a component name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_str()))
    }

    /// Overwrites that happened while building the map
    pub fn collisions(&self) -> &[ComponentCollision] {
        &self.collisions
    }

    /// Fail on the first name collision instead of keeping the last path
    pub fn strict(self) -> Result<Self> {
        match self.collisions.first() {
            Some(collision) => Err(CatalogError::DuplicateComponent {
                name: collision.name.clone(),
                first: collision.previous_path.clone(),
                second: collision.path.clone(),
            }),
            None => Ok(self),
        }
    }

    /// `{ "<name>": "<path>", ... }`
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(name, path)| (name.to_string(), Value::from(path)))
                .collect(),
        )
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.entries)?
        } else {
            serde_json::to_string(&self.entries)?
        };
        Ok(json)
    }

    fn insert(&mut self, name: &str, path: &str) {
        if let Some(previous_path) = self.entries.insert(name.to_string(), path.to_string()) {
            warn!(
                "Component '{}' declared more than once: {} replaced by {}",
                name, previous_path, path
            );
            self.collisions.push(ComponentCollision {
                name: name.to_string(),
                previous_path,
                path: path.to_string(),
            });
        }
    }
}

/// Build the name -> path map from plugins in catalog order
pub fn create_marketplace_map(manifests: &[PluginManifest]) -> MarketplaceMap {
    manifests
        .iter()
        .flat_map(PluginManifest::components)
        .fold(MarketplaceMap::default(), |mut map, component| {
            map.insert(component.name(), component.path());
            map
        })
}

/// Persist the map as `marketplace.json` (or the configured name) in `dir`
pub fn write_marketplace_map(
    map: &MarketplaceMap,
    dir: &Path,
    output: &OutputConfig,
) -> Result<PathBuf> {
    let path = dir.join(&output.map_file);
    let content = map.to_json(output.pretty)?;

    fs::write(&path, content).map_err(|source| CatalogError::Write {
        path: path.clone(),
        source,
    })?;

    info!("Wrote {} component(s) to {}", map.len(), path.display());
    Ok(path)
}
