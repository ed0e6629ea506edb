//! Validated plugin and component manifests
//!
//! [`PluginManifest`] and [`ComponentManifest`] can only be built from raw
//! records through [`PluginManifest::from_raw`] / [`ComponentManifest::from_raw`],
//! which check every rule in a fixed order and stop at the first violation.
//! They serialize but never deserialize; anything read back from disk goes
//! through the raw records and `from_raw` again.
//!
//! Rule order for a component: `name`, `title`, `version`, `description`
//! (defaults to `""`), `path` present, `path` carries the source extension,
//! `path` exists on disk.
//!
//! Rule order for a plugin: every component first, then `name`, `title`,
//! `version`, `description`, `readme`, `author`, and finally `license`
//! (defaults to the configured license).

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::codec::{RawComponentManifest, RawPluginManifest};
use crate::config::ValidationConfig;
use crate::error::{EntityKind, ValidationError};
use crate::fs_util;

/// Settings the validators check records against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContext {
    source_extension: String,
    default_license: String,
    /// Directory component paths are resolved against; empty means the working directory
    base_dir: PathBuf,
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::from_config(&ValidationConfig::default())
    }
}

impl ValidationContext {
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            source_extension: config.source_extension.clone(),
            default_license: config.default_license.clone(),
            base_dir: PathBuf::new(),
        }
    }

    /// Resolve component paths against `dir` instead of the working directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn default_license(&self) -> &str {
        &self.default_license
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Filesystem location a component `path` refers to
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// A validated plugin component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentManifest {
    name: String,
    title: String,
    version: String,
    description: String,
    path: String,
    image: String,
}

impl ComponentManifest {
    pub fn from_raw(
        raw: RawComponentManifest,
        ctx: &ValidationContext,
    ) -> Result<Self, ValidationError> {
        let name = required(raw.name, EntityKind::Component, None, "name")?;
        let named = |value, field| required(value, EntityKind::Component, Some(&name), field);
        let title = named(raw.title, "title")?;
        let version = named(raw.version, "version")?;
        let description = raw.description.unwrap_or_default();
        let path = named(raw.path, "path")?;

        if !path.contains(ctx.source_extension()) {
            return Err(ValidationError::MissingExtension {
                component: name,
                path,
                extension: ctx.source_extension().to_string(),
            });
        }

        if !fs_util::exists(&ctx.resolve(&path)) {
            return Err(ValidationError::ComponentNotFound {
                component: name,
                path,
            });
        }

        Ok(Self {
            name,
            title,
            version,
            description,
            path,
            image: raw.image.unwrap_or_default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Source path as written in the manifest
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

/// A validated plugin manifest with its components
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginManifest {
    name: String,
    title: String,
    version: String,
    description: String,
    readme: String,
    image: String,
    author: String,
    license: String,
    components: Vec<ComponentManifest>,
}

impl PluginManifest {
    pub fn from_raw(raw: RawPluginManifest, ctx: &ValidationContext) -> Result<Self, ValidationError> {
        let components = raw
            .components
            .into_iter()
            .map(|component| ComponentManifest::from_raw(component, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let name = required(raw.name, EntityKind::Plugin, None, "name")?;
        let named = |value, field| required(value, EntityKind::Plugin, Some(&name), field);
        let title = named(raw.title, "title")?;
        let version = named(raw.version, "version")?;
        let description = named(raw.description, "description")?;
        let readme = named(raw.readme, "readme")?;
        let author = named(raw.author, "author")?;
        let license = raw
            .license
            .filter(|license| !license.is_empty())
            .unwrap_or_else(|| ctx.default_license().to_string());

        Ok(Self {
            name,
            title,
            version,
            description,
            readme,
            image: raw.image.unwrap_or_default(),
            author,
            license,
            components,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn readme(&self) -> &str {
        &self.readme
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn license(&self) -> &str {
        &self.license
    }

    pub fn components(&self) -> &[ComponentManifest] {
        &self.components
    }
}

/// Non-empty string or a `MissingField` naming `field`
fn required(
    value: Option<String>,
    entity: EntityKind,
    name: Option<&String>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ValidationError::MissingField {
            entity,
            name: name.cloned(),
            field,
        }),
    }
}
