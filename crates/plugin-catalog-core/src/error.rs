use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which kind of record a validation failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Plugin,
    Component,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plugin => write!(f, "PluginManifest"),
            Self::Component => write!(f, "ComponentManifest"),
        }
    }
}

/// Rule violations raised while building validated manifests
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity}{}: {field} is not defined", display_name(.name))]
    MissingField {
        entity: EntityKind,
        name: Option<String>,
        field: &'static str,
    },

    #[error("ComponentManifest => {component}: path '{path}' doesn't have extension '{extension}'")]
    MissingExtension {
        component: String,
        path: String,
        extension: String,
    },

    #[error("ComponentManifest => {component}: file {path} doesn't exist")]
    ComponentNotFound { component: String, path: String },
}

fn display_name(name: &Option<String>) -> String {
    match name {
        Some(name) => format!(" => {name}"),
        None => String::new(),
    }
}

impl ValidationError {
    /// Field the failed rule is attached to
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field, .. } => *field,
            Self::MissingExtension { .. } | Self::ComponentNotFound { .. } => "path",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Dir: {path} doesn't exist")]
    DirectoryNotFound { path: PathBuf },

    /// Unreadable file or malformed JSON; parse failures arrive as `InvalidData`
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid manifest{}: {source}", display_manifest(.manifest))]
    Validation {
        manifest: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Component '{name}' is declared twice: {first} and {second}")]
    DuplicateComponent {
        name: String,
        first: String,
        second: String,
    },

    #[error("Config parse error in {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_manifest(manifest: &Option<PathBuf>) -> String {
    match manifest {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

impl From<ValidationError> for CatalogError {
    fn from(source: ValidationError) -> Self {
        Self::Validation {
            manifest: None,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl CatalogError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DirectoryNotFound { .. } => 2,
            Self::Decode { .. } => 3,
            Self::Validation { .. } => 4,
            Self::DuplicateComponent { .. } => 5,
            Self::Write { .. } => 6,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_without_name() {
        let err = ValidationError::MissingField {
            entity: EntityKind::Plugin,
            name: None,
            field: "name",
        };
        assert_eq!(err.to_string(), "PluginManifest: name is not defined");
    }

    #[test]
    fn missing_field_with_name() {
        let err = ValidationError::MissingField {
            entity: EntityKind::Component,
            name: Some("bar".to_string()),
            field: "title",
        };
        assert_eq!(err.to_string(), "ComponentManifest => bar: title is not defined");
        assert_eq!(err.field(), "title");
    }

    #[test]
    fn validation_error_carries_manifest_path() {
        let err = CatalogError::Validation {
            manifest: Some(PathBuf::from("plugins/foo/manifest.json")),
            source: ValidationError::ComponentNotFound {
                component: "bar".to_string(),
                path: "./bar.ts".to_string(),
            },
        };
        let message = err.to_string();
        assert!(message.contains("plugins/foo/manifest.json"));
        assert!(message.contains("./bar.ts"));
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn directory_not_found_names_path() {
        let err = CatalogError::DirectoryNotFound {
            path: PathBuf::from("/does/not/exist"),
        };
        assert_eq!(err.to_string(), "Dir: /does/not/exist doesn't exist");
        assert_eq!(err.exit_code(), 2);
    }
}
