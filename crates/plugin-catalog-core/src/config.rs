use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};

pub const CONFIG_FILE: &str = "plugin-catalog.toml";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# plugin-catalog configuration file
# Location: <plugins root>/plugin-catalog.toml

[scan]
# Substring of a file name that marks it as a plugin manifest
marker = "manifest.json"

# Directory names never descended into while scanning
# Default: []
# Example: exclude = ["node_modules", ".git"]
exclude = []

[validation]
# Substring every component path must contain
source_extension = ".ts"

# License used when a manifest leaves it empty
default_license = "MIT"

[output]
# File written into the output directory by `build`
catalog_file = "manifests.json"

# File written when the marketplace map is persisted
map_file = "marketplace.json"

# Pretty-print written JSON
pretty = false
"#;

/// Global configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Manifest discovery settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// File name substring identifying a manifest
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Directory names to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Record validation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_license")]
    pub default_license: String,
}

/// Artifact settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    #[serde(default = "default_map_file")]
    pub map_file: String,

    #[serde(default)]
    pub pretty: bool,
}

fn default_marker() -> String {
    "manifest.json".to_string()
}

fn default_source_extension() -> String {
    ".ts".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_catalog_file() -> String {
    "manifests.json".to_string()
}

fn default_map_file() -> String {
    "marketplace.json".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            exclude: Vec::new(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            source_extension: default_source_extension(),
            default_license: default_license(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            map_file: default_map_file(),
            pretty: false,
        }
    }
}

impl Config {
    /// Load config from an explicit file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| CatalogError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load `plugin-catalog.toml` from a plugins root
    pub fn load_from_root(root: &Path) -> Result<Self> {
        Self::load(&Self::path(root))
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self).map_err(|e| CatalogError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        fs::write(path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(dir: &Path) -> Result<PathBuf> {
        let path = Self::path(dir);
        fs::create_dir_all(dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "scan.marker" => Some(self.scan.marker.clone()),
            "scan.exclude" => Some(format!("{:?}", self.scan.exclude)),
            "validation.source_extension" => Some(self.validation.source_extension.clone()),
            "validation.default_license" => Some(self.validation.default_license.clone()),
            "output.catalog_file" => Some(self.output.catalog_file.clone()),
            "output.map_file" => Some(self.output.map_file.clone()),
            "output.pretty" => Some(self.output.pretty.to_string()),
            _ => None,
        }
    }

    /// Set a config value by dot-notation key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "scan.marker" => self.scan.marker = value.trim().to_string(),
            "scan.exclude" => self.scan.exclude = parse_string_list(value),
            "validation.source_extension" => {
                self.validation.source_extension = value.trim().to_string()
            }
            "validation.default_license" => {
                self.validation.default_license = value.trim().to_string()
            }
            "output.catalog_file" => self.output.catalog_file = value.trim().to_string(),
            "output.map_file" => self.output.map_file = value.trim().to_string(),
            "output.pretty" => {
                self.output.pretty =
                    value
                        .trim()
                        .parse()
                        .map_err(|_| CatalogError::ConfigParse {
                            path: PathBuf::from(key),
                            message: format!("expected true or false, got '{value}'"),
                        })?
            }
            _ => {
                return Err(CatalogError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        [
            "scan.marker",
            "scan.exclude",
            "validation.source_extension",
            "validation.default_license",
            "output.catalog_file",
            "output.map_file",
            "output.pretty",
        ]
        .iter()
        .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
        .collect()
    }
}

/// Parse a comma-separated or JSON-like list string
fn parse_string_list(value: &str) -> Vec<String> {
    let trimmed = value.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|s| s.trim().trim_matches('"').trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_string_list_comma() {
        let result = parse_string_list("node_modules,.git");
        assert_eq!(result, vec!["node_modules", ".git"]);
    }

    #[test]
    fn test_parse_string_list_json() {
        let result = parse_string_list(r#"["node_modules", ".git"]"#);
        assert_eq!(result, vec!["node_modules", ".git"]);
    }

    #[test]
    fn test_parse_string_list_empty() {
        assert!(parse_string_list("[]").is_empty());
    }

    #[test]
    fn test_defaults_match_pipeline_conventions() {
        let config = Config::default();
        assert_eq!(config.scan.marker, "manifest.json");
        assert!(config.scan.exclude.is_empty());
        assert_eq!(config.validation.source_extension, ".ts");
        assert_eq!(config.validation.default_license, "MIT");
        assert_eq!(config.output.catalog_file, "manifests.json");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_config_get_set() {
        let mut config = Config::default();

        config.set("scan.exclude", "node_modules,dist").unwrap();
        assert_eq!(config.scan.exclude, vec!["node_modules", "dist"]);

        config.set("output.pretty", "true").unwrap();
        assert!(config.output.pretty);

        let value = config.get("scan.exclude").unwrap();
        assert!(value.contains("node_modules"));
    }

    #[test]
    fn test_set_rejects_unknown_key_and_bad_bool() {
        let mut config = Config::default();

        assert!(matches!(
            config.set("scan.depth", "3"),
            Err(CatalogError::ConfigKeyNotFound { .. })
        ));
        assert!(matches!(
            config.set("output.pretty", "sometimes"),
            Err(CatalogError::ConfigParse { .. })
        ));
        assert!(config.get("scan.depth").is_none());
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = Config::init(tmp.path()).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_save_then_load_from_root() {
        let tmp = TempDir::new().unwrap();
        let mut config = Config::default();
        config.validation.default_license = "Apache-2.0".to_string();
        config.save(&Config::path(tmp.path())).unwrap();

        let loaded = Config::load_from_root(tmp.path()).unwrap();
        assert_eq!(loaded.validation.default_license, "Apache-2.0");
    }

    #[test]
    fn test_missing_file_yields_defaults_and_bad_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(
            Config::load_from_root(tmp.path()).unwrap(),
            Config::default()
        );

        fs::write(Config::path(tmp.path()), "[scan\nmarker = ").unwrap();
        assert!(matches!(
            Config::load_from_root(tmp.path()),
            Err(CatalogError::ConfigParse { .. })
        ));
    }
}
