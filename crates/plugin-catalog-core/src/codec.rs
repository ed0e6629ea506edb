//! Record codec
//!
//! Reads manifest files into untyped wire records and encodes the aggregated
//! catalog back to JSON text. Nothing here enforces manifest rules; see
//! [`crate::manifest`] for the validated types.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Plugin manifest exactly as written on disk (every field optional)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPluginManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub license: Option<String>,

    /// Declared sub-components; absent means none
    #[serde(default)]
    pub components: Vec<RawComponentManifest>,
}

/// Component entry exactly as written inside a plugin manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComponentManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Catalog file as read back from disk, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub manifests: Vec<RawPluginManifest>,
}

/// Read and decode a manifest file
pub fn decode_manifest(path: &Path) -> Result<RawPluginManifest> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    decode_from(&content, path)
}

/// Decode a manifest from a string
pub fn decode_manifest_str(content: &str) -> Result<RawPluginManifest> {
    decode_from(content, Path::new("<string>"))
}

fn decode_from<T: serde::de::DeserializeOwned>(content: &str, origin: &Path) -> Result<T> {
    serde_json::from_str(content).map_err(|e| CatalogError::Decode {
        path: origin.to_path_buf(),
        source: e.into(),
    })
}

/// Encode a catalog as `{ "manifests": [...] }`
pub fn encode_catalog(catalog: &Catalog<'_>, pretty: bool) -> Result<String> {
    let encoded = if pretty {
        serde_json::to_string_pretty(catalog)?
    } else {
        serde_json::to_string(catalog)?
    };
    Ok(encoded)
}

/// Decode catalog text produced by [`encode_catalog`] into raw records
pub fn decode_catalog(content: &str, origin: &Path) -> Result<RawCatalog> {
    decode_from(content, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn sample_manifest_json() -> &'static str {
        r#"{
            "name": "foo",
            "title": "Foo",
            "version": "1.0.0",
            "description": "Foo plugin",
            "readme": "README.md",
            "image": "",
            "author": "someone",
            "license": "Apache-2.0",
            "homepage": "https://example.com",
            "components": [
                {
                    "name": "bar",
                    "title": "Bar",
                    "version": "0.1.0",
                    "path": "./components/bar.ts",
                    "image": "bar.png"
                }
            ]
        }"#
    }

    #[test]
    fn test_decode_manifest_str_ignores_unknown_fields() {
        let raw = decode_manifest_str(sample_manifest_json()).unwrap();

        assert_eq!(raw.name.as_deref(), Some("foo"));
        assert_eq!(raw.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(raw.components.len(), 1);
        assert_eq!(raw.components[0].description, None);
        assert_eq!(
            raw.components[0].path.as_deref(),
            Some("./components/bar.ts")
        );
    }

    #[test]
    fn test_decode_missing_components_is_empty() {
        let raw = decode_manifest_str(r#"{ "name": "baz" }"#).unwrap();
        assert!(raw.components.is_empty());
        assert_eq!(raw.title, None);
    }

    #[test]
    fn test_decode_null_field_is_absent() {
        let raw = decode_manifest_str(r#"{ "name": "baz", "license": null }"#).unwrap();
        assert_eq!(raw.license, None);
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        match decode_manifest_str("{ \"name\": ").unwrap_err() {
            CatalogError::Decode { path, source } => {
                assert_eq!(path, PathBuf::from("<string>"));
                assert_eq!(source.kind(), std::io::ErrorKind::UnexpectedEof);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_rejects_wrong_field_type() {
        let err = decode_manifest_str(r#"{ "name": 42 }"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode { .. }));
    }

    #[test]
    fn test_decode_catalog_keeps_records_unchecked() {
        let raw = decode_catalog(
            r#"{"manifests":[{"name":"","components":[{"path":"/nope/missing.js"}]}]}"#,
            Path::new("manifests.json"),
        )
        .unwrap();

        assert_eq!(raw.manifests.len(), 1);
        assert_eq!(raw.manifests[0].name.as_deref(), Some(""));
        assert_eq!(
            raw.manifests[0].components[0].path.as_deref(),
            Some("/nope/missing.js")
        );
    }

    #[test]
    fn test_decode_catalog_without_manifests_is_empty() {
        let raw = decode_catalog("{}", Path::new("manifests.json")).unwrap();
        assert!(raw.manifests.is_empty());
    }

    #[test]
    fn test_decode_manifest_reports_file_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("manifest.json");
        fs::write(&path, "not json").unwrap();

        match decode_manifest(&path).unwrap_err() {
            CatalogError::Decode { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_manifest_missing_file_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let err = decode_manifest(&tmp.path().join("manifest.json")).unwrap_err();
        match err {
            CatalogError::Decode { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
