pub mod aggregator;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod fs_util;
pub mod locator;
pub mod manifest;
pub mod marketplace;

pub use aggregator::{collect_manifests, ManifestAggregator};
pub use catalog::{create_manifest_json, read_catalog, read_manifest_json, write_catalog, Catalog};
pub use codec::{RawCatalog, RawComponentManifest, RawPluginManifest};
pub use config::Config;
pub use error::{CatalogError, EntityKind, Result, ValidationError};
pub use locator::locate_manifests;
pub use manifest::{ComponentManifest, PluginManifest, ValidationContext};
pub use marketplace::{
    create_marketplace_map, write_marketplace_map, ComponentCollision, MarketplaceMap,
};
