//! Config, catalog, and inventory parsing plus profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves inputs provided as strings.

#![forbid(unsafe_code)]

mod catalog;
mod inventory;
mod model;
mod presets;
mod resolve;

pub use catalog::{CatalogFileV1, ControlRecord, CriterionRecord};
pub use inventory::{AssetRecord, InventoryFileV1};
pub use model::{AttributeCheckConfig, CloudscoreConfigV1, ProviderConfig};
pub use resolve::{AttributeCheckSpec, Overrides, ResolvedConfig};

use cloudscore_domain::{Asset, Catalog};

/// Parse `cloudscore.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<CloudscoreConfigV1> {
    let cfg: CloudscoreConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config used by the engine (profiles + overrides + attribute checks).
pub fn resolve_config(
    cfg: CloudscoreConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// Parse and validate a control catalog.
pub fn parse_catalog_json(input: &str) -> anyhow::Result<Catalog> {
    catalog::parse_catalog_json(input)
}

/// Parse an asset inventory produced by discovery.
pub fn parse_inventory_json(input: &str) -> anyhow::Result<Vec<Asset>> {
    inventory::parse_inventory_json(input)
}
