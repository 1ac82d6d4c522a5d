use anyhow::Context;
use cloudscore_domain::Asset;
use cloudscore_types::{AssetKind, ids};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Asset inventory as emitted by discovery: either `{"assets": [...]}` or a bare array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum InventoryFileV1 {
    Wrapped {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<String>,
        assets: Vec<AssetRecord>,
    },
    Bare(Vec<AssetRecord>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssetRecord {
    pub name: String,

    /// Asset type; provider spellings such as `EC2 Instance` are accepted.
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    #[serde(alias = "cloud")]
    pub provider: String,

    /// Provider payload handed to checks untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
}

pub fn parse_inventory_json(input: &str) -> anyhow::Result<Vec<Asset>> {
    let file: InventoryFileV1 = serde_json::from_str(input).context("parse inventory json")?;

    let records = match file {
        InventoryFileV1::Wrapped { schema, assets } => {
            if let Some(schema) = schema.as_deref()
                && schema != ids::SCHEMA_INVENTORY_V1
            {
                anyhow::bail!(
                    "unsupported inventory schema: {schema} (expected {})",
                    ids::SCHEMA_INVENTORY_V1
                );
            }
            assets
        }
        InventoryFileV1::Bare(assets) => assets,
    };

    let mut seen = BTreeSet::new();
    let mut assets = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            anyhow::bail!("asset #{index} has an empty name");
        }
        let asset = Asset::new(
            record.provider,
            record.name,
            AssetKind::parse_lenient(&record.kind),
        )
        .with_handle(record.details);
        let (provider, name) = asset.identity();
        if !seen.insert((provider.to_string(), name.to_string())) {
            anyhow::bail!("duplicate asset identity: {provider}/{name}");
        }
        assets.push(asset);
    }
    Ok(assets)
}
