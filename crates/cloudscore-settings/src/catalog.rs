use anyhow::Context;
use cloudscore_domain::{Catalog, Control, Criterion};
use cloudscore_types::ids;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Control catalog file, schema v1.
///
/// Also accepts the legacy spelling (`Controls`, `check_function`, `value`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFileV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(alias = "Controls")]
    pub controls: Vec<ControlRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ControlRecord {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub criteria: Vec<CriterionRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CriterionRecord {
    #[serde(alias = "check_function")]
    pub check_id: String,

    pub description: String,

    /// Points subtracted from the baseline when the criterion is not met.
    #[serde(alias = "value")]
    pub impact: u32,
}

pub fn parse_catalog_json(input: &str) -> anyhow::Result<Catalog> {
    let file: CatalogFileV1 = serde_json::from_str(input).context("parse catalog json")?;

    if let Some(schema) = file.schema.as_deref()
        && schema != ids::SCHEMA_CATALOG_V1
    {
        anyhow::bail!(
            "unsupported catalog schema: {schema} (expected {})",
            ids::SCHEMA_CATALOG_V1
        );
    }

    let controls = file
        .controls
        .into_iter()
        .map(|c| Control {
            id: c.id,
            name: c.name.filter(|n| !n.trim().is_empty()),
            description: c.description,
            criteria: c
                .criteria
                .into_iter()
                .map(|cr| Criterion {
                    check_id: cr.check_id,
                    description: cr.description,
                    impact: cr.impact,
                })
                .collect(),
        })
        .collect();

    Catalog::new(controls).context("validate catalog")
}
