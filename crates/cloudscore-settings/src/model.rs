use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `cloudscore.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CloudscoreConfigV1 {
    /// Optional schema string for tooling (`cloudscore.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Score of a fully compliant asset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<i64>,

    /// Lowest reported score. Unset means scores may go negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_floor: Option<i64>,

    /// Per-check deadline in milliseconds; `0` disables the deadline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_timeout_ms: Option<u64>,

    /// Number of assets evaluated concurrently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<u32>,

    /// Keep per-criterion results in the report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_results: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderConfig>,

    /// Map of check_id -> attribute check definition.
    #[serde(default)]
    pub checks: BTreeMap<String, AttributeCheckConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProviderConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Free-form settings handed to checks.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// A check that compares one value inside the asset's discovery payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AttributeCheckConfig {
    /// JSON pointer into the asset details (e.g. `/encryption/enabled`).
    pub pointer: String,

    /// Expected value. When absent the value must exist and be truthy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equals: Option<Value>,

    /// Asset kinds the check applies to; empty means all kinds.
    #[serde(default)]
    pub applies_to: Vec<String>,

    /// Response text used when the asset is not compliant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
