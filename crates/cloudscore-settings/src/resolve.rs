use crate::{model::CloudscoreConfigV1, presets};
use anyhow::Context;
use cloudscore_domain::{EffectiveConfig, ProviderContext};
use cloudscore_types::{AssetKind, ids};
use serde_json::Value;
use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub baseline: Option<i64>,
    pub score_floor: Option<i64>,
    pub workers: Option<u32>,
    pub check_timeout_ms: Option<u64>,
}

/// A validated attribute check, ready to be registered.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeCheckSpec {
    pub id: String,
    pub pointer: String,
    pub equals: Option<Value>,
    /// Empty means every kind.
    pub applies_to: Vec<AssetKind>,
    pub message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
    pub attribute_checks: Vec<AttributeCheckSpec>,
}

pub fn resolve_config(
    cfg: CloudscoreConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != ids::SCHEMA_CONFIG_V1
    {
        anyhow::bail!(
            "unsupported config schema: {schema} (expected {})",
            ids::SCHEMA_CONFIG_V1
        );
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "default".to_string());

    let mut effective = presets::preset(&profile).with_context(|| {
        format!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        )
    })?;

    if let Some(baseline) = overrides.baseline.or(cfg.baseline) {
        effective.scoring.baseline = baseline;
    }

    if let Some(floor) = overrides.score_floor.or(cfg.score_floor) {
        effective.scoring.floor = Some(floor);
    }

    // The floor may come from the profile while the baseline comes from a later layer.
    if let Some(floor) = effective.scoring.floor
        && floor > effective.scoring.baseline
    {
        anyhow::bail!(
            "score_floor {floor} is above the baseline {}",
            effective.scoring.baseline
        );
    }

    if let Some(ms) = overrides.check_timeout_ms.or(cfg.check_timeout_ms) {
        effective.check_timeout = (ms > 0).then(|| Duration::from_millis(ms));
    }

    if let Some(workers) = overrides.workers.or(cfg.workers) {
        if workers == 0 {
            anyhow::bail!("workers must be at least 1");
        }
        effective.workers = workers as usize;
    }

    if let Some(include) = cfg.include_results {
        effective.include_results = include;
    }

    if let Some(provider) = cfg.provider {
        if provider.name.trim().is_empty() {
            anyhow::bail!("provider.name must not be empty");
        }
        effective.provider = ProviderContext {
            provider: provider.name,
            region: provider.region,
            options: provider.options,
        };
    }

    let mut attribute_checks = Vec::with_capacity(cfg.checks.len());
    for (check_id, cc) in cfg.checks {
        let spec = validate_attribute_check(&check_id, cc)
            .with_context(|| format!("invalid check definition for {check_id}"))?;
        attribute_checks.push(spec);
    }

    Ok(ResolvedConfig {
        effective,
        attribute_checks,
    })
}

fn validate_attribute_check(
    check_id: &str,
    cc: crate::model::AttributeCheckConfig,
) -> anyhow::Result<AttributeCheckSpec> {
    if ids::is_reserved_check_id(check_id) {
        anyhow::bail!("check id '{check_id}' is reserved");
    }
    if !cc.pointer.is_empty() && !cc.pointer.starts_with('/') {
        anyhow::bail!(
            "pointer must be empty or start with '/': {}",
            cc.pointer
        );
    }
    let applies_to = cc
        .applies_to
        .iter()
        .map(|k| parse_kind(k))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(AttributeCheckSpec {
        id: check_id.to_string(),
        pointer: cc.pointer,
        equals: cc.equals,
        applies_to,
        message: cc.message,
    })
}

fn parse_kind(v: &str) -> anyhow::Result<AssetKind> {
    match v {
        "compute" => Ok(AssetKind::Compute),
        "object_store" => Ok(AssetKind::ObjectStore),
        "database" => Ok(AssetKind::Database),
        "network" => Ok(AssetKind::Network),
        "identity" => Ok(AssetKind::Identity),
        "other" => Ok(AssetKind::Other),
        other => anyhow::bail!(
            "unknown asset kind: {other} (expected compute|object_store|database|network|identity|other)"
        ),
    }
}
