//! The `assess` use case: evaluate every asset against the catalog and produce a report.

use anyhow::Context;
use cloudscore_domain::{CancelToken, CheckRegistry};
use cloudscore_settings::{CloudscoreConfigV1, Overrides, ResolvedConfig};
use cloudscore_types::{CloudscoreData, CloudscoreReport, SCHEMA_REPORT_V1, ToolMeta};
use time::OffsetDateTime;

use crate::attribute::register_attribute_checks;

/// Input for the assess use case.
#[derive(Clone, Debug)]
pub struct AssessInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Control catalog JSON.
    pub catalog_text: &'a str,
    /// Asset inventory JSON.
    pub inventory_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Compiled-in checks. Attribute checks from the config are added on top.
    pub registry: CheckRegistry,
}

/// Output from the assess use case.
#[derive(Clone, Debug)]
pub struct AssessOutput {
    pub report: CloudscoreReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
    /// Catalog check ids nothing was registered for.
    pub unresolved: Vec<String>,
}

pub(crate) fn load_config(config_text: &str, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    // Empty is allowed, defaults apply.
    let cfg = if config_text.trim().is_empty() {
        CloudscoreConfigV1::default()
    } else {
        cloudscore_settings::parse_config_toml(config_text).context("parse config")?
    };
    cloudscore_settings::resolve_config(cfg, overrides).context("resolve config")
}

/// Run the assess use case: resolve config, parse catalog and inventory, evaluate, build the report.
///
/// All initialization errors surface before the first check runs.
pub fn run_assessment(input: AssessInput<'_>, cancel: &CancelToken) -> anyhow::Result<AssessOutput> {
    let started_at = OffsetDateTime::now_utc();

    let resolved = load_config(input.config_text, input.overrides)?;
    let catalog =
        cloudscore_settings::parse_catalog_json(input.catalog_text).context("load catalog")?;
    let assets = cloudscore_settings::parse_inventory_json(input.inventory_text)
        .context("load asset inventory")?;

    let mut registry = input.registry;
    register_attribute_checks(&mut registry, &resolved.attribute_checks)?;

    let unresolved: Vec<String> = registry
        .unresolved(&catalog)
        .into_iter()
        .map(str::to_string)
        .collect();
    for check_id in &unresolved {
        tracing::warn!(check_id = %check_id, "no check registered; criteria will report no_check");
    }

    let effective = &resolved.effective;
    tracing::info!(
        profile = %effective.profile,
        assets = assets.len(),
        controls = catalog.controls().len(),
        checks = registry.len(),
        workers = effective.workers,
        "starting assessment"
    );

    let domain = cloudscore_domain::evaluate(&assets, &catalog, &registry, effective, cancel);

    let data = CloudscoreData {
        profile: effective.profile.clone(),
        baseline: effective.scoring.baseline,
        score_floor: effective.scoring.floor,
        controls: domain.controls,
        criteria: domain.criteria,
        assets_evaluated: domain.evaluations.len() as u32,
        assets_cancelled: domain.assets_cancelled,
    };
    if data.assets_cancelled > 0 {
        tracing::warn!(cancelled = data.assets_cancelled, "assessment was cancelled");
    }

    let include_results = effective.include_results;
    let assets = domain
        .evaluations
        .into_iter()
        .map(|e| e.into_asset_score(include_results))
        .collect();

    let report = CloudscoreReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "cloudscore".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        data,
        assets,
    };

    Ok(AssessOutput {
        report,
        resolved_config: resolved,
        unresolved,
    })
}

/// Map scores to an exit code: 2 when any fully evaluated asset scores below `fail_below`, else 0.
///
/// Cancelled assets carry partial scores and are not compared.
pub fn score_exit_code(report: &CloudscoreReport, fail_below: Option<i64>) -> i32 {
    match fail_below {
        Some(threshold)
            if report
                .assets
                .iter()
                .any(|a| !a.cancelled && a.score < threshold) =>
        {
            2
        }
        _ => 0,
    }
}
