//! The `checks` use case: which catalog check ids resolve to an implementation.

use anyhow::Context;
use cloudscore_domain::CheckRegistry;
use cloudscore_settings::Overrides;
use cloudscore_types::ids;

use crate::assess::load_config;
use crate::attribute::register_attribute_checks;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoverageStatus {
    Registered,
    /// `//` or `TBI`.
    Marker,
    Missing,
}

impl CoverageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CoverageStatus::Registered => "registered",
            CoverageStatus::Marker => "marker",
            CoverageStatus::Missing => "missing",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckCoverage {
    pub check_id: String,
    pub status: CoverageStatus,
    /// Criteria in the catalog using this id.
    pub uses: usize,
}

/// List every catalog check id (sorted) with its resolution status.
pub fn run_coverage(
    config_text: &str,
    catalog_text: &str,
    overrides: Overrides,
    registry: CheckRegistry,
) -> anyhow::Result<Vec<CheckCoverage>> {
    let resolved = load_config(config_text, overrides)?;
    let catalog = cloudscore_settings::parse_catalog_json(catalog_text).context("load catalog")?;

    let mut registry = registry;
    register_attribute_checks(&mut registry, &resolved.attribute_checks)?;

    Ok(catalog
        .check_ids()
        .into_iter()
        .map(|id| {
            let status = if ids::is_reserved_check_id(id) {
                CoverageStatus::Marker
            } else if registry.contains(id) {
                CoverageStatus::Registered
            } else {
                CoverageStatus::Missing
            };
            let uses = catalog
                .criteria()
                .filter(|(_, criterion)| criterion.check_id == id)
                .count();
            CheckCoverage {
                check_id: id.to_string(),
                status,
                uses,
            }
        })
        .collect())
}
