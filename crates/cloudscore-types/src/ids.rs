//! Stable identifiers and response texts.
//!
//! Reserved check ids are catalog markers, never registered as checks.

/// Criterion declared but not applicable to any asset.
pub const CHECK_NOT_APPLICABLE: &str = "//";

/// Criterion whose check has not been written yet.
pub const CHECK_TO_BE_IMPLEMENTED: &str = "TBI";

pub const RESERVED_CHECK_IDS: [&str; 2] = [CHECK_NOT_APPLICABLE, CHECK_TO_BE_IMPLEMENTED];

pub fn is_reserved_check_id(id: &str) -> bool {
    RESERVED_CHECK_IDS.contains(&id)
}

// Responses
pub const RESPONSE_CHECK_PASSED: &str = "Check passed";
pub const RESPONSE_NO_CHECK: &str = "not applicable";
pub const RESPONSE_NOT_APPLICABLE: &str = "check not applicable";
pub const RESPONSE_TO_BE_IMPLEMENTED: &str = "check to be implemented";

/// Score of an asset with no non-compliant results.
pub const DEFAULT_BASELINE: i64 = 110;

// Schemas
pub const SCHEMA_CONFIG_V1: &str = "cloudscore.config.v1";
pub const SCHEMA_CATALOG_V1: &str = "cloudscore.catalog.v1";
pub const SCHEMA_INVENTORY_V1: &str = "cloudscore.inventory.v1";
