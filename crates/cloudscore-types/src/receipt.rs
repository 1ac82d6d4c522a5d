use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for cloudscore reports.
pub const SCHEMA_REPORT_V1: &str = "cloudscore.report.v1";

/// Outcome classification for one `(asset, criterion)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NotCompliant,
    NotApplicable,
    /// No check is wired for the criterion (unregistered or to be implemented).
    NoCheck,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NotCompliant => "not_compliant",
            ComplianceStatus::NotApplicable => "not_applicable",
            ComplianceStatus::NoCheck => "no_check",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Compute,
    ObjectStore,
    Database,
    Network,
    Identity,
    #[default]
    Other,
}

impl AssetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Compute => "compute",
            AssetKind::ObjectStore => "object_store",
            AssetKind::Database => "database",
            AssetKind::Network => "network",
            AssetKind::Identity => "identity",
            AssetKind::Other => "other",
        }
    }

    /// Lenient parse used for inventory input; accepts a few provider spellings.
    pub fn parse_lenient(s: &str) -> AssetKind {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "compute" | "ec2_instance" | "instance" | "vm" => AssetKind::Compute,
            "object_store" | "s3_bucket" | "bucket" => AssetKind::ObjectStore,
            "database" | "rds_instance" | "db" => AssetKind::Database,
            "network" | "vpc" | "security_group" => AssetKind::Network,
            "identity" | "iam_user" | "iam_role" => AssetKind::Identity,
            _ => AssetKind::Other,
        }
    }
}

/// Report-side identity of an asset. The provider handle never leaves the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssetRef {
    pub provider: String,
    pub name: String,
    pub kind: AssetKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComplianceResult {
    pub control_id: String,
    pub check_id: String,
    pub description: String,
    pub status: ComplianceStatus,
    pub response: String,

    /// Points subtracted from the baseline. Zero unless `status` is `not_compliant`.
    pub impact: u32,

    /// Stable identifier for dedup and trending across runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StatusCounts {
    pub compliant: u32,
    pub not_compliant: u32,
    pub not_applicable: u32,
    pub no_check: u32,
}

impl StatusCounts {
    pub fn from_results(results: &[ComplianceResult]) -> Self {
        let mut counts = StatusCounts::default();
        for r in results {
            counts.record(r.status);
        }
        counts
    }

    pub fn record(&mut self, status: ComplianceStatus) {
        match status {
            ComplianceStatus::Compliant => self.compliant += 1,
            ComplianceStatus::NotCompliant => self.not_compliant += 1,
            ComplianceStatus::NotApplicable => self.not_applicable += 1,
            ComplianceStatus::NoCheck => self.no_check += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.compliant + self.not_compliant + self.not_applicable + self.no_check
    }
}

/// One row of the report: an asset and its score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AssetScore {
    pub asset: AssetRef,
    pub score: i64,
    pub counts: StatusCounts,

    /// The evaluation was stopped before every criterion ran.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,

    /// Per-criterion results in catalog order (omitted when detail is disabled).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ComplianceResult>,
}

/// Cloudscore-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CloudscoreData {
    pub profile: String,
    pub baseline: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_floor: Option<i64>,

    pub controls: u32,
    pub criteria: u32,

    pub assets_evaluated: u32,
    #[serde(default)]
    pub assets_cancelled: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// A generic report envelope.
///
/// Keeping this generic allows embedding tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = CloudscoreData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub data: TData,
    pub assets: Vec<AssetScore>,
}

pub type CloudscoreReport = ReportEnvelope<CloudscoreData>;

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: ComplianceStatus) -> ComplianceResult {
        ComplianceResult {
            control_id: "03.01.01".to_string(),
            check_id: "CheckUsersPolicies".to_string(),
            description: "accounts are managed".to_string(),
            status,
            response: String::new(),
            impact: 0,
            fingerprint: None,
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&ComplianceStatus::NotCompliant).expect("serialize");
        assert_eq!(json, "\"not_compliant\"");
        let back: ComplianceStatus = serde_json::from_str("\"no_check\"").expect("parse");
        assert_eq!(back, ComplianceStatus::NoCheck);
    }

    #[test]
    fn counts_cover_every_status() {
        let results = vec![
            result(ComplianceStatus::Compliant),
            result(ComplianceStatus::NotCompliant),
            result(ComplianceStatus::NotCompliant),
            result(ComplianceStatus::NoCheck),
        ];
        let counts = StatusCounts::from_results(&results);
        assert_eq!(counts.compliant, 1);
        assert_eq!(counts.not_compliant, 2);
        assert_eq!(counts.not_applicable, 0);
        assert_eq!(counts.no_check, 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn lenient_kind_parse_accepts_provider_spellings() {
        assert_eq!(AssetKind::parse_lenient("EC2 Instance"), AssetKind::Compute);
        assert_eq!(AssetKind::parse_lenient("S3 Bucket"), AssetKind::ObjectStore);
        assert_eq!(AssetKind::parse_lenient("object-store"), AssetKind::ObjectStore);
        assert_eq!(AssetKind::parse_lenient("lambda"), AssetKind::Other);
    }

    #[test]
    fn asset_score_omits_empty_detail_and_false_cancel() {
        let row = AssetScore {
            asset: AssetRef {
                provider: "aws".to_string(),
                name: "i-123".to_string(),
                kind: AssetKind::Compute,
            },
            score: 110,
            counts: StatusCounts::default(),
            cancelled: false,
            results: Vec::new(),
        };
        let value = serde_json::to_value(&row).expect("serialize");
        assert!(value.get("results").is_none());
        assert!(value.get("cancelled").is_none());
        assert_eq!(value["asset"]["kind"], "compute");
    }
}
