use anyhow::Context;
use cloudscore_render::{
    RenderableAsset, RenderableCounts, RenderableReport, RenderableResult, RenderableStatus,
};
use cloudscore_types::{AssetScore, CloudscoreReport, ComplianceResult, ComplianceStatus, SCHEMA_REPORT_V1};

pub fn parse_report_json(text: &str) -> anyhow::Result<CloudscoreReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema}");
    }

    serde_json::from_value(value).context("parse cloudscore v1 report")
}

pub fn serialize_report(report: &CloudscoreReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &CloudscoreReport) -> RenderableReport {
    RenderableReport {
        profile: report.data.profile.clone(),
        baseline: report.data.baseline,
        score_floor: report.data.score_floor,
        controls: report.data.controls,
        criteria: report.data.criteria,
        assets: report.assets.iter().map(renderable_asset).collect(),
    }
}

fn renderable_asset(a: &AssetScore) -> RenderableAsset {
    RenderableAsset {
        name: a.asset.name.clone(),
        provider: a.asset.provider.clone(),
        kind: a.asset.kind.as_str().to_string(),
        score: a.score,
        counts: RenderableCounts {
            compliant: a.counts.compliant,
            not_compliant: a.counts.not_compliant,
            not_applicable: a.counts.not_applicable,
            no_check: a.counts.no_check,
        },
        cancelled: a.cancelled,
        results: a.results.iter().map(renderable_result).collect(),
    }
}

fn renderable_result(r: &ComplianceResult) -> RenderableResult {
    RenderableResult {
        control_id: r.control_id.clone(),
        check_id: r.check_id.clone(),
        description: r.description.clone(),
        status: match r.status {
            ComplianceStatus::Compliant => RenderableStatus::Compliant,
            ComplianceStatus::NotCompliant => RenderableStatus::NotCompliant,
            ComplianceStatus::NotApplicable => RenderableStatus::NotApplicable,
            ComplianceStatus::NoCheck => RenderableStatus::NoCheck,
        },
        response: r.response.clone(),
        impact: r.impact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudscore_types::{AssetKind, AssetRef, CloudscoreData, StatusCounts, ToolMeta};
    use time::macros::datetime;

    fn report() -> CloudscoreReport {
        let results = vec![ComplianceResult {
            control_id: "03.01.01".to_string(),
            check_id: "CheckMFA".to_string(),
            description: "MFA enabled".to_string(),
            status: ComplianceStatus::NotCompliant,
            response: "MFA disabled".to_string(),
            impact: 5,
            fingerprint: None,
        }];
        CloudscoreReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "cloudscore".to_string(),
                version: "0.0.0".to_string(),
            },
            started_at: datetime!(2026-01-01 00:00 UTC),
            finished_at: datetime!(2026-01-01 00:00:01 UTC),
            data: CloudscoreData {
                profile: "default".to_string(),
                baseline: 110,
                score_floor: None,
                controls: 1,
                criteria: 1,
                assets_evaluated: 1,
                assets_cancelled: 0,
            },
            assets: vec![AssetScore {
                asset: AssetRef {
                    provider: "aws".to_string(),
                    name: "root".to_string(),
                    kind: AssetKind::Identity,
                },
                score: 105,
                counts: StatusCounts::from_results(&results),
                cancelled: false,
                results,
            }],
        }
    }

    #[test]
    fn serialized_report_parses_back() {
        let bytes = serialize_report(&report()).expect("serialize");
        let text = String::from_utf8(bytes).expect("utf8");
        assert!(text.contains("\"started_at\": \"2026-01-01T00:00:00Z\""));
        assert_eq!(parse_report_json(&text).expect("parse"), report());
    }

    #[test]
    fn rejects_foreign_schema() {
        let err = parse_report_json(r#"{"schema": "inventory.report.v1"}"#).unwrap_err();
        assert!(err.to_string().contains("unknown report schema"));
    }

    #[test]
    fn renderable_keeps_asset_and_result_detail() {
        let r = to_renderable(&report());
        assert_eq!(r.baseline, 110);
        assert_eq!(r.assets[0].kind, "identity");
        assert_eq!(r.assets[0].counts.not_compliant, 1);
        assert_eq!(r.assets[0].results[0].status, RenderableStatus::NotCompliant);
        assert_eq!(r.assets[0].results[0].impact, 5);
    }
}
