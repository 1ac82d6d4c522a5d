use crate::{RenderableAsset, RenderableReport, RenderableStatus};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Cloudscore compliance report\n\n");
    out.push_str(&format!(
        "- Profile: `{}`\n- Baseline: **{}**\n",
        report.profile, report.baseline
    ));
    if let Some(floor) = report.score_floor {
        out.push_str(&format!("- Score floor: {}\n", floor));
    }
    out.push_str(&format!(
        "- Controls: {} / Criteria: {}\n\n",
        report.controls, report.criteria
    ));

    if report.assets.is_empty() {
        out.push_str("No assets evaluated.\n");
        return out;
    }

    out.push_str("## Scores\n\n");
    out.push_str("| Asset | Provider | Kind | Score | Pass | Fail | N/A | No check |\n");
    out.push_str("|---|---|---|---:|---:|---:|---:|---:|\n");
    for a in &report.assets {
        let name = if a.cancelled {
            format!("{} (cancelled)", a.name)
        } else {
            a.name.clone()
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
            escape_cell(&name),
            escape_cell(&a.provider),
            a.kind,
            a.score,
            a.counts.compliant,
            a.counts.not_compliant,
            a.counts.not_applicable,
            a.counts.no_check
        ));
    }

    for a in report.assets.iter().filter(|a| !a.results.is_empty()) {
        render_asset_details(&mut out, a);
    }

    out
}

fn render_asset_details(out: &mut String, asset: &RenderableAsset) {
    out.push_str(&format!("\n## {} ({})\n", asset.name, asset.provider));

    let mut current_control: Option<&str> = None;
    for r in &asset.results {
        if current_control != Some(r.control_id.as_str()) {
            out.push_str(&format!("\n### {}\n\n", r.control_id));
            current_control = Some(r.control_id.as_str());
        }
        out.push_str(&format!(
            "- [{}] `{}` {}: {}",
            r.status.label(),
            r.check_id,
            r.description,
            r.response
        ));
        if r.status == RenderableStatus::NotCompliant {
            out.push_str(&format!(" (-{})", r.impact));
        }
        out.push('\n');
    }
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
}
