use crate::RenderableReport;

/// The plain compliance report: one name/score block per asset.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::from("Compliance Report\n\n");
    for asset in &report.assets {
        let suffix = if asset.cancelled { " (incomplete, cancelled)" } else { "" };
        out.push_str(&format!(
            "Asset: {}\nScore: {}{suffix}\n\n",
            asset.name, asset.score
        ));
    }
    out
}
