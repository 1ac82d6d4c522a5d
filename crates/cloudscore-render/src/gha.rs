use crate::{RenderableReport, RenderableStatus};

/// Render failed criteria as GitHub Actions workflow command annotations.
///
/// Format:
/// `::error title={asset}::[{control}:{check}] {description}: {response}`
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for asset in &report.assets {
        for r in &asset.results {
            if r.status != RenderableStatus::NotCompliant {
                continue;
            }
            let level = if r.impact > 0 { "error" } else { "warning" };
            let title = escape_property(&format!("{}/{}", asset.provider, asset.name));
            let message = escape_data(&format!(
                "[{}:{}] {}: {} (-{})",
                r.control_id, r.check_id, r.description, r.response, r.impact
            ));
            out.push(format!("::{level} title={title}::{message}"));
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
