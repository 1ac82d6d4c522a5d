//! Render use cases: markdown, plain text, and GitHub annotations from in-memory reports.

use cloudscore_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    cloudscore_render::render_markdown(report)
}

pub fn render_text(report: &RenderableReport) -> String {
    cloudscore_render::render_text(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    cloudscore_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}
