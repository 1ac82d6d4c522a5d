//! Rendering utilities for humans and CI surfaces (Markdown, plain text, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableAsset, RenderableCounts, RenderableReport, RenderableResult, RenderableStatus,
};
pub use text::render_text;
