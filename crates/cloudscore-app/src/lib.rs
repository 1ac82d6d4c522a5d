//! Use case orchestration for cloudscore.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain, and
//! render layers. It stays thin and delegates heavy lifting to the appropriate layers.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod assess;
mod attribute;
mod coverage;
mod render;
mod report;

pub use assess::{AssessInput, AssessOutput, run_assessment, score_exit_code};
pub use attribute::{AttributeCheck, register_attribute_checks};
pub use coverage::{CheckCoverage, CoverageStatus, run_coverage};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, serialize_report, to_renderable};

pub use cloudscore_types::CloudscoreReport;
