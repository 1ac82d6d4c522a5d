//! Stable DTOs and IDs used across the cloudscore workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted report
//! - stable string IDs, response texts, and schema identifiers
//! - the compliance status vocabulary shared by the engine and renderers

#![forbid(unsafe_code)]

pub mod ids;
pub mod receipt;

pub use receipt::{
    AssetKind, AssetRef, AssetScore, ComplianceResult, ComplianceStatus, CloudscoreData,
    CloudscoreReport, ReportEnvelope, StatusCounts, ToolMeta, SCHEMA_REPORT_V1,
};
