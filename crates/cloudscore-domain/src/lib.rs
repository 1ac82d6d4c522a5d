//! Pure control evaluation and scoring (no IO).
//!
//! Input: a validated control catalog, a check registry, and assets discovered elsewhere.
//! Output: per-criterion results and a score for every asset.

#![forbid(unsafe_code)]

pub mod cancel;
pub mod check;
pub mod fingerprint;
pub mod model;
pub mod policy;
pub mod registry;
pub mod report;
pub mod scoring;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use cancel::CancelToken;
pub use check::{Check, CheckError, CheckOutcome, ProviderContext};
pub use engine::{Evaluator, evaluate};
pub use model::{Asset, Catalog, CatalogError, Control, Criterion};
pub use policy::{EffectiveConfig, ScorePolicy};
pub use registry::{CheckRegistry, RegistryError};
pub use report::{AssetEvaluation, DomainReport};
