//! The check capability contract.
//!
//! A check inspects one asset for one criterion and classifies the outcome. Checks own their
//! provider I/O; whatever goes wrong there is reported as a [`CheckError`] and the evaluator turns
//! it into a non-compliant result. Errors never abort an evaluation.

use crate::model::{Asset, Criterion};
use cloudscore_types::{ids, ComplianceStatus};
use std::collections::BTreeMap;
use thiserror::Error;

/// Explicit provider configuration handed to every check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProviderContext {
    pub provider: String,
    pub region: Option<String>,
    pub options: BTreeMap<String, String>,
}

impl ProviderContext {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Self::default()
        }
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// What a check reports back. The evaluator normalizes `impact` before it reaches a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckOutcome {
    pub status: ComplianceStatus,
    pub response: String,
    pub impact: u32,
}

impl CheckOutcome {
    pub fn compliant() -> Self {
        Self {
            status: ComplianceStatus::Compliant,
            response: ids::RESPONSE_CHECK_PASSED.to_string(),
            impact: 0,
        }
    }

    pub fn not_compliant(criterion: &Criterion, response: impl Into<String>) -> Self {
        Self {
            status: ComplianceStatus::NotCompliant,
            response: response.into(),
            impact: criterion.impact,
        }
    }

    pub fn not_applicable(response: impl Into<String>) -> Self {
        Self {
            status: ComplianceStatus::NotApplicable,
            response: response.into(),
            impact: 0,
        }
    }
}

/// Provider-neutral failure taxonomy. Checks translate SDK errors into one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("provider call failed: {message}")]
    Provider { message: String },

    #[error("check timed out after {after_ms} ms")]
    TimedOut { after_ms: u64 },

    #[error("check panicked: {message}")]
    Panicked { message: String },

    #[error("invalid asset data: {message}")]
    Invalid { message: String },
}

impl CheckError {
    pub fn provider(message: impl Into<String>) -> Self {
        CheckError::Provider {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        CheckError::Invalid {
            message: message.into(),
        }
    }
}

/// A named unit of compliance logic, resolved through the registry.
///
/// Implementations must not mutate shared state observable by other checks and must be
/// idempotent: evaluating the same asset twice with no provider-side change yields the same status.
pub trait Check: Send + Sync {
    fn evaluate(
        &self,
        asset: &Asset,
        criterion: &Criterion,
        ctx: &ProviderContext,
    ) -> Result<CheckOutcome, CheckError>;
}

impl<F> Check for F
where
    F: Fn(&Asset, &Criterion, &ProviderContext) -> Result<CheckOutcome, CheckError> + Send + Sync,
{
    fn evaluate(
        &self,
        asset: &Asset,
        criterion: &Criterion,
        ctx: &ProviderContext,
    ) -> Result<CheckOutcome, CheckError> {
        self(asset, criterion, ctx)
    }
}
