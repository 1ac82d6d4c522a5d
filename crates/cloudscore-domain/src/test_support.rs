use crate::check::{Check, CheckError, CheckOutcome, ProviderContext};
use crate::model::{Asset, Catalog, Control, Criterion};
use crate::policy::{EffectiveConfig, ScorePolicy};
use crate::registry::CheckRegistry;
use cloudscore_types::{AssetKind, ComplianceResult, ComplianceStatus};

pub fn asset(name: &str) -> Asset {
    Asset::new("aws", name, AssetKind::Compute)
}

pub fn criterion(check_id: &str, impact: u32) -> Criterion {
    Criterion {
        check_id: check_id.to_string(),
        description: format!("criterion {check_id}"),
        impact,
    }
}

pub fn control(id: &str, criteria: Vec<Criterion>) -> Control {
    Control {
        id: id.to_string(),
        name: None,
        description: format!("control {id}"),
        criteria,
    }
}

pub fn catalog_of(controls: Vec<Control>) -> Catalog {
    Catalog::new(controls).expect("test catalog must be valid")
}

pub fn sequential_config() -> EffectiveConfig {
    EffectiveConfig {
        profile: "test".to_string(),
        scoring: ScorePolicy::default(),
        check_timeout: None,
        workers: 1,
        include_results: true,
        provider: ProviderContext::new("aws"),
    }
}

pub fn always(outcome: CheckOutcome) -> impl Check + 'static {
    move |_: &Asset, _: &Criterion, _: &ProviderContext| -> Result<CheckOutcome, CheckError> {
        Ok(outcome.clone())
    }
}

pub fn failing(response: &str) -> impl Check + 'static {
    let response = response.to_string();
    move |_: &Asset, criterion: &Criterion, _: &ProviderContext| -> Result<CheckOutcome, CheckError> {
        Ok(CheckOutcome::not_compliant(criterion, response.clone()))
    }
}

pub fn result_with(status: ComplianceStatus, impact: u32) -> ComplianceResult {
    ComplianceResult {
        control_id: "c1".to_string(),
        check_id: "CheckA".to_string(),
        description: "criterion".to_string(),
        status,
        response: String::new(),
        impact,
        fingerprint: None,
    }
}

pub trait RegistryExt {
    fn with_check<C: Check + 'static>(self, id: &str, check: C) -> Self;
}

impl RegistryExt for CheckRegistry {
    fn with_check<C: Check + 'static>(mut self, id: &str, check: C) -> Self {
        self.register(id, check).expect("register test check");
        self
    }
}
