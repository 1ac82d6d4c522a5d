//! Config-defined checks that compare one value inside an asset's discovery payload.

use anyhow::Context;
use cloudscore_domain::{
    Asset, Check, CheckError, CheckOutcome, CheckRegistry, Criterion, ProviderContext,
};
use cloudscore_settings::AttributeCheckSpec;
use serde_json::Value;

/// A [`Check`] backed by a JSON pointer into [`Asset::handle`].
#[derive(Clone, Debug)]
pub struct AttributeCheck {
    spec: AttributeCheckSpec,
}

impl AttributeCheck {
    pub fn new(spec: AttributeCheckSpec) -> Self {
        Self { spec }
    }

    fn failure(&self, criterion: &Criterion, detail: String) -> CheckOutcome {
        let response = self.spec.message.clone().unwrap_or(detail);
        CheckOutcome::not_compliant(criterion, response)
    }
}

impl Check for AttributeCheck {
    fn evaluate(
        &self,
        asset: &Asset,
        criterion: &Criterion,
        _ctx: &ProviderContext,
    ) -> Result<CheckOutcome, CheckError> {
        if !self.spec.applies_to.is_empty() && !self.spec.applies_to.contains(&asset.kind) {
            return Ok(CheckOutcome::not_applicable(format!(
                "not applicable to {} assets",
                asset.kind.as_str()
            )));
        }
        if asset.handle.is_null() {
            return Err(CheckError::invalid(format!(
                "asset {} has no details",
                asset.name
            )));
        }

        let pointer = self.spec.pointer.as_str();
        let Some(actual) = asset.handle.pointer(pointer) else {
            return Ok(self.failure(criterion, format!("{pointer} is missing")));
        };

        let passed = match &self.spec.equals {
            Some(expected) => actual == expected,
            None => truthy(actual),
        };
        if passed {
            Ok(CheckOutcome::compliant())
        } else {
            let detail = match &self.spec.equals {
                Some(expected) => format!("{pointer} is {actual}, expected {expected}"),
                None => format!("{pointer} is {actual}"),
            };
            Ok(self.failure(criterion, detail))
        }
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Register every configured attribute check. Clashing ids are initialization errors.
pub fn register_attribute_checks(
    registry: &mut CheckRegistry,
    specs: &[AttributeCheckSpec],
) -> anyhow::Result<()> {
    for spec in specs {
        registry
            .register(spec.id.clone(), AttributeCheck::new(spec.clone()))
            .with_context(|| format!("register configured check {}", spec.id))?;
    }
    Ok(())
}
