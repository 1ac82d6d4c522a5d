use cloudscore_types::{AssetKind, AssetRef};
use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

/// A discovered cloud asset. Identity is `(provider, name)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Asset {
    pub name: String,
    pub kind: AssetKind,
    pub provider: String,

    /// Provider-specific payload captured at discovery; only checks look inside.
    pub handle: Value,
}

impl Asset {
    pub fn new(provider: impl Into<String>, name: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            name: name.into(),
            kind,
            provider: provider.into(),
            handle: Value::Null,
        }
    }

    pub fn with_handle(mut self, handle: Value) -> Self {
        self.handle = handle;
        self
    }

    pub fn identity(&self) -> (&str, &str) {
        (self.provider.as_str(), self.name.as_str())
    }

    pub fn to_ref(&self) -> AssetRef {
        AssetRef {
            provider: self.provider.clone(),
            name: self.name.clone(),
            kind: self.kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Criterion {
    pub check_id: String,
    pub description: String,
    pub impact: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub id: String,
    pub name: Option<String>,
    pub description: String,

    /// Evaluation and report order.
    pub criteria: Vec<Criterion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("control #{index} has an empty id")]
    EmptyControlId { index: usize },

    #[error("duplicate control id: {id}")]
    DuplicateControl { id: String },

    #[error("control {control_id} criterion #{index} has an empty check id")]
    EmptyCheckId { control_id: String, index: usize },

    #[error("control {control_id} criterion #{index} has an empty description")]
    EmptyDescription { control_id: String, index: usize },
}

/// An ordered, validated list of controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    controls: Vec<Control>,
}

impl Catalog {
    pub fn new(controls: Vec<Control>) -> Result<Self, CatalogError> {
        validate(&controls)?;
        Ok(Self { controls })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// `(control, criterion)` pairs in evaluation order.
    pub fn criteria(&self) -> impl Iterator<Item = (&Control, &Criterion)> {
        self.controls
            .iter()
            .flat_map(|c| c.criteria.iter().map(move |cr| (c, cr)))
    }

    pub fn criteria_count(&self) -> usize {
        self.controls.iter().map(|c| c.criteria.len()).sum()
    }

    /// Distinct check ids referenced by the catalog, sorted.
    pub fn check_ids(&self) -> BTreeSet<&str> {
        self.criteria().map(|(_, cr)| cr.check_id.as_str()).collect()
    }
}

fn validate(controls: &[Control]) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for (index, control) in controls.iter().enumerate() {
        if control.id.trim().is_empty() {
            return Err(CatalogError::EmptyControlId { index });
        }
        if !seen.insert(control.id.as_str()) {
            return Err(CatalogError::DuplicateControl {
                id: control.id.clone(),
            });
        }
        for (index, criterion) in control.criteria.iter().enumerate() {
            if criterion.check_id.trim().is_empty() {
                return Err(CatalogError::EmptyCheckId {
                    control_id: control.id.clone(),
                    index,
                });
            }
            if criterion.description.trim().is_empty() {
                return Err(CatalogError::EmptyDescription {
                    control_id: control.id.clone(),
                    index,
                });
            }
        }
    }
    Ok(())
}
