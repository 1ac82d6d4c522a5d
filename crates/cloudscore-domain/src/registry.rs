use crate::check::Check;
use crate::model::Catalog;
use cloudscore_types::ids;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("check id is empty")]
    EmptyId,

    #[error("check id '{id}' is reserved for catalog markers")]
    Reserved { id: String },

    #[error("check '{id}' is already registered")]
    Duplicate { id: String },
}

/// Maps check ids to check implementations.
///
/// Built once during startup; evaluation only reads it, so a finished registry can be shared
/// across worker threads by reference. Registering an id twice is an error rather than an
/// overwrite, which surfaces catalog/implementation drift at startup.
#[derive(Clone, Default)]
pub struct CheckRegistry {
    checks: BTreeMap<String, Arc<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C>(&mut self, id: impl Into<String>, check: C) -> Result<(), RegistryError>
    where
        C: Check + 'static,
    {
        self.register_shared(id, Arc::new(check))
    }

    pub fn register_shared(
        &mut self,
        id: impl Into<String>,
        check: Arc<dyn Check>,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RegistryError::EmptyId);
        }
        if ids::is_reserved_check_id(&id) {
            return Err(RegistryError::Reserved { id });
        }
        if self.checks.contains_key(&id) {
            return Err(RegistryError::Duplicate { id });
        }
        tracing::debug!(check_id = %id, "registered check");
        self.checks.insert(id, check);
        Ok(())
    }

    /// Look up a check. Absence is a normal outcome, not an error.
    pub fn resolve(&self, id: &str) -> Option<&Arc<dyn Check>> {
        self.checks.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.checks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.checks.keys().map(String::as_str)
    }

    /// Catalog check ids with no registered implementation (reserved markers excluded).
    pub fn unresolved<'a>(&self, catalog: &'a Catalog) -> Vec<&'a str> {
        catalog
            .check_ids()
            .into_iter()
            .filter(|id| !ids::is_reserved_check_id(id) && !self.contains(id))
            .collect()
    }
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckRegistry")
            .field("checks", &self.checks.keys().collect::<Vec<_>>())
            .finish()
    }
}
