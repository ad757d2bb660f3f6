//! Registry of model metadata.
//!
//! Hosts register each model's [`ModelMeta`] once at startup; the registry
//! then answers "which permission labels does this model declare" for
//! anything holding only a model name, such as the delegating
//! `get_all_permissions` checker.

use std::collections::HashMap;
use std::sync::Mutex;

use log::{info, warn};

use crate::error::{PermissionError, PermissionResult};
use crate::model::types::{FieldRules, ModelMeta};

/// Thread-safe lookup from model name to declared metadata.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Mutex<HashMap<String, ModelMeta>>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model's metadata. Re-registering a name replaces the
    /// previous entry.
    ///
    /// # Errors
    /// Returns a `PermissionError::Registry` if the registry lock cannot be
    /// acquired.
    pub fn register(&self, meta: ModelMeta) -> PermissionResult<()> {
        let name = meta.name.clone();
        let mut models = self
            .models
            .lock()
            .map_err(|_| PermissionError::registry("Failed to acquire model registry lock"))?;
        if models.insert(name.clone(), meta).is_some() {
            warn!("model '{}' re-registered, previous metadata replaced", name);
        } else {
            info!("model '{}' registered", name);
        }
        Ok(())
    }

    /// Registers the metadata embedded in a model's field rules.
    ///
    /// # Errors
    /// Returns a `PermissionError::Registry` if the registry lock cannot be
    /// acquired.
    pub fn register_rules<M>(&self, rules: &FieldRules<M>) -> PermissionResult<()> {
        self.register(rules.meta().clone())
    }

    /// Retrieves a model's metadata by name.
    ///
    /// # Errors
    /// Returns a `PermissionError::Registry` if the registry lock cannot be
    /// acquired.
    pub fn get(&self, model: &str) -> PermissionResult<Option<ModelMeta>> {
        let models = self
            .models
            .lock()
            .map_err(|_| PermissionError::registry("Failed to acquire model registry lock"))?;
        Ok(models.get(model).cloned())
    }

    /// Checks whether a model is registered.
    ///
    /// # Errors
    /// Returns a `PermissionError::Registry` if the registry lock cannot be
    /// acquired.
    pub fn contains(&self, model: &str) -> PermissionResult<bool> {
        let models = self
            .models
            .lock()
            .map_err(|_| PermissionError::registry("Failed to acquire model registry lock"))?;
        Ok(models.contains_key(model))
    }

    /// Lists all registered model names.
    ///
    /// # Errors
    /// Returns a `PermissionError::Registry` if the registry lock cannot be
    /// acquired.
    pub fn model_names(&self) -> PermissionResult<Vec<String>> {
        let models = self
            .models
            .lock()
            .map_err(|_| PermissionError::registry("Failed to acquire model registry lock"))?;
        Ok(models.keys().cloned().collect())
    }

    /// The permission labels a model declares.
    ///
    /// # Errors
    /// Returns `PermissionError::UnknownModel` for unregistered names, or
    /// `PermissionError::Registry` if the registry lock cannot be acquired.
    pub fn permission_labels(&self, model: &str) -> PermissionResult<Vec<String>> {
        self.get(model)?
            .map(|meta| meta.permission_labels())
            .ok_or_else(|| PermissionError::unknown_model(model))
    }
}
