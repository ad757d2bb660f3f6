use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity and introspection data for one model type: its name as used in
/// permission codenames, its declared field names, and the permission labels
/// statically registered for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub fields: Vec<String>,
    /// Registered permission labels, label -> human description.
    pub permissions: HashMap<String, String>,
}

impl ModelMeta {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            permissions: HashMap::new(),
        }
    }

    /// Declare a field on the model. Order of declaration is preserved.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    /// Declare several fields at once.
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Register a static permission label for this model.
    pub fn with_permission(mut self, label: impl Into<String>, description: impl Into<String>) -> Self {
        self.permissions.insert(label.into(), description.into());
        self
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f == name)
    }

    pub fn has_permission(&self, label: &str) -> bool {
        self.permissions.contains_key(label)
    }

    pub fn permission_labels(&self) -> Vec<String> {
        self.permissions.keys().cloned().collect()
    }
}
