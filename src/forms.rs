//! Construction-time form field suppression.
//!
//! A [`FormBuilder`] binds a model instance and an acting user, then builds
//! a [`ModelForm`] containing only the fields that user may change. The
//! acting user arrives out-of-band through [`FormBuilder::with_user`] and
//! is a hard construction requirement, not ambient state. Decisions are
//! recomputed on every construction and never stored.

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::error::{PermissionError, PermissionResult};
use crate::model::FieldProtected;
use crate::principal::Principal;
use crate::resolver::FieldResolver;

/// One editable field on a constructed form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    /// Prefill value taken from the bound instance, when the field
    /// serializes to one.
    pub initial: Option<Value>,
}

/// A model-bound form whose field set has already been filtered down to
/// what the acting user may change.
#[derive(Debug, Clone)]
pub struct ModelForm {
    model: String,
    fields: Vec<FormField>,
}

impl ModelForm {
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds a [`ModelForm`] for one `(instance, user)` pair.
pub struct FormBuilder<'a, M> {
    instance: &'a M,
    user: Option<&'a dyn Principal>,
    selected: Option<Vec<String>>,
}

impl<'a, M: FieldProtected + Serialize> FormBuilder<'a, M> {
    #[must_use]
    pub fn new(instance: &'a M) -> Self {
        Self {
            instance,
            user: None,
            selected: None,
        }
    }

    /// The acting user. Required; [`build`](Self::build) fails without it.
    #[must_use]
    pub fn with_user(mut self, user: &'a dyn Principal) -> Self {
        self.user = Some(user);
        self
    }

    /// Restrict the form to a subset of fields. Defaults to every declared
    /// model field. Names that are not model fields pass through the
    /// suppression pass untouched.
    #[must_use]
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Construct the form, removing every declared field the user may not
    /// change.
    ///
    /// # Errors
    /// `MissingUser` when no acting user was supplied; `Serialization` or
    /// `InvalidInstance` when the instance cannot be introspected as a JSON
    /// object.
    pub fn build(self) -> PermissionResult<ModelForm> {
        let rules = M::field_rules();
        let user = self.user.ok_or_else(|| {
            PermissionError::missing_user(format!(
                "form for model '{}' constructed without an acting user",
                rules.model()
            ))
        })?;

        let serialized = serde_json::to_value(self.instance)?;
        let Value::Object(values) = serialized else {
            return Err(PermissionError::invalid_instance(format!(
                "model '{}' did not serialize to an object",
                rules.model()
            )));
        };

        // Fields actually present on the form: the explicit selection, or
        // every declared model field.
        let present: Vec<String> = match self.selected {
            Some(selected) => selected,
            None => rules.meta().fields.clone(),
        };

        let mut fields: Vec<FormField> = present
            .iter()
            .map(|name| FormField {
                name: name.clone(),
                initial: values.get(name).cloned(),
            })
            .collect();

        // Suppression runs over declared model fields that made it onto the
        // form; anything else on the form is not ours to police.
        let candidates: Vec<String> = rules
            .meta()
            .fields
            .iter()
            .filter(|name| present.iter().any(|p| &p == name))
            .cloned()
            .collect();

        let decisions = FieldResolver::new().check_fields(rules, self.instance, user, &candidates);
        let before = fields.len();
        for decision in decisions.iter().filter(|d| !d.allowed) {
            fields.retain(|f| f.name != decision.field_name);
        }
        if fields.len() < before {
            debug!(
                "removed {} unauthorized fields from '{}' form",
                before - fields.len(),
                rules.model()
            );
        }

        Ok(ModelForm {
            model: rules.model().to_string(),
            fields,
        })
    }
}
