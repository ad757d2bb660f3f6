//! Per-model field permission declarations.
//!
//! A [`FieldRules`] value is the declaration table for one model type: which
//! checks guard which fields, which predicate hooks exist per field, how
//! conventional permission codenames are spelled, and what happens when a
//! field has no requirements at all. The table is immutable once built;
//! resolution constructs its own working list per call and never writes
//! back, so a single table is safe to share across threads and requests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::meta::ModelMeta;
use crate::principal::Principal;

/// Default template for conventional static permission labels.
pub const DEFAULT_CODENAME_TEMPLATE: &str = "can_change_{model}_{name}";

/// A predicate over `(instance, user, field name)`.
///
/// `Some(true)` / `Some(false)` is a decisive answer that stops the scan;
/// `None` means "no opinion" and hands the decision to the next check.
pub type FieldPredicate<M> = Arc<dyn Fn(&M, &dyn Principal, &str) -> Option<bool> + Send + Sync>;

/// A single requirement guarding a field.
pub enum FieldCheck<M> {
    /// Caller-supplied predicate, invoked with the instance, the acting
    /// user, and the field name under resolution.
    Predicate(FieldPredicate<M>),
    /// Opaque permission label, resolved against the user's unscoped
    /// permissions.
    Label(String),
}

impl<M> FieldCheck<M> {
    /// Wrap a closure as a predicate check.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&M, &dyn Principal, &str) -> Option<bool> + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Require a permission label.
    pub fn label(label: impl Into<String>) -> Self {
        Self::Label(label.into())
    }
}

// Manual impls: the derive forms would demand `M: Clone` / `M: Debug`
// even though no `M` value is stored.
impl<M> Clone for FieldCheck<M> {
    fn clone(&self) -> Self {
        match self {
            Self::Predicate(p) => Self::Predicate(Arc::clone(p)),
            Self::Label(l) => Self::Label(l.clone()),
        }
    }
}

impl<M> fmt::Debug for FieldCheck<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predicate(_) => f.write_str("Predicate(..)"),
            Self::Label(l) => write!(f, "Label({:?})", l),
        }
    }
}

/// The field permission declaration table for one model type.
///
/// Built once per model type (typically in a `once_cell::sync::Lazy` static)
/// and handed to the resolver by reference. Checks declared for the same
/// field keep their declaration order; a field declared with a single check
/// behaves exactly like a one-element list.
pub struct FieldRules<M> {
    meta: ModelMeta,
    declared: HashMap<String, Vec<FieldCheck<M>>>,
    guards: HashMap<String, FieldPredicate<M>>,
    codename_template: String,
    default_allow: bool,
}

impl<M> FieldRules<M> {
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            meta: ModelMeta::new(model),
            declared: HashMap::new(),
            guards: HashMap::new(),
            codename_template: DEFAULT_CODENAME_TEMPLATE.to_string(),
            default_allow: true,
        }
    }

    /// Declare a model field. Declaration order is preserved and drives
    /// form/serializer field order.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.meta = self.meta.with_field(name);
        self
    }

    /// Declare several model fields at once.
    pub fn with_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.meta = self.meta.with_fields(names);
        self
    }

    /// Register a static permission label for this model, making it
    /// eligible for conventional codename lookups.
    pub fn with_permission(
        mut self,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.meta = self.meta.with_permission(label, description);
        self
    }

    /// Append a check to a field's requirement list.
    pub fn with_check(mut self, field: impl Into<String>, check: FieldCheck<M>) -> Self {
        self.declared.entry(field.into()).or_default().push(check);
        self
    }

    /// Append several checks to a field's requirement list, in order.
    pub fn with_checks<I>(mut self, field: impl Into<String>, checks: I) -> Self
    where
        I: IntoIterator<Item = FieldCheck<M>>,
    {
        self.declared.entry(field.into()).or_default().extend(checks);
        self
    }

    /// Declare a per-field predicate hook, consulted when the field has no
    /// entry in the explicit table. Replaces any previous hook for the field.
    pub fn with_guard<F>(mut self, field: impl Into<String>, guard: F) -> Self
    where
        F: Fn(&M, &dyn Principal, &str) -> Option<bool> + Send + Sync + 'static,
    {
        self.guards.insert(field.into(), Arc::new(guard));
        self
    }

    /// Override the conventional codename template. `{model}` and `{name}`
    /// are substituted with the model name and field name.
    pub fn with_codename_template(mut self, template: impl Into<String>) -> Self {
        self.codename_template = template.into();
        self
    }

    /// Set the outcome for fields that resolve to an empty requirement
    /// list. Defaults to `true`: no requirements means no restrictions.
    pub fn with_default(mut self, allow: bool) -> Self {
        self.default_allow = allow;
        self
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn model(&self) -> &str {
        &self.meta.name
    }

    pub fn default_allow(&self) -> bool {
        self.default_allow
    }

    /// The explicit checks declared for a field, if any.
    pub fn declared_checks(&self, field: &str) -> Option<&[FieldCheck<M>]> {
        self.declared.get(field).map(Vec::as_slice)
    }

    /// The predicate hook declared for a field, if any.
    pub fn guard(&self, field: &str) -> Option<&FieldPredicate<M>> {
        self.guards.get(field)
    }

    pub fn codename_template(&self) -> &str {
        &self.codename_template
    }

    /// Render the conventional permission codename for a field.
    pub fn codename_for(&self, field: &str) -> String {
        self.codename_template
            .replace("{model}", &self.meta.name)
            .replace("{name}", field)
    }
}

// Hand-rolled because `FieldPredicate` has no Debug; prints the table shape
// without the closures.
impl<M> fmt::Debug for FieldRules<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("model", &self.meta.name)
            .field("declared", &self.declared)
            .field("guards", &self.guards.keys().collect::<Vec<_>>())
            .field("codename_template", &self.codename_template)
            .field("default_allow", &self.default_allow)
            .finish()
    }
}
