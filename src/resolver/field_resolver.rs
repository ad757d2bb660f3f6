use std::sync::Arc;

use log::{debug, trace};

use crate::model::types::{FieldCheck, FieldRules};
use crate::principal::Principal;

/// Per-field outcome of a bulk permission check.
#[derive(Debug, Clone)]
pub struct FieldDecision {
    pub field_name: String,
    pub allowed: bool,
}

/// Decides whether a user may change a field on a model instance.
///
/// The resolver is stateless; the declaration table travels in as an
/// argument and is only ever read. Each call assembles its own requirement
/// list, so concurrent resolutions cannot interfere with one another or
/// with the shared table.
#[derive(Debug, Default, Clone)]
pub struct FieldResolver {}

impl FieldResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one field on one instance for one user.
    ///
    /// Requirements are gathered in this order:
    /// 1. The field's entry in the explicit declaration table, when present.
    /// 2. Otherwise the field's declared guard predicate, when present.
    /// 3. Otherwise the conventional codename for the field, when that label
    ///    is registered among the model's permissions.
    ///
    /// An empty requirement list yields the table's configured default.
    /// A non-empty list is scanned in declaration order: a predicate that
    /// answers `Some(_)` settles the question immediately, a predicate that
    /// answers `None` abstains and the scan continues, and a permission
    /// label settles the question only when the user holds it; a label the
    /// user lacks just moves the scan along. When requirements existed but
    /// none were satisfied, permission is denied.
    ///
    /// Label checks are deliberately unscoped: asking the object-scoped
    /// variant here would recurse through the instance-level hook.
    #[must_use]
    pub fn resolve<M>(
        &self,
        rules: &FieldRules<M>,
        instance: &M,
        user: &dyn Principal,
        field: &str,
    ) -> bool {
        // Local requirement list per call; the declaration table is never
        // written to.
        let checks: Vec<FieldCheck<M>> = match rules.declared_checks(field) {
            Some(declared) => declared.to_vec(),
            None => {
                let mut checks = Vec::new();
                if let Some(guard) = rules.guard(field) {
                    checks.push(FieldCheck::Predicate(Arc::clone(guard)));
                } else {
                    let label = rules.codename_for(field);
                    if rules.meta().has_permission(&label) {
                        checks.push(FieldCheck::Label(label));
                    }
                }
                checks
            }
        };

        // No requirements means no restrictions.
        if checks.is_empty() {
            trace!(
                "field '{}' on '{}': no requirements, default {}",
                field,
                rules.model(),
                rules.default_allow()
            );
            return rules.default_allow();
        }

        for check in &checks {
            match check {
                FieldCheck::Predicate(predicate) => {
                    if let Some(decision) = predicate(instance, user, field) {
                        trace!(
                            "field '{}' on '{}': predicate decided {}",
                            field,
                            rules.model(),
                            decision
                        );
                        return decision;
                    }
                }
                FieldCheck::Label(label) => {
                    if user.has_perm(label) {
                        trace!("field '{}' on '{}': label '{}' held", field, rules.model(), label);
                        return true;
                    }
                }
            }
        }

        // Requirements existed and none of them were satisfied.
        trace!("field '{}' on '{}': no requirement satisfied", field, rules.model());
        false
    }

    /// Resolves each named field individually and reports the outcomes.
    ///
    /// Forms and serializers drive their suppression passes through this.
    #[must_use]
    pub fn check_fields<M>(
        &self,
        rules: &FieldRules<M>,
        instance: &M,
        user: &dyn Principal,
        names: &[String],
    ) -> Vec<FieldDecision> {
        let decisions: Vec<FieldDecision> = names
            .iter()
            .map(|name| FieldDecision {
                field_name: name.clone(),
                allowed: self.resolve(rules, instance, user, name),
            })
            .collect();

        let denied = decisions.iter().filter(|d| !d.allowed).count();
        debug!(
            "checked {} fields on '{}': {} denied",
            decisions.len(),
            rules.model(),
            denied
        );
        decisions
    }
}
