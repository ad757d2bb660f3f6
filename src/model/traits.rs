//! Trait seams between host models and the permission machinery.
//!
//! Three layers, from loosest to tightest coupling:
//!
//! - [`PermissionTarget`]: anything an object-scoped permission query can
//!   point at. The authentication backend consumes this and nothing more.
//! - [`InstancePermissions`]: the object-level permission hook. Objects
//!   that implement it take part in instance-scoped `has_perm` delegation.
//! - [`FieldProtected`]: model types with a static field permission table.
//!   Forms, serializers, and the resolver work against this seam.

use crate::model::types::FieldRules;
use crate::principal::Principal;
use crate::resolver::FieldResolver;

/// Object-level permission hook.
///
/// The default body answers with the user's unscoped permissions and never
/// hands the object back to the user's own check, which keeps the
/// authentication backend from recursing into itself. Override it for
/// models whose instances carry their own access logic (ownership checks,
/// state-dependent locks).
pub trait InstancePermissions {
    fn has_perm(&self, user: &dyn Principal, perm: &str) -> bool {
        user.has_perm(perm)
    }
}

/// A handle the authentication backend can ask about.
///
/// `instance_hook` is a capability check: objects that support
/// instance-level checks expose their [`InstancePermissions`] here, and
/// everything else reports `None`, which the backend reads as "no
/// instance-level restriction applies".
pub trait PermissionTarget {
    /// Model name as used in permission codenames.
    fn model_name(&self) -> &str;

    /// The instance-level hook, when this object supports one.
    fn instance_hook(&self) -> Option<&dyn InstancePermissions> {
        None
    }
}

/// A model type with a static field permission table.
///
/// Implementations hold their [`FieldRules`] in a process-wide static,
/// typically through the re-exported `once_cell`:
///
/// ```ignore
/// use fieldgate::once_cell::sync::Lazy;
///
/// static RULES: Lazy<FieldRules<Employee>> = Lazy::new(|| {
///     FieldRules::new("employee")
///         .with_fields(["name", "salary"])
///         .with_check("salary", FieldCheck::predicate(|_, user, _| {
///             Some(user.has_perm("is_manager"))
///         }))
/// });
///
/// impl FieldProtected for Employee {
///     fn field_rules() -> &'static FieldRules<Self> {
///         &RULES
///     }
/// }
/// ```
pub trait FieldProtected: InstancePermissions + Sized + 'static {
    /// The declaration table for this model type.
    fn field_rules() -> &'static FieldRules<Self>;

    /// May `user` change `field` on this instance?
    fn has_field_perm(&self, user: &dyn Principal, field: &str) -> bool {
        FieldResolver::new().resolve(Self::field_rules(), self, user, field)
    }
}

// Every field-protected model is automatically a permission target whose
// instance hook is the model itself.
impl<M: FieldProtected> PermissionTarget for M {
    fn model_name(&self) -> &str {
        M::field_rules().model()
    }

    fn instance_hook(&self) -> Option<&dyn InstancePermissions> {
        Some(self)
    }
}
