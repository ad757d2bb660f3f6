//! Field-level permission resolution for model-backed forms and serializers.
//!
//! Models declare per-field requirements in a [`FieldRules`] table: explicit
//! checks (predicates or permission labels), name-keyed guard predicates,
//! and a convention for deriving static permission labels from field names.
//! [`FieldResolver`] answers "may this user change this field on this
//! instance" from that table, and two adapters apply the answer at the
//! edges: [`FormBuilder`] removes denied fields from constructed forms,
//! [`ModelSerializer`] marks them read-only. [`InstanceBackend`] routes
//! object-level permission queries back to the instance itself.

pub mod api;
pub mod backend;
pub mod error;
pub mod forms;
pub mod model;
pub mod principal;
pub mod resolver;

/// Re-exported for model crates declaring their [`FieldRules`] statics.
pub use once_cell;

pub use api::{ModelSerializer, RequestContext, SerializerField};
pub use backend::{InstanceBackend, ObjectPermissionChecker, RegistryChecker};
pub use error::{PermissionError, PermissionResult};
pub use forms::{FormBuilder, FormField, ModelForm};
pub use model::{
    FieldCheck, FieldPredicate, FieldProtected, FieldRules, InstancePermissions, ModelMeta,
    ModelRegistry, PermissionTarget,
};
pub use principal::Principal;
pub use resolver::{FieldDecision, FieldResolver};
