// model declaration surface

pub mod registry;
pub mod traits;
pub mod types;

pub use registry::ModelRegistry;
pub use traits::{FieldProtected, InstancePermissions, PermissionTarget};
pub use types::{FieldCheck, FieldPredicate, FieldRules, ModelMeta};
