//! Authentication-backend-shaped delegation of object-level permissions.
//!
//! Host frameworks route their object-scoped permission queries through an
//! [`InstanceBackend`]. The backend never decides anything itself: it either
//! abstains (no object given), waves the query through (object without an
//! instance-level hook), or forwards it to the object's own hook.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, warn};

use crate::model::{ModelRegistry, PermissionTarget};
use crate::principal::Principal;

/// External collaborator that enumerates the permission labels a user holds
/// for a specific object.
///
/// The default backend stance is conservative (no labels at all); this
/// trait is the opt-in extension point for hosts that want real enumeration.
/// [`RegistryChecker`] is the provided implementation.
pub trait ObjectPermissionChecker: Send + Sync {
    fn object_perms(&self, user: &dyn Principal, obj: &dyn PermissionTarget) -> HashSet<String>;
}

/// Object-level permission backend.
pub struct InstanceBackend {
    checker: Option<Arc<dyn ObjectPermissionChecker>>,
}

impl InstanceBackend {
    pub const SUPPORTS_OBJECT_PERMISSIONS: bool = true;
    pub const SUPPORTS_ANONYMOUS_USER: bool = true;
    pub const SUPPORTS_INACTIVE_USER: bool = true;

    /// A backend whose `get_all_permissions` is unconditionally empty.
    #[must_use]
    pub fn new() -> Self {
        Self { checker: None }
    }

    /// A backend that delegates permission enumeration to `checker`.
    #[must_use]
    pub fn with_checker(checker: Arc<dyn ObjectPermissionChecker>) -> Self {
        Self {
            checker: Some(checker),
        }
    }

    /// Abstains from user authentication.
    pub fn authenticate(
        &self,
        _username: &str,
        _password: &str,
    ) -> Option<Arc<dyn Principal + Send + Sync>> {
        None
    }

    /// Consults the target object for instance-level permission.
    ///
    /// With no object this returns `false` without asserting a negative
    /// opinion; the host's standard model-level check supplies the
    /// authoritative answer for unscoped queries. An object without an
    /// instance-level hook is unrestricted at this layer, so the answer is
    /// `true`. Otherwise the object's hook decides.
    pub fn has_perm(
        &self,
        user: &dyn Principal,
        perm: &str,
        obj: Option<&dyn PermissionTarget>,
    ) -> bool {
        let Some(obj) = obj else {
            return false;
        };

        match obj.instance_hook() {
            None => true,
            Some(hook) => {
                let granted = hook.has_perm(user, perm);
                debug!(
                    "instance hook on '{}' answered {} for '{}'",
                    obj.model_name(),
                    granted,
                    perm
                );
                granted
            }
        }
    }

    /// The set of permission labels the user holds for `obj`.
    ///
    /// Empty unless the backend was built with a checker and an object was
    /// supplied.
    pub fn get_all_permissions(
        &self,
        user: &dyn Principal,
        obj: Option<&dyn PermissionTarget>,
    ) -> HashSet<String> {
        match (obj, &self.checker) {
            (Some(obj), Some(checker)) => checker.object_perms(user, obj),
            _ => HashSet::new(),
        }
    }
}

impl Default for InstanceBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Permission enumeration backed by the model registry.
///
/// Looks up the object's model, takes its declared permission labels as the
/// candidate universe, and keeps each label the object grants: through the
/// instance-level hook when the object has one, through the user's unscoped
/// permissions otherwise.
pub struct RegistryChecker {
    registry: Arc<ModelRegistry>,
}

impl RegistryChecker {
    #[must_use]
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }
}

impl ObjectPermissionChecker for RegistryChecker {
    fn object_perms(&self, user: &dyn Principal, obj: &dyn PermissionTarget) -> HashSet<String> {
        let meta = match self.registry.get(obj.model_name()) {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                debug!("model '{}' not registered, no object permissions", obj.model_name());
                return HashSet::new();
            }
            Err(err) => {
                warn!("registry lookup failed during permission enumeration: {}", err);
                return HashSet::new();
            }
        };

        meta.permission_labels()
            .into_iter()
            .filter(|label| match obj.instance_hook() {
                Some(hook) => hook.has_perm(user, label),
                None => user.has_perm(label),
            })
            .collect()
    }
}
