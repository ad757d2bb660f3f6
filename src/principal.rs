//! The acting-user seam.
//!
//! Everything this crate needs to know about a user is whether they hold a
//! named permission. Hosts supply the backing store (database rows, session
//! claims, a static role table) behind this trait.

/// An opaque principal that can answer unscoped permission queries.
///
/// `perm` is a permission label such as `"can_change_document_title"`.
/// The query is never scoped to an object; object-level checks go through
/// [`crate::model::InstancePermissions`] instead, which keeps the
/// authentication backend from recursing into itself.
pub trait Principal {
    /// Does this user hold the permission with the given label?
    fn has_perm(&self, perm: &str) -> bool;
}
