// field permission resolution

pub mod field_resolver;

pub use field_resolver::{FieldDecision, FieldResolver};
