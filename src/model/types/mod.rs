pub mod meta;
pub mod rules;

pub use meta::ModelMeta;
pub use rules::{FieldCheck, FieldPredicate, FieldRules, DEFAULT_CODENAME_TEMPLATE};
