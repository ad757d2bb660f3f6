//! Serializer-side field marking.
//!
//! Unlike the form path, serializers never drop a field: a denied field
//! stays visible in output but is marked read-only so inbound writes to it
//! are rejected by the host layer.

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::context::RequestContext;
use crate::error::{PermissionError, PermissionResult};
use crate::model::FieldProtected;
use crate::resolver::FieldResolver;

/// One field on a constructed serializer.
#[derive(Debug, Clone)]
pub struct SerializerField {
    pub name: String,
    pub value: Option<Value>,
    pub read_only: bool,
}

/// A model-bound serializer whose fields have been marked against the
/// acting user's field permissions.
#[derive(Debug, Clone)]
pub struct ModelSerializer {
    model: String,
    fields: Vec<SerializerField>,
}

impl ModelSerializer {
    /// Construct a serializer for `instance` under `ctx`, marking every
    /// declared field the context user may not change as read-only.
    ///
    /// # Errors
    /// `MissingUser` when the context carries no user; `Serialization` or
    /// `InvalidInstance` when the instance cannot be introspected as a JSON
    /// object.
    pub fn for_instance<M>(instance: &M, ctx: &RequestContext) -> PermissionResult<Self>
    where
        M: FieldProtected + Serialize,
    {
        let rules = M::field_rules();
        let user = ctx.user().ok_or_else(|| {
            PermissionError::missing_user(format!(
                "serializer for model '{}' constructed without a request user",
                rules.model()
            ))
        })?;

        let serialized = serde_json::to_value(instance)?;
        let Value::Object(values) = serialized else {
            return Err(PermissionError::invalid_instance(format!(
                "model '{}' did not serialize to an object",
                rules.model()
            )));
        };

        // Declared fields lead, in declaration order; serialized keys the
        // declaration never mentions trail behind.
        let declared = &rules.meta().fields;
        let mut names: Vec<String> = declared
            .iter()
            .filter(|name| values.contains_key(*name))
            .cloned()
            .collect();
        names.extend(values.keys().filter(|key| !declared.contains(*key)).cloned());

        let resolver = FieldResolver::new();
        let fields: Vec<SerializerField> = names
            .into_iter()
            .map(|name| {
                let read_only =
                    rules.meta().has_field(&name) && !resolver.resolve(rules, instance, user, &name);
                SerializerField {
                    value: values.get(&name).cloned(),
                    name,
                    read_only,
                }
            })
            .collect();

        let marked = fields.iter().filter(|f| f.read_only).count();
        if marked > 0 {
            debug!(
                "marked {} fields read-only on '{}' serializer",
                marked,
                rules.model()
            );
        }

        Ok(Self {
            model: rules.model().to_string(),
            fields,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fields(&self) -> &[SerializerField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&SerializerField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn read_only_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.read_only)
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn writable_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| !f.read_only)
            .map(|f| f.name.as_str())
            .collect()
    }

    /// Whether inbound writes to `name` should be accepted. Unknown names
    /// are not writable.
    pub fn is_writable(&self, name: &str) -> bool {
        self.field(name).is_some_and(|f| !f.read_only)
    }

    /// Render the serialized output object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut out = Map::new();
        for field in &self.fields {
            out.insert(
                field.name.clone(),
                field.value.clone().unwrap_or(Value::Null),
            );
        }
        Value::Object(out)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
