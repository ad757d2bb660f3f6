// HTTP-facing adapters: request context plus serializer field marking.

pub mod context;
pub mod serializer;

pub use context::RequestContext;
pub use serializer::{ModelSerializer, SerializerField};
