//! Error types for field permission operations.

/// Unified error type for the crate.
///
/// Resolution itself is infallible (it always produces a boolean); errors
/// arise from construction-time configuration problems and registry access.
#[derive(Debug, thiserror::Error)]
pub enum PermissionError {
    /// No acting user was supplied where one is required at construction
    /// time (form builders, serializer request contexts).
    #[error("Missing acting user: {0}")]
    MissingUser(String),

    /// A registry query named a model that was never registered.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// An instance did not serialize to a JSON object, so its fields
    /// cannot be introspected.
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// Serialization of an instance failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The model registry lock was poisoned by a panicking writer.
    #[error("Registry error: {0}")]
    Registry(String),
}

impl PermissionError {
    /// Create a missing-user error with context.
    pub fn missing_user<S: Into<String>>(msg: S) -> Self {
        Self::MissingUser(msg.into())
    }

    /// Create an unknown-model error with context.
    pub fn unknown_model<S: Into<String>>(msg: S) -> Self {
        Self::UnknownModel(msg.into())
    }

    /// Create an invalid-instance error with context.
    pub fn invalid_instance<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInstance(msg.into())
    }

    /// Create a registry error with context.
    pub fn registry<S: Into<String>>(msg: S) -> Self {
        Self::Registry(msg.into())
    }
}

/// Result type for permission operations.
pub type PermissionResult<T> = Result<T, PermissionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PermissionError::missing_user("form built without a user");
        assert!(matches!(err, PermissionError::MissingUser(_)));
        assert!(format!("{}", err).contains("Missing acting user"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("not json");
        let err: PermissionError = bad.unwrap_err().into();
        assert!(matches!(err, PermissionError::Serialization(_)));
    }
}
