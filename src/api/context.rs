//! Per-request state handed to serializers.

use std::fmt;
use std::sync::Arc;

use crate::principal::Principal;

/// The request-scoped context a serializer is constructed under. Carries
/// the acting user, when one is authenticated.
#[derive(Clone, Default)]
pub struct RequestContext {
    user: Option<Arc<dyn Principal + Send + Sync>>,
}

impl RequestContext {
    /// A context with no authenticated user.
    #[must_use]
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    #[must_use]
    pub fn with_user(user: Arc<dyn Principal + Send + Sync>) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&(dyn Principal + Send + Sync)> {
        self.user.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("authenticated", &self.user.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nobody;

    impl Principal for Nobody {
        fn has_perm(&self, _perm: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_anonymous_context_has_no_user() {
        let context = RequestContext::anonymous();
        assert!(context.user().is_none());
    }

    #[test]
    fn test_context_exposes_its_user() {
        let context = RequestContext::with_user(Arc::new(Nobody));
        assert!(context.user().is_some());
    }
}
