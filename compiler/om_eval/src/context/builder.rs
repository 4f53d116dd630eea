//! `EvalContextBuilder` for creating contexts with a non-default setup.

use super::EvalContext;
use crate::environment::Scope;
use crate::{ImplementationRegistry, SharedRegistry};

/// Builder for `EvalContext`.
///
/// The registry is required; the initial scope defaults to an empty one.
pub struct EvalContextBuilder {
    registry: SharedRegistry<ImplementationRegistry>,
    scope: Option<Scope>,
}

impl EvalContextBuilder {
    pub fn new(registry: SharedRegistry<ImplementationRegistry>) -> Self {
        Self {
            registry,
            scope: None,
        }
    }

    /// Set the initial scope, e.g. one carrying global bindings.
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn build(self) -> EvalContext {
        EvalContext::from_parts(self.registry, self.scope.unwrap_or_default())
    }
}
