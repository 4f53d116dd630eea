//! RAII-style scope swapping for the evaluation context.
//!
//! `ScopedContext` holds `&mut EvalContext` with a replacement scope
//! installed, and puts the original scope back when dropped, including
//! during unwinding. It implements `Deref`/`DerefMut`, so everything on the
//! context is available through the guard.
//!
//! # Usage
//!
//! ```text
//! {
//!     let mut scoped = context.with_scope(derived);
//!     scoped.evaluate(body)?;
//! } // original scope back here, even on `?` or panic
//! ```

use std::ops::{Deref, DerefMut};

use super::EvalContext;
use crate::environment::Scope;

/// Guard that restores the context's original scope on drop.
pub struct ScopedContext<'ctx> {
    context: &'ctx mut EvalContext,
    /// The scope to put back. Always `Some` until `drop`.
    saved: Option<Scope>,
}

impl Drop for ScopedContext<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.context.scope = saved;
            tracing::trace!(depth = self.context.scope.depth(), "scope restored");
        }
    }
}

impl Deref for ScopedContext<'_> {
    type Target = EvalContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ScopedContext<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl EvalContext {
    /// Install `scope` as the active scope until the returned guard drops.
    pub fn with_scope(&mut self, scope: Scope) -> ScopedContext<'_> {
        let saved = std::mem::replace(&mut self.scope, scope);
        ScopedContext {
            context: self,
            saved: Some(saved),
        }
    }
}

#[cfg(test)]
mod tests;
