//! Thread-safe shared registry wrapper.

use std::fmt;
use std::sync::Arc;

/// Shared, immutable registry handle.
///
/// Uses `Arc` internally. The wrapped registry cannot be mutated after it
/// is shared, so every context holding a clone sees the same configuration.
pub struct SharedRegistry<T>(Arc<T>);

impl<T> SharedRegistry<T> {
    /// Create a new shared registry from an owned registry.
    pub fn new(registry: T) -> Self {
        SharedRegistry(Arc::new(registry))
    }
}

impl<T> Clone for SharedRegistry<T> {
    fn clone(&self) -> Self {
        SharedRegistry(Arc::clone(&self.0))
    }
}

impl<T> std::ops::Deref for SharedRegistry<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedRegistry({:?})", &*self.0)
    }
}
