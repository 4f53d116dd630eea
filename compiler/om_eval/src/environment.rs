//! Lexical scope for variables introduced by binders.
//!
//! A `Scope` is a stack of binding frames. Frames are reference counted, so
//! a scope derived from another shares the frames that existed at derivation
//! time while keeping its own stack: pushes and pops on one are invisible to
//! the other, writes into a shared frame are visible to both.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use om_ir::Name;

use crate::Value;

/// Error returned by scope operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeError {
    /// `pop` on a scope with no frames.
    Underflow,
    /// No frame binds the name.
    OutOfScope(Name),
    /// `assign` on a scope with no frames.
    NoActiveFrame(Name),
}

/// A single-threaded shared handle to a frame.
///
/// Wraps `Rc<RefCell<T>>`; cloning the handle shares the frame. Not
/// thread-safe, like the evaluator that uses it.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// True if both handles point at the same frame.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One lexical layer: the names one binder introduces.
///
/// Bindings are hashed, not kept in insertion order. Lookup is by name only,
/// and nothing iterates a frame.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    bindings: FxHashMap<Name, Value>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` in this frame, replacing any previous binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    #[inline]
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<(Name, Value)> for Frame {
    fn from_iter<I: IntoIterator<Item = (Name, Value)>>(iter: I) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

/// Stack of binding frames, top-most last.
#[derive(Debug, Default)]
pub struct Scope {
    frames: Vec<LocalScope<Frame>>,
}

impl Scope {
    /// Create a scope with no frames.
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Number of frames on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Push `frame` as the new top-most layer.
    #[inline]
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(LocalScope::new(frame));
    }

    /// Push a frame built from `bindings`.
    pub fn push_bindings<I>(&mut self, bindings: I)
    where
        I: IntoIterator<Item = (Name, Value)>,
    {
        self.push(bindings.into_iter().collect());
    }

    /// Remove and return the top-most frame.
    #[inline]
    pub fn pop(&mut self) -> Result<LocalScope<Frame>, ScopeError> {
        self.frames.pop().ok_or(ScopeError::Underflow)
    }

    /// Resolve `name`, most recently pushed frame first.
    #[inline]
    pub fn lookup(&self, name: Name) -> Result<Value, ScopeError> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.borrow().get(name).cloned())
            .ok_or(ScopeError::OutOfScope(name))
    }

    /// Bind `name` in the top-most frame.
    ///
    /// Outer frames are never written, even if they already bind `name`.
    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), ScopeError> {
        let top = self.frames.last().ok_or(ScopeError::NoActiveFrame(name))?;
        top.borrow_mut().define(name, value);
        Ok(())
    }

    /// New scope over the same frames.
    ///
    /// The frame list is copied, the frames themselves are shared.
    #[must_use]
    pub fn derive(&self) -> Scope {
        Scope {
            frames: self.frames.clone(),
        }
    }

    /// Handle to the top-most frame, if any.
    pub fn top(&self) -> Option<LocalScope<Frame>> {
        self.frames.last().cloned()
    }
}
