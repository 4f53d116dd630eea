//! Symbol implementations.
//!
//! An `Implementation` is what a `SymbolKey` resolves to. The registry owns
//! the canonical copy; evaluation hands out clones. A clone that carries an
//! occurrence's attributes is a separate value, so attaching attributes never
//! touches the registry's entry.

use std::fmt;

use om_ir::{Attributes, Name, Node, SymbolKey, SymbolRef};

use crate::{EvalContext, EvalResult, Value};

/// Calling convention for operators: the context plus the evaluated
/// arguments.
pub type ImplFn = fn(&mut EvalContext, &[Value]) -> EvalResult;

/// Calling convention for binders: the context, the bound variables and the
/// unevaluated body.
pub type BinderFn = fn(&mut EvalContext, &[Name], &Node) -> EvalResult;

/// What a symbol is bound to.
#[derive(Clone)]
pub enum ImplKind {
    /// Applied to evaluated arguments (`OMA` heads).
    Function(ImplFn),
    /// Applied to bound variables and a body (`OMBIND` heads).
    Binder(BinderFn),
    /// A value; not callable.
    Constant(Box<Value>),
}

impl ImplKind {
    pub fn name(&self) -> &'static str {
        match self {
            ImplKind::Function(_) => "function",
            ImplKind::Binder(_) => "binder",
            ImplKind::Constant(_) => "constant",
        }
    }
}

/// A value or callable bound to a symbol within one content dictionary.
#[derive(Clone)]
pub struct Implementation {
    key: SymbolKey,
    kind: ImplKind,
    attributes: Attributes,
}

impl Implementation {
    pub fn function(key: SymbolKey, f: ImplFn) -> Self {
        Self::new(key, ImplKind::Function(f))
    }

    pub fn binder(key: SymbolKey, f: BinderFn) -> Self {
        Self::new(key, ImplKind::Binder(f))
    }

    pub fn constant(key: SymbolKey, value: Value) -> Self {
        Self::new(key, ImplKind::Constant(Box::new(value)))
    }

    fn new(key: SymbolKey, kind: ImplKind) -> Self {
        Self {
            key,
            kind,
            attributes: Attributes::new(),
        }
    }

    #[inline]
    pub fn key(&self) -> SymbolKey {
        self.key
    }

    /// The content dictionary this implementation belongs to.
    #[inline]
    pub fn content_dictionary(&self) -> Name {
        self.key.cd
    }

    #[inline]
    pub fn kind(&self) -> &ImplKind {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Shallow copy carrying `attributes` for one occurrence.
    #[must_use]
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        Self {
            key: self.key,
            kind: self.kind.clone(),
            attributes,
        }
    }

    /// The symbol reference this implementation stands for, including any
    /// occurrence attributes.
    pub fn to_symbol_ref(&self) -> SymbolRef {
        SymbolRef::from_key(self.key).with_attributes(self.attributes.clone())
    }
}

impl PartialEq for Implementation {
    /// Implementations are identified by the symbol they implement, their
    /// kind, and the occurrence attributes they carry.
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.attributes == other.attributes
            && match (&self.kind, &other.kind) {
                (ImplKind::Constant(a), ImplKind::Constant(b)) => a == b,
                (a, b) => a.name() == b.name(),
            }
    }
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Implementation")
            .field("key", &self.key)
            .field("kind", &self.kind.name())
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use om_ir::SharedInterner;

    fn noop(_: &mut EvalContext, _: &[Value]) -> EvalResult {
        Ok(Value::Void)
    }

    #[test]
    fn test_with_attributes_leaves_original_untouched() {
        let interner = SharedInterner::new();
        let key = SymbolKey::new(interner.intern("arith1"), interner.intern("plus"));
        let note = SymbolKey::new(interner.intern("test"), interner.intern("note"));

        let canonical = Implementation::function(key, noop);
        let copy = canonical.with_attributes(Attributes::new().with(note, Node::int(1)));

        assert!(canonical.attributes().is_empty());
        assert_eq!(copy.attributes().get(note), Some(&Node::int(1)));
        assert_eq!(copy.key(), canonical.key());
        assert_ne!(copy, canonical);
    }

    #[test]
    fn test_to_symbol_ref_carries_attributes() {
        let interner = SharedInterner::new();
        let key = SymbolKey::new(interner.intern("nums1"), interner.intern("pi"));
        let note = SymbolKey::new(interner.intern("test"), interner.intern("note"));

        let pi = Implementation::constant(key, Value::Float(std::f64::consts::PI))
            .with_attributes(Attributes::new().with(note, Node::str("approx")));
        let symbol = pi.to_symbol_ref();

        assert_eq!(symbol.key, key);
        assert_eq!(symbol.attributes.get(note), Some(&Node::str("approx")));
        assert_eq!(pi.content_dictionary(), interner.intern("nums1"));
    }

    #[test]
    fn test_equality_ignores_attribute_order() {
        let interner = SharedInterner::new();
        let key = SymbolKey::new(interner.intern("arith1"), interner.intern("plus"));
        let a = SymbolKey::new(interner.intern("test"), interner.intern("a"));
        let b = SymbolKey::new(interner.intern("test"), interner.intern("b"));

        let canonical = Implementation::function(key, noop);
        let ab = canonical.with_attributes(
            Attributes::new().with(a, Node::int(1)).with(b, Node::int(2)),
        );
        let ba = canonical.with_attributes(
            Attributes::new().with(b, Node::int(2)).with(a, Node::int(1)),
        );
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_kind_names() {
        let interner = SharedInterner::new();
        let key = SymbolKey::new(interner.intern("arith1"), interner.intern("plus"));
        assert_eq!(Implementation::function(key, noop).kind().name(), "function");
        assert_eq!(Implementation::constant(key, Value::Void).kind().name(), "constant");
    }
}
