//! OpenMath object tree nodes.

use crate::{Attributes, Name, SymbolKey, SymbolRef};

/// A node of an OpenMath object tree.
///
/// The set of variants is closed: the evaluator implements each variant's
/// behavior once, and nothing outside this enum can be evaluated.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Integer literal (`OMI`).
    Int(i64),
    /// Floating point literal (`OMF`).
    Float(f64),
    /// String literal (`OMSTR`).
    Str(String),
    /// Variable (`OMV`), resolved through the lexical scope.
    Var(Name),
    /// Symbol occurrence (`OMS`), resolved through the implementation registry.
    Symbol(SymbolRef),
    /// Application of `head` to `args` (`OMA`).
    Application { head: Box<Node>, args: Vec<Node> },
    /// Term carrying attribute pairs (`OMATTR`).
    Attribution {
        attributes: Attributes,
        body: Box<Node>,
    },
    /// Binder construct (`OMBIND`): `binder` introduces `vars` over `body`.
    Binding {
        binder: Box<Node>,
        vars: Vec<Name>,
        body: Box<Node>,
    },
}

impl Node {
    #[inline]
    pub fn int(value: i64) -> Self {
        Node::Int(value)
    }

    #[inline]
    pub fn float(value: f64) -> Self {
        Node::Float(value)
    }

    pub fn str(value: impl Into<String>) -> Self {
        Node::Str(value.into())
    }

    #[inline]
    pub fn var(name: Name) -> Self {
        Node::Var(name)
    }

    /// Unattributed symbol occurrence.
    pub fn symbol(cd: Name, name: Name) -> Self {
        Node::Symbol(SymbolRef::new(cd, name))
    }

    pub fn symbol_key(key: SymbolKey) -> Self {
        Node::Symbol(SymbolRef::from_key(key))
    }

    pub fn apply(head: Node, args: Vec<Node>) -> Self {
        Node::Application {
            head: Box::new(head),
            args,
        }
    }

    pub fn attribution(attributes: Attributes, body: Node) -> Self {
        Node::Attribution {
            attributes,
            body: Box::new(body),
        }
    }

    pub fn bind(binder: Node, vars: Vec<Name>, body: Node) -> Self {
        Node::Binding {
            binder: Box::new(binder),
            vars,
            body: Box::new(body),
        }
    }

    /// Literals evaluate to themselves.
    pub fn is_literal(&self) -> bool {
        matches!(self, Node::Int(_) | Node::Float(_) | Node::Str(_))
    }

    pub fn as_symbol(&self) -> Option<&SymbolRef> {
        match self {
            Node::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Short variant name, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Int(_) => "OMI",
            Node::Float(_) => "OMF",
            Node::Str(_) => "OMSTR",
            Node::Var(_) => "OMV",
            Node::Symbol(_) => "OMS",
            Node::Application { .. } => "OMA",
            Node::Attribution { .. } => "OMATTR",
            Node::Binding { .. } => "OMBIND",
        }
    }
}
