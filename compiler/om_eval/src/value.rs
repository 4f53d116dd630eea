//! Runtime values produced by evaluation.

use std::fmt;

use om_ir::Node;

use crate::Implementation;

/// Result of evaluating a node.
///
/// Implementations work on native values (`Int`, `Float`, ...); trees carry
/// `Node`s. `EvalContext::to_generic` and `EvalContext::package` convert
/// between the two.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    /// An OpenMath object: a literal that evaluated to itself, or a
    /// partially evaluated tree.
    Node(Node),
    /// A resolved symbol.
    Impl(Implementation),
    /// Produced by implementations that return nothing.
    Void,
}

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Node(_) => "node",
            Value::Impl(_) => "implementation",
            Value::Void => "void",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_impl(&self) -> Option<&Implementation> {
        match self {
            Value::Impl(implementation) => Some(implementation),
            _ => None,
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Node(node)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "\"{s}\""),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Node(node) => write!(f, "<{}>", node.kind_name()),
            Value::Impl(_) => write!(f, "<implementation>"),
            Value::Void => write!(f, "void"),
        }
    }
}
