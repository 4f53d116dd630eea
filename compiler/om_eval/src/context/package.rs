//! Conversions between native values and OpenMath trees.

use om_ir::{Node, SymbolRef};

use super::EvalContext;
use crate::errors::unpackaged;
use crate::{EvalError, ImplKind, Value};

impl EvalContext {
    /// Convert an evaluation result into a tree.
    ///
    /// | value        | node                              |
    /// |--------------|-----------------------------------|
    /// | `Node`       | unchanged                         |
    /// | `Int`        | `OMI`                             |
    /// | `Float`      | `OMF`                             |
    /// | `Str`        | `OMSTR`                           |
    /// | `Bool`       | `logic1.true` / `logic1.false`    |
    /// | `Impl`       | the symbol it implements          |
    /// | `Void`       | error: `Unpackaged`               |
    pub fn package(&self, value: Value) -> Result<Node, EvalError> {
        match value {
            Value::Node(node) => Ok(node),
            Value::Int(n) => Ok(Node::Int(n)),
            Value::Float(x) => Ok(Node::Float(x)),
            Value::Str(s) => Ok(Node::Str(s)),
            Value::Bool(b) => {
                let name = if b {
                    self.logic.true_
                } else {
                    self.logic.false_
                };
                Ok(Node::Symbol(SymbolRef::new(self.logic.cd, name)))
            }
            Value::Impl(implementation) => Ok(Node::Symbol(implementation.to_symbol_ref())),
            Value::Void => Err(unpackaged(Value::Void.type_name())),
        }
    }

    /// Unwrap a value into its native form, for implementations that
    /// compute on their arguments.
    ///
    /// Literal nodes become native values, `logic1.true`/`logic1.false`
    /// become booleans, and constants become their value. Anything else is
    /// returned as is.
    pub fn to_generic(&self, value: Value) -> Value {
        match value {
            Value::Node(Node::Int(n)) => Value::Int(n),
            Value::Node(Node::Float(x)) => Value::Float(x),
            Value::Node(Node::Str(s)) => Value::Str(s),
            Value::Node(Node::Symbol(symbol))
                if symbol.cd() == self.logic.cd && symbol.attributes.is_empty() =>
            {
                if symbol.name() == self.logic.true_ {
                    Value::Bool(true)
                } else if symbol.name() == self.logic.false_ {
                    Value::Bool(false)
                } else {
                    Value::Node(Node::Symbol(symbol))
                }
            }
            Value::Impl(implementation) => match implementation.kind() {
                ImplKind::Constant(value) => self.to_generic((**value).clone()),
                _ => Value::Impl(implementation),
            },
            other => other,
        }
    }
}
