//! Evaluation rules for each node variant.
//!
//! Every variant's behavior is written once, here, against the public
//! surface of `EvalContext`. Nothing in the context matches on node kinds.

use om_ir::{Attributes, Name, Node, SymbolRef};

use crate::{EvalContext, EvalResult, Value};

/// Something the context can evaluate.
pub trait Evaluate {
    fn evaluate(&self, ctx: &mut EvalContext) -> EvalResult;
}

impl Evaluate for Node {
    fn evaluate(&self, ctx: &mut EvalContext) -> EvalResult {
        match self {
            Node::Int(_) | Node::Float(_) | Node::Str(_) => Ok(Value::Node(self.clone())),
            Node::Var(name) => ctx.lookup(*name),
            Node::Symbol(symbol) => Ok(ctx.evaluate_symbol(symbol)),
            Node::Application { head, args } => eval_application(ctx, head, args),
            Node::Attribution { attributes, body } => {
                eval_attribution(ctx, self, attributes, body)
            }
            Node::Binding { binder, vars, body } => eval_binding(ctx, self, binder, vars, body),
        }
    }
}

/// Operator first, then operands left to right. An operator that did not
/// resolve to an implementation leaves the application in place with its
/// operands evaluated.
fn eval_application(ctx: &mut EvalContext, head: &Node, args: &[Node]) -> EvalResult {
    let operator = ctx.evaluate(head)?;
    let operands = args
        .iter()
        .map(|arg| ctx.evaluate(arg))
        .collect::<Result<Vec<_>, _>>()?;

    if let Value::Impl(_) = operator {
        return ctx.apply(&operator, &operands);
    }

    let head = ctx.package(operator)?;
    let args = operands
        .into_iter()
        .map(|value| ctx.package(value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Node(Node::apply(head, args)))
}

/// Attributes on a symbol become that occurrence's attributes (the
/// attribution's pairs win over ones already on the symbol). Any other body
/// is evaluated: a tree is re-wrapped, an implementation (from a nested
/// attribution or a variable) gets the pairs merged over its own.
fn eval_attribution(
    ctx: &mut EvalContext,
    node: &Node,
    attributes: &Attributes,
    body: &Node,
) -> EvalResult {
    if let Node::Symbol(symbol) = body {
        let occurrence = SymbolRef {
            key: symbol.key,
            attributes: symbol.attributes.merged(attributes),
        };
        return Ok(match ctx.evaluate_symbol(&occurrence) {
            Value::Node(_) => Value::Node(node.clone()),
            resolved => resolved,
        });
    }

    Ok(match ctx.evaluate(body)? {
        Value::Node(inner) => Value::Node(Node::attribution(attributes.clone(), inner)),
        Value::Impl(implementation) => Value::Impl(
            implementation.with_attributes(implementation.attributes().merged(attributes)),
        ),
        value => value,
    })
}

/// The binder gets the variables and the body as written; it decides how
/// and in which scope the body is evaluated. An unresolved binder leaves the
/// whole construct untouched.
fn eval_binding(
    ctx: &mut EvalContext,
    node: &Node,
    binder: &Node,
    vars: &[Name],
    body: &Node,
) -> EvalResult {
    match ctx.evaluate(binder)? {
        Value::Impl(implementation) => ctx.apply_binder(&implementation, vars, body),
        _ => Ok(Value::Node(node.clone())),
    }
}
