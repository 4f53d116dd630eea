//! The evaluation context.
//!
//! `EvalContext` is the single environment every node is evaluated against.
//! It mediates between symbol references and the implementation registry,
//! and between binders and the lexical scope.
//!
//! # Architecture
//!
//! The context has no node-specific logic. `evaluate` hands the node back
//! its own `Evaluate` impl with `self` as the environment; the impls in
//! `crate::eval` call back into the public methods here:
//!
//! - `evaluate_symbol` - registry lookup with the evaluate-or-pass-through
//!   policy for unknown symbols
//! - `lookup` - variable resolution through the active scope
//! - `apply` / `apply_binder` - the calling conventions for implementations
//! - `evaluate_in_scope` - binder bodies, under a temporarily swapped scope
//!
//! Conversions between native values and trees live in `package.rs`; the
//! scope swap guard lives in `scope_guard.rs`.

mod builder;
mod package;
mod scope_guard;

pub use builder::EvalContextBuilder;
pub use scope_guard::ScopedContext;

use om_ir::{Name, Node, SharedInterner, StringInterner, SymbolRef};

use crate::environment::{Frame, LocalScope, Scope, ScopeError};
use crate::errors::{no_active_frame, not_a_binder, not_callable, out_of_scope, scope_underflow};
use crate::eval::Evaluate;
use crate::stack::ensure_sufficient_stack;
use crate::{
    EvalError, EvalResult, ImplKind, Implementation, ImplementationRegistry, SharedRegistry,
    Value, XmlEncoder,
};

/// Pre-interned `logic1` names, used to move booleans in and out of trees.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LogicNames {
    pub(crate) cd: Name,
    pub(crate) true_: Name,
    pub(crate) false_: Name,
}

impl LogicNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            cd: interner.intern("logic1"),
            true_: interner.intern("true"),
            false_: interner.intern("false"),
        }
    }
}

/// Resolution and execution environment for OpenMath evaluation.
#[derive(Debug)]
pub struct EvalContext {
    /// Active lexical scope. Replaced for the duration of
    /// `evaluate_in_scope`.
    scope: Scope,
    registry: SharedRegistry<ImplementationRegistry>,
    encoder: XmlEncoder,
    logic: LogicNames,
}

impl EvalContext {
    /// Create a context with an empty scope.
    pub fn new(registry: SharedRegistry<ImplementationRegistry>) -> Self {
        EvalContextBuilder::new(registry).build()
    }

    pub fn builder(registry: SharedRegistry<ImplementationRegistry>) -> EvalContextBuilder {
        EvalContextBuilder::new(registry)
    }

    fn from_parts(registry: SharedRegistry<ImplementationRegistry>, scope: Scope) -> Self {
        let logic = LogicNames::new(registry.interner());
        Self {
            scope,
            registry,
            encoder: XmlEncoder::new(),
            logic,
        }
    }

    pub fn interner(&self) -> &SharedInterner {
        self.registry.interner()
    }

    pub fn registry(&self) -> &ImplementationRegistry {
        &self.registry
    }

    /// The active scope.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    // Scope access

    /// Resolve a variable in the active scope.
    pub fn lookup(&self, name: Name) -> EvalResult {
        self.scope.lookup(name).map_err(|e| self.scope_error(e))
    }

    /// Bind a variable in the active scope's top-most frame.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        self.scope
            .assign(name, value)
            .map_err(|e| self.scope_error(e))
    }

    /// Push a lexical layer onto the active scope.
    pub fn push(&mut self, frame: Frame) {
        self.scope.push(frame);
    }

    /// Pop a lexical layer from the active scope.
    pub fn pop(&mut self) -> Result<LocalScope<Frame>, EvalError> {
        self.scope.pop().map_err(|e| self.scope_error(e))
    }

    /// A new scope sharing the active scope's frames.
    #[must_use]
    pub fn derive_scope(&self) -> Scope {
        self.scope.derive()
    }

    #[cold]
    fn scope_error(&self, err: ScopeError) -> EvalError {
        let interner = self.interner();
        match err {
            ScopeError::Underflow => scope_underflow(),
            ScopeError::OutOfScope(name) => out_of_scope(interner.lookup(name)),
            ScopeError::NoActiveFrame(name) => no_active_frame(interner.lookup(name)),
        }
    }

    // Resolution

    /// Resolve a symbol occurrence to its implementation.
    ///
    /// An occurrence carrying attributes gets its own copy of the
    /// implementation with those attributes attached. A symbol with no
    /// implementation is not an error: the reference comes back unchanged
    /// and evaluation carries on around it.
    pub fn evaluate_symbol(&self, symbol: &SymbolRef) -> Value {
        match self.registry.resolve(symbol.key) {
            Ok(implementation) if symbol.attributes.is_empty() => {
                Value::Impl(implementation.clone())
            }
            Ok(implementation) => {
                Value::Impl(implementation.with_attributes(symbol.attributes.clone()))
            }
            Err(err) => {
                tracing::debug!(error = %err, "leaving symbol unevaluated");
                Value::Node(Node::Symbol(symbol.clone()))
            }
        }
    }

    // Evaluation

    /// Evaluate `node` against this context.
    pub fn evaluate<N: Evaluate + ?Sized>(&mut self, node: &N) -> EvalResult {
        ensure_sufficient_stack(|| node.evaluate(self))
    }

    /// Evaluate `node` with `scope` as the active scope.
    ///
    /// The previous scope is restored on every exit path, including errors
    /// and panics unwinding through the evaluation.
    #[tracing::instrument(level = "trace", skip_all, fields(depth = scope.depth()))]
    pub fn evaluate_in_scope<N: Evaluate + ?Sized>(&mut self, node: &N, scope: Scope) -> EvalResult {
        let mut scoped = self.with_scope(scope);
        scoped.evaluate(node)
    }

    /// Evaluate `node` in the active scope plus one new frame holding
    /// `bindings`. The usual entry point for binder implementations.
    pub fn evaluate_with_bindings<N, I>(&mut self, node: &N, bindings: I) -> EvalResult
    where
        N: Evaluate + ?Sized,
        I: IntoIterator<Item = (Name, Value)>,
    {
        let mut scope = self.derive_scope();
        scope.push_bindings(bindings);
        self.evaluate_in_scope(node, scope)
    }

    /// Evaluate `node` and package the result back into a tree.
    pub fn evaluate_to_node(&mut self, node: &Node) -> Result<Node, EvalError> {
        let value = self.evaluate(node)?;
        self.package(value)
    }

    // Invocation

    /// Call `operator` with the context and `args`.
    pub fn apply(&mut self, operator: &Value, args: &[Value]) -> EvalResult {
        match operator {
            Value::Impl(implementation) => match implementation.kind() {
                ImplKind::Function(f) => f(self, args),
                kind => Err(not_callable(kind.name())),
            },
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call a binder with the context, the bound variables and the
    /// unevaluated body.
    pub fn apply_binder(
        &mut self,
        binder: &Implementation,
        vars: &[Name],
        body: &Node,
    ) -> EvalResult {
        match binder.kind() {
            ImplKind::Binder(f) => f(self, vars, body),
            _ => Err(not_a_binder(
                &binder.key().display(&**self.interner()).to_string(),
            )),
        }
    }

    // Output

    /// Escape `text` for embedding in XML output.
    pub fn encode_output(&self, text: &str) -> String {
        self.encoder.encode(text)
    }
}
