use super::*;
use crate::{
    EvalErrorKind, EvalResult, Frame, ImplementationRegistry, RegistryBuilder, SharedRegistry,
    Value,
};
use om_ir::{Name, Node, SharedInterner, SymbolKey};

fn boom(_: &mut EvalContext, _: &[Value]) -> EvalResult {
    panic!("implementation panicked")
}

fn empty_context() -> (SharedInterner, EvalContext) {
    let interner = SharedInterner::new();
    let registry = SharedRegistry::new(ImplementationRegistry::empty(&interner));
    (interner, EvalContext::new(registry))
}

fn scope_with(name: Name, value: i64) -> Scope {
    let mut scope = Scope::new();
    scope.push_bindings([(name, Value::int(value))]);
    scope
}

/// The binding every test expects to see again after a swap.
fn push_original(ctx: &mut EvalContext, name: Name) {
    ctx.push(Frame::from_iter([(name, Value::int(100))]));
}

#[test]
fn test_with_scope_restores_on_normal_exit() {
    let (interner, mut ctx) = empty_context();
    let x = interner.intern("x");
    ctx.push(Frame::new());

    {
        let scoped = ctx.with_scope(scope_with(x, 1));
        assert_eq!(scoped.lookup(x), Ok(Value::int(1)));
        assert_eq!(scoped.scope().depth(), 1);
    }

    assert!(ctx.lookup(x).is_err());
    assert_eq!(ctx.scope().depth(), 1);
}

#[test]
fn test_evaluate_in_scope_restores_after_error() {
    let (interner, mut ctx) = empty_context();
    let x = interner.intern("x");
    let y = interner.intern("y");
    push_original(&mut ctx, x);

    // `y` is unbound in the swapped-in scope as well
    let err = ctx
        .evaluate_in_scope(&Node::var(y), scope_with(interner.intern("z"), 0))
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::OutOfScope {
            name: "y".to_string()
        }
    );

    assert_eq!(ctx.lookup(x), Ok(Value::int(100)));
}

#[test]
fn test_evaluate_in_scope_restores_after_panic() {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    let interner = SharedInterner::new();
    let mut builder = RegistryBuilder::new(&interner);
    let mut test_cd = builder.dictionary("test");
    test_cd.function("boom", boom).unwrap();
    builder.register(test_cd).unwrap();
    let mut ctx = EvalContext::new(SharedRegistry::new(builder.build()));

    let x = interner.intern("x");
    push_original(&mut ctx, x);

    let boom_call = Node::apply(
        Node::symbol_key(SymbolKey::new(interner.intern("test"), interner.intern("boom"))),
        vec![],
    );
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = ctx.evaluate_in_scope(&boom_call, Scope::new());
    }));

    assert!(result.is_err());
    // original scope is back despite the unwind
    assert_eq!(ctx.lookup(x), Ok(Value::int(100)));
    assert_eq!(ctx.scope().depth(), 1);
}

#[test]
fn test_nested_swaps_restore_in_order() {
    let (interner, mut ctx) = empty_context();
    let x = interner.intern("x");
    push_original(&mut ctx, x);

    {
        let mut outer = ctx.with_scope(scope_with(x, 1));
        assert_eq!(outer.lookup(x), Ok(Value::int(1)));
        {
            let inner = outer.with_scope(scope_with(x, 2));
            assert_eq!(inner.lookup(x), Ok(Value::int(2)));
        }
        assert_eq!(outer.lookup(x), Ok(Value::int(1)));
    }

    assert_eq!(ctx.lookup(x), Ok(Value::int(100)));
}

#[test]
fn test_pushes_inside_swap_do_not_leak() {
    let (interner, mut ctx) = empty_context();
    let x = interner.intern("x");
    let y = interner.intern("y");
    push_original(&mut ctx, x);

    {
        let derived = ctx.derive_scope();
        let mut scoped = ctx.with_scope(derived);
        scoped.push(Frame::from_iter([(y, Value::int(2))]));
        assert_eq!(scoped.lookup(x), Ok(Value::int(100)));
        assert_eq!(scoped.lookup(y), Ok(Value::int(2)));
    }

    assert!(ctx.lookup(y).is_err());
    assert_eq!(ctx.scope().depth(), 1);
}
