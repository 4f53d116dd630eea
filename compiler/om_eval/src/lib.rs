//! OM Eval - evaluation engine for OpenMath object trees.
//!
//! This crate resolves OpenMath symbols to implementations registered per
//! content dictionary and evaluates trees by recursive descent.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Scope`: stack of binding frames for variables introduced by binders
//! - `ImplementationRegistry`: (content dictionary, symbol) -> implementation,
//!   built once with `RegistryBuilder` and shared through `SharedRegistry`
//! - `EvalContext`: owns the active scope and the registry, and is the
//!   environment every node evaluates against
//! - `Evaluate`: one impl per node variant, in `eval.rs`
//! - `XmlEncoder`: escaping for text handed back to markup output
//!
//! Symbols with no implementation are not errors. They stay in the result
//! as written, so a tree may come back partially evaluated.
//!
//! # Example
//!
//! ```text
//! let interner = SharedInterner::new();
//! let mut builder = RegistryBuilder::new(&interner);
//! let mut arith1 = builder.dictionary("arith1");
//! arith1.function("plus", plus)?;
//! builder.register(arith1)?;
//!
//! let mut ctx = EvalContext::new(SharedRegistry::new(builder.build()));
//! let three = ctx.evaluate_to_node(&plus_1_2)?;
//! ```

mod context;
mod encode;
mod environment;
pub mod errors;
mod eval;
mod implementation;
mod registry;
mod shared;
mod stack;
mod value;

pub use context::{EvalContext, EvalContextBuilder, ScopedContext};
pub use encode::XmlEncoder;
pub use environment::{Frame, LocalScope, Scope, ScopeError};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Missing};
pub use eval::Evaluate;
pub use implementation::{BinderFn, ImplFn, ImplKind, Implementation};
pub use registry::{CdImplementation, ImplementationRegistry, RegistryBuilder, RegistryError};
pub use shared::SharedRegistry;
pub use stack::ensure_sufficient_stack;
pub use value::Value;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=om_eval=debug` or `RUST_LOG=om_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
