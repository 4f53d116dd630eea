//! OM IR - OpenMath object tree types
//!
//! This crate contains the data structures the evaluator walks:
//! - Names for interned identifiers (content dictionaries, symbols, variables)
//! - Symbol keys and occurrence-scoped symbol references
//! - Attribute sets attached to symbol occurrences and attributed terms
//! - The closed set of object tree nodes
//!
//! There is no parser here. Trees are built programmatically (or by an
//! external decoder) through the `Node` constructors.
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: CD names, symbol names and variable names are
//!   `Name(u32)`, so symbol keys are `Copy` and hash in O(1).
//! - **Closed Tree**: `Node` is an enum; evaluation of each variant lives in
//!   exactly one place in `om_eval`.

mod interner;
mod name;
mod node;
mod symbol;

pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use node::Node;
pub use symbol::{Attributes, SymbolKey, SymbolKeyDisplay, SymbolRef};
