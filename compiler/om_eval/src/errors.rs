//! Error types for evaluation.
//!
//! `EvalErrorKind` provides typed error categories; factory functions
//! (e.g., `out_of_scope()`) are the public constructors and populate both
//! `kind` and `message`.
//!
//! Only one kind is ever recovered locally: `NotImplemented`, which
//! `EvalContext::evaluate_symbol` turns into an unevaluated symbol. Every
//! other kind propagates to the caller of `evaluate`.

use std::fmt;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Which level of the registry lookup came up empty.
///
/// Carried for logging only. Both levels are the same error kind, so the
/// swallow-versus-propagate policy cannot depend on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    /// No implementation set is registered for the content dictionary.
    Dictionary,
    /// The content dictionary is known but does not define the symbol.
    Symbol,
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Scope
    OutOfScope {
        name: String,
    },
    ScopeUnderflow,
    NoActiveFrame {
        name: String,
    },

    // Resolution
    NotImplemented {
        symbol: String,
        missing: Missing,
    },

    // Conversion
    Unpackaged {
        type_name: String,
    },

    // Invocation
    NotCallable {
        type_name: String,
    },
    NotABinder {
        symbol: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    TypeMismatch {
        expected: String,
        got: String,
    },

    /// Catch-all for implementation-defined failures.
    Custom {
        message: String,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfScope { name } => write!(f, "variable `{name}` is not in scope"),
            Self::ScopeUnderflow => write!(f, "cannot pop from an empty scope"),
            Self::NoActiveFrame { name } => {
                write!(f, "cannot assign `{name}`: scope has no layers")
            }
            Self::NotImplemented { symbol, missing } => match missing {
                Missing::Dictionary => {
                    write!(f, "no implementation for {symbol}: unknown content dictionary")
                }
                Missing::Symbol => write!(f, "no implementation for {symbol}"),
            },
            Self::Unpackaged { type_name } => {
                write!(f, "cannot convert {type_name} into an OpenMath object")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::NotABinder { symbol } => write!(f, "{symbol} is not a binder"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{name} expects {expected} {arg_word}, got {got}")
            }
            Self::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: expected {expected}, got {got}")
            }
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable error message. Equals `kind.to_string()` for
    /// factory-created errors.
    pub message: String,
}

impl EvalError {
    /// Create an error with just a message (`Custom` kind).
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self { kind, message }
    }

    /// True for the one kind `evaluate_symbol` recovers from.
    #[inline]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self.kind, EvalErrorKind::NotImplemented { .. })
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

// Scope Errors

#[cold]
pub fn out_of_scope(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::OutOfScope {
        name: name.to_string(),
    })
}

#[cold]
pub fn scope_underflow() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScopeUnderflow)
}

#[cold]
pub fn no_active_frame(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoActiveFrame {
        name: name.to_string(),
    })
}

// Resolution Errors

/// No implementation registered for `symbol` (rendered as `cd.name`).
#[cold]
pub fn not_implemented(symbol: &str, missing: Missing) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImplemented {
        symbol: symbol.to_string(),
        missing,
    })
}

// Conversion Errors

#[cold]
pub fn unpackaged(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unpackaged {
        type_name: type_name.to_string(),
    })
}

// Invocation Errors

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn not_a_binder(symbol: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotABinder {
        symbol: symbol.to_string(),
    })
}

/// Wrong number of arguments passed to an implementation.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}
