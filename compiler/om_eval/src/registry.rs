//! Implementation registry: content dictionary -> symbol -> implementation.
//!
//! Registries are assembled with a `RegistryBuilder`, one content dictionary
//! at a time, and frozen by `build()`. There is no way to mutate an
//! `ImplementationRegistry` afterwards; share it with `SharedRegistry`.

use std::fmt;

use om_ir::{Name, SharedInterner, SymbolKey};
use rustc_hash::FxHashMap;

use crate::errors::{not_implemented, EvalError, Missing};
use crate::{BinderFn, ImplFn, Implementation, Value};

/// Error raised while assembling a registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// The content dictionary already has an implementation set.
    DuplicateDictionary { cd: String },
    /// The symbol is defined twice within one content dictionary.
    DuplicateSymbol { symbol: String },
    /// The implementation belongs to a different content dictionary than
    /// the set it was added to.
    ForeignSymbol { cd: String, symbol: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::DuplicateDictionary { cd } => {
                write!(f, "content dictionary `{cd}` is already registered")
            }
            RegistryError::DuplicateSymbol { symbol } => {
                write!(f, "`{symbol}` is already implemented")
            }
            RegistryError::ForeignSymbol { cd, symbol } => {
                write!(f, "`{symbol}` does not belong to content dictionary `{cd}`")
            }
        }
    }
}

impl std::error::Error for RegistryError {}

/// The implementations of one content dictionary.
pub struct CdImplementation {
    cd: Name,
    interner: SharedInterner,
    symbols: FxHashMap<Name, Implementation>,
}

impl CdImplementation {
    /// Create an empty implementation set for `cd`.
    pub fn new(interner: &SharedInterner, cd: &str) -> Self {
        Self {
            cd: interner.intern(cd),
            interner: interner.clone(),
            symbols: FxHashMap::default(),
        }
    }

    /// The content dictionary this set implements.
    #[inline]
    pub fn cd(&self) -> Name {
        self.cd
    }

    /// Add a prebuilt implementation. Its key must name this set's
    /// content dictionary.
    pub fn add(&mut self, implementation: Implementation) -> Result<&mut Self, RegistryError> {
        let key = implementation.key();
        if key.cd != self.cd {
            return Err(RegistryError::ForeignSymbol {
                cd: self.interner.lookup(self.cd).to_owned(),
                symbol: key.display(&*self.interner).to_string(),
            });
        }
        if self.symbols.contains_key(&key.name) {
            return Err(RegistryError::DuplicateSymbol {
                symbol: key.display(&*self.interner).to_string(),
            });
        }
        self.symbols.insert(key.name, implementation);
        Ok(self)
    }

    pub fn function(&mut self, name: &str, f: ImplFn) -> Result<&mut Self, RegistryError> {
        let key = self.key(name);
        self.add(Implementation::function(key, f))
    }

    pub fn binder(&mut self, name: &str, f: BinderFn) -> Result<&mut Self, RegistryError> {
        let key = self.key(name);
        self.add(Implementation::binder(key, f))
    }

    pub fn constant(&mut self, name: &str, value: Value) -> Result<&mut Self, RegistryError> {
        let key = self.key(name);
        self.add(Implementation::constant(key, value))
    }

    fn key(&self, name: &str) -> SymbolKey {
        SymbolKey::new(self.cd, self.interner.intern(name))
    }

    pub fn get(&self, name: Name) -> Option<&Implementation> {
        self.symbols.get(&name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Debug for CdImplementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self
            .symbols
            .keys()
            .map(|name| self.interner.lookup(*name))
            .collect();
        names.sort_unstable();
        f.debug_struct("CdImplementation")
            .field("cd", &self.interner.lookup(self.cd))
            .field("symbols", &names)
            .finish()
    }
}

/// Collects content dictionary implementations before evaluation starts.
pub struct RegistryBuilder {
    interner: SharedInterner,
    dictionaries: FxHashMap<Name, CdImplementation>,
}

impl RegistryBuilder {
    pub fn new(interner: &SharedInterner) -> Self {
        Self {
            interner: interner.clone(),
            dictionaries: FxHashMap::default(),
        }
    }

    /// Start an empty implementation set for `cd`, keyed with this
    /// builder's interner.
    pub fn dictionary(&self, cd: &str) -> CdImplementation {
        CdImplementation::new(&self.interner, cd)
    }

    /// Register one content dictionary's implementations as a unit.
    pub fn register(&mut self, set: CdImplementation) -> Result<&mut Self, RegistryError> {
        if self.dictionaries.contains_key(&set.cd) {
            return Err(RegistryError::DuplicateDictionary {
                cd: self.interner.lookup(set.cd).to_owned(),
            });
        }
        tracing::debug!(
            cd = self.interner.lookup(set.cd),
            symbols = set.len(),
            "registered content dictionary"
        );
        self.dictionaries.insert(set.cd, set);
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> ImplementationRegistry {
        ImplementationRegistry {
            interner: self.interner,
            dictionaries: self.dictionaries,
        }
    }
}

/// Immutable mapping from (content dictionary, symbol) to implementation.
pub struct ImplementationRegistry {
    interner: SharedInterner,
    dictionaries: FxHashMap<Name, CdImplementation>,
}

impl ImplementationRegistry {
    /// A registry with no content dictionaries; every symbol stays
    /// unevaluated.
    pub fn empty(interner: &SharedInterner) -> Self {
        RegistryBuilder::new(interner).build()
    }

    /// The interner this registry's keys were created with.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Look up the content dictionary, then the symbol within it.
    ///
    /// Both misses are `NotImplemented`; the `Missing` detail only changes
    /// the message.
    pub fn resolve(&self, key: SymbolKey) -> Result<&Implementation, EvalError> {
        let Some(set) = self.dictionaries.get(&key.cd) else {
            return Err(self.not_implemented(key, Missing::Dictionary));
        };
        set.get(key.name)
            .ok_or_else(|| self.not_implemented(key, Missing::Symbol))
    }

    #[cold]
    fn not_implemented(&self, key: SymbolKey, missing: Missing) -> EvalError {
        not_implemented(&key.display(&*self.interner).to_string(), missing)
    }

    pub fn contains(&self, key: SymbolKey) -> bool {
        self.dictionaries
            .get(&key.cd)
            .is_some_and(|set| set.get(key.name).is_some())
    }

    /// Registered content dictionary names, sorted.
    pub fn dictionaries(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self
            .dictionaries
            .keys()
            .map(|cd| self.interner.lookup(*cd))
            .collect();
        names.sort_unstable();
        names
    }

    /// Number of registered content dictionaries.
    pub fn len(&self) -> usize {
        self.dictionaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionaries.is_empty()
    }
}

impl fmt::Debug for ImplementationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImplementationRegistry")
            .field("dictionaries", &self.dictionaries())
            .finish()
    }
}
