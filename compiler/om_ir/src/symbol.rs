//! Symbol keys, symbol references and attribute sets.
//!
//! A `SymbolKey` names a definition: the pair (content dictionary, symbol
//! name). A `SymbolRef` is one *occurrence* of that key in a tree, and may
//! carry attributes that belong to that occurrence only.

use std::fmt;

use crate::{Name, Node, StringLookup};

/// Key for looking up implementations in registries.
///
/// Combines a content dictionary name and a symbol name into a single
/// hashable key. Uses interned `Name` values for cheap comparison.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct SymbolKey {
    /// The content dictionary (e.g., "arith1", "logic1")
    pub cd: Name,
    /// The symbol within that dictionary (e.g., "plus", "true")
    pub name: Name,
}

impl SymbolKey {
    /// Create a new symbol key from interned names.
    #[inline]
    pub const fn new(cd: Name, name: Name) -> Self {
        Self { cd, name }
    }

    /// Format the key for display (requires interner).
    #[inline]
    pub fn display<'a, L: StringLookup>(&self, interner: &'a L) -> SymbolKeyDisplay<'a> {
        SymbolKeyDisplay {
            cd: interner.lookup(self.cd),
            name: interner.lookup(self.name),
        }
    }
}

/// Helper for displaying a `SymbolKey` with resolved names.
pub struct SymbolKeyDisplay<'a> {
    cd: &'a str,
    name: &'a str,
}

impl fmt::Display for SymbolKeyDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.cd, self.name)
    }
}

/// Ordered attribute pairs.
///
/// Keys are symbol keys (OpenMath attributions are keyed by symbols), values
/// are arbitrary trees. Insertion order is preserved for iteration;
/// inserting an existing key replaces its value in place. Equality compares
/// the pairs as a set, so order does not matter.
#[derive(Clone, Debug, Default)]
pub struct Attributes {
    pairs: Vec<(SymbolKey, Node)>,
}

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: SymbolKey, value: Node) {
        if let Some(slot) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    /// Builder-style `insert`.
    #[must_use]
    pub fn with(mut self, key: SymbolKey, value: Node) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the value attached under `key`.
    pub fn get(&self, key: SymbolKey) -> Option<&Node> {
        self.pairs.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Merge `other` into a copy of `self`; pairs from `other` win.
    #[must_use]
    pub fn merged(&self, other: &Attributes) -> Attributes {
        let mut merged = self.clone();
        for (key, value) in &other.pairs {
            merged.insert(*key, value.clone());
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolKey, &Node)> {
        self.pairs.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PartialEq for Attributes {
    // keys are unique, so equal length plus every pair found is set equality
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .pairs
                .iter()
                .all(|(key, value)| other.get(*key) == Some(value))
    }
}

impl FromIterator<(SymbolKey, Node)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (SymbolKey, Node)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// One occurrence of a symbol in a tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolRef {
    pub key: SymbolKey,
    /// Attributes attached at this occurrence.
    pub attributes: Attributes,
}

impl SymbolRef {
    /// Create an unattributed reference.
    pub fn new(cd: Name, name: Name) -> Self {
        Self {
            key: SymbolKey::new(cd, name),
            attributes: Attributes::new(),
        }
    }

    /// Create an unattributed reference from a key.
    pub fn from_key(key: SymbolKey) -> Self {
        Self {
            key,
            attributes: Attributes::new(),
        }
    }

    /// Replace this occurrence's attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub fn cd(&self) -> Name {
        self.key.cd
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.key.name
    }
}

impl From<SymbolKey> for SymbolRef {
    fn from(key: SymbolKey) -> Self {
        SymbolRef::from_key(key)
    }
}
