//! Interned string identifier.
//!
//! Provides compact 32-bit interned identifiers for CD names, symbol names
//! and variable names.

use std::fmt;

/// Interned string identifier.
///
/// An index into the owning `StringInterner`. Two names from the same
/// interner are equal iff their strings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Create from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }

    /// Get raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the interner's string table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_raw_roundtrip() {
        let name = Name::from_raw(1000);
        assert_eq!(name.raw(), 1000);
        assert_eq!(name.index(), 1000);
    }

    #[test]
    fn test_name_empty() {
        assert_eq!(Name::EMPTY.raw(), 0);
        assert_eq!(Name::default(), Name::EMPTY);
    }

    #[test]
    fn test_name_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Name::from_raw(1));
        set.insert(Name::from_raw(1)); // duplicate
        set.insert(Name::from_raw(2));
        assert_eq!(set.len(), 2);
    }
}
