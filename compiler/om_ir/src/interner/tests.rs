use super::*;

#[test]
fn test_intern_and_lookup() {
    let interner = StringInterner::new();

    let plus = interner.intern("plus");
    let times = interner.intern("times");
    let plus2 = interner.intern("plus");

    assert_eq!(plus, plus2);
    assert_ne!(plus, times);

    assert_eq!(interner.lookup(plus), "plus");
    assert_eq!(interner.lookup(times), "times");
}

#[test]
fn test_empty_string() {
    let interner = StringInterner::new();
    let empty = interner.intern("");
    assert_eq!(empty, Name::EMPTY);
    assert_eq!(interner.lookup(Name::EMPTY), "");
}

#[test]
fn test_core_dictionaries_pre_interned() {
    let interner = StringInterner::new();
    let before = interner.len();

    let arith1 = interner.intern("arith1");
    let logic1 = interner.intern("logic1");

    assert_eq!(interner.len(), before);
    assert_eq!(interner.lookup(arith1), "arith1");
    assert_eq!(interner.lookup(logic1), "logic1");
    assert!(!interner.is_empty());
}

#[test]
fn test_lookup_out_of_range_is_empty() {
    let interner = StringInterner::new();
    assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
}

#[test]
fn test_shared_interner() {
    let interner = SharedInterner::new();
    let interner2 = interner.clone();

    let name1 = interner.intern("shared");
    let name2 = interner2.intern("shared");

    assert_eq!(name1, name2);
    assert_eq!(interner2.lookup(name1), "shared");
}

#[test]
fn test_string_lookup_trait() {
    fn render<L: StringLookup>(lookup: &L, name: Name) -> String {
        lookup.lookup(name).to_owned()
    }

    let interner = StringInterner::new();
    let x = interner.intern("x");
    assert_eq!(render(&interner, x), "x");
}
