//! Integration tests for class filters and string matchers.

use kmeta::classfile::{
    Class, ClassId, ClassNameFilter, ClassPool, ClassVisitor, FixedStringMatcher, OrMatcher,
    RegexMatcher, StringMatcher, SubclassFilter,
};

#[derive(Default)]
struct ClassNames {
    names: Vec<String>,
}

impl ClassVisitor for ClassNames {
    fn visit_any_class(&mut self, class: &Class) {
        self.names.push(class.name.clone());
    }
}

/// `Base <- Middle <- Leaf`, plus an unrelated `Other`.
fn hierarchy() -> (ClassPool, ClassId) {
    let mut pool = ClassPool::new();
    let base = pool.add_library_class("a/Base").unwrap();
    let middle = pool.add_program_class("a/Middle").unwrap();
    let leaf = pool.add_program_class("a/Leaf").unwrap();
    pool.add_program_class("a/Other").unwrap();
    pool.add_subclass(base, middle).unwrap();
    pool.add_subclass(middle, leaf).unwrap();
    (pool, leaf)
}

#[test]
fn test_subclass_filter_skips_direct_superclass_only() {
    let (pool, leaf) = hierarchy();

    let mut filter = SubclassFilter::new(leaf, ClassNames::default());
    pool.classes_accept(&mut filter);

    assert_eq!(
        filter.into_inner().names,
        vec!["a/Base", "a/Leaf", "a/Other"]
    );
}

#[test]
fn test_subclass_filter_tracks_removed_subclass() {
    let (mut pool, leaf) = hierarchy();
    pool.remove_class(leaf).unwrap();

    let mut filter = SubclassFilter::new(leaf, ClassNames::default());
    pool.classes_accept(&mut filter);

    assert_eq!(
        filter.into_inner().names,
        vec!["a/Base", "a/Middle", "a/Other"]
    );
}

#[test]
fn test_or_matcher_selects_classes() {
    let (pool, _) = hierarchy();
    let matcher = OrMatcher::default()
        .or(FixedStringMatcher::new("a/Base"))
        .or(RegexMatcher::new("a/L.*").unwrap());

    let mut filter = ClassNameFilter::new(matcher, ClassNames::default());
    pool.classes_accept(&mut filter);

    assert_eq!(filter.into_inner().names, vec!["a/Base", "a/Leaf"]);
}

#[test]
fn test_or_matcher_spans() {
    let matcher = OrMatcher::new(vec![
        Box::new(FixedStringMatcher::new("Foo")),
        Box::new(FixedStringMatcher::new("Bar")),
    ]);
    let name = "a/FooBar";

    assert!(matcher.matches_span(name, 2, 5));
    assert!(matcher.matches_span(name, 5, 8));
    assert!(!matcher.matches_span(name, 2, 8));
    assert!(!matcher.matches(name));
    assert!(!OrMatcher::new(Vec::new()).matches_span(name, 2, 5));
}
