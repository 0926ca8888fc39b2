//! Class visitor filters.
//!
//! Filters wrap a delegate [`ClassVisitor`] and forward only the classes that
//! pass their predicate. Program and library classes are filtered alike and
//! reach the delegate through the same visit method they arrived on.

use crate::class::{Class, ClassId};
use crate::matcher::StringMatcher;
use crate::visitor::ClassVisitor;

/// Forwards every class except those that list `subclass` as a direct subclass.
///
/// Classes without direct subclasses are always forwarded.
#[derive(Debug)]
pub struct SubclassFilter<V> {
    subclass: ClassId,
    delegate: V,
}

impl<V: ClassVisitor> SubclassFilter<V> {
    pub fn new(subclass: ClassId, delegate: V) -> Self {
        SubclassFilter { subclass, delegate }
    }

    fn accepts(&self, class: &Class) -> bool {
        !class.has_direct_subclass(self.subclass)
    }

    /// Consume the filter and return the delegate.
    pub fn into_inner(self) -> V {
        self.delegate
    }
}

impl<V: ClassVisitor> ClassVisitor for SubclassFilter<V> {
    fn visit_program_class(&mut self, class: &Class) {
        if self.accepts(class) {
            self.delegate.visit_program_class(class);
        }
    }

    fn visit_library_class(&mut self, class: &Class) {
        if self.accepts(class) {
            self.delegate.visit_library_class(class);
        }
    }
}

/// Forwards only classes whose internal name matches.
#[derive(Debug)]
pub struct ClassNameFilter<M, V> {
    matcher: M,
    delegate: V,
}

impl<M: StringMatcher, V: ClassVisitor> ClassNameFilter<M, V> {
    pub fn new(matcher: M, delegate: V) -> Self {
        ClassNameFilter { matcher, delegate }
    }

    /// Consume the filter and return the delegate.
    pub fn into_inner(self) -> V {
        self.delegate
    }
}

impl<M: StringMatcher, V: ClassVisitor> ClassVisitor for ClassNameFilter<M, V> {
    fn visit_program_class(&mut self, class: &Class) {
        if self.matcher.matches(&class.name) {
            self.delegate.visit_program_class(class);
        }
    }

    fn visit_library_class(&mut self, class: &Class) {
        if self.matcher.matches(&class.name) {
            self.delegate.visit_library_class(class);
        }
    }
}
