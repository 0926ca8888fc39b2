//! Visitor traits for classes and members.
//!
//! The traits follow a simplified-visitor contract: every specific method
//! falls back to a `visit_any_*` method, and that fallback panics unless the
//! implementing visitor overrides it. A visitor therefore either handles a
//! kind explicitly or provides a catch-all, and a missing implementation is
//! reported loudly instead of silently skipping elements.

use crate::class::{Class, Member};

/// Visitor over classes.
pub trait ClassVisitor {
    /// Fallback for classes without a specific override.
    ///
    /// # Panics
    ///
    /// Panics if it is reached without being overridden.
    fn visit_any_class(&mut self, _class: &Class) {
        unimplemented!(
            "{} must override visit_any_class if it is ever called",
            std::any::type_name::<Self>()
        )
    }

    /// Visit a program class.
    fn visit_program_class(&mut self, class: &Class) {
        self.visit_any_class(class);
    }

    /// Visit a library class.
    fn visit_library_class(&mut self, class: &Class) {
        self.visit_any_class(class);
    }
}

impl<V: ClassVisitor + ?Sized> ClassVisitor for &mut V {
    fn visit_any_class(&mut self, class: &Class) {
        (**self).visit_any_class(class);
    }

    fn visit_program_class(&mut self, class: &Class) {
        (**self).visit_program_class(class);
    }

    fn visit_library_class(&mut self, class: &Class) {
        (**self).visit_library_class(class);
    }
}

/// Visitor over fields and methods.
pub trait MemberVisitor {
    /// Fallback for members without a specific override.
    ///
    /// # Panics
    ///
    /// Panics if it is reached without being overridden.
    fn visit_any_member(&mut self, _class: &Class, _member: &Member) {
        unimplemented!(
            "{} must override visit_any_member if it is ever called",
            std::any::type_name::<Self>()
        )
    }

    /// Visit a field.
    fn visit_field(&mut self, class: &Class, field: &Member) {
        self.visit_any_member(class, field);
    }

    /// Visit a method.
    fn visit_method(&mut self, class: &Class, method: &Member) {
        self.visit_any_member(class, method);
    }
}

impl<V: MemberVisitor + ?Sized> MemberVisitor for &mut V {
    fn visit_any_member(&mut self, class: &Class, member: &Member) {
        (**self).visit_any_member(class, member);
    }

    fn visit_field(&mut self, class: &Class, field: &Member) {
        (**self).visit_field(class, field);
    }

    fn visit_method(&mut self, class: &Class, method: &Member) {
        (**self).visit_method(class, method);
    }
}

/// Class visitor that dispatches every field of each visited class.
#[derive(Debug)]
pub struct AllFieldVisitor<V> {
    member_visitor: V,
}

impl<V: MemberVisitor> AllFieldVisitor<V> {
    pub fn new(member_visitor: V) -> Self {
        AllFieldVisitor { member_visitor }
    }
}

impl<V: MemberVisitor> ClassVisitor for AllFieldVisitor<V> {
    fn visit_any_class(&mut self, class: &Class) {
        class.fields_accept(&mut self.member_visitor);
    }
}

/// Class visitor that dispatches every method of each visited class.
#[derive(Debug)]
pub struct AllMethodVisitor<V> {
    member_visitor: V,
}

impl<V: MemberVisitor> AllMethodVisitor<V> {
    pub fn new(member_visitor: V) -> Self {
        AllMethodVisitor { member_visitor }
    }
}

impl<V: MemberVisitor> ClassVisitor for AllMethodVisitor<V> {
    fn visit_any_class(&mut self, class: &Class) {
        class.methods_accept(&mut self.member_visitor);
    }
}

/// Class visitor that dispatches every field and then every method.
#[derive(Debug)]
pub struct AllMemberVisitor<V> {
    member_visitor: V,
}

impl<V: MemberVisitor> AllMemberVisitor<V> {
    pub fn new(member_visitor: V) -> Self {
        AllMemberVisitor { member_visitor }
    }
}

impl<V: MemberVisitor> ClassVisitor for AllMemberVisitor<V> {
    fn visit_any_class(&mut self, class: &Class) {
        class.fields_accept(&mut self.member_visitor);
        class.methods_accept(&mut self.member_visitor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::ClassKind;
    use crate::pool::ClassPool;

    #[derive(Default)]
    struct MemberNames {
        names: Vec<String>,
    }

    impl MemberVisitor for MemberNames {
        fn visit_any_member(&mut self, _class: &Class, member: &Member) {
            self.names.push(member.name.clone());
        }
    }

    struct ProgramOnly;

    impl ClassVisitor for ProgramOnly {
        fn visit_program_class(&mut self, _class: &Class) {}
    }

    fn sample_pool() -> ClassPool {
        let mut pool = ClassPool::new();
        let a = pool.add_program_class("a/A").unwrap();
        pool.add_field(a, "x", "I").unwrap();
        pool.add_method(a, "f", "()V").unwrap();
        pool.add_field(a, "y", "J").unwrap();
        pool.add_method(a, "g", "(I)V").unwrap();
        pool
    }

    #[test]
    fn test_all_member_visitors() {
        let pool = sample_pool();
        let class = pool.class_by_name("a/A").unwrap();

        let mut names = MemberNames::default();
        class.accept(&mut AllFieldVisitor::new(&mut names));
        assert_eq!(names.names, vec!["x", "y"]);

        let mut names = MemberNames::default();
        class.accept(&mut AllMethodVisitor::new(&mut names));
        assert_eq!(names.names, vec!["f", "g"]);

        let mut names = MemberNames::default();
        class.accept(&mut AllMemberVisitor::new(&mut names));
        assert_eq!(names.names, vec!["x", "y", "f", "g"]);
    }

    #[test]
    #[should_panic(expected = "must override visit_any_class")]
    fn test_unhandled_class_kind_panics() {
        let mut pool = ClassPool::new();
        let id = pool.add_class("java/lang/Object", ClassKind::Library).unwrap();
        pool.class(id).unwrap().accept(&mut ProgramOnly);
    }
}
