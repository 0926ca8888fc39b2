//! Shared checks used by the integrity constraints.

use kmeta_classfile::{AllFieldVisitor, AllMethodVisitor, Class, Member, MemberId, MemberRef, MemberVisitor};

use super::violation::{Reporter, Violation, ViolationKind};
use crate::visitor::MetadataContext;

/// Reports violations for one metadata node.
///
/// Every violation carries the node description given at construction plus
/// the class and root kind from the context.
pub struct AssertUtil<'a, 'r> {
    parent_element: String,
    ctx: MetadataContext<'a>,
    reporter: &'r mut dyn Reporter,
}

impl<'a, 'r> AssertUtil<'a, 'r> {
    pub fn new(
        parent_element: impl Into<String>,
        ctx: &MetadataContext<'a>,
        reporter: &'r mut dyn Reporter,
    ) -> Self {
        AssertUtil {
            parent_element: parent_element.into(),
            ctx: *ctx,
            reporter,
        }
    }

    /// Report a missing reference if `reference` is `None`.
    pub fn report_if_null_reference<T>(&mut self, reference: Option<T>, checked_element: &str) {
        if reference.is_none() {
            self.report(ViolationKind::MissingReference, checked_element);
        }
    }

    /// Report an invalid reference unless the field is one of the fields of
    /// its claimed owner, by identity.
    pub fn report_if_field_dangling(&mut self, reference: MemberRef, checked_element: &str) {
        let matched = self.ctx.pool.class(reference.class).is_some_and(|class| {
            let mut matcher = ExactMemberMatcher::new(reference.member);
            class.accept(&mut AllFieldVisitor::new(&mut matcher));
            matcher.matched
        });
        if !matched {
            self.report(ViolationKind::InvalidReference, checked_element);
        }
    }

    /// Report an invalid reference unless the method is one of the methods of
    /// its claimed owner, by identity.
    pub fn report_if_method_dangling(&mut self, reference: MemberRef, checked_element: &str) {
        let matched = self.ctx.pool.class(reference.class).is_some_and(|class| {
            let mut matcher = ExactMemberMatcher::new(reference.member);
            class.accept(&mut AllMethodVisitor::new(&mut matcher));
            matcher.matched
        });
        if !matched {
            self.report(ViolationKind::InvalidReference, checked_element);
        }
    }

    fn report(&mut self, kind: ViolationKind, checked_element: &str) {
        self.reporter.report(Violation {
            kind,
            parent_element: self.parent_element.clone(),
            checked_element: checked_element.to_string(),
            class_id: self.ctx.class.id,
            class_name: self.ctx.class.name.clone(),
            metadata_kind: self.ctx.metadata.kind(),
        });
    }
}

/// Records whether a member with the given id was visited.
struct ExactMemberMatcher {
    target: MemberId,
    matched: bool,
}

impl ExactMemberMatcher {
    fn new(target: MemberId) -> Self {
        ExactMemberMatcher {
            target,
            matched: false,
        }
    }
}

impl MemberVisitor for ExactMemberMatcher {
    fn visit_any_member(&mut self, _class: &Class, member: &Member) {
        if member.id == self.target {
            self.matched = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FileFacadeMetadata, KotlinMetadata};
    use kmeta_classfile::ClassPool;

    #[test]
    fn test_field_reference_checked_against_fields_only() {
        let mut pool = ClassPool::new();
        let id = pool.add_program_class("a/AKt").unwrap();
        let field = pool.add_field(id, "x", "I").unwrap();
        let method = pool.add_method(id, "getX", "()I").unwrap();
        let metadata = KotlinMetadata::FileFacade(FileFacadeMetadata::default());
        let ctx = MetadataContext::new(&pool, pool.class(id).unwrap(), &metadata);

        let mut violations: Vec<Violation> = Vec::new();
        let mut util = AssertUtil::new("property x", &ctx, &mut violations);
        util.report_if_field_dangling(field, "backing field");
        util.report_if_method_dangling(method, "getter");
        // a method is not a field
        util.report_if_field_dangling(method, "backing field");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::InvalidReference);
        assert_eq!(violations[0].parent_element, "property x");
        assert_eq!(violations[0].class_name, "a/AKt");
    }

    #[test]
    fn test_missing_owner_class_is_invalid() {
        let mut pool = ClassPool::new();
        let facade = pool.add_program_class("a/AKt").unwrap();
        let other = pool.add_program_class("a/B").unwrap();
        let method = pool.add_method(other, "f", "()V").unwrap();
        pool.remove_class(other).unwrap();
        let metadata = KotlinMetadata::FileFacade(FileFacadeMetadata::default());
        let ctx = MetadataContext::new(&pool, pool.class(facade).unwrap(), &metadata);

        let mut violations: Vec<Violation> = Vec::new();
        AssertUtil::new("function f", &ctx, &mut violations)
            .report_if_method_dangling(method, "referenced method");

        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn test_null_reference() {
        let mut pool = ClassPool::new();
        let id = pool.add_program_class("a/AKt").unwrap();
        let metadata = KotlinMetadata::FileFacade(FileFacadeMetadata::default());
        let ctx = MetadataContext::new(&pool, pool.class(id).unwrap(), &metadata);

        let mut violations: Vec<Violation> = Vec::new();
        let mut util = AssertUtil::new("type", &ctx, &mut violations);
        util.report_if_null_reference(Some(id), "referenced class");
        util.report_if_null_reference(None::<kmeta_classfile::ClassId>, "referenced class");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingReference);
        assert_eq!(violations[0].metadata_kind, crate::metadata::MetadataKind::FileFacade);
    }
}
