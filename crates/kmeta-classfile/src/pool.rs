//! The class pool: owner of every loaded class.
//!
//! The pool assigns [`ClassId`]s and [`MemberId`]s. Member ids are unique
//! across the whole pool and never reused, which is what makes member
//! identity checks independent of names and descriptors.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::attribute::Attribute;
use crate::class::{Class, ClassId, ClassKind, Member, MemberId, MemberKind, MemberRef};
use crate::error::{ClassPoolError, ClassPoolResult};
use crate::visitor::ClassVisitor;

/// In-memory collection of classes for one processing run.
///
/// Iteration is in class id order, which is insertion order.
#[derive(Debug, Default)]
pub struct ClassPool {
    classes: BTreeMap<ClassId, Class>,
    by_name: HashMap<String, ClassId>,
    next_class_id: u32,
    next_member_id: u32,
}

impl ClassPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of classes in the pool.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the pool holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    // ==================== Classes ====================

    /// Add a class with the given internal name.
    pub fn add_class(&mut self, name: impl Into<String>, kind: ClassKind) -> ClassPoolResult<ClassId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ClassPoolError::DuplicateClass { name });
        }

        let id = ClassId::new(self.next_class_id);
        self.next_class_id += 1;

        self.by_name.insert(name.clone(), id);
        self.classes.insert(id, Class::new(id, name, kind));
        Ok(id)
    }

    /// Add a program class.
    pub fn add_program_class(&mut self, name: impl Into<String>) -> ClassPoolResult<ClassId> {
        self.add_class(name, ClassKind::Program)
    }

    /// Add a library class.
    pub fn add_library_class(&mut self, name: impl Into<String>) -> ClassPoolResult<ClassId> {
        self.add_class(name, ClassKind::Library)
    }

    /// Remove a class, dropping it from every direct-subclass list as well.
    pub fn remove_class(&mut self, id: ClassId) -> ClassPoolResult<Class> {
        let class = self
            .classes
            .remove(&id)
            .ok_or(ClassPoolError::ClassNotFound(id))?;
        self.by_name.remove(&class.name);

        for other in self.classes.values_mut() {
            other.subclasses.retain(|&sub| sub != id);
        }

        debug!("Removed class {} ({})", class.name, id);
        Ok(class)
    }

    /// Get a class by id.
    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(&id)
    }

    /// Get a mutable class by id.
    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut Class> {
        self.classes.get_mut(&id)
    }

    /// Get a class by internal name.
    pub fn class_by_name(&self, name: &str) -> Option<&Class> {
        self.by_name.get(name).and_then(|id| self.classes.get(id))
    }

    /// Iterate classes in id order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    /// Record `subclass` as a direct subclass of `superclass`.
    pub fn add_subclass(&mut self, superclass: ClassId, subclass: ClassId) -> ClassPoolResult<()> {
        if !self.classes.contains_key(&subclass) {
            return Err(ClassPoolError::ClassNotFound(subclass));
        }
        let class = self.existing_class_mut(superclass)?;
        if !class.subclasses.contains(&subclass) {
            class.subclasses.push(subclass);
        }
        Ok(())
    }

    /// Attach an attribute to a class.
    pub fn add_class_attribute(&mut self, id: ClassId, attribute: Attribute) -> ClassPoolResult<()> {
        self.existing_class_mut(id)?.attributes.push(attribute);
        Ok(())
    }

    // ==================== Members ====================

    /// Add a field to a class.
    pub fn add_field(
        &mut self,
        class: ClassId,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> ClassPoolResult<MemberRef> {
        self.add_member(class, MemberKind::Field, name.into(), descriptor.into())
    }

    /// Add a method to a class.
    pub fn add_method(
        &mut self,
        class: ClassId,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> ClassPoolResult<MemberRef> {
        self.add_member(class, MemberKind::Method, name.into(), descriptor.into())
    }

    /// Look up a member by identity among the exact members of the claimed class.
    pub fn member(&self, reference: MemberRef) -> Option<&Member> {
        self.classes
            .get(&reference.class)
            .and_then(|class| class.find_member(reference.member))
    }

    /// Get a mutable member by identity.
    pub fn member_mut(&mut self, reference: MemberRef) -> Option<&mut Member> {
        self.classes
            .get_mut(&reference.class)
            .and_then(|class| class.find_member_mut(reference.member))
    }

    /// Attach an attribute to a member.
    pub fn add_member_attribute(
        &mut self,
        reference: MemberRef,
        attribute: Attribute,
    ) -> ClassPoolResult<()> {
        let member = self
            .member_mut(reference)
            .ok_or(ClassPoolError::MemberNotFound {
                class: reference.class,
                member: reference.member,
            })?;
        member.attributes.push(attribute);
        Ok(())
    }

    /// Replace a member by a fresh instance with the same name, descriptor and
    /// attributes, in the same position.
    ///
    /// The old id stops resolving. Any stored reference to it now dangles.
    pub fn replace_member(&mut self, reference: MemberRef) -> ClassPoolResult<MemberRef> {
        let new_id = MemberId::new(self.next_member_id);
        let member = self
            .member_mut(reference)
            .ok_or(ClassPoolError::MemberNotFound {
                class: reference.class,
                member: reference.member,
            })?;
        member.id = new_id;
        self.next_member_id += 1;

        debug!(
            "Replaced member {} with {} in {}",
            reference.member, new_id, reference.class
        );
        Ok(MemberRef::new(reference.class, new_id))
    }

    // ==================== Visiting ====================

    /// Dispatch every class, in id order, to the visitor.
    pub fn classes_accept<V: ClassVisitor + ?Sized>(&self, visitor: &mut V) {
        for class in self.classes.values() {
            class.accept(visitor);
        }
    }

    /// Dispatch one class to the visitor, if it is in the pool.
    pub fn class_accept<V: ClassVisitor + ?Sized>(&self, id: ClassId, visitor: &mut V) {
        if let Some(class) = self.classes.get(&id) {
            class.accept(visitor);
        }
    }

    fn existing_class_mut(&mut self, id: ClassId) -> ClassPoolResult<&mut Class> {
        self.classes
            .get_mut(&id)
            .ok_or(ClassPoolError::ClassNotFound(id))
    }

    fn add_member(
        &mut self,
        class: ClassId,
        kind: MemberKind,
        name: String,
        descriptor: String,
    ) -> ClassPoolResult<MemberRef> {
        let id = MemberId::new(self.next_member_id);
        let target = self.existing_class_mut(class)?;
        let member = Member::new(id, kind, name, descriptor);
        match kind {
            MemberKind::Field => target.fields.push(member),
            MemberKind::Method => target.methods.push(member),
        }
        self.next_member_id += 1;
        Ok(MemberRef::new(class, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup_classes() {
        let mut pool = ClassPool::new();
        let a = pool.add_program_class("a/A").unwrap();
        let b = pool.add_library_class("b/B").unwrap();

        assert_eq!(pool.len(), 2);
        assert_ne!(a, b);
        assert_eq!(pool.class(a).unwrap().name, "a/A");
        assert_eq!(pool.class_by_name("b/B").unwrap().id, b);
        assert!(!pool.class(b).unwrap().is_program());
    }

    #[test]
    fn test_duplicate_class_rejected() {
        let mut pool = ClassPool::new();
        pool.add_program_class("a/A").unwrap();
        let err = pool.add_program_class("a/A").unwrap_err();
        assert_eq!(
            err,
            ClassPoolError::DuplicateClass {
                name: "a/A".to_string()
            }
        );
    }

    #[test]
    fn test_member_ids_are_unique_across_classes() {
        let mut pool = ClassPool::new();
        let a = pool.add_program_class("a/A").unwrap();
        let b = pool.add_program_class("b/B").unwrap();
        let f = pool.add_method(a, "run", "()V").unwrap();
        let g = pool.add_method(b, "run", "()V").unwrap();

        assert_ne!(f.member, g.member);
        assert!(pool.member(f).is_some());
        // Same id, wrong claimed owner
        assert!(pool.member(MemberRef::new(b, f.member)).is_none());
    }

    #[test]
    fn test_replace_member_invalidates_old_reference() {
        let mut pool = ClassPool::new();
        let a = pool.add_program_class("a/A").unwrap();
        let old = pool.add_method(a, "run", "()V").unwrap();
        pool.add_member_attribute(old, Attribute::other("Code"))
            .unwrap();

        let new = pool.replace_member(old).unwrap();

        assert!(pool.member(old).is_none());
        let member = pool.member(new).unwrap();
        assert_eq!(member.name, "run");
        assert_eq!(member.descriptor, "()V");
        assert_eq!(member.attributes.len(), 1);
        assert_eq!(pool.class(a).unwrap().methods.len(), 1);
    }

    #[test]
    fn test_remove_class_drops_subclass_links() {
        let mut pool = ClassPool::new();
        let base = pool.add_program_class("a/Base").unwrap();
        let sub = pool.add_program_class("a/Sub").unwrap();
        pool.add_subclass(base, sub).unwrap();
        assert!(pool.class(base).unwrap().has_direct_subclass(sub));

        let removed = pool.remove_class(sub).unwrap();

        assert_eq!(removed.name, "a/Sub");
        assert!(pool.class_by_name("a/Sub").is_none());
        assert!(pool.class(base).unwrap().subclasses.is_empty());
        assert_eq!(
            pool.remove_class(sub).unwrap_err(),
            ClassPoolError::ClassNotFound(sub)
        );
    }

    #[test]
    fn test_edits_on_missing_class_fail() {
        let mut pool = ClassPool::new();
        let missing = ClassId::new(42);
        assert!(pool.add_method(missing, "f", "()V").is_err());
        assert!(pool
            .add_class_attribute(missing, Attribute::other("SourceFile"))
            .is_err());
        let a = pool.add_program_class("a/A").unwrap();
        assert_eq!(
            pool.add_subclass(a, missing).unwrap_err(),
            ClassPoolError::ClassNotFound(missing)
        );
    }
}
