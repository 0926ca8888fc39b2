//! Classes and members of the low-level class graph.

use serde::{Deserialize, Serialize};

use crate::attribute::{attributes_accept, Attribute, AttributeOwner, AttributeVisitor};
use crate::visitor::{ClassVisitor, MemberVisitor};

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a class within a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Create a new class ID.
    pub fn new(id: u32) -> Self {
        ClassId(id)
    }
}

impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "class_{}", self.0)
    }
}

/// Unique identifier for a field or method within a pool.
///
/// Ids are never reused, so a member that is replaced by a structurally
/// identical one gets a different id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct MemberId(pub u32);

impl MemberId {
    /// Create a new member ID.
    pub fn new(id: u32) -> Self {
        MemberId(id)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "member_{}", self.0)
    }
}

/// A resolved link to a member, together with the class that claims to own it.
///
/// The claim is not checked on construction. A reference is only valid if
/// the claimed class enumerates a member with exactly this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberRef {
    /// The class claimed to own the member.
    pub class: ClassId,
    /// The member's identity.
    pub member: MemberId,
}

impl MemberRef {
    /// Create a new member reference.
    pub fn new(class: ClassId, member: MemberId) -> Self {
        MemberRef { class, member }
    }
}

impl std::fmt::Display for MemberRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.class, self.member)
    }
}

// ============================================================================
// Access Flags
// ============================================================================

/// JVM access flag bits shared by classes and members.
pub mod access {
    pub const PUBLIC: u16 = 0x0001;
    pub const PRIVATE: u16 = 0x0002;
    pub const PROTECTED: u16 = 0x0004;
    pub const STATIC: u16 = 0x0008;
    pub const FINAL: u16 = 0x0010;
    pub const SYNTHETIC: u16 = 0x1000;
    pub const INTERFACE: u16 = 0x0200;
    pub const ABSTRACT: u16 = 0x0400;
    pub const ANNOTATION: u16 = 0x2000;
    pub const ENUM: u16 = 0x4000;
}

// ============================================================================
// Classes
// ============================================================================

/// Whether a class is being processed or only referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    /// A class that is part of the processed program.
    Program,
    /// A class from a library, available for reference only.
    Library,
}

/// A parsed class.
#[derive(Debug, Clone)]
pub struct Class {
    /// Pool-assigned identity.
    pub id: ClassId,
    /// Internal name, e.g. `com/example/Foo`.
    pub name: String,
    /// Program or library class.
    pub kind: ClassKind,
    /// Access flag bits, see [`access`].
    pub access_flags: u16,
    /// Declared fields.
    pub fields: Vec<Member>,
    /// Declared methods.
    pub methods: Vec<Member>,
    /// Direct subclasses.
    pub subclasses: Vec<ClassId>,
    /// Class-level attributes.
    pub attributes: Vec<Attribute>,
}

impl Class {
    pub(crate) fn new(id: ClassId, name: String, kind: ClassKind) -> Self {
        Class {
            id,
            name,
            kind,
            access_flags: access::PUBLIC,
            fields: Vec::new(),
            methods: Vec::new(),
            subclasses: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Returns true for program classes.
    pub fn is_program(&self) -> bool {
        self.kind == ClassKind::Program
    }

    /// Returns true if the class is an annotation interface.
    pub fn is_annotation(&self) -> bool {
        self.access_flags & access::ANNOTATION != 0
    }

    /// Returns true if `subclass` is listed as a direct subclass.
    pub fn has_direct_subclass(&self, subclass: ClassId) -> bool {
        self.subclasses.contains(&subclass)
    }

    /// Find a field or method by identity.
    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        self.fields.iter().chain(&self.methods).find(|m| m.id == id)
    }

    pub(crate) fn find_member_mut(&mut self, id: MemberId) -> Option<&mut Member> {
        self.fields
            .iter_mut()
            .chain(self.methods.iter_mut())
            .find(|m| m.id == id)
    }

    /// Find a method by name and descriptor.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&Member> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Find a field by name and descriptor.
    pub fn field(&self, name: &str, descriptor: &str) -> Option<&Member> {
        self.fields
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }

    /// Dispatch this class to the visitor method for its kind.
    pub fn accept<V: ClassVisitor + ?Sized>(&self, visitor: &mut V) {
        match self.kind {
            ClassKind::Program => visitor.visit_program_class(self),
            ClassKind::Library => visitor.visit_library_class(self),
        }
    }

    /// Dispatch every field to the visitor, in declaration order.
    pub fn fields_accept<V: MemberVisitor + ?Sized>(&self, visitor: &mut V) {
        for field in &self.fields {
            field.accept(self, visitor);
        }
    }

    /// Dispatch every method to the visitor, in declaration order.
    pub fn methods_accept<V: MemberVisitor + ?Sized>(&self, visitor: &mut V) {
        for method in &self.methods {
            method.accept(self, visitor);
        }
    }

    /// Dispatch the class-level attributes to the visitor.
    pub fn attributes_accept<V: AttributeVisitor + ?Sized>(&self, visitor: &mut V) {
        attributes_accept(AttributeOwner::Class(self), &self.attributes, visitor);
    }
}

// ============================================================================
// Members
// ============================================================================

/// Whether a member is a field or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method of a class.
#[derive(Debug, Clone)]
pub struct Member {
    /// Pool-assigned identity.
    pub id: MemberId,
    /// Field or method.
    pub kind: MemberKind,
    /// Access flag bits, see [`access`].
    pub access_flags: u16,
    /// Member name.
    pub name: String,
    /// JVM descriptor, e.g. `(I)V`.
    pub descriptor: String,
    /// Member attributes.
    pub attributes: Vec<Attribute>,
}

impl Member {
    pub(crate) fn new(id: MemberId, kind: MemberKind, name: String, descriptor: String) -> Self {
        Member {
            id,
            kind,
            access_flags: access::PUBLIC,
            name,
            descriptor,
            attributes: Vec::new(),
        }
    }

    /// Returns true for methods.
    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    /// Dispatch this member to the visitor method for its kind.
    pub fn accept<V: MemberVisitor + ?Sized>(&self, class: &Class, visitor: &mut V) {
        match self.kind {
            MemberKind::Field => visitor.visit_field(class, self),
            MemberKind::Method => visitor.visit_method(class, self),
        }
    }

    /// Dispatch the member's attributes to the visitor.
    pub fn attributes_accept<V: AttributeVisitor + ?Sized>(&self, class: &Class, visitor: &mut V) {
        attributes_accept(AttributeOwner::Member(class, self), &self.attributes, visitor);
    }
}
