//! Low-level class model for kmeta.
//!
//! This crate provides the class-file side of the metadata toolkit:
//! - [`ClassPool`]: owns every loaded class and hands out stable ids
//! - [`Class`] and [`Member`]: classes with their fields, methods and
//!   direct subclasses
//! - [`Attribute`] and [`Annotation`]: the annotation attributes that make up
//!   the ground truth for metadata flags
//! - Visitor traits for classes, members and attributes
//! - Class filters and string matchers
//!
//! Member identity is the [`MemberId`] assigned when the pool creates a
//! member. Two members with the same name and descriptor are still different
//! members if their ids differ.

pub mod attribute;
pub mod class;
pub mod error;
pub mod filter;
pub mod matcher;
pub mod pool;
pub mod visitor;

pub use attribute::{
    attributes_accept, Annotation, Attribute, AttributeOwner, AttributeVisitor, Retention,
    KOTLIN_METADATA_TYPE,
};
pub use class::{access, Class, ClassId, ClassKind, Member, MemberId, MemberKind, MemberRef};
pub use error::{ClassPoolError, ClassPoolResult};
pub use filter::{ClassNameFilter, SubclassFilter};
pub use matcher::{
    AndMatcher, FixedStringMatcher, MatcherError, NotMatcher, OrMatcher, RegexMatcher,
    StringMatcher,
};
pub use pool::ClassPool;
pub use visitor::{AllFieldVisitor, AllMemberVisitor, AllMethodVisitor, ClassVisitor, MemberVisitor};
