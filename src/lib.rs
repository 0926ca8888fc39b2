//! kmeta: Kotlin metadata consistency for JVM class pools
//!
//! Keeps the decoded `kotlin.Metadata` of each class consistent with the class
//! pool it describes, after a shrinker or obfuscator has edited that pool.
//!
//! - [`metadata`]: the metadata graph model and its flag bundles
//! - [`visitor`]: the visitor protocol and traversal over metadata graphs
//! - [`fixer`]: the annotation counter and the `has_annotations` flag fixer
//! - [`asserter`]: referential integrity constraints and violation reporters
//!
//! The low-level class model (pool, classes, members, attributes, class
//! filters and string matchers) lives in [`kmeta_classfile`] and is
//! re-exported as [`classfile`].

pub mod asserter;
pub mod fixer;
pub mod metadata;
pub mod visitor;

pub use kmeta_classfile as classfile;

pub use asserter::{KotlinMetadataAsserter, Reporter, Violation, ViolationKind, Violations};
pub use fixer::{fix_all, fix_flags, KotlinAnnotationCounter, KotlinAnnotationFlagFixer};
pub use metadata::{KotlinMetadata, MetadataKind};
pub use visitor::{KotlinMetadataVisitor, MetadataContext};
