//! Kotlin metadata model.
//!
//! A [`KotlinMetadata`] value is the decoded `kotlin.Metadata` annotation of
//! one class. It is one of five root kinds:
//!
//! - [`ClassMetadata`]: a Kotlin class, interface or object
//! - [`FileFacadeMetadata`]: top-level declarations of one source file
//! - [`SyntheticClassMetadata`]: a lambda or other compiler-generated class
//! - [`MultiFileFacadeMetadata`]: the facade of a `@JvmMultifileClass`
//! - [`MultiFilePartMetadata`]: one part behind a multi-file facade
//!
//! The graph is produced by a decoder outside this crate. Links into the
//! class pool are resolved before the graph reaches this crate and are
//! `None` where resolution failed.

mod flags;
mod nodes;

use std::fmt;

use kmeta_classfile::ClassId;
use serde::{Deserialize, Serialize};

pub use flags::{
    ClassFlags, CommonFlags, ConstructorFlags, FunctionFlags, PropertyAccessorFlags,
    PropertyFlags, TypeAliasFlags, TypeFlags, TypeParameterFlags, ValueParameterFlags,
};
pub use nodes::{
    ClassReference, ConstructorMetadata, FunctionMetadata, JvmFieldSignature, JvmMethodSignature,
    KotlinAnnotation, PropertyMetadata, RequirementLevel, TypeAliasMetadata, TypeMetadata,
    TypeParameterMetadata, ValueParameterMetadata, Variance, VersionRequirement,
};

// ============================================================================
// Metadata kinds
// ============================================================================

/// The root kind of a metadata graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Class,
    FileFacade,
    SyntheticClass,
    MultiFileFacade,
    MultiFilePart,
}

impl MetadataKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::Class => "class",
            MetadataKind::FileFacade => "file_facade",
            MetadataKind::SyntheticClass => "synthetic_class",
            MetadataKind::MultiFileFacade => "multi_file_facade",
            MetadataKind::MultiFilePart => "multi_file_part",
        }
    }
}

impl fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Declaration container
// ============================================================================

/// Declarations grouped under one compiled unit.
///
/// Classes, file facades and multi-file parts all carry one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclarationContainer {
    /// Internal name of the owning class, when the metadata names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_owner_class: Option<ClassId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PropertyMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_aliases: Vec<TypeAliasMetadata>,
    /// Properties of local delegated properties (`$$delegatedProperties`).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub delegated_properties: Vec<PropertyMetadata>,
}

// ============================================================================
// Roots
// ============================================================================

/// Metadata of a Kotlin class, interface or object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassMetadata {
    pub flags: ClassFlags,
    /// Internal name as written in the metadata.
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_class: Option<ClassId>,
    #[serde(default)]
    pub container: DeclarationContainer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion_object: Option<ClassReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested_classes: Vec<ClassReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sealed_subclasses: Vec<ClassReference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_entry_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<TypeMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constructors: Vec<ConstructorMetadata>,
}

/// Top-level declarations of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFacadeMetadata {
    #[serde(default)]
    pub container: DeclarationContainer,
}

/// What a synthetic class was generated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntheticClassKind {
    #[default]
    Regular,
    Lambda,
    WhenMappings,
}

/// A compiler-generated class. Only lambdas carry a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntheticClassMetadata {
    #[serde(default)]
    pub kind: SyntheticClassKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionMetadata>,
}

/// Facade of a multi-file class; lists its parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFileFacadeMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub part_classes: Vec<ClassReference>,
}

/// One part of a multi-file class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFilePartMetadata {
    pub facade_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_facade_class: Option<ClassId>,
    #[serde(default)]
    pub container: DeclarationContainer,
}

/// The decoded metadata of one class.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KotlinMetadata {
    Class(ClassMetadata),
    FileFacade(FileFacadeMetadata),
    SyntheticClass(SyntheticClassMetadata),
    MultiFileFacade(MultiFileFacadeMetadata),
    MultiFilePart(MultiFilePartMetadata),
}

impl KotlinMetadata {
    /// The root kind.
    pub fn kind(&self) -> MetadataKind {
        match self {
            KotlinMetadata::Class(_) => MetadataKind::Class,
            KotlinMetadata::FileFacade(_) => MetadataKind::FileFacade,
            KotlinMetadata::SyntheticClass(_) => MetadataKind::SyntheticClass,
            KotlinMetadata::MultiFileFacade(_) => MetadataKind::MultiFileFacade,
            KotlinMetadata::MultiFilePart(_) => MetadataKind::MultiFilePart,
        }
    }

    /// The declaration container, for the root kinds that have one.
    pub fn container(&self) -> Option<&DeclarationContainer> {
        match self {
            KotlinMetadata::Class(class) => Some(&class.container),
            KotlinMetadata::FileFacade(facade) => Some(&facade.container),
            KotlinMetadata::MultiFilePart(part) => Some(&part.container),
            KotlinMetadata::SyntheticClass(_) | KotlinMetadata::MultiFileFacade(_) => None,
        }
    }

    /// The class root, if this is one.
    pub fn as_class(&self) -> Option<&ClassMetadata> {
        match self {
            KotlinMetadata::Class(class) => Some(class),
            _ => None,
        }
    }
}
