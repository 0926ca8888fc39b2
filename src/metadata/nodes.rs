//! Declaration-level metadata nodes.
//!
//! Nodes own their structural children. Links into the class pool are
//! referential: a name decoded from the metadata plus a resolved id that is
//! `None` when resolution failed.

use std::fmt;

use kmeta_classfile::{ClassId, MemberRef};
use serde::{Deserialize, Serialize};

use super::flags::{
    ConstructorFlags, FunctionFlags, PropertyAccessorFlags, PropertyFlags, TypeAliasFlags,
    TypeFlags, TypeParameterFlags, ValueParameterFlags,
};

// ============================================================================
// JVM signatures
// ============================================================================

/// Name and descriptor of a JVM method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JvmMethodSignature {
    pub name: String,
    pub descriptor: String,
}

impl JvmMethodSignature {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        JvmMethodSignature {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for JvmMethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.descriptor)
    }
}

/// Name and descriptor of a JVM field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JvmFieldSignature {
    pub name: String,
    pub descriptor: String,
}

impl JvmFieldSignature {
    pub fn new(name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        JvmFieldSignature {
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }
}

impl fmt::Display for JvmFieldSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.descriptor)
    }
}

// ============================================================================
// Shared leaves
// ============================================================================

/// A named class together with its resolved class, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReference {
    /// Internal name as decoded, e.g. `com/example/Foo`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_class: Option<ClassId>,
}

impl ClassReference {
    /// A reference that resolved to `class`.
    pub fn resolved(name: impl Into<String>, class: ClassId) -> Self {
        ClassReference {
            name: name.into(),
            referenced_class: Some(class),
        }
    }

    /// A reference whose target could not be found.
    pub fn unresolved(name: impl Into<String>) -> Self {
        ClassReference {
            name: name.into(),
            referenced_class: None,
        }
    }
}

/// An annotation stored inside the metadata, on a type, type parameter or
/// type alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KotlinAnnotation {
    /// Internal name of the annotation class.
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_annotation_class: Option<ClassId>,
}

impl KotlinAnnotation {
    pub fn new(class_name: impl Into<String>, referenced: Option<ClassId>) -> Self {
        KotlinAnnotation {
            class_name: class_name.into(),
            referenced_annotation_class: referenced,
        }
    }
}

/// Strictness of a version requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementLevel {
    Warning,
    #[default]
    Error,
    Hidden,
}

/// Minimum compiler or language version needed to use a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRequirement {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    #[serde(default)]
    pub level: RequirementLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl VersionRequirement {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionRequirement {
            major,
            minor,
            patch,
            ..Default::default()
        }
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ============================================================================
// Types
// ============================================================================

/// Variance of a type parameter or type argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    In,
    Out,
}

/// A type use.
///
/// A type names a class (`class_name`), refers to a type parameter
/// (`type_parameter_id`), or names a type alias (`alias_name`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMetadata {
    pub flags: TypeFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_class: Option<ClassId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_parameter_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_name: Option<String>,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_arguments: Vec<TypeMetadata>,
    /// Upper bounds of a flexible type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upper_bounds: Vec<TypeMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<Box<TypeMetadata>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KotlinAnnotation>,
}

impl TypeMetadata {
    /// A plain class type.
    pub fn class(name: impl Into<String>, referenced: Option<ClassId>) -> Self {
        TypeMetadata {
            class_name: Some(name.into()),
            referenced_class: referenced,
            ..Default::default()
        }
    }

    /// A use of the type parameter with the given id.
    pub fn type_parameter(id: u32) -> Self {
        TypeMetadata {
            type_parameter_id: Some(id),
            ..Default::default()
        }
    }
}

/// A declared type parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterMetadata {
    pub flags: TypeParameterFlags,
    pub name: String,
    pub id: u32,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub upper_bounds: Vec<TypeMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KotlinAnnotation>,
}

/// A type alias declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAliasMetadata {
    pub flags: TypeAliasFlags,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterMetadata>,
    pub underlying_type: TypeMetadata,
    pub expanded_type: TypeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<VersionRequirement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<KotlinAnnotation>,
}

// ============================================================================
// Callables
// ============================================================================

/// A value parameter of a function, constructor or property setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueParameterMetadata {
    pub flags: ValueParameterFlags,
    /// Position among the JVM method's formal parameters.
    pub index: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vararg_element_type: Option<TypeMetadata>,
}

impl ValueParameterMetadata {
    pub fn new(index: usize, name: impl Into<String>, ty: TypeMetadata) -> Self {
        ValueParameterMetadata {
            index,
            name: name.into(),
            ty,
            ..Default::default()
        }
    }
}

/// A function declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionMetadata {
    pub flags: FunctionFlags,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_signature: Option<JvmMethodSignature>,
    /// The JVM method implementing the function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_method: Option<MemberRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<TypeMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_parameters: Vec<ValueParameterMetadata>,
    pub return_type: TypeMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<VersionRequirement>,
}

/// A constructor of a class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorMetadata {
    pub flags: ConstructorFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jvm_signature: Option<JvmMethodSignature>,
    /// The `<init>` method implementing the constructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_method: Option<MemberRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value_parameters: Vec<ValueParameterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<VersionRequirement>,
}

/// A property declaration.
///
/// Each JVM element backing the property is stored as a decoded signature
/// plus the member it resolved to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyMetadata {
    pub flags: PropertyFlags,
    #[serde(default)]
    pub getter_flags: PropertyAccessorFlags,
    #[serde(default)]
    pub setter_flags: PropertyAccessorFlags,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backing_field_signature: Option<JvmFieldSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_backing_field: Option<MemberRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub getter_signature: Option<JvmMethodSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_getter_method: Option<MemberRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter_signature: Option<JvmMethodSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_setter_method: Option<MemberRef>,

    /// The synthetic `name$annotations` method that holds the property's
    /// annotations. It may live in a different class, e.g. `DefaultImpls`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synthetic_method_for_annotations: Option<JvmMethodSignature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_synthetic_method_for_annotations: Option<MemberRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_type: Option<TypeMetadata>,
    #[serde(rename = "type")]
    pub ty: TypeMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameterMetadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub setter_parameters: Vec<ValueParameterMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<VersionRequirement>,
}
