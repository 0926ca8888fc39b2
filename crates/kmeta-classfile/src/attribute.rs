//! Class and member attributes.
//!
//! Only the annotation attributes are modeled structurally; everything else is
//! kept as an opaque named attribute. Annotation attributes are the ground
//! truth behind the `has_annotations` flags of the metadata model.

use serde::{Deserialize, Serialize};

use crate::class::{Class, Member};

/// Type descriptor of the annotation that carries Kotlin metadata.
pub const KOTLIN_METADATA_TYPE: &str = "Lkotlin/Metadata;";

/// Runtime retention of an annotation attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Retention {
    /// `RuntimeVisible*` attributes.
    Visible,
    /// `RuntimeInvisible*` attributes.
    Invisible,
}

/// A single annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Type descriptor, e.g. `Ljava/lang/Deprecated;`.
    pub type_descriptor: String,
    /// Names of the element-value pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element_names: Vec<String>,
}

impl Annotation {
    /// Create an annotation without elements.
    pub fn new(type_descriptor: impl Into<String>) -> Self {
        Annotation {
            type_descriptor: type_descriptor.into(),
            element_names: Vec::new(),
        }
    }

    /// Add an element name.
    pub fn with_element(mut self, name: impl Into<String>) -> Self {
        self.element_names.push(name.into());
        self
    }

    /// Returns true for the `kotlin.Metadata` annotation itself.
    pub fn is_kotlin_metadata(&self) -> bool {
        self.type_descriptor == KOTLIN_METADATA_TYPE
    }
}

/// An attribute attached to a class or member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// `RuntimeVisibleAnnotations` / `RuntimeInvisibleAnnotations`.
    Annotations {
        retention: Retention,
        annotations: Vec<Annotation>,
    },
    /// `RuntimeVisibleParameterAnnotations` / `RuntimeInvisibleParameterAnnotations`.
    ///
    /// `parameters[i]` holds the annotations of formal parameter `i`.
    ParameterAnnotations {
        retention: Retention,
        parameters: Vec<Vec<Annotation>>,
    },
    /// Any other attribute, kept by name only.
    Other { name: String },
}

impl Attribute {
    /// Create a `RuntimeVisibleAnnotations` attribute.
    pub fn visible_annotations(annotations: Vec<Annotation>) -> Self {
        Attribute::Annotations {
            retention: Retention::Visible,
            annotations,
        }
    }

    /// Create a `RuntimeInvisibleAnnotations` attribute.
    pub fn invisible_annotations(annotations: Vec<Annotation>) -> Self {
        Attribute::Annotations {
            retention: Retention::Invisible,
            annotations,
        }
    }

    /// Create a `RuntimeVisibleParameterAnnotations` attribute.
    pub fn visible_parameter_annotations(parameters: Vec<Vec<Annotation>>) -> Self {
        Attribute::ParameterAnnotations {
            retention: Retention::Visible,
            parameters,
        }
    }

    /// Create a `RuntimeInvisibleParameterAnnotations` attribute.
    pub fn invisible_parameter_annotations(parameters: Vec<Vec<Annotation>>) -> Self {
        Attribute::ParameterAnnotations {
            retention: Retention::Invisible,
            parameters,
        }
    }

    /// Create an opaque attribute.
    pub fn other(name: impl Into<String>) -> Self {
        Attribute::Other { name: name.into() }
    }

    /// The attribute name as it appears in a class file.
    pub fn name(&self) -> &str {
        match self {
            Attribute::Annotations { retention, .. } => match retention {
                Retention::Visible => "RuntimeVisibleAnnotations",
                Retention::Invisible => "RuntimeInvisibleAnnotations",
            },
            Attribute::ParameterAnnotations { retention, .. } => match retention {
                Retention::Visible => "RuntimeVisibleParameterAnnotations",
                Retention::Invisible => "RuntimeInvisibleParameterAnnotations",
            },
            Attribute::Other { name } => name,
        }
    }
}

/// The element an attribute is attached to.
#[derive(Debug, Clone, Copy)]
pub enum AttributeOwner<'a> {
    Class(&'a Class),
    Member(&'a Class, &'a Member),
}

impl<'a> AttributeOwner<'a> {
    /// The class the attribute belongs to, directly or through a member.
    pub fn class(&self) -> &'a Class {
        match *self {
            AttributeOwner::Class(class) | AttributeOwner::Member(class, _) => class,
        }
    }

    /// The member, if the attribute is attached to one.
    pub fn member(&self) -> Option<&'a Member> {
        match *self {
            AttributeOwner::Class(_) => None,
            AttributeOwner::Member(_, member) => Some(member),
        }
    }
}

/// Visitor over attributes.
///
/// Every specific method falls back to [`visit_any_attribute`], which must be
/// overridden by any visitor that lets an attribute reach it.
///
/// [`visit_any_attribute`]: AttributeVisitor::visit_any_attribute
pub trait AttributeVisitor {
    /// Fallback for attributes without a specific override.
    ///
    /// # Panics
    ///
    /// Panics if it is reached without being overridden.
    fn visit_any_attribute(&mut self, _owner: AttributeOwner<'_>, _attribute: &Attribute) {
        unimplemented!(
            "{} must override visit_any_attribute if it is ever called",
            std::any::type_name::<Self>()
        )
    }

    /// Visit a runtime (in)visible annotations attribute.
    fn visit_annotations_attribute(
        &mut self,
        owner: AttributeOwner<'_>,
        attribute: &Attribute,
        _annotations: &[Annotation],
    ) {
        self.visit_any_attribute(owner, attribute);
    }

    /// Visit a runtime (in)visible parameter annotations attribute.
    fn visit_parameter_annotations_attribute(
        &mut self,
        owner: AttributeOwner<'_>,
        attribute: &Attribute,
        _parameters: &[Vec<Annotation>],
    ) {
        self.visit_any_attribute(owner, attribute);
    }

    /// Visit an opaque attribute.
    fn visit_other_attribute(&mut self, owner: AttributeOwner<'_>, attribute: &Attribute) {
        self.visit_any_attribute(owner, attribute);
    }
}

impl<V: AttributeVisitor + ?Sized> AttributeVisitor for &mut V {
    fn visit_any_attribute(&mut self, owner: AttributeOwner<'_>, attribute: &Attribute) {
        (**self).visit_any_attribute(owner, attribute);
    }

    fn visit_annotations_attribute(
        &mut self,
        owner: AttributeOwner<'_>,
        attribute: &Attribute,
        annotations: &[Annotation],
    ) {
        (**self).visit_annotations_attribute(owner, attribute, annotations);
    }

    fn visit_parameter_annotations_attribute(
        &mut self,
        owner: AttributeOwner<'_>,
        attribute: &Attribute,
        parameters: &[Vec<Annotation>],
    ) {
        (**self).visit_parameter_annotations_attribute(owner, attribute, parameters);
    }

    fn visit_other_attribute(&mut self, owner: AttributeOwner<'_>, attribute: &Attribute) {
        (**self).visit_other_attribute(owner, attribute);
    }
}

/// Dispatch each attribute, in order, to the matching visitor method.
pub fn attributes_accept<V: AttributeVisitor + ?Sized>(
    owner: AttributeOwner<'_>,
    attributes: &[Attribute],
    visitor: &mut V,
) {
    for attribute in attributes {
        match attribute {
            Attribute::Annotations { annotations, .. } => {
                visitor.visit_annotations_attribute(owner, attribute, annotations)
            }
            Attribute::ParameterAnnotations { parameters, .. } => {
                visitor.visit_parameter_annotations_attribute(owner, attribute, parameters)
            }
            Attribute::Other { .. } => visitor.visit_other_attribute(owner, attribute),
        }
    }
}
