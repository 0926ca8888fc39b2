//! Visitor trait and node descriptions for metadata traversal.

use std::fmt;

use kmeta_classfile::{Class, ClassPool};
use serde::{Deserialize, Serialize};

use crate::metadata::{
    ClassMetadata, ConstructorMetadata, DeclarationContainer, FileFacadeMetadata,
    FunctionMetadata, KotlinAnnotation, KotlinMetadata, MultiFileFacadeMetadata,
    MultiFilePartMetadata, PropertyMetadata, SyntheticClassMetadata, TypeAliasMetadata,
    TypeMetadata, TypeParameterMetadata, ValueParameterMetadata, VersionRequirement,
};

// ============================================================================
// Context
// ============================================================================

/// The class whose metadata is being traversed, and the pool it lives in.
///
/// Every handler receives the context, so a visitor can resolve references
/// without holding on to the pool itself.
#[derive(Debug, Clone, Copy)]
pub struct MetadataContext<'a> {
    pub pool: &'a ClassPool,
    pub class: &'a Class,
    /// Root of the graph being traversed.
    pub metadata: &'a KotlinMetadata,
}

impl<'a> MetadataContext<'a> {
    pub fn new(pool: &'a ClassPool, class: &'a Class, metadata: &'a KotlinMetadata) -> Self {
        MetadataContext {
            pool,
            class,
            metadata,
        }
    }
}

// ============================================================================
// Node kinds
// ============================================================================

/// Kind of a metadata node, as seen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Class,
    FileFacade,
    SyntheticClass,
    MultiFileFacade,
    MultiFilePart,
    Property,
    Function,
    Constructor,
    TypeAlias,
    Type,
    TypeParameter,
    ValueParameter,
    VersionRequirement,
    Annotation,
}

impl NodeKind {
    /// Every node kind, roots first.
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Class,
        NodeKind::FileFacade,
        NodeKind::SyntheticClass,
        NodeKind::MultiFileFacade,
        NodeKind::MultiFilePart,
        NodeKind::Property,
        NodeKind::Function,
        NodeKind::Constructor,
        NodeKind::TypeAlias,
        NodeKind::Type,
        NodeKind::TypeParameter,
        NodeKind::ValueParameter,
        NodeKind::VersionRequirement,
        NodeKind::Annotation,
    ];

    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "class",
            NodeKind::FileFacade => "file_facade",
            NodeKind::SyntheticClass => "synthetic_class",
            NodeKind::MultiFileFacade => "multi_file_facade",
            NodeKind::MultiFilePart => "multi_file_part",
            NodeKind::Property => "property",
            NodeKind::Function => "function",
            NodeKind::Constructor => "constructor",
            NodeKind::TypeAlias => "type_alias",
            NodeKind::Type => "type",
            NodeKind::TypeParameter => "type_parameter",
            NodeKind::ValueParameter => "value_parameter",
            NodeKind::VersionRequirement => "version_requirement",
            NodeKind::Annotation => "annotation",
        }
    }

    /// The node kind of a metadata root.
    pub fn of_metadata(metadata: &KotlinMetadata) -> NodeKind {
        match metadata {
            KotlinMetadata::Class(_) => NodeKind::Class,
            KotlinMetadata::FileFacade(_) => NodeKind::FileFacade,
            KotlinMetadata::SyntheticClass(_) => NodeKind::SyntheticClass,
            KotlinMetadata::MultiFileFacade(_) => NodeKind::MultiFileFacade,
            KotlinMetadata::MultiFilePart(_) => NodeKind::MultiFilePart,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A borrowed metadata node of any kind.
///
/// Roots are passed as the whole [`KotlinMetadata`] value.
#[derive(Debug, Clone, Copy)]
pub enum MetadataNode<'a> {
    Metadata(&'a KotlinMetadata),
    Property(&'a PropertyMetadata),
    Function(&'a FunctionMetadata),
    Constructor(&'a ConstructorMetadata),
    TypeAlias(&'a TypeAliasMetadata),
    Type(&'a TypeMetadata),
    TypeParameter(&'a TypeParameterMetadata),
    ValueParameter(&'a ValueParameterMetadata),
    VersionRequirement(&'a VersionRequirement),
    Annotation(&'a KotlinAnnotation),
}

impl MetadataNode<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            MetadataNode::Metadata(metadata) => NodeKind::of_metadata(metadata),
            MetadataNode::Property(_) => NodeKind::Property,
            MetadataNode::Function(_) => NodeKind::Function,
            MetadataNode::Constructor(_) => NodeKind::Constructor,
            MetadataNode::TypeAlias(_) => NodeKind::TypeAlias,
            MetadataNode::Type(_) => NodeKind::Type,
            MetadataNode::TypeParameter(_) => NodeKind::TypeParameter,
            MetadataNode::ValueParameter(_) => NodeKind::ValueParameter,
            MetadataNode::VersionRequirement(_) => NodeKind::VersionRequirement,
            MetadataNode::Annotation(_) => NodeKind::Annotation,
        }
    }
}

// ============================================================================
// Owners
// ============================================================================

/// Where a property is declared.
#[derive(Debug, Clone, Copy)]
pub enum PropertyOwner<'a> {
    Declared(&'a DeclarationContainer),
    Delegated(&'a DeclarationContainer),
}

impl<'a> PropertyOwner<'a> {
    pub fn container(&self) -> &'a DeclarationContainer {
        match *self {
            PropertyOwner::Declared(container) | PropertyOwner::Delegated(container) => container,
        }
    }
}

/// Where a function is declared.
#[derive(Debug, Clone, Copy)]
pub enum FunctionOwner<'a> {
    Container(&'a DeclarationContainer),
    SyntheticClass(&'a SyntheticClassMetadata),
}

/// The structural position of a type.
#[derive(Debug, Clone, Copy)]
pub enum TypeOwner<'a> {
    Supertype(&'a ClassMetadata),
    PropertyType(&'a PropertyMetadata),
    PropertyReceiver(&'a PropertyMetadata),
    FunctionReturn(&'a FunctionMetadata),
    FunctionReceiver(&'a FunctionMetadata),
    ValueParameterType(&'a ValueParameterMetadata),
    VarargElement(&'a ValueParameterMetadata),
    TypeParameterUpperBound(&'a TypeParameterMetadata),
    TypeAliasUnderlying(&'a TypeAliasMetadata),
    TypeAliasExpanded(&'a TypeAliasMetadata),
    TypeArgument(&'a TypeMetadata),
    FlexibleUpperBound(&'a TypeMetadata),
    Abbreviation(&'a TypeMetadata),
}

/// The declaration a type parameter belongs to.
#[derive(Debug, Clone, Copy)]
pub enum TypeParameterOwner<'a> {
    Class(&'a ClassMetadata),
    Function(&'a FunctionMetadata),
    Property(&'a PropertyMetadata),
    TypeAlias(&'a TypeAliasMetadata),
}

/// The callable a value parameter belongs to.
#[derive(Debug, Clone, Copy)]
pub enum ValueParameterOwner<'a> {
    Function(&'a FunctionMetadata),
    /// A constructor, with the class that declares it.
    Constructor(&'a ClassMetadata, &'a ConstructorMetadata),
    PropertySetter(&'a PropertyMetadata),
}

/// The declaration a version requirement is attached to.
#[derive(Debug, Clone, Copy)]
pub enum VersionRequirementOwner<'a> {
    Class(&'a ClassMetadata),
    Constructor(&'a ConstructorMetadata),
    Function(&'a FunctionMetadata),
    Property(&'a PropertyMetadata),
    TypeAlias(&'a TypeAliasMetadata),
}

/// The node an in-metadata annotation is attached to.
#[derive(Debug, Clone, Copy)]
pub enum AnnotationOwner<'a> {
    Type(&'a TypeMetadata),
    TypeParameter(&'a TypeParameterMetadata),
    TypeAlias(&'a TypeAliasMetadata),
}

// ============================================================================
// Visitor
// ============================================================================

/// Visitor over Kotlin metadata nodes.
///
/// Every handler defaults to [`visit_any`], which does nothing. Roots that
/// carry a declaration container pass through [`visit_declaration_container`]
/// first, so a visitor interested in containers handles classes, file
/// facades and multi-file parts with one override.
///
/// Handlers are dispatched once per node. Whether children are visited
/// afterwards depends on the driver: the `*_accept` helpers dispatch only
/// direct children, the `walk_*` functions traverse the whole graph.
///
/// [`visit_any`]: KotlinMetadataVisitor::visit_any
/// [`visit_declaration_container`]: KotlinMetadataVisitor::visit_declaration_container
pub trait KotlinMetadataVisitor {
    /// Generic fallback for every node kind.
    fn visit_any(&mut self, _ctx: &MetadataContext<'_>, _node: MetadataNode<'_>) {}

    // ---- roots ----

    fn visit_declaration_container(
        &mut self,
        ctx: &MetadataContext<'_>,
        _container: &DeclarationContainer,
    ) {
        self.visit_any(ctx, MetadataNode::Metadata(ctx.metadata));
    }

    fn visit_class(&mut self, ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        self.visit_declaration_container(ctx, &class.container);
    }

    fn visit_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &FileFacadeMetadata) {
        self.visit_declaration_container(ctx, &facade.container);
    }

    fn visit_synthetic_class(
        &mut self,
        ctx: &MetadataContext<'_>,
        _synthetic: &SyntheticClassMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::Metadata(ctx.metadata));
    }

    fn visit_multi_file_facade(
        &mut self,
        ctx: &MetadataContext<'_>,
        _facade: &MultiFileFacadeMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::Metadata(ctx.metadata));
    }

    fn visit_multi_file_part(&mut self, ctx: &MetadataContext<'_>, part: &MultiFilePartMetadata) {
        self.visit_declaration_container(ctx, &part.container);
    }

    // ---- declarations ----

    fn visit_property(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: PropertyOwner<'_>,
        property: &PropertyMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::Property(property));
    }

    fn visit_function(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::Function(function));
    }

    fn visit_constructor(
        &mut self,
        ctx: &MetadataContext<'_>,
        _class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::Constructor(constructor));
    }

    fn visit_type_alias(
        &mut self,
        ctx: &MetadataContext<'_>,
        _container: &DeclarationContainer,
        alias: &TypeAliasMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::TypeAlias(alias));
    }

    // ---- types and parameters ----

    fn visit_type(&mut self, ctx: &MetadataContext<'_>, _owner: TypeOwner<'_>, ty: &TypeMetadata) {
        self.visit_any(ctx, MetadataNode::Type(ty));
    }

    fn visit_type_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: TypeParameterOwner<'_>,
        parameter: &TypeParameterMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::TypeParameter(parameter));
    }

    fn visit_value_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: ValueParameterOwner<'_>,
        parameter: &ValueParameterMetadata,
    ) {
        self.visit_any(ctx, MetadataNode::ValueParameter(parameter));
    }

    fn visit_version_requirement(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: VersionRequirementOwner<'_>,
        requirement: &VersionRequirement,
    ) {
        self.visit_any(ctx, MetadataNode::VersionRequirement(requirement));
    }

    fn visit_annotation(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: AnnotationOwner<'_>,
        annotation: &KotlinAnnotation,
    ) {
        self.visit_any(ctx, MetadataNode::Annotation(annotation));
    }
}

impl<V: KotlinMetadataVisitor + ?Sized> KotlinMetadataVisitor for &mut V {
    fn visit_any(&mut self, ctx: &MetadataContext<'_>, node: MetadataNode<'_>) {
        (**self).visit_any(ctx, node);
    }

    fn visit_declaration_container(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
    ) {
        (**self).visit_declaration_container(ctx, container);
    }

    fn visit_class(&mut self, ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        (**self).visit_class(ctx, class);
    }

    fn visit_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &FileFacadeMetadata) {
        (**self).visit_file_facade(ctx, facade);
    }

    fn visit_synthetic_class(&mut self, ctx: &MetadataContext<'_>, synthetic: &SyntheticClassMetadata) {
        (**self).visit_synthetic_class(ctx, synthetic);
    }

    fn visit_multi_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &MultiFileFacadeMetadata) {
        (**self).visit_multi_file_facade(ctx, facade);
    }

    fn visit_multi_file_part(&mut self, ctx: &MetadataContext<'_>, part: &MultiFilePartMetadata) {
        (**self).visit_multi_file_part(ctx, part);
    }

    fn visit_property(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: PropertyOwner<'_>,
        property: &PropertyMetadata,
    ) {
        (**self).visit_property(ctx, owner, property);
    }

    fn visit_function(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        (**self).visit_function(ctx, owner, function);
    }

    fn visit_constructor(
        &mut self,
        ctx: &MetadataContext<'_>,
        class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        (**self).visit_constructor(ctx, class, constructor);
    }

    fn visit_type_alias(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
        alias: &TypeAliasMetadata,
    ) {
        (**self).visit_type_alias(ctx, container, alias);
    }

    fn visit_type(&mut self, ctx: &MetadataContext<'_>, owner: TypeOwner<'_>, ty: &TypeMetadata) {
        (**self).visit_type(ctx, owner, ty);
    }

    fn visit_type_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: TypeParameterOwner<'_>,
        parameter: &TypeParameterMetadata,
    ) {
        (**self).visit_type_parameter(ctx, owner, parameter);
    }

    fn visit_value_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: ValueParameterOwner<'_>,
        parameter: &ValueParameterMetadata,
    ) {
        (**self).visit_value_parameter(ctx, owner, parameter);
    }

    fn visit_version_requirement(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: VersionRequirementOwner<'_>,
        requirement: &VersionRequirement,
    ) {
        (**self).visit_version_requirement(ctx, owner, requirement);
    }

    fn visit_annotation(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: AnnotationOwner<'_>,
        annotation: &KotlinAnnotation,
    ) {
        (**self).visit_annotation(ctx, owner, annotation);
    }
}
