//! Accept helpers and walk functions for metadata traversal.
//!
//! Two ways to drive a [`KotlinMetadataVisitor`]:
//!
//! - **Accept helpers** (`*_accept` methods on the nodes) dispatch the direct
//!   children of one kind and do not descend further. A visitor that needs
//!   control over recursion calls them from its own handlers.
//! - **Walk functions** (`walk_*`) perform a full pre-order traversal: the
//!   node's handler first, then each structural child in a fixed order.
//!
//! # Traversal Order
//!
//! | Node | Children, in order |
//! |------|--------------------|
//! | class | container, supertypes, type parameters, version requirement, constructors |
//! | declaration container | properties, functions, type aliases, delegated properties |
//! | synthetic class | functions |
//! | multi-file facade | none |
//! | property | version requirement, type, setter parameters, receiver type, type parameters |
//! | function | receiver type, type parameters, value parameters, return type, version requirement |
//! | constructor | value parameters, version requirement |
//! | type alias | type parameters, underlying type, expanded type, version requirement, annotations |
//! | type | type arguments, flexible upper bounds, abbreviation, annotations |
//! | type parameter | upper bounds, annotations |
//! | value parameter | type, vararg element type |
//!
//! A declaration container has no handler of its own during a walk; it is
//! dispatched as part of the root that carries it. Every other node is
//! dispatched exactly once.

use super::traits::{
    AnnotationOwner, FunctionOwner, KotlinMetadataVisitor, MetadataContext, PropertyOwner,
    TypeOwner, TypeParameterOwner, ValueParameterOwner, VersionRequirementOwner,
};
use crate::metadata::{
    ClassMetadata, ConstructorMetadata, DeclarationContainer, FunctionMetadata, KotlinMetadata,
    PropertyMetadata, SyntheticClassMetadata, TypeAliasMetadata, TypeMetadata,
    TypeParameterMetadata, ValueParameterMetadata,
};

// ============================================================================
// Accept helpers
// ============================================================================

impl KotlinMetadata {
    /// Dispatch this root to the handler for its kind.
    ///
    /// `ctx.metadata` is expected to be `self`.
    pub fn accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        match self {
            KotlinMetadata::Class(class) => visitor.visit_class(ctx, class),
            KotlinMetadata::FileFacade(facade) => visitor.visit_file_facade(ctx, facade),
            KotlinMetadata::SyntheticClass(synthetic) => {
                visitor.visit_synthetic_class(ctx, synthetic)
            }
            KotlinMetadata::MultiFileFacade(facade) => visitor.visit_multi_file_facade(ctx, facade),
            KotlinMetadata::MultiFilePart(part) => visitor.visit_multi_file_part(ctx, part),
        }
    }
}

impl DeclarationContainer {
    pub fn properties_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for property in &self.properties {
            visitor.visit_property(ctx, PropertyOwner::Declared(self), property);
        }
    }

    pub fn functions_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for function in &self.functions {
            visitor.visit_function(ctx, FunctionOwner::Container(self), function);
        }
    }

    pub fn type_aliases_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for alias in &self.type_aliases {
            visitor.visit_type_alias(ctx, self, alias);
        }
    }

    pub fn delegated_properties_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for property in &self.delegated_properties {
            visitor.visit_property(ctx, PropertyOwner::Delegated(self), property);
        }
    }
}

impl ClassMetadata {
    pub fn supertypes_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for supertype in &self.supertypes {
            visitor.visit_type(ctx, TypeOwner::Supertype(self), supertype);
        }
    }

    pub fn type_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.type_parameters {
            visitor.visit_type_parameter(ctx, TypeParameterOwner::Class(self), parameter);
        }
    }

    pub fn version_requirement_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(requirement) = &self.version_requirement {
            visitor.visit_version_requirement(ctx, VersionRequirementOwner::Class(self), requirement);
        }
    }

    pub fn constructors_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for constructor in &self.constructors {
            visitor.visit_constructor(ctx, self, constructor);
        }
    }
}

impl SyntheticClassMetadata {
    pub fn functions_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for function in &self.functions {
            visitor.visit_function(ctx, FunctionOwner::SyntheticClass(self), function);
        }
    }
}

impl PropertyMetadata {
    pub fn version_requirement_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(requirement) = &self.version_requirement {
            visitor.visit_version_requirement(
                ctx,
                VersionRequirementOwner::Property(self),
                requirement,
            );
        }
    }

    pub fn type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        visitor.visit_type(ctx, TypeOwner::PropertyType(self), &self.ty);
    }

    pub fn setter_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.setter_parameters {
            visitor.visit_value_parameter(ctx, ValueParameterOwner::PropertySetter(self), parameter);
        }
    }

    pub fn receiver_type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(receiver) = &self.receiver_type {
            visitor.visit_type(ctx, TypeOwner::PropertyReceiver(self), receiver);
        }
    }

    pub fn type_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.type_parameters {
            visitor.visit_type_parameter(ctx, TypeParameterOwner::Property(self), parameter);
        }
    }
}

impl FunctionMetadata {
    pub fn receiver_type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(receiver) = &self.receiver_type {
            visitor.visit_type(ctx, TypeOwner::FunctionReceiver(self), receiver);
        }
    }

    pub fn type_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.type_parameters {
            visitor.visit_type_parameter(ctx, TypeParameterOwner::Function(self), parameter);
        }
    }

    pub fn value_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.value_parameters {
            visitor.visit_value_parameter(ctx, ValueParameterOwner::Function(self), parameter);
        }
    }

    pub fn return_type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        visitor.visit_type(ctx, TypeOwner::FunctionReturn(self), &self.return_type);
    }

    pub fn version_requirement_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(requirement) = &self.version_requirement {
            visitor.visit_version_requirement(
                ctx,
                VersionRequirementOwner::Function(self),
                requirement,
            );
        }
    }
}

impl ConstructorMetadata {
    /// Dispatch the value parameters. `class` is the class declaring this
    /// constructor.
    pub fn value_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        class: &ClassMetadata,
        visitor: &mut V,
    ) {
        for parameter in &self.value_parameters {
            visitor.visit_value_parameter(
                ctx,
                ValueParameterOwner::Constructor(class, self),
                parameter,
            );
        }
    }

    pub fn version_requirement_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(requirement) = &self.version_requirement {
            visitor.visit_version_requirement(
                ctx,
                VersionRequirementOwner::Constructor(self),
                requirement,
            );
        }
    }
}

impl TypeAliasMetadata {
    pub fn type_parameters_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for parameter in &self.type_parameters {
            visitor.visit_type_parameter(ctx, TypeParameterOwner::TypeAlias(self), parameter);
        }
    }

    pub fn underlying_type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        visitor.visit_type(ctx, TypeOwner::TypeAliasUnderlying(self), &self.underlying_type);
    }

    pub fn expanded_type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        visitor.visit_type(ctx, TypeOwner::TypeAliasExpanded(self), &self.expanded_type);
    }

    pub fn version_requirement_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(requirement) = &self.version_requirement {
            visitor.visit_version_requirement(
                ctx,
                VersionRequirementOwner::TypeAlias(self),
                requirement,
            );
        }
    }

    pub fn annotations_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for annotation in &self.annotations {
            visitor.visit_annotation(ctx, AnnotationOwner::TypeAlias(self), annotation);
        }
    }
}

impl TypeMetadata {
    pub fn type_arguments_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for argument in &self.type_arguments {
            visitor.visit_type(ctx, TypeOwner::TypeArgument(self), argument);
        }
    }

    pub fn upper_bounds_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for bound in &self.upper_bounds {
            visitor.visit_type(ctx, TypeOwner::FlexibleUpperBound(self), bound);
        }
    }

    pub fn abbreviation_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        if let Some(abbreviation) = &self.abbreviation {
            visitor.visit_type(ctx, TypeOwner::Abbreviation(self), abbreviation);
        }
    }

    pub fn annotations_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for annotation in &self.annotations {
            visitor.visit_annotation(ctx, AnnotationOwner::Type(self), annotation);
        }
    }
}

impl TypeParameterMetadata {
    pub fn upper_bounds_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for bound in &self.upper_bounds {
            visitor.visit_type(ctx, TypeOwner::TypeParameterUpperBound(self), bound);
        }
    }

    pub fn annotations_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        for annotation in &self.annotations {
            visitor.visit_annotation(ctx, AnnotationOwner::TypeParameter(self), annotation);
        }
    }
}

impl ValueParameterMetadata {
    /// Dispatch the parameter type, then the vararg element type if present.
    pub fn type_accept<V: KotlinMetadataVisitor + ?Sized>(
        &self,
        ctx: &MetadataContext<'_>,
        visitor: &mut V,
    ) {
        visitor.visit_type(ctx, TypeOwner::ValueParameterType(self), &self.ty);
        if let Some(element) = &self.vararg_element_type {
            visitor.visit_type(ctx, TypeOwner::VarargElement(self), element);
        }
    }
}

// ============================================================================
// Walks
// ============================================================================

/// Walk the whole graph rooted at `ctx.metadata`.
pub fn walk_metadata<V: KotlinMetadataVisitor + ?Sized>(ctx: &MetadataContext<'_>, visitor: &mut V) {
    match ctx.metadata {
        KotlinMetadata::Class(class) => walk_class(ctx, class, visitor),
        KotlinMetadata::FileFacade(facade) => {
            visitor.visit_file_facade(ctx, facade);
            walk_declaration_container(ctx, &facade.container, visitor);
        }
        KotlinMetadata::SyntheticClass(synthetic) => {
            visitor.visit_synthetic_class(ctx, synthetic);
            for function in &synthetic.functions {
                walk_function(ctx, FunctionOwner::SyntheticClass(synthetic), function, visitor);
            }
        }
        KotlinMetadata::MultiFileFacade(facade) => visitor.visit_multi_file_facade(ctx, facade),
        KotlinMetadata::MultiFilePart(part) => {
            visitor.visit_multi_file_part(ctx, part);
            walk_declaration_container(ctx, &part.container, visitor);
        }
    }
}

/// Walk a class root.
///
/// Traversal order:
/// 1. `visit_class`
/// 2. The declaration container's children
/// 3. Supertypes, type parameters, version requirement, constructors
pub fn walk_class<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    class: &ClassMetadata,
    visitor: &mut V,
) {
    visitor.visit_class(ctx, class);
    walk_declaration_container(ctx, &class.container, visitor);

    for supertype in &class.supertypes {
        walk_type(ctx, TypeOwner::Supertype(class), supertype, visitor);
    }
    for parameter in &class.type_parameters {
        walk_type_parameter(ctx, TypeParameterOwner::Class(class), parameter, visitor);
    }
    class.version_requirement_accept(ctx, visitor);
    for constructor in &class.constructors {
        walk_constructor(ctx, class, constructor, visitor);
    }
}

/// Walk the children of a declaration container. The container itself is not
/// dispatched.
pub fn walk_declaration_container<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    container: &DeclarationContainer,
    visitor: &mut V,
) {
    for property in &container.properties {
        walk_property(ctx, PropertyOwner::Declared(container), property, visitor);
    }
    for function in &container.functions {
        walk_function(ctx, FunctionOwner::Container(container), function, visitor);
    }
    for alias in &container.type_aliases {
        walk_type_alias(ctx, container, alias, visitor);
    }
    for property in &container.delegated_properties {
        walk_property(ctx, PropertyOwner::Delegated(container), property, visitor);
    }
}

/// Walk a property and its children.
pub fn walk_property<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    owner: PropertyOwner<'_>,
    property: &PropertyMetadata,
    visitor: &mut V,
) {
    visitor.visit_property(ctx, owner, property);

    property.version_requirement_accept(ctx, visitor);
    walk_type(ctx, TypeOwner::PropertyType(property), &property.ty, visitor);
    for parameter in &property.setter_parameters {
        walk_value_parameter(
            ctx,
            ValueParameterOwner::PropertySetter(property),
            parameter,
            visitor,
        );
    }
    if let Some(receiver) = &property.receiver_type {
        walk_type(ctx, TypeOwner::PropertyReceiver(property), receiver, visitor);
    }
    for parameter in &property.type_parameters {
        walk_type_parameter(ctx, TypeParameterOwner::Property(property), parameter, visitor);
    }
}

/// Walk a function and its children.
pub fn walk_function<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    owner: FunctionOwner<'_>,
    function: &FunctionMetadata,
    visitor: &mut V,
) {
    visitor.visit_function(ctx, owner, function);

    if let Some(receiver) = &function.receiver_type {
        walk_type(ctx, TypeOwner::FunctionReceiver(function), receiver, visitor);
    }
    for parameter in &function.type_parameters {
        walk_type_parameter(ctx, TypeParameterOwner::Function(function), parameter, visitor);
    }
    for parameter in &function.value_parameters {
        walk_value_parameter(ctx, ValueParameterOwner::Function(function), parameter, visitor);
    }
    walk_type(ctx, TypeOwner::FunctionReturn(function), &function.return_type, visitor);
    function.version_requirement_accept(ctx, visitor);
}

/// Walk a constructor and its children.
pub fn walk_constructor<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    class: &ClassMetadata,
    constructor: &ConstructorMetadata,
    visitor: &mut V,
) {
    visitor.visit_constructor(ctx, class, constructor);

    for parameter in &constructor.value_parameters {
        walk_value_parameter(
            ctx,
            ValueParameterOwner::Constructor(class, constructor),
            parameter,
            visitor,
        );
    }
    constructor.version_requirement_accept(ctx, visitor);
}

/// Walk a type alias and its children.
pub fn walk_type_alias<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    container: &DeclarationContainer,
    alias: &TypeAliasMetadata,
    visitor: &mut V,
) {
    visitor.visit_type_alias(ctx, container, alias);

    for parameter in &alias.type_parameters {
        walk_type_parameter(ctx, TypeParameterOwner::TypeAlias(alias), parameter, visitor);
    }
    walk_type(ctx, TypeOwner::TypeAliasUnderlying(alias), &alias.underlying_type, visitor);
    walk_type(ctx, TypeOwner::TypeAliasExpanded(alias), &alias.expanded_type, visitor);
    alias.version_requirement_accept(ctx, visitor);
    alias.annotations_accept(ctx, visitor);
}

/// Walk a type and its nested types.
pub fn walk_type<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    owner: TypeOwner<'_>,
    ty: &TypeMetadata,
    visitor: &mut V,
) {
    visitor.visit_type(ctx, owner, ty);

    for argument in &ty.type_arguments {
        walk_type(ctx, TypeOwner::TypeArgument(ty), argument, visitor);
    }
    for bound in &ty.upper_bounds {
        walk_type(ctx, TypeOwner::FlexibleUpperBound(ty), bound, visitor);
    }
    if let Some(abbreviation) = &ty.abbreviation {
        walk_type(ctx, TypeOwner::Abbreviation(ty), abbreviation, visitor);
    }
    ty.annotations_accept(ctx, visitor);
}

/// Walk a type parameter and its bounds.
pub fn walk_type_parameter<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    owner: TypeParameterOwner<'_>,
    parameter: &TypeParameterMetadata,
    visitor: &mut V,
) {
    visitor.visit_type_parameter(ctx, owner, parameter);

    for bound in &parameter.upper_bounds {
        walk_type(ctx, TypeOwner::TypeParameterUpperBound(parameter), bound, visitor);
    }
    parameter.annotations_accept(ctx, visitor);
}

/// Walk a value parameter and its types.
pub fn walk_value_parameter<V: KotlinMetadataVisitor + ?Sized>(
    ctx: &MetadataContext<'_>,
    owner: ValueParameterOwner<'_>,
    parameter: &ValueParameterMetadata,
    visitor: &mut V,
) {
    visitor.visit_value_parameter(ctx, owner, parameter);

    walk_type(ctx, TypeOwner::ValueParameterType(parameter), &parameter.ty, visitor);
    if let Some(element) = &parameter.vararg_element_type {
        walk_type(ctx, TypeOwner::VarargElement(parameter), element, visitor);
    }
}
