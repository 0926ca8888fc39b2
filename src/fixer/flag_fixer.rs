//! Recomputes `has_annotations` flags from the class pool.

use kmeta_classfile::{ClassId, ClassPool, MemberRef};
use tracing::trace;

use super::counter::KotlinAnnotationCounter;
use crate::metadata::{
    ClassMetadata, CommonFlags, ConstructorMetadata, DeclarationContainer, FileFacadeMetadata,
    FunctionMetadata, MultiFileFacadeMetadata, MultiFilePartMetadata, PropertyMetadata,
    SyntheticClassMetadata, TypeAliasMetadata, TypeMetadata, TypeParameterMetadata,
    ValueParameterMetadata,
};
use crate::visitor::{
    FunctionOwner, KotlinMetadataVisitor, MetadataContext, PropertyOwner, TypeOwner,
    TypeParameterOwner, ValueParameterOwner,
};

/// Visitor that brings every `has_annotations` flag in a metadata graph back
/// in line with the annotations actually present.
///
/// Each handler recurses into its structural children first, then settles
/// its own node:
///
/// - Classes, functions, constructors and property accessors count the
///   annotations of the JVM element they resolved to.
/// - Properties count the annotations of their synthetic `$annotations`
///   method; without one they have no annotations.
/// - Types, type parameters and type aliases carry their annotations in the
///   metadata itself.
/// - A function receiver type counts the annotations on parameter 0 of the
///   function's method.
/// - Value parameters are only ever demoted: a parameter decoded as annotated
///   is checked against its method's parameter annotations.
/// - Constructors of annotation classes never have annotations.
///
/// Missing classes or members count as zero annotations. The fixer never
/// fails, and running it twice yields the same flags.
#[derive(Debug, Default)]
pub struct KotlinAnnotationFlagFixer {
    counter: KotlinAnnotationCounter,
    flags_written: usize,
}

impl KotlinAnnotationFlagFixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of flags written so far.
    pub fn flags_written(&self) -> usize {
        self.flags_written
    }

    fn count_class(&mut self, pool: &ClassPool, class: Option<ClassId>) -> &KotlinAnnotationCounter {
        self.counter.reset();
        if let Some(class) = class.and_then(|id| pool.class(id)) {
            class.accept(&mut self.counter);
        }
        &self.counter
    }

    fn count_member(
        &mut self,
        pool: &ClassPool,
        reference: Option<MemberRef>,
    ) -> &KotlinAnnotationCounter {
        self.counter.reset();
        if let Some(reference) = reference {
            if let (Some(class), Some(member)) = (pool.class(reference.class), pool.member(reference)) {
                member.accept(class, &mut self.counter);
            }
        }
        &self.counter
    }

    fn set(&mut self, flags: &CommonFlags, has_annotations: bool) {
        flags.set_has_annotations(has_annotations);
        self.flags_written += 1;
    }
}

impl KotlinMetadataVisitor for KotlinAnnotationFlagFixer {
    // ---- roots ----

    fn visit_declaration_container(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
    ) {
        container.properties_accept(ctx, self);
        container.functions_accept(ctx, self);
        container.type_aliases_accept(ctx, self);
        container.delegated_properties_accept(ctx, self);
    }

    fn visit_class(&mut self, ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        self.visit_declaration_container(ctx, &class.container);

        class.supertypes_accept(ctx, self);
        class.type_parameters_accept(ctx, self);
        class.version_requirement_accept(ctx, self);
        class.constructors_accept(ctx, self);

        let annotated = self.count_class(ctx.pool, class.referenced_class).count() > 0;
        self.set(&class.flags.common, annotated);
    }

    fn visit_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &FileFacadeMetadata) {
        self.visit_declaration_container(ctx, &facade.container);
    }

    fn visit_synthetic_class(&mut self, ctx: &MetadataContext<'_>, synthetic: &SyntheticClassMetadata) {
        synthetic.functions_accept(ctx, self);
    }

    fn visit_multi_file_facade(&mut self, _ctx: &MetadataContext<'_>, _facade: &MultiFileFacadeMetadata) {}

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
        property.version_requirement_accept(ctx, self);
        property.type_accept(ctx, self);
        property.setter_parameters_accept(ctx, self);
        property.receiver_type_accept(ctx, self);
        property.type_parameters_accept(ctx, self);

        let annotated = property.synthetic_method_for_annotations.is_some()
            && self
                .count_member(ctx.pool, property.referenced_synthetic_method_for_annotations)
                .count()
                > 0;
        self.set(&property.flags.common, annotated);

        if property.flags.has_getter && property.referenced_getter_method.is_some() {
            let annotated = self
                .count_member(ctx.pool, property.referenced_getter_method)
                .count()
                > 0;
            self.set(&property.getter_flags.common, annotated);
        }

        if property.flags.has_setter && property.referenced_setter_method.is_some() {
            let annotated = self
                .count_member(ctx.pool, property.referenced_setter_method)
                .count()
                > 0;
            self.set(&property.setter_flags.common, annotated);
        }
    }

    fn visit_function(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        function.receiver_type_accept(ctx, self);
        function.type_parameters_accept(ctx, self);
        function.value_parameters_accept(ctx, self);
        function.return_type_accept(ctx, self);

        let annotated = self.count_member(ctx.pool, function.referenced_method).count() > 0;
        self.set(&function.flags.common, annotated);
    }

    fn visit_constructor(
        &mut self,
        ctx: &MetadataContext<'_>,
        class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        constructor.value_parameters_accept(ctx, class, self);
        constructor.version_requirement_accept(ctx, self);

        if class.flags.is_annotation_class {
            // The compiler never records constructor annotations for annotation classes.
            trace!("Constructor of annotation class {} forced unannotated", class.class_name);
            self.set(&constructor.flags.common, false);
        } else {
            let annotated = self.count_member(ctx.pool, constructor.referenced_method).count() > 0;
            self.set(&constructor.flags.common, annotated);
        }
    }

    fn visit_type_alias(
        &mut self,
        ctx: &MetadataContext<'_>,
        _container: &DeclarationContainer,
        alias: &TypeAliasMetadata,
    ) {
        alias.type_parameters_accept(ctx, self);
        alias.underlying_type_accept(ctx, self);
        alias.expanded_type_accept(ctx, self);
        alias.version_requirement_accept(ctx, self);

        self.set(&alias.flags.common, !alias.annotations.is_empty());
    }

    // ---- types and parameters ----

    fn visit_type(&mut self, ctx: &MetadataContext<'_>, owner: TypeOwner<'_>, ty: &TypeMetadata) {
        ty.type_arguments_accept(ctx, self);
        ty.upper_bounds_accept(ctx, self);
        ty.abbreviation_accept(ctx, self);

        let annotated = match owner {
            TypeOwner::FunctionReceiver(function) => {
                self.count_member(ctx.pool, function.referenced_method)
                    .parameter_annotation_count(0)
                    > 0
            }
            _ => !ty.annotations.is_empty(),
        };
        self.set(&ty.flags.common, annotated);
    }

    fn visit_type_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        _owner: TypeParameterOwner<'_>,
        parameter: &TypeParameterMetadata,
    ) {
        parameter.upper_bounds_accept(ctx, self);

        self.set(&parameter.flags.common, !parameter.annotations.is_empty());
    }

    fn visit_value_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: ValueParameterOwner<'_>,
        parameter: &ValueParameterMetadata,
    ) {
        parameter.type_accept(ctx, self);

        if !parameter.flags.common.has_annotations() {
            return;
        }

        let method = match owner {
            ValueParameterOwner::Function(function) => function.referenced_method,
            ValueParameterOwner::Constructor(class, constructor) => {
                if class.flags.is_annotation_class {
                    return;
                }
                constructor.referenced_method
            }
            ValueParameterOwner::PropertySetter(property) => property.referenced_setter_method,
        };

        let annotated = self
            .count_member(ctx.pool, method)
            .parameter_annotation_count(parameter.index)
            > 0;
        if !annotated {
            trace!(
                "Value parameter {} at index {} demoted to unannotated",
                parameter.name,
                parameter.index
            );
        }
        self.set(&parameter.flags.common, annotated);
    }
}
