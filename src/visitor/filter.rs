//! Visitor adapters: node-kind filtering and dispatch counting.

use std::collections::{BTreeMap, BTreeSet};

use super::traits::{
    AnnotationOwner, FunctionOwner, KotlinMetadataVisitor, MetadataContext, MetadataNode, NodeKind,
    PropertyOwner, TypeOwner, TypeParameterOwner, ValueParameterOwner, VersionRequirementOwner,
};
use crate::metadata::{
    ClassMetadata, ConstructorMetadata, DeclarationContainer, FileFacadeMetadata,
    FunctionMetadata, KotlinAnnotation, MultiFileFacadeMetadata, MultiFilePartMetadata,
    PropertyMetadata, SyntheticClassMetadata, TypeAliasMetadata, TypeMetadata,
    TypeParameterMetadata, ValueParameterMetadata, VersionRequirement,
};

/// Forwards dispatches to the delegate only for registered node kinds.
///
/// A declaration container counts as the kind of the root that carries it.
#[derive(Debug)]
pub struct NodeKindFilter<V> {
    kinds: BTreeSet<NodeKind>,
    delegate: V,
}

impl<V: KotlinMetadataVisitor> NodeKindFilter<V> {
    pub fn new(kinds: impl IntoIterator<Item = NodeKind>, delegate: V) -> Self {
        NodeKindFilter {
            kinds: kinds.into_iter().collect(),
            delegate,
        }
    }

    /// Returns true if dispatches of `kind` reach the delegate.
    pub fn accepts(&self, kind: NodeKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Consume the filter and return the delegate.
    pub fn into_inner(self) -> V {
        self.delegate
    }
}

impl<V: KotlinMetadataVisitor> KotlinMetadataVisitor for NodeKindFilter<V> {
    fn visit_any(&mut self, ctx: &MetadataContext<'_>, node: MetadataNode<'_>) {
        if self.accepts(node.kind()) {
            self.delegate.visit_any(ctx, node);
        }
    }

    fn visit_declaration_container(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
    ) {
        if self.accepts(NodeKind::of_metadata(ctx.metadata)) {
            self.delegate.visit_declaration_container(ctx, container);
        }
    }

    fn visit_class(&mut self, ctx: &MetadataContext<'_>, class: &ClassMetadata) {
        if self.accepts(NodeKind::Class) {
            self.delegate.visit_class(ctx, class);
        }
    }

    fn visit_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &FileFacadeMetadata) {
        if self.accepts(NodeKind::FileFacade) {
            self.delegate.visit_file_facade(ctx, facade);
        }
    }

    fn visit_synthetic_class(&mut self, ctx: &MetadataContext<'_>, synthetic: &SyntheticClassMetadata) {
        if self.accepts(NodeKind::SyntheticClass) {
            self.delegate.visit_synthetic_class(ctx, synthetic);
        }
    }

    fn visit_multi_file_facade(&mut self, ctx: &MetadataContext<'_>, facade: &MultiFileFacadeMetadata) {
        if self.accepts(NodeKind::MultiFileFacade) {
            self.delegate.visit_multi_file_facade(ctx, facade);
        }
    }

    fn visit_multi_file_part(&mut self, ctx: &MetadataContext<'_>, part: &MultiFilePartMetadata) {
        if self.accepts(NodeKind::MultiFilePart) {
            self.delegate.visit_multi_file_part(ctx, part);
        }
    }

    fn visit_property(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: PropertyOwner<'_>,
        property: &PropertyMetadata,
    ) {
        if self.accepts(NodeKind::Property) {
            self.delegate.visit_property(ctx, owner, property);
        }
    }

    fn visit_function(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: FunctionOwner<'_>,
        function: &FunctionMetadata,
    ) {
        if self.accepts(NodeKind::Function) {
            self.delegate.visit_function(ctx, owner, function);
        }
    }

    fn visit_constructor(
        &mut self,
        ctx: &MetadataContext<'_>,
        class: &ClassMetadata,
        constructor: &ConstructorMetadata,
    ) {
        if self.accepts(NodeKind::Constructor) {
            self.delegate.visit_constructor(ctx, class, constructor);
        }
    }

    fn visit_type_alias(
        &mut self,
        ctx: &MetadataContext<'_>,
        container: &DeclarationContainer,
        alias: &TypeAliasMetadata,
    ) {
        if self.accepts(NodeKind::TypeAlias) {
            self.delegate.visit_type_alias(ctx, container, alias);
        }
    }

    fn visit_type(&mut self, ctx: &MetadataContext<'_>, owner: TypeOwner<'_>, ty: &TypeMetadata) {
        if self.accepts(NodeKind::Type) {
            self.delegate.visit_type(ctx, owner, ty);
        }
    }

    fn visit_type_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: TypeParameterOwner<'_>,
        parameter: &TypeParameterMetadata,
    ) {
        if self.accepts(NodeKind::TypeParameter) {
            self.delegate.visit_type_parameter(ctx, owner, parameter);
        }
    }

    fn visit_value_parameter(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: ValueParameterOwner<'_>,
        parameter: &ValueParameterMetadata,
    ) {
        if self.accepts(NodeKind::ValueParameter) {
            self.delegate.visit_value_parameter(ctx, owner, parameter);
        }
    }

    fn visit_version_requirement(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: VersionRequirementOwner<'_>,
        requirement: &VersionRequirement,
    ) {
        if self.accepts(NodeKind::VersionRequirement) {
            self.delegate.visit_version_requirement(ctx, owner, requirement);
        }
    }

    fn visit_annotation(
        &mut self,
        ctx: &MetadataContext<'_>,
        owner: AnnotationOwner<'_>,
        annotation: &KotlinAnnotation,
    ) {
        if self.accepts(NodeKind::Annotation) {
            self.delegate.visit_annotation(ctx, owner, annotation);
        }
    }
}

/// Counts dispatches per node kind.
#[derive(Debug, Default, Clone)]
pub struct MetadataNodeCounter {
    counts: BTreeMap<NodeKind, usize>,
}

impl MetadataNodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of dispatches of `kind`.
    pub fn count(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Number of dispatches of any kind.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Per-kind counts, in kind order. Kinds never dispatched are absent.
    pub fn counts(&self) -> &BTreeMap<NodeKind, usize> {
        &self.counts
    }
}

impl KotlinMetadataVisitor for MetadataNodeCounter {
    fn visit_any(&mut self, _ctx: &MetadataContext<'_>, node: MetadataNode<'_>) {
        *self.counts.entry(node.kind()).or_insert(0) += 1;
    }
}
