//! Integrity constraints, one visitor each.
//!
//! A constraint overrides the handlers for the node kinds it inspects and
//! leaves the rest at the no-op default. [`run_constraint`] drives one over a
//! full graph, forwarding only the kinds the constraint declares.

mod class;
mod declaration_container;
mod function;
mod multi_file;
mod property;
mod types;

pub use class::ClassIntegrity;
pub use declaration_container::DeclarationContainerIntegrity;
pub use function::{ConstructorIntegrity, FunctionIntegrity};
pub use multi_file::{MultiFileFacadeIntegrity, MultiFilePartIntegrity};
pub use property::PropertyIntegrity;
pub use types::{AnnotationIntegrity, TypeIntegrity};

use super::config::ConstraintKind;
use super::violation::Reporter;
use crate::visitor::{walk_metadata, KotlinMetadataVisitor, MetadataContext, NodeKindFilter};

/// Walk the graph at `ctx.metadata` with the constraint `kind`, reporting to
/// `reporter`.
pub fn run_constraint<R: Reporter>(kind: ConstraintKind, ctx: &MetadataContext<'_>, reporter: R) {
    match kind {
        ConstraintKind::DeclarationContainerIntegrity => {
            walk_filtered(kind, ctx, DeclarationContainerIntegrity::new(reporter))
        }
        ConstraintKind::ClassIntegrity => walk_filtered(kind, ctx, ClassIntegrity::new(reporter)),
        ConstraintKind::FunctionIntegrity => walk_filtered(kind, ctx, FunctionIntegrity::new(reporter)),
        ConstraintKind::ConstructorIntegrity => {
            walk_filtered(kind, ctx, ConstructorIntegrity::new(reporter))
        }
        ConstraintKind::PropertyIntegrity => walk_filtered(kind, ctx, PropertyIntegrity::new(reporter)),
        ConstraintKind::TypeIntegrity => walk_filtered(kind, ctx, TypeIntegrity::new(reporter)),
        ConstraintKind::MultiFileFacadeIntegrity => {
            walk_filtered(kind, ctx, MultiFileFacadeIntegrity::new(reporter))
        }
        ConstraintKind::MultiFilePartIntegrity => {
            walk_filtered(kind, ctx, MultiFilePartIntegrity::new(reporter))
        }
        ConstraintKind::AnnotationIntegrity => {
            walk_filtered(kind, ctx, AnnotationIntegrity::new(reporter))
        }
    }
}

fn walk_filtered<V: KotlinMetadataVisitor>(kind: ConstraintKind, ctx: &MetadataContext<'_>, constraint: V) {
    let mut filter = NodeKindFilter::new(kind.interests().iter().copied(), constraint);
    walk_metadata(ctx, &mut filter);
}
