//! Visitor protocol for Kotlin metadata graphs.
//!
//! [`KotlinMetadataVisitor`] has one handler per node kind, each receiving the
//! [`MetadataContext`] (pool, class, root) and an owner describing the
//! node's structural position. Handlers default to the no-op
//! [`visit_any`](KotlinMetadataVisitor::visit_any).
//!
//! # Traversal
//!
//! - Accept helpers on the nodes dispatch direct children only
//! - `walk_*` functions traverse the whole graph, depth-first, pre-order, in
//!   the fixed order documented in [`dispatch`]
//!
//! ```ignore
//! use kmeta::visitor::{walk_metadata, MetadataContext, MetadataNodeCounter, NodeKind};
//!
//! let ctx = MetadataContext::new(&pool, class, &metadata);
//! let mut counter = MetadataNodeCounter::new();
//! walk_metadata(&ctx, &mut counter);
//! println!("{} functions", counter.count(NodeKind::Function));
//! ```

pub mod dispatch;
mod filter;
mod traits;

pub use dispatch::{
    walk_class, walk_constructor, walk_declaration_container, walk_function, walk_metadata,
    walk_property, walk_type, walk_type_alias, walk_type_parameter, walk_value_parameter,
};
pub use filter::{MetadataNodeCounter, NodeKindFilter};
pub use traits::{
    AnnotationOwner, FunctionOwner, KotlinMetadataVisitor, MetadataContext, MetadataNode,
    NodeKind, PropertyOwner, TypeOwner, TypeParameterOwner, ValueParameterOwner,
    VersionRequirementOwner,
};
