//! Annotation flag fixing.
//!
//! After shrinking or obfuscation, the `has_annotations` flags decoded from
//! `kotlin.Metadata` may no longer match the annotations that remain on the
//! JVM elements. [`fix_flags`] recomputes them from the class pool.
//!
//! ```ignore
//! use kmeta::fixer::fix_flags;
//!
//! let written = fix_flags(&pool, class_id, &metadata);
//! ```

mod counter;
mod flag_fixer;

use kmeta_classfile::{ClassId, ClassPool};
use tracing::{debug, warn};

use crate::metadata::KotlinMetadata;
use crate::visitor::MetadataContext;

pub use counter::KotlinAnnotationCounter;
pub use flag_fixer::KotlinAnnotationFlagFixer;

/// Recompute every `has_annotations` flag in `metadata`, which belongs to the
/// class `class_id`.
///
/// Returns the number of flags written. A class missing from the pool leaves
/// the metadata untouched.
pub fn fix_flags(pool: &ClassPool, class_id: ClassId, metadata: &KotlinMetadata) -> usize {
    let Some(class) = pool.class(class_id) else {
        warn!("Class {} not in pool, annotation flags left as decoded", class_id);
        return 0;
    };

    let ctx = MetadataContext::new(pool, class, metadata);
    let mut fixer = KotlinAnnotationFlagFixer::new();
    metadata.accept(&ctx, &mut fixer);

    debug!(
        "Fixed {} annotation flags in {} ({})",
        fixer.flags_written(),
        class.name,
        metadata.kind()
    );
    fixer.flags_written()
}

/// Run [`fix_flags`] over each `(class, metadata)` pair.
///
/// Returns the total number of flags written.
pub fn fix_all<'a>(
    pool: &ClassPool,
    entries: impl IntoIterator<Item = (ClassId, &'a KotlinMetadata)>,
) -> usize {
    entries
        .into_iter()
        .map(|(class_id, metadata)| fix_flags(pool, class_id, metadata))
        .sum()
}
