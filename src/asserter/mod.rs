//! Referential integrity checks over metadata graphs.
//!
//! The asserter runs a set of constraints over one class's metadata and sends
//! every violation to a [`Reporter`]. Violations are data, not errors; what to
//! do with them is up to the reporter.
//!
//! Two kinds of violation exist:
//!
//! - **Missing reference**: a name is present but the link into the class pool
//!   was never resolved.
//! - **Invalid reference**: a stored member link no longer names one of the
//!   members of its claimed owner, e.g. because the member was replaced.
//!
//! ```ignore
//! use kmeta::asserter::{KotlinMetadataAsserter, Violations};
//!
//! let mut violations = Violations::new();
//! KotlinMetadataAsserter::new().execute(&pool, class_id, &metadata, &mut violations);
//! ```

mod config;
pub mod constraint;
mod util;
mod violation;

use kmeta_classfile::{ClassId, ClassPool};
use tracing::{debug, warn};

use crate::metadata::KotlinMetadata;
use crate::visitor::MetadataContext;

pub use config::{AsserterConfig, ConfigError, ConfigSource, ConstraintKind, CONSTRAINTS_ENV_VAR};
pub use constraint::run_constraint;
pub use util::AssertUtil;
pub use violation::{Reporter, TracingReporter, Violation, ViolationKind, Violations};

use violation::CountingReporter;

/// Runs the configured constraints over metadata graphs.
#[derive(Debug, Clone, Default)]
pub struct KotlinMetadataAsserter {
    config: AsserterConfig,
}

impl KotlinMetadataAsserter {
    /// An asserter running every constraint.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AsserterConfig) -> Self {
        KotlinMetadataAsserter { config }
    }

    pub fn config(&self) -> &AsserterConfig {
        &self.config
    }

    /// Check `metadata`, which belongs to the class `class_id`.
    ///
    /// Enabled constraints run in [`ConstraintKind::ALL`] order. Returns the
    /// number of violations reported. A class missing from the pool is
    /// skipped with a warning.
    pub fn execute<R: Reporter + ?Sized>(
        &self,
        pool: &ClassPool,
        class_id: ClassId,
        metadata: &KotlinMetadata,
        reporter: &mut R,
    ) -> usize {
        let Some(class) = pool.class(class_id) else {
            warn!("Class {} not in pool, metadata not checked", class_id);
            return 0;
        };

        let ctx = MetadataContext::new(pool, class, metadata);
        let mut counting = CountingReporter::new(reporter);
        for kind in ConstraintKind::ALL {
            if self.config.is_enabled(kind) {
                run_constraint(kind, &ctx, &mut counting);
            }
        }

        debug!(
            "Found {} violations in {} ({})",
            counting.count(),
            class.name,
            metadata.kind()
        );
        counting.count()
    }

    /// Run [`execute`](Self::execute) over each `(class, metadata)` pair.
    pub fn execute_all<'a, R: Reporter + ?Sized>(
        &self,
        pool: &ClassPool,
        entries: impl IntoIterator<Item = (ClassId, &'a KotlinMetadata)>,
        reporter: &mut R,
    ) -> usize {
        entries
            .into_iter()
            .map(|(class_id, metadata)| self.execute(pool, class_id, metadata, &mut *reporter))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{DeclarationContainer, FileFacadeMetadata, FunctionMetadata, JvmMethodSignature};

    fn facade_with_unresolved_function(pool: &mut ClassPool) -> (ClassId, KotlinMetadata) {
        let id = pool.add_program_class("a/AKt").unwrap();
        let metadata = KotlinMetadata::FileFacade(FileFacadeMetadata {
            container: DeclarationContainer {
                owner_class_name: Some("a/AKt".to_string()),
                functions: vec![FunctionMetadata {
                    name: "run".to_string(),
                    jvm_signature: Some(JvmMethodSignature::new("run", "()V")),
                    ..Default::default()
                }],
                ..Default::default()
            },
        });
        (id, metadata)
    }

    #[test]
    fn test_execute_runs_all_constraints() {
        let mut pool = ClassPool::new();
        let (id, metadata) = facade_with_unresolved_function(&mut pool);

        let mut violations = Violations::new();
        let count = KotlinMetadataAsserter::new().execute(&pool, id, &metadata, &mut violations);

        assert_eq!(count, 2);
        let checked: Vec<&str> = violations.iter().map(|v| v.parent_element.as_str()).collect();
        assert_eq!(checked, vec!["declaration container", "function run"]);
    }

    #[test]
    fn test_execute_honors_config() {
        let mut pool = ClassPool::new();
        let (id, metadata) = facade_with_unresolved_function(&mut pool);

        let asserter =
            KotlinMetadataAsserter::with_config(AsserterConfig::only([ConstraintKind::FunctionIntegrity]));
        let mut violations: Vec<Violation> = Vec::new();
        let count = asserter.execute(&pool, id, &metadata, &mut violations);

        assert_eq!(count, 1);
        assert_eq!(violations[0].parent_element, "function run");
    }

    #[test]
    fn test_execute_missing_class() {
        let pool = ClassPool::new();
        let metadata = KotlinMetadata::FileFacade(FileFacadeMetadata::default());
        let mut violations: Vec<Violation> = Vec::new();

        let count = KotlinMetadataAsserter::new().execute(&pool, ClassId::new(7), &metadata, &mut violations);

        assert_eq!(count, 0);
        assert!(violations.is_empty());
    }
}
