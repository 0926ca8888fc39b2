//! Integrity violations and the sinks that receive them.

use std::fmt;
use std::sync::mpsc::Sender;

use kmeta_classfile::ClassId;
use serde::Serialize;
use tracing::warn;

use crate::metadata::MetadataKind;

// ============================================================================
// Violations
// ============================================================================

/// What went wrong with a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A name is present but its resolved reference is absent.
    MissingReference,
    /// A stored member reference is not among the members of its claimed owner.
    InvalidReference,
}

impl ViolationKind {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingReference => "missing_reference",
            ViolationKind::InvalidReference => "invalid_reference",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One integrity violation found in a metadata graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Description of the node holding the reference, e.g. `function run`.
    pub parent_element: String,
    /// Name of the reference that failed, e.g. `referenced method`.
    pub checked_element: String,
    /// Class whose metadata contains the node.
    pub class_id: ClassId,
    pub class_name: String,
    pub metadata_kind: MetadataKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::MissingReference => write!(
                f,
                "{} {} ({}): {} is not initialized",
                self.metadata_kind, self.class_name, self.parent_element, self.checked_element
            ),
            ViolationKind::InvalidReference => write!(
                f,
                "{} {} ({}): {} is invalid",
                self.metadata_kind, self.class_name, self.parent_element, self.checked_element
            ),
        }
    }
}

// ============================================================================
// Reporters
// ============================================================================

/// A sink for violations. Whether to collect, log or abort is up to the
/// implementation.
pub trait Reporter {
    fn report(&mut self, violation: Violation);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, violation: Violation) {
        (**self).report(violation);
    }
}

impl Reporter for Vec<Violation> {
    fn report(&mut self, violation: Violation) {
        self.push(violation);
    }
}

/// Forwards violations over a channel. A closed channel drops the violation
/// with a warning.
impl Reporter for Sender<Violation> {
    fn report(&mut self, violation: Violation) {
        if let Err(e) = self.send(violation) {
            warn!("Violation receiver hung up, dropping: {}", e.0);
        }
    }
}

/// Logs every violation as a `warn!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, violation: Violation) {
        warn!("{}", violation);
    }
}

/// Accumulated violations, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter()
    }

    /// Violations of one kind.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn missing_references(&self) -> impl Iterator<Item = &Violation> {
        self.of_kind(ViolationKind::MissingReference)
    }

    pub fn invalid_references(&self) -> impl Iterator<Item = &Violation> {
        self.of_kind(ViolationKind::InvalidReference)
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.violations
    }
}

impl Reporter for Violations {
    fn report(&mut self, violation: Violation) {
        self.violations.push(violation);
    }
}

/// Counts violations on their way to another reporter.
#[derive(Debug)]
pub(crate) struct CountingReporter<'a, R: ?Sized> {
    inner: &'a mut R,
    count: usize,
}

impl<'a, R: Reporter + ?Sized> CountingReporter<'a, R> {
    pub(crate) fn new(inner: &'a mut R) -> Self {
        CountingReporter { inner, count: 0 }
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }
}

impl<R: Reporter + ?Sized> Reporter for CountingReporter<'_, R> {
    fn report(&mut self, violation: Violation) {
        self.count += 1;
        self.inner.report(violation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn violation(kind: ViolationKind) -> Violation {
        Violation {
            kind,
            parent_element: "function run".to_string(),
            checked_element: "referenced method".to_string(),
            class_id: ClassId::new(3),
            class_name: "a/A".to_string(),
            metadata_kind: MetadataKind::Class,
        }
    }

    #[test]
    fn test_violation_display() {
        assert_eq!(
            violation(ViolationKind::MissingReference).to_string(),
            "class a/A (function run): referenced method is not initialized"
        );
        assert_eq!(
            violation(ViolationKind::InvalidReference).to_string(),
            "class a/A (function run): referenced method is invalid"
        );
    }

    #[test]
    fn test_violation_serializes_snake_case() {
        let json = serde_json::to_value(violation(ViolationKind::InvalidReference)).unwrap();
        assert_eq!(json["kind"], "invalid_reference");
        assert_eq!(json["metadata_kind"], "class");
        assert_eq!(json["class_name"], "a/A");
    }

    #[test]
    fn test_violations_filter_by_kind() {
        let mut violations = Violations::new();
        violations.report(violation(ViolationKind::MissingReference));
        violations.report(violation(ViolationKind::InvalidReference));
        violations.report(violation(ViolationKind::InvalidReference));

        assert_eq!(violations.len(), 3);
        assert_eq!(violations.missing_references().count(), 1);
        assert_eq!(violations.invalid_references().count(), 2);
    }

    #[test]
    fn test_channel_reporter() {
        let (mut tx, rx) = mpsc::channel();
        tx.report(violation(ViolationKind::MissingReference));
        drop(tx);

        let received: Vec<Violation> = rx.iter().collect();
        assert_eq!(received, vec![violation(ViolationKind::MissingReference)]);
    }

    #[test]
    fn test_counting_reporter_forwards() {
        let mut sink: Vec<Violation> = Vec::new();
        let mut counting = CountingReporter::new(&mut sink);
        counting.report(violation(ViolationKind::MissingReference));
        counting.report(violation(ViolationKind::InvalidReference));
        assert_eq!(counting.count(), 2);
        assert_eq!(sink.len(), 2);
    }
}
