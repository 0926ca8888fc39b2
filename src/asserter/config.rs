//! Asserter configuration: which constraints run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::visitor::NodeKind;

/// Environment variable overriding the constraint list, comma-separated.
pub const CONSTRAINTS_ENV_VAR: &str = "KMETA_CONSTRAINTS";

/// Errors loading an asserter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for [`AsserterConfig`].
    #[error("invalid asserter config: {0}")]
    Json(#[from] serde_json::Error),

    /// A constraint name that no constraint answers to.
    #[error("unknown constraint: {name}")]
    UnknownConstraint { name: String },
}

// ============================================================================
// Constraint kinds
// ============================================================================

/// A selectable integrity constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    DeclarationContainerIntegrity,
    ClassIntegrity,
    FunctionIntegrity,
    ConstructorIntegrity,
    PropertyIntegrity,
    TypeIntegrity,
    MultiFileFacadeIntegrity,
    MultiFilePartIntegrity,
    AnnotationIntegrity,
}

impl ConstraintKind {
    /// Every constraint, in execution order.
    pub const ALL: [ConstraintKind; 9] = [
        ConstraintKind::DeclarationContainerIntegrity,
        ConstraintKind::ClassIntegrity,
        ConstraintKind::FunctionIntegrity,
        ConstraintKind::ConstructorIntegrity,
        ConstraintKind::PropertyIntegrity,
        ConstraintKind::TypeIntegrity,
        ConstraintKind::MultiFileFacadeIntegrity,
        ConstraintKind::MultiFilePartIntegrity,
        ConstraintKind::AnnotationIntegrity,
    ];

    /// Returns the string representation used in output and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::DeclarationContainerIntegrity => "declaration_container_integrity",
            ConstraintKind::ClassIntegrity => "class_integrity",
            ConstraintKind::FunctionIntegrity => "function_integrity",
            ConstraintKind::ConstructorIntegrity => "constructor_integrity",
            ConstraintKind::PropertyIntegrity => "property_integrity",
            ConstraintKind::TypeIntegrity => "type_integrity",
            ConstraintKind::MultiFileFacadeIntegrity => "multi_file_facade_integrity",
            ConstraintKind::MultiFilePartIntegrity => "multi_file_part_integrity",
            ConstraintKind::AnnotationIntegrity => "annotation_integrity",
        }
    }

    /// Node kinds the constraint inspects. Dispatches of other kinds never
    /// reach it.
    pub fn interests(&self) -> &'static [NodeKind] {
        match self {
            ConstraintKind::DeclarationContainerIntegrity => &[
                NodeKind::Class,
                NodeKind::FileFacade,
                NodeKind::MultiFilePart,
            ],
            ConstraintKind::ClassIntegrity => &[NodeKind::Class],
            ConstraintKind::FunctionIntegrity => &[NodeKind::Function],
            ConstraintKind::ConstructorIntegrity => &[NodeKind::Constructor],
            ConstraintKind::PropertyIntegrity => &[NodeKind::Property],
            ConstraintKind::TypeIntegrity => &[NodeKind::Type],
            ConstraintKind::MultiFileFacadeIntegrity => &[NodeKind::MultiFileFacade],
            ConstraintKind::MultiFilePartIntegrity => &[NodeKind::MultiFilePart],
            ConstraintKind::AnnotationIntegrity => &[NodeKind::Annotation],
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConstraintKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownConstraint {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Where the active constraint list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ConfigSource {
    /// Built-in default: every constraint.
    #[default]
    Default = 0,
    /// Loaded from a JSON document.
    Json = 1,
    /// From `KMETA_CONSTRAINTS` (highest precedence).
    EnvVar = 2,
}

/// Selects the constraints an asserter runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsserterConfig {
    /// Constraints to run. Duplicates run once.
    pub constraints: Vec<ConstraintKind>,
    #[serde(skip)]
    pub source: ConfigSource,
}

impl Default for AsserterConfig {
    fn default() -> Self {
        AsserterConfig {
            constraints: ConstraintKind::ALL.to_vec(),
            source: ConfigSource::Default,
        }
    }
}

impl AsserterConfig {
    /// A configuration running only the given constraints.
    pub fn only(constraints: impl IntoIterator<Item = ConstraintKind>) -> Self {
        AsserterConfig {
            constraints: constraints.into_iter().collect(),
            source: ConfigSource::Default,
        }
    }

    /// Load from JSON, e.g. `{"constraints": ["class_integrity"]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: AsserterConfig = serde_json::from_str(json)?;
        config.source = ConfigSource::Json;
        Ok(config)
    }

    /// Resolve the effective configuration: `base` (or the default), then
    /// `KMETA_CONSTRAINTS` if set.
    pub fn resolve(base: Option<AsserterConfig>) -> Result<Self, ConfigError> {
        let mut config = base.unwrap_or_default();
        if let Ok(list) = std::env::var(CONSTRAINTS_ENV_VAR) {
            config.apply_constraint_list(&list)?;
        }
        Ok(config)
    }

    /// Replace the constraints with a comma-separated list of names. Blank
    /// entries are ignored.
    pub fn apply_constraint_list(&mut self, list: &str) -> Result<(), ConfigError> {
        let constraints = list
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(ConstraintKind::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        self.constraints = constraints;
        self.source = ConfigSource::EnvVar;
        Ok(())
    }

    /// Returns true if `kind` is enabled.
    pub fn is_enabled(&self, kind: ConstraintKind) -> bool {
        self.constraints.contains(&kind)
    }
}
