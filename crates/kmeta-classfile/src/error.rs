//! Error types for class pool edits.

use thiserror::Error;

use crate::class::{ClassId, MemberId};

/// Result type for class pool operations.
pub type ClassPoolResult<T> = Result<T, ClassPoolError>;

/// Errors that can occur while editing a [`ClassPool`](crate::ClassPool).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassPoolError {
    /// No class with this id is in the pool.
    #[error("class not found: {0}")]
    ClassNotFound(ClassId),

    /// A class with this name is already in the pool.
    #[error("duplicate class: {name}")]
    DuplicateClass { name: String },

    /// The class does not enumerate a member with this id.
    #[error("member {member} not found in {class}")]
    MemberNotFound { class: ClassId, member: MemberId },
}
