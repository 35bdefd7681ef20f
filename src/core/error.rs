//! Typed error handling
//!
//! Errors are split by the layer that detects them:
//!
//! - [`BoundaryError`]: an argument token could not be coerced before any lookup
//! - [`ValidationError`]: a write violated a column constraint
//! - [`StoreError`]: what a storage backend reports for a single call
//! - [`LiftError`]: what an operation reports to its caller
//!
//! Every operation-level error carries a stable code (see
//! [`LiftError::error_code`]) that the GraphQL exposure attaches to the error
//! entry, so clients can branch on the category without parsing messages.
//!
//! # Example
//!
//! ```rust,ignore
//! match resolvers::queries::get_user(&services, Some(42)).await {
//!     Ok(user) => println!("{}", user.username),
//!     Err(LiftError::NotFound(kind)) => println!("no such {}", kind),
//!     Err(e) => eprintln!("{} ({})", e, e.error_code()),
//! }
//! ```

use crate::core::entity::EntityKind;
use thiserror::Error;

/// The error type returned by every query and mutation
#[derive(Debug, Error)]
pub enum LiftError {
    /// A row looked up by primary key (or a required foreign key) is missing
    #[error("{0} matching query does not exist.")]
    NotFound(EntityKind),

    /// The write was rejected by a column constraint
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An argument token could not be coerced to its internal type
    #[error(transparent)]
    Boundary(#[from] BoundaryError),

    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LiftError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LiftError::NotFound(_) => "ENTITY_NOT_FOUND",
            LiftError::Validation(_) => "VALIDATION_ERROR",
            LiftError::Boundary(_) => "BAD_USER_INPUT",
            LiftError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<StoreError> for LiftError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Missing(kind) => LiftError::NotFound(kind),
            StoreError::Invalid(e) => LiftError::Validation(e),
            other => LiftError::Storage(other.to_string()),
        }
    }
}

// =============================================================================
// Store Errors
// =============================================================================

/// Errors reported by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed row, or a parent row referenced by the write, does not exist
    #[error("{0} matching query does not exist.")]
    Missing(EntityKind),

    /// The write violated a column constraint
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),

    /// Failure reported by the SQL driver
    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single rejected column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// Errors related to column constraints
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A unique column already holds this value
    #[error("{entity} with this {field} already exists.")]
    Duplicate {
        entity: EntityKind,
        field: &'static str,
    },

    /// One or more columns are out of range or malformed
    #[error("Invalid {entity}: {}", describe(.violations))]
    Fields {
        entity: EntityKind,
        violations: Vec<FieldViolation>,
    },
}

impl ValidationError {
    /// Shorthand for a single rejected column
    pub fn field(entity: EntityKind, field: &str, message: impl Into<String>) -> Self {
        ValidationError::Fields {
            entity,
            violations: vec![FieldViolation {
                field: field.to_string(),
                message: message.into(),
            }],
        }
    }

    /// Names of the rejected columns
    pub fn fields(&self) -> Vec<&str> {
        match self {
            ValidationError::Duplicate { field, .. } => vec![*field],
            ValidationError::Fields { violations, .. } => {
                violations.iter().map(|v| v.field.as_str()).collect()
            }
        }
    }
}

fn describe(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Boundary Errors
// =============================================================================

/// Errors raised while coercing argument tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// The token is not a decimal integer that fits a key
    #[error("Field '{argument}' expected a number but got '{value}'.")]
    NotAnInteger { argument: String, value: String },
}
