//! Error types for lifecycle operations
//!
//! This module defines the caller-facing error taxonomy. The lifecycle
//! controller is the only place these are produced; the HTTP layer maps
//! them to status codes via [`LifecycleError::status_code`].

use thiserror::Error;
use uuid::Uuid;

use campus_store::StoreError;

/// Lifecycle error types.
///
/// These errors cover every failure a lifecycle transition can surface,
/// from missing records to authorization denials and cascade failures.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Resource, member, or message does not exist at the referenced id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Actor lacks the capability for the requested action
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The operation would violate a uniqueness invariant
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The operation is structurally disallowed regardless of capability
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Malformed payload or identifier
    #[error("Validation error: {0}")]
    Validation(String),

    /// A delete cascade partially failed after the resource row was removed
    #[error("Cascade incomplete for resource {resource_id}: {detail}")]
    CascadeIncomplete { resource_id: Uuid, detail: String },

    /// Storage-layer failure distinct from the domain errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for lifecycle operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

impl LifecycleError {
    /// Check if this error should be logged at error level.
    ///
    /// Domain failures (denials, conflicts, missing records) are expected
    /// and should not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            LifecycleError::Internal(_) | LifecycleError::CascadeIncomplete { .. }
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            LifecycleError::NotFound(_) => 404,
            LifecycleError::PermissionDenied(_) => 403,
            LifecycleError::Conflict(_) => 409,
            LifecycleError::InvalidOperation(_) => 400,
            LifecycleError::Validation(_) => 400,
            LifecycleError::CascadeIncomplete { .. } => 500,
            LifecycleError::Internal(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            LifecycleError::NotFound(_) => "NOT_FOUND",
            LifecycleError::PermissionDenied(_) => "PERMISSION_DENIED",
            LifecycleError::Conflict(_) => "CONFLICT",
            LifecycleError::InvalidOperation(_) => "INVALID_OPERATION",
            LifecycleError::Validation(_) => "VALIDATION_ERROR",
            LifecycleError::CascadeIncomplete { .. } => "CASCADE_INCOMPLETE",
            LifecycleError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ResourceNotFound(_)
            | StoreError::MemberNotFound(_)
            | StoreError::MessageNotFound(_) => LifecycleError::NotFound(err.to_string()),
            StoreError::DuplicateMember { .. } => LifecycleError::Conflict(err.to_string()),
            StoreError::MessageDeleted(_)
            | StoreError::KindMismatch { .. }
            | StoreError::InsufficientFunds { .. }
            | StoreError::BalanceOverflow { .. } => {
                LifecycleError::InvalidOperation(err.to_string())
            }
            StoreError::Backend(_) => LifecycleError::Internal(err.to_string()),
        }
    }
}
