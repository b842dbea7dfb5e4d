//! Store error types
//!
//! Storage-level failures, kept separate from the lifecycle error taxonomy
//! so backends can report precisely what went wrong and the controller can
//! map each case to a caller-facing error.

use thiserror::Error;
use uuid::Uuid;

use campus_domain::ResourceKind;

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No resource exists at the id
    #[error("Resource not found: {0}")]
    ResourceNotFound(Uuid),

    /// No member exists at the id (or for the actor) on the resource
    #[error("Member not found: {0}")]
    MemberNotFound(Uuid),

    /// No message exists at the id on the resource
    #[error("Message not found: {0}")]
    MessageNotFound(Uuid),

    /// The actor already holds a membership on the resource
    #[error("Actor {user_id} is already a member of resource {resource_id}")]
    DuplicateMember { resource_id: Uuid, user_id: Uuid },

    /// The message has been redacted and can no longer change
    #[error("Message {0} has been deleted")]
    MessageDeleted(Uuid),

    /// The resource exists but is not of the expected kind
    #[error("Resource {resource_id} is not a {}", expected.as_str())]
    KindMismatch {
        resource_id: Uuid,
        expected: ResourceKind,
    },

    /// A withdrawal would push the balance below zero
    #[error("Insufficient funds in resource {resource_id}: balance is {balance_cents} cents")]
    InsufficientFunds {
        resource_id: Uuid,
        balance_cents: i64,
    },

    /// A balance adjustment would exceed the representable range
    #[error("Balance adjustment for resource {resource_id} would overflow")]
    BalanceOverflow { resource_id: Uuid },

    /// Backend failure unrelated to the domain
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::now_v7();
        assert!(StoreError::ResourceNotFound(id).to_string().contains(&id.to_string()));

        let err = StoreError::KindMismatch {
            resource_id: id,
            expected: ResourceKind::TrustFund,
        };
        assert!(err.to_string().contains("trust_fund"));

        let err = StoreError::InsufficientFunds {
            resource_id: id,
            balance_cents: 250,
        };
        assert!(err.to_string().contains("250"));
    }
}
