//! Membership model
//!
//! Links an actor to a roster-bearing resource with exactly one role.
//! Uniqueness of the (resource, user) pair is enforced by the storage
//! layer, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// A membership row on a resource roster.
///
/// Every roster-bearing resource has exactly one `Creator` member, created
/// atomically with the resource itself. All later joins and invites produce
/// non-creator members.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_domain::{Member, Role};
///
/// let resource_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let member = Member::new(resource_id, user_id, Role::Participant)
///     .with_display_name("Priya N.");
///
/// assert_eq!(member.role, Role::Participant);
/// assert_eq!(member.display_name.as_deref(), Some("Priya N."));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier for the membership
    pub id: Uuid,

    /// Resource this membership belongs to
    pub resource_id: Uuid,

    /// Actor who holds the membership
    pub user_id: Uuid,

    /// Role within the resource
    pub role: Role,

    /// Display name snapshot taken when the member joined
    pub display_name: Option<String>,

    /// When the member joined
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// Creates a new membership.
    ///
    /// # Arguments
    ///
    /// * `resource_id` - Resource being joined
    /// * `user_id` - Actor joining
    /// * `role` - Role to hold
    pub fn new(resource_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            resource_id,
            user_id,
            role,
            display_name: None,
            joined_at: Utc::now(),
        }
    }

    /// Set the display name snapshot.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Check if this member holds the `Creator` role.
    pub fn is_creator(&self) -> bool {
        self.role.is_creator()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_creation() {
        let resource_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let member = Member::new(resource_id, user_id, Role::Tutor);

        assert_eq!(member.resource_id, resource_id);
        assert_eq!(member.user_id, user_id);
        assert_eq!(member.role, Role::Tutor);
        assert!(member.display_name.is_none());
        assert!(!member.is_creator());
    }

    #[test]
    fn test_creator_flag() {
        let member = Member::new(Uuid::now_v7(), Uuid::now_v7(), Role::Creator);
        assert!(member.is_creator());
    }

    #[test]
    fn test_display_name_builder() {
        let member =
            Member::new(Uuid::now_v7(), Uuid::now_v7(), Role::Participant).with_display_name("Ada");
        assert_eq!(member.display_name.as_deref(), Some("Ada"));
    }
}
