//! # Actions
//!
//! Defines all actions that can be attempted on group resources.
//! Actions are the unit the capability tables grant and the resolver checks.

use serde::{Deserialize, Serialize};

/// Actions that can be attempted on a group resource.
///
/// Actions fall into three families:
/// - **Resource**: UpdateResource, DeleteResource
/// - **Roster**: AddMember, PromoteMember, RemoveMember
/// - **Content**: PostMessage, UpdateMessage, DeleteMessage, Withdraw
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Update resource attributes.
    ///
    /// Covers name, description, and subject tags. Balances are excluded.
    UpdateResource,

    /// Delete the resource.
    ///
    /// Deletion cascades to the roster and the resource's messages.
    DeleteResource,

    /// Add another actor to the roster.
    ///
    /// Distinct from joining, which an actor does for themselves.
    AddMember,

    /// Change another member's role.
    ///
    /// Covers both promotion and demotion between assignable roles.
    PromoteMember,

    /// Remove another member from the roster.
    RemoveMember,

    /// Post a message in the resource.
    PostMessage,

    /// Edit a message body.
    UpdateMessage,

    /// Redact a message.
    DeleteMessage,

    /// Withdraw from a trust-fund balance.
    Withdraw,
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// # Returns
    ///
    /// A static string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::UpdateResource => "update_resource",
            Action::DeleteResource => "delete_resource",
            Action::AddMember => "add_member",
            Action::PromoteMember => "promote_member",
            Action::RemoveMember => "remove_member",
            Action::PostMessage => "post_message",
            Action::UpdateMessage => "update_message",
            Action::DeleteMessage => "delete_message",
            Action::Withdraw => "withdraw",
        }
    }

    /// Parse action from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Returns
    ///
    /// `Some(Action)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use campus_access::actions::Action;
    ///
    /// assert_eq!(Action::parse("post_message"), Some(Action::PostMessage));
    /// assert_eq!(Action::parse("post"), Some(Action::PostMessage)); // Alias
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "update_resource" | "update-resource" | "update" => Some(Action::UpdateResource),
            "delete_resource" | "delete-resource" | "delete" => Some(Action::DeleteResource),
            "add_member" | "add-member" | "invite" => Some(Action::AddMember),
            "promote_member" | "promote-member" | "promote" | "assign_role" => {
                Some(Action::PromoteMember)
            }
            "remove_member" | "remove-member" | "kick" => Some(Action::RemoveMember),
            "post_message" | "post-message" | "post" | "send" => Some(Action::PostMessage),
            "update_message" | "update-message" | "edit" => Some(Action::UpdateMessage),
            "delete_message" | "delete-message" | "redact" => Some(Action::DeleteMessage),
            "withdraw" => Some(Action::Withdraw),
            _ => None,
        }
    }

    /// Get all actions.
    ///
    /// # Returns
    ///
    /// A vector containing all available actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::UpdateResource,
            Action::DeleteResource,
            Action::AddMember,
            Action::PromoteMember,
            Action::RemoveMember,
            Action::PostMessage,
            Action::UpdateMessage,
            Action::DeleteMessage,
            Action::Withdraw,
        ]
    }

    /// Check if this action targets the roster.
    ///
    /// # Returns
    ///
    /// `true` for AddMember, PromoteMember, and RemoveMember
    pub fn is_roster_action(&self) -> bool {
        matches!(
            self,
            Action::AddMember | Action::PromoteMember | Action::RemoveMember
        )
    }

    /// Check if this action targets a message.
    ///
    /// Message actions are the only ones where an `Own` scope is meaningful
    /// for non-creator roles.
    ///
    /// # Returns
    ///
    /// `true` for PostMessage, UpdateMessage, and DeleteMessage
    pub fn is_message_action(&self) -> bool {
        matches!(
            self,
            Action::PostMessage | Action::UpdateMessage | Action::DeleteMessage
        )
    }

    /// Check if this is a destructive action.
    ///
    /// Destructive actions permanently remove data or funds.
    ///
    /// # Returns
    ///
    /// `true` if the action is destructive, `false` otherwise
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Action::DeleteResource | Action::DeleteMessage | Action::Withdraw
        )
    }
}
