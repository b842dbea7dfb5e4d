//! # Capabilities
//!
//! Core capability types for the resolution system.
//! A capability combines a role, an action, and a scope.

use serde::{Deserialize, Serialize};

use campus_domain::Role;

use crate::actions::Action;

/// How far a granted action reaches inside a resource.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The action reaches every instance inside the resource.
    Any,
    /// The action reaches only instances owned by the acting member.
    Own,
}

impl Scope {
    /// Get the string representation of the scope.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Any => "any",
            Scope::Own => "own",
        }
    }

    /// Check whether this scope covers an instance.
    ///
    /// # Arguments
    ///
    /// * `is_own` - Whether the acting member owns the instance
    ///
    /// # Returns
    ///
    /// `true` if the scope reaches the instance
    pub fn covers(&self, is_own: bool) -> bool {
        match self {
            Scope::Any => true,
            Scope::Own => is_own,
        }
    }
}

/// A single grant: a role may take an action within a scope.
///
/// Capability tables are `const` data, so the constructor is `const` too.
///
/// # Example
///
/// ```
/// use campus_domain::Role;
/// use campus_access::{Action, Capability, Scope};
///
/// const EDIT_OWN: Capability = Capability::new(Role::Tutor, Action::UpdateMessage, Scope::Own);
/// assert_eq!(EDIT_OWN.role, Role::Tutor);
/// assert_eq!(EDIT_OWN.scope, Scope::Own);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Capability {
    /// The role holding the grant.
    pub role: Role,
    /// The action granted.
    pub action: Action,
    /// How far the grant reaches.
    pub scope: Scope,
}

impl Capability {
    /// Create a new capability.
    ///
    /// # Arguments
    ///
    /// * `role` - The role holding the grant
    /// * `action` - The action granted
    /// * `scope` - How far the grant reaches
    pub const fn new(role: Role, action: Action, scope: Scope) -> Self {
        Self { role, action, scope }
    }

    /// Check if this capability lets `role` perform `action` on an instance.
    ///
    /// # Arguments
    ///
    /// * `role` - The acting member's role
    /// * `action` - The attempted action
    /// * `is_own` - Whether the acting member owns the target instance
    pub fn allows(&self, role: Role, action: Action, is_own: bool) -> bool {
        self.role == role && self.action == action && self.scope.covers(is_own)
    }
}
