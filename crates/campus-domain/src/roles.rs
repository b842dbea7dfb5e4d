//! Per-kind member roles
//!
//! This module defines the role held by a roster member, along with which
//! roles a promote/demote transition may assign for each resource kind.

use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

/// Role held by a member within a resource roster.
///
/// Roles are hierarchical: `Participant < Tutor < Creator`. The role a
/// member may hold depends on the resource kind. Channels use all three,
/// study groups only `Participant` and `Creator`, and content resources and
/// trust funds carry no roster at all (their creator acts by actor id).
///
/// `Creator` is special: exactly one member holds it per resource, it is
/// assigned atomically with resource creation, and no promote/demote
/// transition may assign or revoke it.
///
/// # Examples
///
/// ```
/// use campus_domain::{ResourceKind, Role};
///
/// assert!(Role::Creator > Role::Tutor);
/// assert!(Role::Tutor > Role::Participant);
///
/// // Tutor is only assignable on channels.
/// assert!(Role::assignable_in(ResourceKind::Channel).contains(&Role::Tutor));
/// assert!(!Role::assignable_in(ResourceKind::StudyGroup).contains(&Role::Tutor));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Baseline, non-privileged membership
    Participant = 0,

    /// Posting-eligible channel member
    Tutor = 1,

    /// The member created with the resource; full control over it
    Creator = 2,
}

impl Role {
    /// Check if this role is the creator role.
    ///
    /// # Returns
    ///
    /// `true` only for `Creator`
    pub fn is_creator(&self) -> bool {
        matches!(self, Role::Creator)
    }

    /// Check if this role carries any privilege beyond baseline membership.
    ///
    /// # Returns
    ///
    /// `true` for `Tutor` and `Creator`
    pub fn is_privileged(&self) -> bool {
        *self > Role::Participant
    }

    /// Roles a promote/demote transition may assign for a resource kind.
    ///
    /// `Creator` never appears here: it is only ever assigned together with
    /// the resource itself. Kinds without a roster return an empty slice.
    ///
    /// # Arguments
    ///
    /// * `kind` - The resource kind being mutated
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_domain::{ResourceKind, Role};
    ///
    /// assert_eq!(
    ///     Role::assignable_in(ResourceKind::Channel),
    ///     &[Role::Participant, Role::Tutor]
    /// );
    /// assert!(Role::assignable_in(ResourceKind::TrustFund).is_empty());
    /// ```
    pub fn assignable_in(kind: ResourceKind) -> &'static [Role] {
        match kind {
            ResourceKind::Channel => &[Role::Participant, Role::Tutor],
            ResourceKind::StudyGroup => &[Role::Participant],
            ResourceKind::ContentResource | ResourceKind::TrustFund => &[],
        }
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_domain::Role;
    ///
    /// assert_eq!(Role::parse("tutor"), Some(Role::Tutor));
    /// assert_eq!(Role::parse("CREATOR"), Some(Role::Creator));
    /// assert_eq!(Role::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "participant" | "member" => Some(Self::Participant),
            "tutor" => Some(Self::Tutor),
            "creator" => Some(Self::Creator),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Returns
    ///
    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Tutor => "tutor",
            Self::Creator => "creator",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_domain::Role;
    ///
    /// assert_eq!(Role::Tutor.display_name(), "Tutor");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Participant => "Participant",
            Self::Tutor => "Tutor",
            Self::Creator => "Creator",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Participant
    }
}
