//! # Grant tables
//!
//! Static per-kind capability tables. Each resource kind maps roles to the
//! (action, scope) pairs they hold; the resolver evaluates these tables and
//! nothing else, so every decision is centrally auditable.

use campus_domain::{ResourceKind, Role};

use crate::actions::Action;
use crate::capability::{Capability, Scope};

/// Channel grants. Tutors write their own messages; participants read only.
const CHANNEL_GRANTS: &[Capability] = &[
    Capability::new(Role::Creator, Action::UpdateResource, Scope::Any),
    Capability::new(Role::Creator, Action::DeleteResource, Scope::Any),
    Capability::new(Role::Creator, Action::PromoteMember, Scope::Any),
    Capability::new(Role::Creator, Action::RemoveMember, Scope::Any),
    Capability::new(Role::Creator, Action::PostMessage, Scope::Any),
    Capability::new(Role::Creator, Action::UpdateMessage, Scope::Any),
    Capability::new(Role::Creator, Action::DeleteMessage, Scope::Any),
    Capability::new(Role::Tutor, Action::PostMessage, Scope::Any),
    Capability::new(Role::Tutor, Action::UpdateMessage, Scope::Own),
    Capability::new(Role::Tutor, Action::DeleteMessage, Scope::Own),
];

/// Study-group grants. Every member posts; the creator also manages the
/// roster by invitation.
const STUDY_GROUP_GRANTS: &[Capability] = &[
    Capability::new(Role::Creator, Action::UpdateResource, Scope::Any),
    Capability::new(Role::Creator, Action::DeleteResource, Scope::Any),
    Capability::new(Role::Creator, Action::AddMember, Scope::Any),
    Capability::new(Role::Creator, Action::RemoveMember, Scope::Any),
    Capability::new(Role::Creator, Action::PostMessage, Scope::Any),
    Capability::new(Role::Creator, Action::UpdateMessage, Scope::Any),
    Capability::new(Role::Creator, Action::DeleteMessage, Scope::Any),
    Capability::new(Role::Participant, Action::PostMessage, Scope::Any),
    Capability::new(Role::Participant, Action::UpdateMessage, Scope::Own),
    Capability::new(Role::Participant, Action::DeleteMessage, Scope::Own),
];

/// Actions the creating actor of a content resource holds by actor id.
const CONTENT_RESOURCE_CREATOR: &[Action] = &[Action::UpdateResource, Action::DeleteResource];

/// Actions the creating actor of a trust fund holds by actor id.
/// Deposits are open to any authenticated actor and are not listed here.
const TRUST_FUND_CREATOR: &[Action] = &[
    Action::UpdateResource,
    Action::DeleteResource,
    Action::Withdraw,
];

/// The capability table for a resource kind's roster roles.
///
/// Rosterless kinds have no role table; their creator grants come from
/// [`creator_grants`] instead.
///
/// # Arguments
///
/// * `kind` - The resource kind
///
/// # Returns
///
/// The static grant table for the kind, empty for rosterless kinds
///
/// # Example
///
/// ```
/// use campus_domain::{ResourceKind, Role};
/// use campus_access::{role_grants, Action};
///
/// let channel = role_grants(ResourceKind::Channel);
/// assert!(channel
///     .iter()
///     .any(|cap| cap.role == Role::Tutor && cap.action == Action::PostMessage));
/// assert!(role_grants(ResourceKind::TrustFund).is_empty());
/// ```
pub fn role_grants(kind: ResourceKind) -> &'static [Capability] {
    match kind {
        ResourceKind::Channel => CHANNEL_GRANTS,
        ResourceKind::StudyGroup => STUDY_GROUP_GRANTS,
        ResourceKind::ContentResource | ResourceKind::TrustFund => &[],
    }
}

/// Actions the creating actor holds directly on a rosterless resource.
///
/// Content resources and trust funds have no roster, so their creator acts
/// by actor id rather than through a `Creator` membership. Roster kinds
/// return an empty slice; their creators go through the role table.
///
/// # Arguments
///
/// * `kind` - The resource kind
pub fn creator_grants(kind: ResourceKind) -> &'static [Action] {
    match kind {
        ResourceKind::ContentResource => CONTENT_RESOURCE_CREATOR,
        ResourceKind::TrustFund => TRUST_FUND_CREATOR,
        ResourceKind::Channel | ResourceKind::StudyGroup => &[],
    }
}
