//! # Resolver
//!
//! The pure decision function over the grant tables. Callers load whatever
//! membership and resource state the decision needs and pass it in; the
//! resolver reads, never writes, and never errors.

use uuid::Uuid;

use campus_domain::{Member, Message, Resource};

use crate::actions::Action;
use crate::grants::{creator_grants, role_grants};

/// The acting side of a decision: an authenticated actor plus their
/// membership on the subject resource, if any.
///
/// Rosterless kinds and non-members pass `None` for the membership.
#[derive(Debug, Clone, Copy)]
pub struct ActorContext<'a> {
    /// The authenticated actor's id.
    pub actor_id: Uuid,
    /// The actor's membership on the subject resource, if any.
    pub membership: Option<&'a Member>,
}

impl<'a> ActorContext<'a> {
    /// Create an actor context.
    ///
    /// # Arguments
    ///
    /// * `actor_id` - The authenticated actor
    /// * `membership` - Their membership on the subject resource, if any
    pub fn new(actor_id: Uuid, membership: Option<&'a Member>) -> Self {
        Self {
            actor_id,
            membership,
        }
    }
}

/// The subject side of a decision: the resource acted on, plus the owning
/// member id when the target is an owned instance (a message, or another
/// member's roster entry).
#[derive(Debug, Clone, Copy)]
pub struct Subject<'a> {
    /// The resource the action runs against.
    pub resource: &'a Resource,
    /// The member owning the target instance, when there is one.
    pub owner_member_id: Option<Uuid>,
}

impl<'a> Subject<'a> {
    /// Subject for an action on the resource itself.
    pub fn resource(resource: &'a Resource) -> Self {
        Self {
            resource,
            owner_member_id: None,
        }
    }

    /// Subject for an action on a message within the resource.
    ///
    /// The message's sender becomes the owner, which `Own`-scoped grants
    /// compare against.
    pub fn message(resource: &'a Resource, message: &Message) -> Self {
        Self {
            resource,
            owner_member_id: Some(message.sender_member_id),
        }
    }

    /// Subject for an action targeting another member's roster entry.
    pub fn member(resource: &'a Resource, target: &Member) -> Self {
        Self {
            resource,
            owner_member_id: Some(target.id),
        }
    }
}

/// Decide whether the actor may perform the action on the subject.
///
/// Evaluation order:
/// 1. If the actor created a rosterless resource, allow the actions that
///    kind grants its creator directly.
/// 2. Otherwise the actor must hold a membership on this exact resource;
///    without one, deny.
/// 3. Scan the kind's grant table for the member's role. `Any` scope
///    allows outright; `Own` scope allows only when the subject's owner
///    is the acting member.
/// 4. Nothing matched: deny.
///
/// The function is fail-closed and side-effect-free. It never consults
/// storage, so the caller decides how fresh the inputs are.
///
/// # Arguments
///
/// * `ctx` - The acting actor and their membership, if any
/// * `action` - The attempted action
/// * `subject` - The resource and, for owned targets, the owning member
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use campus_domain::{Member, Resource, ResourceAttrs, Role};
/// use campus_access::{decide, Action, ActorContext, Subject};
///
/// let creator_id = Uuid::now_v7();
/// let group = Resource::new(ResourceAttrs::study_group("exam prep"), creator_id);
/// let participant = Member::new(group.id, Uuid::now_v7(), Role::Participant);
///
/// let ctx = ActorContext::new(participant.user_id, Some(&participant));
/// assert!(decide(&ctx, Action::PostMessage, &Subject::resource(&group)));
/// assert!(!decide(&ctx, Action::DeleteResource, &Subject::resource(&group)));
/// ```
pub fn decide(ctx: &ActorContext<'_>, action: Action, subject: &Subject<'_>) -> bool {
    let kind = subject.resource.kind();

    // Rosterless kinds grant their creator directly by actor id.
    if ctx.actor_id == subject.resource.created_by && creator_grants(kind).contains(&action) {
        return true;
    }

    let Some(member) = ctx.membership else {
        return false;
    };

    // The membership must actually bind this actor to this resource.
    if member.resource_id != subject.resource.id || member.user_id != ctx.actor_id {
        return false;
    }

    let is_own = subject.owner_member_id == Some(member.id);
    role_grants(kind)
        .iter()
        .any(|cap| cap.allows(member.role, action, is_own))
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_domain::{ResourceAttrs, Role};

    fn channel_with_creator() -> (Resource, Member) {
        let creator_id = Uuid::now_v7();
        let channel = Resource::new(ResourceAttrs::channel("algebra-help"), creator_id);
        let creator = Member::new(channel.id, creator_id, Role::Creator);
        (channel, creator)
    }

    #[test]
    fn test_creator_can_manage_channel() {
        let (channel, creator) = channel_with_creator();
        let ctx = ActorContext::new(creator.user_id, Some(&creator));

        assert!(decide(&ctx, Action::UpdateResource, &Subject::resource(&channel)));
        assert!(decide(&ctx, Action::DeleteResource, &Subject::resource(&channel)));
        assert!(decide(&ctx, Action::RemoveMember, &Subject::resource(&channel)));
    }

    #[test]
    fn test_non_member_denied() {
        let (channel, _) = channel_with_creator();
        let stranger = ActorContext::new(Uuid::now_v7(), None);

        assert!(!decide(&stranger, Action::PostMessage, &Subject::resource(&channel)));
        assert!(!decide(&stranger, Action::DeleteResource, &Subject::resource(&channel)));
    }

    #[test]
    fn test_channel_participant_cannot_post() {
        let (channel, _) = channel_with_creator();
        let participant = Member::new(channel.id, Uuid::now_v7(), Role::Participant);
        let ctx = ActorContext::new(participant.user_id, Some(&participant));

        assert!(!decide(&ctx, Action::PostMessage, &Subject::resource(&channel)));
    }

    #[test]
    fn test_tutor_owns_their_messages() {
        let (channel, _) = channel_with_creator();
        let tutor = Member::new(channel.id, Uuid::now_v7(), Role::Tutor);
        let own = Message::new(channel.id, tutor.id, "office hours at 4", vec![]);
        let other = Message::new(channel.id, Uuid::now_v7(), "not yours", vec![]);
        let ctx = ActorContext::new(tutor.user_id, Some(&tutor));

        assert!(decide(&ctx, Action::PostMessage, &Subject::resource(&channel)));
        assert!(decide(&ctx, Action::UpdateMessage, &Subject::message(&channel, &own)));
        assert!(decide(&ctx, Action::DeleteMessage, &Subject::message(&channel, &own)));
        assert!(!decide(&ctx, Action::UpdateMessage, &Subject::message(&channel, &other)));
        assert!(!decide(&ctx, Action::DeleteMessage, &Subject::message(&channel, &other)));
    }

    #[test]
    fn test_channel_creator_moderates_any_message() {
        let (channel, creator) = channel_with_creator();
        let tutor = Member::new(channel.id, Uuid::now_v7(), Role::Tutor);
        let theirs = Message::new(channel.id, tutor.id, "typo in problem set", vec![]);
        let ctx = ActorContext::new(creator.user_id, Some(&creator));

        assert!(decide(&ctx, Action::UpdateMessage, &Subject::message(&channel, &theirs)));
        assert!(decide(&ctx, Action::DeleteMessage, &Subject::message(&channel, &theirs)));
    }

    #[test]
    fn test_study_group_member_posts_but_cannot_moderate() {
        let creator_id = Uuid::now_v7();
        let group = Resource::new(ResourceAttrs::study_group("exam prep"), creator_id);
        let a = Member::new(group.id, Uuid::now_v7(), Role::Participant);
        let b = Member::new(group.id, Uuid::now_v7(), Role::Participant);
        let b_message = Message::new(group.id, b.id, "meet tomorrow?", vec![]);
        let ctx = ActorContext::new(a.user_id, Some(&a));

        assert!(decide(&ctx, Action::PostMessage, &Subject::resource(&group)));
        assert!(!decide(&ctx, Action::UpdateMessage, &Subject::message(&group, &b_message)));
        assert!(!decide(&ctx, Action::RemoveMember, &Subject::member(&group, &b)));
    }

    #[test]
    fn test_content_resource_creator_by_actor_id() {
        let creator_id = Uuid::now_v7();
        let notes = Resource::new(ResourceAttrs::content_resource("Calc Notes"), creator_id);

        let creator_ctx = ActorContext::new(creator_id, None);
        assert!(decide(&creator_ctx, Action::UpdateResource, &Subject::resource(&notes)));
        assert!(decide(&creator_ctx, Action::DeleteResource, &Subject::resource(&notes)));

        let other_ctx = ActorContext::new(Uuid::now_v7(), None);
        assert!(!decide(&other_ctx, Action::UpdateResource, &Subject::resource(&notes)));
        assert!(!decide(&other_ctx, Action::DeleteResource, &Subject::resource(&notes)));
    }

    #[test]
    fn test_trust_fund_withdraw_gated_to_creator() {
        let creator_id = Uuid::now_v7();
        let fund = Resource::new(
            ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(50_000),
            creator_id,
        );

        let creator_ctx = ActorContext::new(creator_id, None);
        assert!(decide(&creator_ctx, Action::Withdraw, &Subject::resource(&fund)));

        let other_ctx = ActorContext::new(Uuid::now_v7(), None);
        assert!(!decide(&other_ctx, Action::Withdraw, &Subject::resource(&fund)));
    }

    #[test]
    fn test_membership_for_wrong_resource_denied() {
        let (channel, _) = channel_with_creator();
        let other_channel = Resource::new(ResourceAttrs::channel("other"), Uuid::now_v7());
        let tutor_elsewhere = Member::new(other_channel.id, Uuid::now_v7(), Role::Tutor);
        let ctx = ActorContext::new(tutor_elsewhere.user_id, Some(&tutor_elsewhere));

        assert!(!decide(&ctx, Action::PostMessage, &Subject::resource(&channel)));
    }

    #[test]
    fn test_unknown_combination_denied_by_default() {
        let (channel, creator) = channel_with_creator();
        let ctx = ActorContext::new(creator.user_id, Some(&creator));

        // Channels have no AddMember grant; joining is open instead.
        assert!(!decide(&ctx, Action::AddMember, &Subject::resource(&channel)));
        assert!(!decide(&ctx, Action::Withdraw, &Subject::resource(&channel)));
    }
}
