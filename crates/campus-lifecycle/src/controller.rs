//! Lifecycle controller
//!
//! Every externally triggered transition on a group resource runs through
//! here: load the state a decision needs, ask the capability resolver, and
//! if allowed, apply the mutation through the membership store. This is
//! the only component that writes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_access::{decide, Action, ActorContext, Subject};
use campus_domain::{
    Actor, Member, Message, Resource, ResourceAttrs, ResourcePatch, Role,
};
use campus_store::{
    MediaDirectory, MemberFilter, MembershipStore, MessageFilter, Page, PageResult,
    ResourceFilter, StoreError,
};

use crate::error::{LifecycleError, LifecycleResult};

/// What a resource-delete cascade removed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CascadeReport {
    /// The deleted resource
    pub resource_id: Uuid,
    /// Roster rows removed
    pub members_removed: usize,
    /// Message rows removed
    pub messages_removed: usize,
    /// Media blobs released
    pub media_released: usize,
}

/// Orchestrates lifecycle transitions over the store and media directory.
///
/// The controller holds no state of its own; it can be cloned freely and
/// shared across request handlers.
#[derive(Clone)]
pub struct Lifecycle {
    store: Arc<dyn MembershipStore>,
    media: Arc<dyn MediaDirectory>,
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lifecycle").finish()
    }
}

fn deny(action: Action) -> LifecycleError {
    LifecycleError::PermissionDenied(format!("not allowed to {}", action.as_str()))
}

fn require_text(field: &str, value: &str) -> LifecycleResult<()> {
    if value.trim().is_empty() {
        return Err(LifecycleError::Validation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}

fn require_positive(field: &str, cents: i64) -> LifecycleResult<()> {
    if cents <= 0 {
        return Err(LifecycleError::Validation(format!(
            "{field} must be a positive amount in cents"
        )));
    }
    Ok(())
}

fn require_non_negative(field: &str, cents: i64) -> LifecycleResult<()> {
    if cents < 0 {
        return Err(LifecycleError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

impl Lifecycle {
    /// Create a controller over a store and a media directory.
    pub fn new(store: Arc<dyn MembershipStore>, media: Arc<dyn MediaDirectory>) -> Self {
        Self { store, media }
    }

    /// The actor's membership on the resource, if any.
    ///
    /// Rosterless kinds always yield `None`; so does a missing roster
    /// entry. Only backend failures propagate.
    async fn load_membership(
        &self,
        resource: &Resource,
        actor_id: Uuid,
    ) -> LifecycleResult<Option<Member>> {
        if !resource.kind().has_roster() {
            return Ok(None);
        }
        match self.store.get_member(resource.id, actor_id).await {
            Ok(member) => Ok(Some(member)),
            Err(StoreError::MemberNotFound(_)) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    // ------------------------------------------------------------------
    // Resource transitions
    // ------------------------------------------------------------------

    /// Create a resource.
    ///
    /// Any authenticated actor may create; no capability check applies.
    /// The name must be non-blank, and a trust fund cannot open with a
    /// negative balance. Roster kinds come back with their `Creator`
    /// membership.
    pub async fn create_resource(
        &self,
        actor: &Actor,
        attrs: ResourceAttrs,
    ) -> LifecycleResult<(Resource, Option<Member>)> {
        require_text("name", attrs.name())?;
        if let Some(balance) = attrs.balance_cents() {
            require_non_negative("opening balance", balance)?;
        }

        let (resource, member) = self.store.create_resource(attrs, actor).await?;
        tracing::info!(
            resource_id = %resource.id,
            kind = resource.kind().as_str(),
            actor_id = %actor.id,
            "Resource created"
        );
        Ok((resource, member))
    }

    /// Fetch a resource. Reads are not gated by the resolver.
    pub async fn get_resource(&self, resource_id: Uuid) -> LifecycleResult<Resource> {
        Ok(self.store.get_resource(resource_id).await?)
    }

    /// List resources matching a filter.
    pub async fn list_resources(
        &self,
        filter: &ResourceFilter,
        page: Page,
    ) -> LifecycleResult<PageResult<Resource>> {
        Ok(self.store.list_resources(filter, page).await?)
    }

    /// Update a resource's attributes.
    pub async fn update_resource(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        patch: ResourcePatch,
    ) -> LifecycleResult<Resource> {
        if let Some(ref name) = patch.name {
            require_text("name", name)?;
        }

        let resource = self.store.get_resource(resource_id).await?;
        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::UpdateResource, &Subject::resource(&resource)) {
            return Err(deny(Action::UpdateResource));
        }

        Ok(self.store.update_resource(resource_id, patch).await?)
    }

    /// Delete a resource and cascade to its messages and roster.
    ///
    /// The resource row goes first; messages are purged next with their
    /// media released, then the roster. A failure after the resource row
    /// is gone surfaces as [`LifecycleError::CascadeIncomplete`] so the
    /// caller can retry the cleanup instead of mistaking it for success.
    pub async fn delete_resource(
        &self,
        actor: &Actor,
        resource_id: Uuid,
    ) -> LifecycleResult<CascadeReport> {
        let resource = self.store.get_resource(resource_id).await?;
        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::DeleteResource, &Subject::resource(&resource)) {
            return Err(deny(Action::DeleteResource));
        }

        self.store.delete_resource(resource_id).await?;

        let (messages_removed, media_ids) = match self.store.purge_messages(resource_id).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(
                    resource_id = %resource_id,
                    error = %err,
                    "Resource deleted but message purge failed"
                );
                return Err(LifecycleError::CascadeIncomplete {
                    resource_id,
                    detail: format!("message purge failed: {err}"),
                });
            }
        };

        let mut media_released = 0;
        for media_id in media_ids {
            match self.media.release_media(media_id).await {
                Ok(()) => media_released += 1,
                Err(err) => {
                    tracing::warn!(
                        resource_id = %resource_id,
                        media_id = %media_id,
                        error = %err,
                        "Failed to release media during cascade"
                    );
                }
            }
        }

        let members_removed = match self.store.purge_members(resource_id).await {
            Ok(count) => count,
            Err(err) => {
                tracing::error!(
                    resource_id = %resource_id,
                    error = %err,
                    "Resource deleted but roster purge failed"
                );
                return Err(LifecycleError::CascadeIncomplete {
                    resource_id,
                    detail: format!("roster purge failed: {err}"),
                });
            }
        };

        tracing::info!(
            resource_id = %resource_id,
            kind = resource.kind().as_str(),
            members_removed,
            messages_removed,
            "Resource deleted"
        );
        Ok(CascadeReport {
            resource_id,
            members_removed,
            messages_removed,
            media_released,
        })
    }

    // ------------------------------------------------------------------
    // Roster transitions
    // ------------------------------------------------------------------

    /// Join a resource as a participant.
    ///
    /// Joining is open to any authenticated actor; a duplicate join is a
    /// `Conflict`. Rosterless kinds cannot be joined.
    pub async fn join(&self, actor: &Actor, resource_id: Uuid) -> LifecycleResult<Member> {
        let resource = self.store.get_resource(resource_id).await?;
        if !resource.kind().has_roster() {
            return Err(LifecycleError::InvalidOperation(format!(
                "a {} has no roster to join",
                resource.kind().as_str()
            )));
        }

        let member = Member::new(resource_id, actor.id, Role::Participant)
            .with_display_name(actor.display_name.clone());
        let member = self.store.add_member(member).await?;
        tracing::debug!(
            resource_id = %resource_id,
            member_id = %member.id,
            actor_id = %actor.id,
            "Member joined"
        );
        Ok(member)
    }

    /// Add another actor to the roster.
    ///
    /// Gated by the `AddMember` capability; this is the invitation path
    /// study-group creators use, as opposed to open joining.
    pub async fn add_member(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        target: &Actor,
    ) -> LifecycleResult<Member> {
        let resource = self.store.get_resource(resource_id).await?;
        if !resource.kind().has_roster() {
            return Err(LifecycleError::InvalidOperation(format!(
                "a {} has no roster",
                resource.kind().as_str()
            )));
        }

        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::AddMember, &Subject::resource(&resource)) {
            return Err(deny(Action::AddMember));
        }

        let member = Member::new(resource_id, target.id, Role::Participant)
            .with_display_name(target.display_name.clone());
        let member = self.store.add_member(member).await?;
        tracing::debug!(
            resource_id = %resource_id,
            member_id = %member.id,
            actor_id = %actor.id,
            "Member added"
        );
        Ok(member)
    }

    /// Leave a resource voluntarily.
    ///
    /// The creator cannot leave; deleting the resource is their exit.
    pub async fn leave(&self, actor: &Actor, resource_id: Uuid) -> LifecycleResult<()> {
        let resource = self.store.get_resource(resource_id).await?;
        if !resource.kind().has_roster() {
            return Err(LifecycleError::InvalidOperation(format!(
                "a {} has no roster to leave",
                resource.kind().as_str()
            )));
        }

        let member = self.store.get_member(resource_id, actor.id).await?;
        if member.is_creator() {
            return Err(LifecycleError::InvalidOperation(
                "the creator cannot leave; delete the resource instead".into(),
            ));
        }

        self.store.remove_member(resource_id, member.id).await?;
        tracing::debug!(
            resource_id = %resource_id,
            member_id = %member.id,
            "Member left"
        );
        Ok(())
    }

    /// Change a member's role.
    async fn assign_role(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        member_id: Uuid,
        new_role: Role,
    ) -> LifecycleResult<Member> {
        if new_role.is_creator() {
            return Err(LifecycleError::InvalidOperation(
                "the creator role cannot be assigned".into(),
            ));
        }

        let resource = self.store.get_resource(resource_id).await?;
        let target = self.store.get_member_by_id(resource_id, member_id).await?;

        // Self-assignment is disallowed outright, whatever the tables say.
        if target.user_id == actor.id {
            return Err(LifecycleError::InvalidOperation(
                "members cannot change their own role".into(),
            ));
        }
        if target.is_creator() {
            return Err(LifecycleError::InvalidOperation(
                "the creator role cannot be revoked".into(),
            ));
        }
        if !Role::assignable_in(resource.kind()).contains(&new_role) {
            return Err(LifecycleError::InvalidOperation(format!(
                "role {} is not assignable in a {}",
                new_role.as_str(),
                resource.kind().as_str()
            )));
        }

        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::PromoteMember, &Subject::member(&resource, &target)) {
            return Err(deny(Action::PromoteMember));
        }

        let updated = self
            .store
            .update_member_role(resource_id, member_id, new_role)
            .await?;
        tracing::debug!(
            resource_id = %resource_id,
            member_id = %member_id,
            role = new_role.as_str(),
            "Member role changed"
        );
        Ok(updated)
    }

    /// Promote a member to a higher role.
    ///
    /// The `Creator` role is never assignable through this path.
    pub async fn promote(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        member_id: Uuid,
        role: Role,
    ) -> LifecycleResult<Member> {
        self.assign_role(actor, resource_id, member_id, role).await
    }

    /// Demote a member back to participant.
    pub async fn demote(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        member_id: Uuid,
    ) -> LifecycleResult<Member> {
        self.assign_role(actor, resource_id, member_id, Role::Participant)
            .await
    }

    /// Remove another member from the roster.
    ///
    /// Actors remove themselves through [`leave`](Self::leave); the
    /// creator cannot be removed at all.
    pub async fn remove_member(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        member_id: Uuid,
    ) -> LifecycleResult<()> {
        let resource = self.store.get_resource(resource_id).await?;
        let target = self.store.get_member_by_id(resource_id, member_id).await?;

        if target.user_id == actor.id {
            return Err(LifecycleError::InvalidOperation(
                "use leave to remove yourself".into(),
            ));
        }
        if target.is_creator() {
            return Err(LifecycleError::InvalidOperation(
                "the creator cannot be removed".into(),
            ));
        }

        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::RemoveMember, &Subject::member(&resource, &target)) {
            return Err(deny(Action::RemoveMember));
        }

        self.store.remove_member(resource_id, member_id).await?;
        tracing::debug!(
            resource_id = %resource_id,
            member_id = %member_id,
            "Member removed"
        );
        Ok(())
    }

    /// Fetch an actor's membership on a resource.
    pub async fn get_member(&self, resource_id: Uuid, user_id: Uuid) -> LifecycleResult<Member> {
        Ok(self.store.get_member(resource_id, user_id).await?)
    }

    /// List a resource's roster.
    pub async fn list_members(
        &self,
        resource_id: Uuid,
        filter: &MemberFilter,
        page: Page,
    ) -> LifecycleResult<PageResult<Member>> {
        self.store.get_resource(resource_id).await?;
        Ok(self.store.list_members(resource_id, filter, page).await?)
    }

    // ------------------------------------------------------------------
    // Message transitions
    // ------------------------------------------------------------------

    /// Post a message.
    ///
    /// Every referenced media id must resolve in the media directory;
    /// an unknown reference is a `NotFound` input error.
    pub async fn post_message(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        content: &str,
        media_ids: Vec<Uuid>,
    ) -> LifecycleResult<Message> {
        require_text("content", content)?;

        let resource = self.store.get_resource(resource_id).await?;
        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::PostMessage, &Subject::resource(&resource)) {
            return Err(deny(Action::PostMessage));
        }
        let Some(sender) = membership else {
            return Err(deny(Action::PostMessage));
        };

        for media_id in &media_ids {
            if !self.media.media_exists(*media_id).await? {
                return Err(LifecycleError::NotFound(format!(
                    "media {media_id} does not exist"
                )));
            }
        }

        let message = Message::new(resource_id, sender.id, content, media_ids);
        Ok(self.store.create_message(message).await?)
    }

    /// Edit a message body.
    ///
    /// Redacted messages can no longer change.
    pub async fn update_message(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        message_id: Uuid,
        content: &str,
    ) -> LifecycleResult<Message> {
        require_text("content", content)?;

        let resource = self.store.get_resource(resource_id).await?;
        let message = self.store.get_message(resource_id, message_id).await?;
        if message.deleted {
            return Err(LifecycleError::InvalidOperation(
                "a deleted message cannot be edited".into(),
            ));
        }

        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::UpdateMessage, &Subject::message(&resource, &message)) {
            return Err(deny(Action::UpdateMessage));
        }

        Ok(self
            .store
            .update_message_content(resource_id, message_id, content.to_string())
            .await?)
    }

    /// Redact a message and release its media.
    ///
    /// Media release is best-effort; a failed release is logged and the
    /// redaction still succeeds.
    pub async fn delete_message(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        message_id: Uuid,
    ) -> LifecycleResult<()> {
        let resource = self.store.get_resource(resource_id).await?;
        let message = self.store.get_message(resource_id, message_id).await?;

        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::DeleteMessage, &Subject::message(&resource, &message)) {
            return Err(deny(Action::DeleteMessage));
        }

        let released = self.store.soft_delete_message(resource_id, message_id).await?;
        for media_id in released {
            if let Err(err) = self.media.release_media(media_id).await {
                tracing::warn!(
                    resource_id = %resource_id,
                    message_id = %message_id,
                    media_id = %media_id,
                    error = %err,
                    "Failed to release media for deleted message"
                );
            }
        }
        tracing::debug!(
            resource_id = %resource_id,
            message_id = %message_id,
            "Message deleted"
        );
        Ok(())
    }

    /// Fetch a message.
    pub async fn get_message(
        &self,
        resource_id: Uuid,
        message_id: Uuid,
    ) -> LifecycleResult<Message> {
        Ok(self.store.get_message(resource_id, message_id).await?)
    }

    /// List a resource's messages.
    pub async fn list_messages(
        &self,
        resource_id: Uuid,
        filter: &MessageFilter,
        page: Page,
    ) -> LifecycleResult<PageResult<Message>> {
        self.store.get_resource(resource_id).await?;
        Ok(self.store.list_messages(resource_id, filter, page).await?)
    }

    // ------------------------------------------------------------------
    // Trust-fund transitions
    // ------------------------------------------------------------------

    /// Deposit into a trust fund.
    ///
    /// Deposits are open to any authenticated actor and are not gated by
    /// the resolver.
    pub async fn deposit(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        amount_cents: i64,
    ) -> LifecycleResult<i64> {
        require_positive("deposit", amount_cents)?;

        let balance = self.store.adjust_balance(resource_id, amount_cents).await?;
        tracing::debug!(
            resource_id = %resource_id,
            actor_id = %actor.id,
            amount_cents,
            "Deposit accepted"
        );
        Ok(balance)
    }

    /// Withdraw from a trust fund.
    ///
    /// Gated by the `Withdraw` capability; overdrawing fails without
    /// moving the balance.
    pub async fn withdraw(
        &self,
        actor: &Actor,
        resource_id: Uuid,
        amount_cents: i64,
    ) -> LifecycleResult<i64> {
        require_positive("withdrawal", amount_cents)?;

        let resource = self.store.get_resource(resource_id).await?;
        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        if !decide(&ctx, Action::Withdraw, &Subject::resource(&resource)) {
            return Err(deny(Action::Withdraw));
        }

        let balance = self.store.adjust_balance(resource_id, -amount_cents).await?;
        tracing::debug!(
            resource_id = %resource_id,
            actor_id = %actor.id,
            amount_cents,
            "Withdrawal accepted"
        );
        Ok(balance)
    }

    // ------------------------------------------------------------------
    // Ad hoc checks
    // ------------------------------------------------------------------

    /// Ask whether the actor could perform an action against the resource
    /// itself, without performing it.
    ///
    /// Own-scoped message grants need the concrete message and are not
    /// visible through this check.
    pub async fn can(
        &self,
        actor: &Actor,
        action: Action,
        resource_id: Uuid,
    ) -> LifecycleResult<bool> {
        let resource = self.store.get_resource(resource_id).await?;
        let membership = self.load_membership(&resource, actor.id).await?;
        let ctx = ActorContext::new(actor.id, membership.as_ref());
        Ok(decide(&ctx, action, &Subject::resource(&resource)))
    }
}
