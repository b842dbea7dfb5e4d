//! In-memory store implementation
//!
//! This is suitable for single-process applications and testing. All state
//! sits behind one `RwLock`, which is what makes the documented atomicity
//! guarantees hold: check-and-insert for memberships and the two-row
//! resource create happen under a single write guard.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_domain::{
    Actor, Member, Message, Resource, ResourceAttrs, ResourceKind, ResourcePatch, Role,
};

use crate::error::{StoreError, StoreResult};
use crate::query::{MemberFilter, MessageFilter, Page, PageResult, ResourceFilter};
use crate::store::MembershipStore;

/// All rows, keyed by id, plus the roster uniqueness index.
#[derive(Default)]
struct StoreState {
    resources: HashMap<Uuid, Resource>,
    members: HashMap<Uuid, Member>,
    /// (resource_id, user_id) -> member_id
    member_index: HashMap<(Uuid, Uuid), Uuid>,
    messages: HashMap<Uuid, Message>,
}

/// In-memory membership store.
pub struct MemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish()
    }
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Page a sorted result set and report the pre-slice total.
fn paginate<T>(items: Vec<T>, page: Page) -> PageResult<T> {
    let total = items.len();
    let page = page.clamped();
    let items = items.into_iter().skip(page.offset).take(page.limit).collect();
    PageResult::new(items, total)
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn create_resource(
        &self,
        attrs: ResourceAttrs,
        creator: &Actor,
    ) -> StoreResult<(Resource, Option<Member>)> {
        let resource = Resource::new(attrs, creator.id);
        let member = resource.kind().has_roster().then(|| {
            Member::new(resource.id, creator.id, Role::Creator)
                .with_display_name(creator.display_name.clone())
        });

        let mut state = self.state.write().await;
        state.resources.insert(resource.id, resource.clone());
        if let Some(ref member) = member {
            state
                .member_index
                .insert((member.resource_id, member.user_id), member.id);
            state.members.insert(member.id, member.clone());
        }

        tracing::debug!(
            resource_id = %resource.id,
            kind = resource.kind().as_str(),
            "Resource created"
        );
        Ok((resource, member))
    }

    async fn get_resource(&self, resource_id: Uuid) -> StoreResult<Resource> {
        let state = self.state.read().await;
        state
            .resources
            .get(&resource_id)
            .cloned()
            .ok_or(StoreError::ResourceNotFound(resource_id))
    }

    async fn list_resources(
        &self,
        filter: &ResourceFilter,
        page: Page,
    ) -> StoreResult<PageResult<Resource>> {
        let state = self.state.read().await;
        let mut items: Vec<Resource> = state
            .resources
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        items.sort_by_key(|r| (r.created_at, r.id));
        Ok(paginate(items, page))
    }

    async fn update_resource(
        &self,
        resource_id: Uuid,
        patch: ResourcePatch,
    ) -> StoreResult<Resource> {
        let mut state = self.state.write().await;
        let resource = state
            .resources
            .get_mut(&resource_id)
            .ok_or(StoreError::ResourceNotFound(resource_id))?;
        resource.apply(patch);
        Ok(resource.clone())
    }

    async fn adjust_balance(&self, resource_id: Uuid, delta_cents: i64) -> StoreResult<i64> {
        let mut state = self.state.write().await;
        let resource = state
            .resources
            .get_mut(&resource_id)
            .ok_or(StoreError::ResourceNotFound(resource_id))?;

        let ResourceAttrs::TrustFund { balance_cents, .. } = &mut resource.attrs else {
            return Err(StoreError::KindMismatch {
                resource_id,
                expected: ResourceKind::TrustFund,
            });
        };

        let Some(next) = balance_cents.checked_add(delta_cents) else {
            return Err(StoreError::BalanceOverflow { resource_id });
        };
        if next < 0 {
            return Err(StoreError::InsufficientFunds {
                resource_id,
                balance_cents: *balance_cents,
            });
        }
        *balance_cents = next;
        resource.updated_at = Utc::now();
        Ok(next)
    }

    async fn delete_resource(&self, resource_id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        state
            .resources
            .remove(&resource_id)
            .map(|_| ())
            .ok_or(StoreError::ResourceNotFound(resource_id))
    }

    async fn add_member(&self, member: Member) -> StoreResult<Member> {
        let mut state = self.state.write().await;
        if !state.resources.contains_key(&member.resource_id) {
            return Err(StoreError::ResourceNotFound(member.resource_id));
        }

        let key = (member.resource_id, member.user_id);
        if state.member_index.contains_key(&key) {
            return Err(StoreError::DuplicateMember {
                resource_id: member.resource_id,
                user_id: member.user_id,
            });
        }

        state.member_index.insert(key, member.id);
        state.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn get_member(&self, resource_id: Uuid, user_id: Uuid) -> StoreResult<Member> {
        let state = self.state.read().await;
        state
            .member_index
            .get(&(resource_id, user_id))
            .and_then(|member_id| state.members.get(member_id))
            .cloned()
            .ok_or(StoreError::MemberNotFound(user_id))
    }

    async fn get_member_by_id(&self, resource_id: Uuid, member_id: Uuid) -> StoreResult<Member> {
        let state = self.state.read().await;
        state
            .members
            .get(&member_id)
            .filter(|m| m.resource_id == resource_id)
            .cloned()
            .ok_or(StoreError::MemberNotFound(member_id))
    }

    async fn list_members(
        &self,
        resource_id: Uuid,
        filter: &MemberFilter,
        page: Page,
    ) -> StoreResult<PageResult<Member>> {
        let state = self.state.read().await;
        let mut items: Vec<Member> = state
            .members
            .values()
            .filter(|m| m.resource_id == resource_id && filter.matches(m))
            .cloned()
            .collect();
        items.sort_by_key(|m| (m.joined_at, m.id));
        Ok(paginate(items, page))
    }

    async fn update_member_role(
        &self,
        resource_id: Uuid,
        member_id: Uuid,
        role: Role,
    ) -> StoreResult<Member> {
        let mut state = self.state.write().await;
        // Re-validated under the write guard so a concurrent removal
        // surfaces as MemberNotFound rather than a resurrected row.
        let member = state
            .members
            .get_mut(&member_id)
            .filter(|m| m.resource_id == resource_id)
            .ok_or(StoreError::MemberNotFound(member_id))?;
        member.role = role;
        Ok(member.clone())
    }

    async fn remove_member(&self, resource_id: Uuid, member_id: Uuid) -> StoreResult<()> {
        let mut state = self.state.write().await;
        let member = state
            .members
            .get(&member_id)
            .filter(|m| m.resource_id == resource_id)
            .cloned()
            .ok_or(StoreError::MemberNotFound(member_id))?;

        state.members.remove(&member_id);
        state
            .member_index
            .remove(&(member.resource_id, member.user_id));
        Ok(())
    }

    async fn purge_members(&self, resource_id: Uuid) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        let doomed: Vec<Member> = state
            .members
            .values()
            .filter(|m| m.resource_id == resource_id)
            .cloned()
            .collect();
        for member in &doomed {
            state.members.remove(&member.id);
            state
                .member_index
                .remove(&(member.resource_id, member.user_id));
        }
        Ok(doomed.len())
    }

    async fn create_message(&self, message: Message) -> StoreResult<Message> {
        let mut state = self.state.write().await;
        if !state.resources.contains_key(&message.resource_id) {
            return Err(StoreError::ResourceNotFound(message.resource_id));
        }
        let sender_on_roster = state
            .members
            .get(&message.sender_member_id)
            .is_some_and(|m| m.resource_id == message.resource_id);
        if !sender_on_roster {
            return Err(StoreError::MemberNotFound(message.sender_member_id));
        }

        state.messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn get_message(&self, resource_id: Uuid, message_id: Uuid) -> StoreResult<Message> {
        let state = self.state.read().await;
        state
            .messages
            .get(&message_id)
            .filter(|m| m.resource_id == resource_id)
            .cloned()
            .ok_or(StoreError::MessageNotFound(message_id))
    }

    async fn list_messages(
        &self,
        resource_id: Uuid,
        filter: &MessageFilter,
        page: Page,
    ) -> StoreResult<PageResult<Message>> {
        let state = self.state.read().await;
        let mut items: Vec<Message> = state
            .messages
            .values()
            .filter(|m| m.resource_id == resource_id && filter.matches(m))
            .cloned()
            .collect();
        items.sort_by_key(|m| (m.sent_at, m.id));
        Ok(paginate(items, page))
    }

    async fn update_message_content(
        &self,
        resource_id: Uuid,
        message_id: Uuid,
        content: String,
    ) -> StoreResult<Message> {
        let mut state = self.state.write().await;
        let message = state
            .messages
            .get_mut(&message_id)
            .filter(|m| m.resource_id == resource_id)
            .ok_or(StoreError::MessageNotFound(message_id))?;
        if message.deleted {
            return Err(StoreError::MessageDeleted(message_id));
        }
        message.content = Some(content);
        message.edited_at = Some(Utc::now());
        Ok(message.clone())
    }

    async fn soft_delete_message(
        &self,
        resource_id: Uuid,
        message_id: Uuid,
    ) -> StoreResult<Vec<Uuid>> {
        let mut state = self.state.write().await;
        let message = state
            .messages
            .get_mut(&message_id)
            .filter(|m| m.resource_id == resource_id)
            .ok_or(StoreError::MessageNotFound(message_id))?;
        if message.deleted {
            return Ok(Vec::new());
        }
        let media = message.media_ids.clone();
        message.redact();
        Ok(media)
    }

    async fn purge_messages(&self, resource_id: Uuid) -> StoreResult<(usize, Vec<Uuid>)> {
        let mut state = self.state.write().await;
        let doomed: Vec<Uuid> = state
            .messages
            .values()
            .filter(|m| m.resource_id == resource_id)
            .map(|m| m.id)
            .collect();

        let mut media = Vec::new();
        for message_id in &doomed {
            if let Some(message) = state.messages.remove(message_id) {
                media.extend(message.media_ids);
            }
        }
        Ok((doomed.len(), media))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(name: &str) -> Actor {
        Actor::new(Uuid::now_v7(), name)
    }

    async fn channel_with_creator(store: &MemoryStore) -> (Resource, Member, Actor) {
        let creator = actor("Sam P.");
        let (channel, member) = store
            .create_resource(ResourceAttrs::channel("algebra-help"), &creator)
            .await
            .unwrap();
        (channel, member.unwrap(), creator)
    }

    #[tokio::test]
    async fn test_create_resource_with_creator_member() {
        let store = MemoryStore::new();
        let (channel, creator_member, creator) = channel_with_creator(&store).await;

        assert_eq!(creator_member.resource_id, channel.id);
        assert_eq!(creator_member.user_id, creator.id);
        assert_eq!(creator_member.role, Role::Creator);
        assert_eq!(creator_member.display_name.as_deref(), Some("Sam P."));

        let roster = store
            .list_members(channel.id, &MemberFilter::new(), Page::first())
            .await
            .unwrap();
        assert_eq!(roster.total, 1);
    }

    #[tokio::test]
    async fn test_rosterless_create_has_no_member() {
        let store = MemoryStore::new();
        let creator = actor("Sam P.");
        let (fund, member) = store
            .create_resource(
                ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(1_000),
                &creator,
            )
            .await
            .unwrap();

        assert!(member.is_none());
        assert_eq!(fund.balance_cents(), Some(1_000));
        let roster = store
            .list_members(fund.id, &MemberFilter::new(), Page::first())
            .await
            .unwrap();
        assert_eq!(roster.total, 0);
    }

    #[tokio::test]
    async fn test_duplicate_member_rejected() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        let user_id = Uuid::now_v7();

        store
            .add_member(Member::new(channel.id, user_id, Role::Participant))
            .await
            .unwrap();
        let err = store
            .add_member(Member::new(channel.id, user_id, Role::Participant))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::DuplicateMember { .. }));
    }

    #[tokio::test]
    async fn test_concurrent_joins_yield_one_row() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        let user_id = Uuid::now_v7();

        let first = store.add_member(Member::new(channel.id, user_id, Role::Participant));
        let second = store.add_member(Member::new(channel.id, user_id, Role::Participant));
        let (a, b) = tokio::join!(first, second);

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let roster = store
            .list_members(channel.id, &MemberFilter::new(), Page::first())
            .await
            .unwrap();
        assert_eq!(roster.total, 2); // creator + one join
    }

    #[tokio::test]
    async fn test_add_member_requires_resource() {
        let store = MemoryStore::new();
        let err = store
            .add_member(Member::new(Uuid::now_v7(), Uuid::now_v7(), Role::Participant))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn test_role_update_revalidates_at_write_time() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        let member = store
            .add_member(Member::new(channel.id, Uuid::now_v7(), Role::Participant))
            .await
            .unwrap();

        store.remove_member(channel.id, member.id).await.unwrap();
        let err = store
            .update_member_role(channel.id, member.id, Role::Tutor)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::MemberNotFound(_)));
    }

    #[tokio::test]
    async fn test_removed_member_lookup_fails() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        let user_id = Uuid::now_v7();
        let member = store
            .add_member(Member::new(channel.id, user_id, Role::Participant))
            .await
            .unwrap();

        store.remove_member(channel.id, member.id).await.unwrap();

        assert!(matches!(
            store.get_member(channel.id, user_id).await.unwrap_err(),
            StoreError::MemberNotFound(_)
        ));
        // The pair is free again after removal.
        store
            .add_member(Member::new(channel.id, user_id, Role::Participant))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_list_resources_filter_and_total() {
        let store = MemoryStore::new();
        let creator = actor("Sam P.");
        for i in 0..5 {
            store
                .create_resource(
                    ResourceAttrs::channel(format!("channel-{i}"))
                        .with_subject_tags(vec!["math".into()]),
                    &creator,
                )
                .await
                .unwrap();
        }
        store
            .create_resource(ResourceAttrs::study_group("exam prep"), &creator)
            .await
            .unwrap();

        let channels = store
            .list_resources(
                &ResourceFilter::new().with_kind(ResourceKind::Channel),
                Page::new(0, 2),
            )
            .await
            .unwrap();
        assert_eq!(channels.items.len(), 2);
        assert_eq!(channels.total, 5);

        let tagged = store
            .list_resources(
                &ResourceFilter::new().with_tags(vec!["math".into()]),
                Page::first(),
            )
            .await
            .unwrap();
        assert_eq!(tagged.total, 5);

        let named = store
            .list_resources(
                &ResourceFilter::new().with_name_contains("exam"),
                Page::first(),
            )
            .await
            .unwrap();
        assert_eq!(named.total, 1);
    }

    #[tokio::test]
    async fn test_adjust_balance() {
        let store = MemoryStore::new();
        let creator = actor("Sam P.");
        let (fund, _) = store
            .create_resource(
                ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(1_000),
                &creator,
            )
            .await
            .unwrap();

        assert_eq!(store.adjust_balance(fund.id, 500).await.unwrap(), 1_500);
        assert_eq!(store.adjust_balance(fund.id, -1_500).await.unwrap(), 0);

        let err = store.adjust_balance(fund.id, -1).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::InsufficientFunds {
                balance_cents: 0,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_adjust_balance_rejects_other_kinds() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        let err = store.adjust_balance(channel.id, 100).await.unwrap_err();
        assert!(matches!(err, StoreError::KindMismatch { .. }));
    }

    #[tokio::test]
    async fn test_adjust_balance_rejects_overflow() {
        let store = MemoryStore::new();
        let creator = actor("Sam P.");
        let (fund, _) = store
            .create_resource(
                ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(i64::MAX - 10),
                &creator,
            )
            .await
            .unwrap();

        let err = store.adjust_balance(fund.id, 11).await.unwrap_err();
        assert!(matches!(err, StoreError::BalanceOverflow { .. }));

        // The failed adjustment left the balance untouched.
        let fund = store.get_resource(fund.id).await.unwrap();
        assert_eq!(fund.balance_cents(), Some(i64::MAX - 10));
    }

    #[tokio::test]
    async fn test_message_requires_roster_membership() {
        let store = MemoryStore::new();
        let (channel, creator_member, _) = channel_with_creator(&store).await;

        store
            .create_message(Message::new(channel.id, creator_member.id, "welcome", vec![]))
            .await
            .unwrap();

        let err = store
            .create_message(Message::new(channel.id, Uuid::now_v7(), "ghost", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MemberNotFound(_)));
    }

    #[tokio::test]
    async fn test_soft_delete_returns_media_once() {
        let store = MemoryStore::new();
        let (channel, creator_member, _) = channel_with_creator(&store).await;
        let media = vec![Uuid::now_v7(), Uuid::now_v7()];
        let message = store
            .create_message(Message::new(
                channel.id,
                creator_member.id,
                "see attached",
                media.clone(),
            ))
            .await
            .unwrap();

        let released = store
            .soft_delete_message(channel.id, message.id)
            .await
            .unwrap();
        assert_eq!(released, media);

        // Second redaction is a no-op with nothing left to release.
        let released_again = store
            .soft_delete_message(channel.id, message.id)
            .await
            .unwrap();
        assert!(released_again.is_empty());

        let tombstone = store.get_message(channel.id, message.id).await.unwrap();
        assert!(tombstone.deleted);
        assert!(tombstone.content.is_none());
    }

    #[tokio::test]
    async fn test_update_deleted_message_rejected() {
        let store = MemoryStore::new();
        let (channel, creator_member, _) = channel_with_creator(&store).await;
        let message = store
            .create_message(Message::new(channel.id, creator_member.id, "typo", vec![]))
            .await
            .unwrap();

        store
            .soft_delete_message(channel.id, message.id)
            .await
            .unwrap();
        let err = store
            .update_message_content(channel.id, message.id, "fixed".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MessageDeleted(_)));
    }

    #[tokio::test]
    async fn test_message_listing_skips_tombstones() {
        let store = MemoryStore::new();
        let (channel, creator_member, _) = channel_with_creator(&store).await;
        let keep = store
            .create_message(Message::new(channel.id, creator_member.id, "keep", vec![]))
            .await
            .unwrap();
        let redacted = store
            .create_message(Message::new(channel.id, creator_member.id, "redact me", vec![]))
            .await
            .unwrap();
        store
            .soft_delete_message(channel.id, redacted.id)
            .await
            .unwrap();

        let live = store
            .list_messages(channel.id, &MessageFilter::new(), Page::first())
            .await
            .unwrap();
        assert_eq!(live.total, 1);
        assert_eq!(live.items[0].id, keep.id);

        let all = store
            .list_messages(channel.id, &MessageFilter::new().with_deleted(), Page::first())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn test_purge_messages_collects_media() {
        let store = MemoryStore::new();
        let (channel, creator_member, _) = channel_with_creator(&store).await;
        let media_a = Uuid::now_v7();
        let media_b = Uuid::now_v7();
        store
            .create_message(Message::new(channel.id, creator_member.id, "a", vec![media_a]))
            .await
            .unwrap();
        store
            .create_message(Message::new(channel.id, creator_member.id, "b", vec![media_b]))
            .await
            .unwrap();

        let (count, mut media) = store.purge_messages(channel.id).await.unwrap();
        media.sort();
        let mut expected = vec![media_a, media_b];
        expected.sort();

        assert_eq!(count, 2);
        assert_eq!(media, expected);

        let remaining = store
            .list_messages(channel.id, &MessageFilter::new().with_deleted(), Page::first())
            .await
            .unwrap();
        assert_eq!(remaining.total, 0);
    }

    #[tokio::test]
    async fn test_purge_members_empties_roster() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        for _ in 0..3 {
            store
                .add_member(Member::new(channel.id, Uuid::now_v7(), Role::Participant))
                .await
                .unwrap();
        }

        let removed = store.purge_members(channel.id).await.unwrap();
        assert_eq!(removed, 4); // creator + three joins

        let roster = store
            .list_members(channel.id, &MemberFilter::new(), Page::first())
            .await
            .unwrap();
        assert_eq!(roster.total, 0);
    }

    #[tokio::test]
    async fn test_member_name_filter() {
        let store = MemoryStore::new();
        let (channel, _, _) = channel_with_creator(&store).await;
        store
            .add_member(
                Member::new(channel.id, Uuid::now_v7(), Role::Participant)
                    .with_display_name("Priya N."),
            )
            .await
            .unwrap();

        let matches = store
            .list_members(
                channel.id,
                &MemberFilter::new().with_name_contains("priya"),
                Page::first(),
            )
            .await
            .unwrap();
        assert_eq!(matches.total, 1);
    }
}
