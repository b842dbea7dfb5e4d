//! Store contract
//!
//! The `MembershipStore` trait is the sole mutation surface for resources,
//! rosters, and messages. Backends enforce the uniqueness and atomicity
//! guarantees documented on each method; callers sequence cascades.

use async_trait::async_trait;
use uuid::Uuid;

use campus_domain::{Actor, Member, Message, Resource, ResourceAttrs, ResourcePatch, Role};

use crate::error::StoreResult;
use crate::query::{MemberFilter, MessageFilter, Page, PageResult, ResourceFilter};

/// Durable storage for resources, rosters, and messages.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Create a resource together with its `Creator` member.
    ///
    /// For roster kinds the resource row and the creator's membership are
    /// inserted as one unit; the store never exposes a roster-bearing
    /// resource without its creator. Rosterless kinds return `None` for
    /// the member.
    ///
    /// The creator's display name is snapshotted onto the membership.
    async fn create_resource(
        &self,
        attrs: ResourceAttrs,
        creator: &Actor,
    ) -> StoreResult<(Resource, Option<Member>)>;

    /// Fetch a resource by id.
    async fn get_resource(&self, resource_id: Uuid) -> StoreResult<Resource>;

    /// List resources matching the filter.
    ///
    /// The reported total is computed from the same predicate as the page.
    async fn list_resources(
        &self,
        filter: &ResourceFilter,
        page: Page,
    ) -> StoreResult<PageResult<Resource>>;

    /// Apply a partial update to a resource.
    async fn update_resource(
        &self,
        resource_id: Uuid,
        patch: ResourcePatch,
    ) -> StoreResult<Resource>;

    /// Atomically shift a trust-fund balance by `delta_cents`.
    ///
    /// Returns the new balance. Fails with `KindMismatch` on non-fund
    /// resources, `InsufficientFunds` if the result would be negative, and
    /// `BalanceOverflow` if it would not fit; the balance is untouched on
    /// every failure.
    async fn adjust_balance(&self, resource_id: Uuid, delta_cents: i64) -> StoreResult<i64>;

    /// Delete a resource row.
    ///
    /// Members and messages are untouched; callers purge them right after
    /// through [`purge_members`](Self::purge_members) and
    /// [`purge_messages`](Self::purge_messages).
    async fn delete_resource(&self, resource_id: Uuid) -> StoreResult<()>;

    /// Insert a membership.
    ///
    /// Check-and-insert on the (resource, user) pair is atomic: of two
    /// concurrent inserts for the same pair, exactly one succeeds and the
    /// other fails with `DuplicateMember`.
    async fn add_member(&self, member: Member) -> StoreResult<Member>;

    /// Fetch an actor's membership on a resource.
    async fn get_member(&self, resource_id: Uuid, user_id: Uuid) -> StoreResult<Member>;

    /// Fetch a membership by its own id.
    async fn get_member_by_id(&self, resource_id: Uuid, member_id: Uuid) -> StoreResult<Member>;

    /// List a resource's roster.
    async fn list_members(
        &self,
        resource_id: Uuid,
        filter: &MemberFilter,
        page: Page,
    ) -> StoreResult<PageResult<Member>>;

    /// Write a member's role.
    ///
    /// A single atomic write of the full role. The member's existence on
    /// this resource is re-validated at write time, so a concurrent
    /// removal surfaces as `MemberNotFound` instead of a resurrected row.
    async fn update_member_role(
        &self,
        resource_id: Uuid,
        member_id: Uuid,
        role: Role,
    ) -> StoreResult<Member>;

    /// Remove a membership row.
    async fn remove_member(&self, resource_id: Uuid, member_id: Uuid) -> StoreResult<()>;

    /// Remove every membership row for a resource.
    ///
    /// Returns how many rows were removed. Used by the delete cascade.
    async fn purge_members(&self, resource_id: Uuid) -> StoreResult<usize>;

    /// Insert a message.
    ///
    /// The resource must exist and the sender must be on its roster.
    async fn create_message(&self, message: Message) -> StoreResult<Message>;

    /// Fetch a message by id, scoped to its resource.
    async fn get_message(&self, resource_id: Uuid, message_id: Uuid) -> StoreResult<Message>;

    /// List a resource's messages.
    ///
    /// Redacted messages are omitted unless the filter asks for them.
    async fn list_messages(
        &self,
        resource_id: Uuid,
        filter: &MessageFilter,
        page: Page,
    ) -> StoreResult<PageResult<Message>>;

    /// Replace a message body and stamp `edited_at`.
    ///
    /// Fails with `MessageDeleted` once the message has been redacted.
    async fn update_message_content(
        &self,
        resource_id: Uuid,
        message_id: Uuid,
        content: String,
    ) -> StoreResult<Message>;

    /// Redact a message, keeping the row as a tombstone.
    ///
    /// Returns the media ids the message referenced before redaction so
    /// the caller can release them. Redacting twice is a no-op that
    /// returns an empty list.
    async fn soft_delete_message(
        &self,
        resource_id: Uuid,
        message_id: Uuid,
    ) -> StoreResult<Vec<Uuid>>;

    /// Remove every message row for a resource.
    ///
    /// Returns how many rows were removed along with every media id they
    /// still referenced. Used by the delete cascade.
    async fn purge_messages(&self, resource_id: Uuid) -> StoreResult<(usize, Vec<Uuid>)>;
}
