//! # Campus Store
//!
//! This crate provides the durable roster behind the Campus platform's
//! group resources: who belongs to which channel, study group, content
//! resource, or trust fund, with what role, and what was posted there.
//!
//! ## Overview
//!
//! The campus-store crate handles:
//! - **Resources**: CRUD with kind-aware filters and pagination
//! - **Members**: atomic join, role updates, removal, roster listings
//! - **Messages**: creation, listings, soft deletion
//! - **Media directory**: existence checks and release of attachments
//!
//! ## Features
//!
//! - `memory` (default): In-memory store for single-process apps and tests
//!
//! ## Contract
//!
//! The [`MembershipStore`] trait is the only mutation surface. Two of its
//! guarantees matter to callers:
//!
//! - `add_member` is an atomic check-and-insert on the (resource, user)
//!   pair. Two concurrent joins yield one row and one `DuplicateMember`.
//! - `create_resource` inserts the resource and its `Creator` member as a
//!   single unit; a resource is never observable without its creator.
//!
//! Cascades are sequenced by the caller: deleting a resource, purging its
//! messages, and purging its roster are separate calls so a partial
//! failure stays visible.
//!
//! ## Usage
//!
//! ```rust
//! use uuid::Uuid;
//! use campus_domain::{Actor, ResourceAttrs};
//! use campus_store::{MembershipStore, MemoryStore};
//!
//! # async fn example() -> campus_store::StoreResult<()> {
//! let store = MemoryStore::new();
//! let creator = Actor::new(Uuid::now_v7(), "Sam P.");
//!
//! let (channel, creator_member) = store
//!     .create_resource(ResourceAttrs::channel("algebra-help"), &creator)
//!     .await?;
//!
//! assert_eq!(channel.name(), "algebra-help");
//! assert!(creator_member.is_some());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod media;
pub mod query;
pub mod store;

#[cfg(feature = "memory")]
pub mod memory;

// Re-export main types
pub use error::{StoreError, StoreResult};
pub use media::MediaDirectory;
pub use query::{MemberFilter, MessageFilter, Page, PageResult, ResourceFilter};
pub use store::MembershipStore;

#[cfg(feature = "memory")]
pub use media::MemoryMediaDirectory;
#[cfg(feature = "memory")]
pub use memory::MemoryStore;
