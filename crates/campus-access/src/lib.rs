//! # Campus Access (Capability Resolution)
//!
//! This crate answers one question for the Campus platform: may this actor
//! perform this action on this resource? It is shared by every surface that
//! mutates channels, study groups, content resources, and trust funds.
//!
//! ## Overview
//!
//! The campus-access crate handles:
//! - **Actions**: Operations that can be attempted on a resource
//! - **Capabilities**: Role + Action + Scope grants
//! - **Grant tables**: Per-kind capability tables for each role
//! - **Resolution**: The pure [`decide`] function over actor context
//!
//! ## Architecture
//!
//! ```text
//! Capability = Role + Action + Scope
//!
//! Examples:
//!   Creator  + RemoveMember  + Any   - remove anyone from the roster
//!   Tutor    + UpdateMessage + Own   - edit only their own messages
//! ```
//!
//! Resolution is fail-closed: an action is denied unless a grant explicitly
//! allows it. Creators of rosterless kinds (content resources, trust funds)
//! are recognized by actor id; everyone else acts through a membership.
//!
//! ## Usage
//!
//! ```rust
//! use uuid::Uuid;
//! use campus_domain::{Member, Resource, ResourceAttrs, Role};
//! use campus_access::{decide, Action, ActorContext, Subject};
//!
//! let creator_id = Uuid::now_v7();
//! let channel = Resource::new(ResourceAttrs::channel("algebra-help"), creator_id);
//! let creator = Member::new(channel.id, creator_id, Role::Creator);
//!
//! let ctx = ActorContext::new(creator_id, Some(&creator));
//! assert!(decide(&ctx, Action::PostMessage, &Subject::resource(&channel)));
//! assert!(decide(&ctx, Action::DeleteResource, &Subject::resource(&channel)));
//! ```
//!
//! ## Scopes
//!
//! A grant's scope bounds which instances it reaches:
//! - `Any` reaches every instance inside the resource
//! - `Own` reaches only instances owned by the acting member
//!
//! ## Integration with campus-domain
//!
//! This crate works with `campus-domain` roles:
//! - Each resource kind carries its own grant table per role
//! - Creators of rosterless kinds hold implicit grants by actor id
//! - The resolver never touches storage; callers load state first

pub mod actions;
pub mod capability;
pub mod grants;
pub mod resolver;

// Re-export main types for convenience
pub use actions::Action;
pub use capability::{Capability, Scope};
pub use grants::{creator_grants, role_grants};
pub use resolver::{decide, ActorContext, Subject};
