//! # Campus Domain Records
//!
//! This crate provides the group-resource domain model for the Campus
//! platform, shared across the API, messaging, and billing services.
//!
//! ## Overview
//!
//! The campus-domain crate handles:
//! - **Resources**: The four group-like resource kinds (channels, study
//!   groups, shared content, trust funds)
//! - **Members**: Roster records binding an actor to a resource with a role
//! - **Roles**: The per-kind privilege levels (participant, tutor, creator)
//! - **Messages**: Resource-scoped messages with soft deletion
//! - **Actors**: The already-authenticated user record every call carries
//!
//! ## Architecture
//!
//! ```text
//! Actor
//!   └─ Member ─→ Resource (Channel | StudyGroup | ContentResource | TrustFund)
//!        │            └─ Message (sender = member, not actor)
//!        └─ Role (Participant < Tutor < Creator)
//! ```
//!
//! Records here are plain data: every mutation goes through the membership
//! store and lifecycle controller, never through methods that write storage
//! from the record itself.
//!
//! ## Usage
//!
//! ```rust
//! use campus_domain::{Actor, Member, Resource, ResourceAttrs, Role};
//! use uuid::Uuid;
//!
//! let creator = Actor::new(Uuid::now_v7(), "Priya");
//! let channel = Resource::new(ResourceAttrs::channel("algebra-help"), creator.id);
//! let member = Member::new(channel.id, creator.id, Role::Creator);
//!
//! assert_eq!(channel.name(), "algebra-help");
//! assert!(member.role.is_creator());
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate is designed to work with:
//! - `campus-access`: Capability resolution over these records
//! - `campus-store`: Durable roster, resource, and message storage
//! - `campus-lifecycle`: The state transitions that mutate them
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod actor;
pub mod member;
pub mod message;
pub mod resource;
pub mod roles;

// Re-export main types for convenience
pub use actor::Actor;
pub use member::Member;
pub use message::Message;
pub use resource::{Resource, ResourceAttrs, ResourceKind, ResourcePatch};
pub use roles::Role;
