//! # Campus Lifecycle
//!
//! This crate orchestrates every state transition on the Campus platform's
//! group resources: create, join, leave, promote, demote, remove, post and
//! moderate messages, move trust-fund balances, and delete with cascades.
//!
//! ## Overview
//!
//! The campus-lifecycle crate handles:
//! - **Transitions**: the full operation set exposed to the HTTP layer
//! - **Authorization**: every transition consults the capability resolver
//! - **Cascades**: resource deletion sequenced across store calls
//! - **Errors**: the typed taxonomy callers map to status codes
//!
//! ## Control flow
//!
//! ```text
//! caller -> Lifecycle -> (reads)  MembershipStore + MediaDirectory
//!                     -> decide() in campus-access
//!                     -> (writes) MembershipStore
//!                     -> result / LifecycleError
//! ```
//!
//! The controller is the only component that mutates the store. The
//! resolver never errors and never writes; preconditions the resolver
//! cannot see (self-promotion, creator removal, redacted messages) are
//! enforced here and surface as `InvalidOperation`.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use campus_domain::{Actor, ResourceAttrs};
//! use campus_lifecycle::Lifecycle;
//! use campus_store::{MemoryMediaDirectory, MemoryStore};
//!
//! # async fn example() -> campus_lifecycle::LifecycleResult<()> {
//! let lifecycle = Lifecycle::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryMediaDirectory::new()),
//! );
//!
//! let creator = Actor::new(Uuid::now_v7(), "Sam P.");
//! let (channel, _) = lifecycle
//!     .create_resource(&creator, ResourceAttrs::channel("algebra-help"))
//!     .await?;
//!
//! let student = Actor::new(Uuid::now_v7(), "Priya N.");
//! lifecycle.join(&student, channel.id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error mapping
//!
//! | Error              | HTTP status |
//! |--------------------|-------------|
//! | `NotFound`         | 404         |
//! | `PermissionDenied` | 403         |
//! | `Conflict`         | 409         |
//! | `InvalidOperation` | 400         |
//! | `Validation`       | 400         |
//! | `CascadeIncomplete`| 500         |
//! | `Internal`         | 500         |

pub mod controller;
pub mod error;

// Re-export main types
pub use controller::{CascadeReport, Lifecycle};
pub use error::{LifecycleError, LifecycleResult};
