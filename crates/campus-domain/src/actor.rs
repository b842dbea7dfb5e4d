//! Authenticated actor record
//!
//! This module provides the Actor type that every lifecycle call carries.
//! Authentication happens at the request boundary; by the time the core is
//! invoked, token verification has already produced one of these.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An already-authenticated platform user.
///
/// The core never authenticates: the HTTP layer verifies credentials and
/// hands the resulting actor into every lifecycle operation. The display
/// name is snapshotted onto roster entries when the actor joins a resource.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_domain::Actor;
///
/// let actor = Actor::new(Uuid::now_v7(), "Priya");
/// assert_eq!(actor.display_name, "Priya");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Unique user ID, issued by the identity provider
    pub id: Uuid,

    /// Display name shown on rosters and messages
    pub display_name: String,
}

impl Actor {
    /// Creates an actor record for an authenticated user.
    ///
    /// # Arguments
    ///
    /// * `id` - The user ID from the verified token
    /// * `display_name` - The user's display name
    pub fn new(id: Uuid, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}
