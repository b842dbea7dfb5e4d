//! Message model
//!
//! Messages are authored by members (never bare actors) and are removed by
//! redaction rather than row deletion, so listings keep a tombstone in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A message posted inside a resource.
///
/// The sender is recorded by membership id, which is what ownership checks
/// compare against. Media attachments are referenced by id; the directory
/// holding the blobs lives elsewhere.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_domain::Message;
///
/// let resource_id = Uuid::now_v7();
/// let sender = Uuid::now_v7();
/// let mut message = Message::new(resource_id, sender, "anyone free at 4pm?", vec![]);
/// assert!(!message.deleted);
///
/// message.redact();
/// assert!(message.deleted);
/// assert!(message.content.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: Uuid,

    /// Resource the message was posted in
    pub resource_id: Uuid,

    /// Membership that authored the message
    pub sender_member_id: Uuid,

    /// Message body; `None` once redacted
    pub content: Option<String>,

    /// Attached media ids; cleared on redaction
    #[serde(default)]
    pub media_ids: Vec<Uuid>,

    /// When the message was posted
    pub sent_at: DateTime<Utc>,

    /// When the message body was last edited
    pub edited_at: Option<DateTime<Utc>>,

    /// Whether the message has been redacted
    #[serde(default)]
    pub deleted: bool,
}

impl Message {
    /// Creates a new message.
    ///
    /// # Arguments
    ///
    /// * `resource_id` - Resource the message belongs to
    /// * `sender_member_id` - Membership of the author
    /// * `content` - Message body
    /// * `media_ids` - Attached media, empty if none
    pub fn new(
        resource_id: Uuid,
        sender_member_id: Uuid,
        content: impl Into<String>,
        media_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            resource_id,
            sender_member_id,
            content: Some(content.into()),
            media_ids,
            sent_at: Utc::now(),
            edited_at: None,
            deleted: false,
        }
    }

    /// Redact the message in place.
    ///
    /// Clears the body and attachment list and marks the row deleted. The
    /// row itself survives so listings can show a tombstone.
    pub fn redact(&mut self) {
        self.content = None;
        self.media_ids.clear();
        self.deleted = true;
    }
}
