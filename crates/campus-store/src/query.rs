//! Query types
//!
//! Offset/limit pagination plus the per-entity filters the listing
//! operations accept. Every listing reports a total computed from the same
//! filter predicate that selected the page, so callers can page reliably.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::{Member, Message, Resource, ResourceKind};

/// An offset/limit page request.
///
/// # Examples
///
/// ```
/// use campus_store::Page;
///
/// let page = Page::new(100, 25);
/// assert_eq!(page.offset, 100);
/// assert_eq!(page.limit, 25);
///
/// // Limits are clamped to the maximum; a zero limit becomes the default.
/// assert_eq!(Page::new(0, 10_000).clamped().limit, Page::MAX_LIMIT);
/// assert_eq!(Page::new(0, 0).clamped().limit, Page::DEFAULT_LIMIT);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page {
    /// Number of items to skip
    pub offset: usize,
    /// Maximum number of items to return
    pub limit: usize,
}

impl Page {
    /// Page size used when none is requested.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Largest page size a single request may ask for.
    pub const MAX_LIMIT: usize = 200;

    /// Create a page request.
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// The first page at the default size.
    pub fn first() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Clamp the limit into the allowed range.
    pub fn clamped(self) -> Self {
        let limit = if self.limit == 0 {
            Self::DEFAULT_LIMIT
        } else {
            self.limit.min(Self::MAX_LIMIT)
        };
        Self {
            offset: self.offset,
            limit,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of results plus the total count under the same filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total matching items across all pages
    pub total: usize,
}

impl<T> PageResult<T> {
    /// Create a page result.
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }

    /// Check if no items matched at all.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Filter for resource listings.
///
/// All set fields must match. Tag containment requires every requested tag
/// to be present on the resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceFilter {
    /// Only resources of this kind
    pub kind: Option<ResourceKind>,

    /// Case-insensitive name substring
    pub name_contains: Option<String>,

    /// Tags the resource must all carry
    #[serde(default)]
    pub tagged_with: Vec<String>,

    /// Only resources created at or after this instant
    pub created_after: Option<DateTime<Utc>>,

    /// Only resources created at or before this instant
    pub created_before: Option<DateTime<Utc>>,
}

impl ResourceFilter {
    /// An empty filter matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one resource kind.
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require a name substring (case-insensitive).
    pub fn with_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    /// Require all of the given tags.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tagged_with = tags;
        self
    }

    /// Require creation at or after the instant.
    pub fn with_created_after(mut self, instant: DateTime<Utc>) -> Self {
        self.created_after = Some(instant);
        self
    }

    /// Require creation at or before the instant.
    pub fn with_created_before(mut self, instant: DateTime<Utc>) -> Self {
        self.created_before = Some(instant);
        self
    }

    /// Check whether a resource satisfies the filter.
    pub fn matches(&self, resource: &Resource) -> bool {
        if let Some(kind) = self.kind {
            if resource.kind() != kind {
                return false;
            }
        }
        if let Some(ref fragment) = self.name_contains {
            if !resource
                .name()
                .to_lowercase()
                .contains(&fragment.to_lowercase())
            {
                return false;
            }
        }
        if !self.tagged_with.is_empty() {
            let tags = resource.subject_tags();
            if !self.tagged_with.iter().all(|t| tags.contains(t)) {
                return false;
            }
        }
        if let Some(after) = self.created_after {
            if resource.created_at < after {
                return false;
            }
        }
        if let Some(before) = self.created_before {
            if resource.created_at > before {
                return false;
            }
        }
        true
    }
}

/// Filter for roster listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberFilter {
    /// Case-insensitive display-name substring
    pub name_contains: Option<String>,
}

impl MemberFilter {
    /// An empty filter matching everyone.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a display-name substring (case-insensitive).
    pub fn with_name_contains(mut self, fragment: impl Into<String>) -> Self {
        self.name_contains = Some(fragment.into());
        self
    }

    /// Check whether a member satisfies the filter.
    ///
    /// Members without a display-name snapshot never match a name filter.
    pub fn matches(&self, member: &Member) -> bool {
        match &self.name_contains {
            None => true,
            Some(fragment) => member
                .display_name
                .as_ref()
                .is_some_and(|name| name.to_lowercase().contains(&fragment.to_lowercase())),
        }
    }
}

/// Filter for message listings.
///
/// Redacted messages are excluded unless `include_deleted` is set, so
/// default listings skip tombstones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageFilter {
    /// Only messages by this member
    pub sender_member_id: Option<Uuid>,

    /// Only messages sent at or after this instant
    pub sent_after: Option<DateTime<Utc>>,

    /// Only messages sent at or before this instant
    pub sent_before: Option<DateTime<Utc>>,

    /// Include redacted messages
    #[serde(default)]
    pub include_deleted: bool,
}

impl MessageFilter {
    /// An empty filter matching all live messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one sender.
    pub fn with_sender(mut self, member_id: Uuid) -> Self {
        self.sender_member_id = Some(member_id);
        self
    }

    /// Require sending at or after the instant.
    pub fn with_sent_after(mut self, instant: DateTime<Utc>) -> Self {
        self.sent_after = Some(instant);
        self
    }

    /// Require sending at or before the instant.
    pub fn with_sent_before(mut self, instant: DateTime<Utc>) -> Self {
        self.sent_before = Some(instant);
        self
    }

    /// Include redacted messages in listings.
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Check whether a message satisfies the filter.
    pub fn matches(&self, message: &Message) -> bool {
        if message.deleted && !self.include_deleted {
            return false;
        }
        if let Some(sender) = self.sender_member_id {
            if message.sender_member_id != sender {
                return false;
            }
        }
        if let Some(after) = self.sent_after {
            if message.sent_at < after {
                return false;
            }
        }
        if let Some(before) = self.sent_before {
            if message.sent_at > before {
                return false;
            }
        }
        true
    }
}
