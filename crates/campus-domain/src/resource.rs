//! Group-resource domain models
//!
//! This module provides the Resource entity shared by the four group-like
//! resource kinds, plus the partial-update payload applied by the lifecycle
//! controller. Ownership lives on the creator member (or, for kinds without
//! a roster, on the creating actor), never on the resource record itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// The four group-like resource kinds on the platform.
///
/// Each kind carries its own role set and capability table:
/// - **Channel**: tutor-led discussion space (creator, tutors, participants)
/// - **StudyGroup**: peer group where every member may post
/// - **ContentResource**: shared learning material, no roster
/// - **TrustFund**: education funding pool with a balance, no roster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Tutor-led discussion channel.
    Channel,
    /// Peer study group.
    StudyGroup,
    /// Shared learning material.
    ContentResource,
    /// Education funding pool.
    TrustFund,
}

impl ResourceKind {
    /// Get the string representation of the resource kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Channel => "channel",
            ResourceKind::StudyGroup => "study_group",
            ResourceKind::ContentResource => "content_resource",
            ResourceKind::TrustFund => "trust_fund",
        }
    }

    /// Parse resource kind from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive, supports aliases)
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_domain::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::parse("channel"), Some(ResourceKind::Channel));
    /// assert_eq!(ResourceKind::parse("study-group"), Some(ResourceKind::StudyGroup));
    /// assert_eq!(ResourceKind::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "channel" => Some(ResourceKind::Channel),
            "study_group" | "study-group" | "studygroup" => Some(ResourceKind::StudyGroup),
            "content_resource" | "content-resource" | "content" => {
                Some(ResourceKind::ContentResource)
            }
            "trust_fund" | "trust-fund" | "fund" => Some(ResourceKind::TrustFund),
            _ => None,
        }
    }

    /// Get all resource kinds.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Channel,
            ResourceKind::StudyGroup,
            ResourceKind::ContentResource,
            ResourceKind::TrustFund,
        ]
    }

    /// Check if resources of this kind carry a member roster.
    ///
    /// Content resources and trust funds have no roster: their creator acts
    /// directly by actor id rather than through a `Creator` member.
    ///
    /// # Returns
    ///
    /// `true` for `Channel` and `StudyGroup`
    pub fn has_roster(&self) -> bool {
        matches!(self, ResourceKind::Channel | ResourceKind::StudyGroup)
    }
}

/// Kind-specific resource attributes.
///
/// One variant per resource kind, so a fund with tags or a channel with a
/// balance is unrepresentable. Channels, study groups, and content resources
/// share the name/description/tags shape; trust funds carry a balance
/// instead of tags. The balance only moves through deposit/withdraw
/// transitions, never through a partial update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceAttrs {
    /// Tutor-led discussion channel.
    Channel {
        /// Human-readable name
        name: String,
        /// Optional description
        description: Option<String>,
        /// Subject tags for discovery
        #[serde(default)]
        subject_tags: Vec<String>,
    },
    /// Peer study group.
    StudyGroup {
        /// Human-readable name
        name: String,
        /// Optional description
        description: Option<String>,
        /// Subject tags for discovery
        #[serde(default)]
        subject_tags: Vec<String>,
    },
    /// Shared learning material.
    ContentResource {
        /// Human-readable name
        name: String,
        /// Optional description
        description: Option<String>,
        /// Subject tags for discovery
        #[serde(default)]
        subject_tags: Vec<String>,
    },
    /// Education funding pool.
    TrustFund {
        /// Human-readable name
        name: String,
        /// Optional description
        description: Option<String>,
        /// Current balance in cents; never negative
        balance_cents: i64,
    },
}

impl ResourceAttrs {
    /// Attributes for a new channel.
    pub fn channel(name: impl Into<String>) -> Self {
        Self::Channel {
            name: name.into(),
            description: None,
            subject_tags: Vec::new(),
        }
    }

    /// Attributes for a new study group.
    pub fn study_group(name: impl Into<String>) -> Self {
        Self::StudyGroup {
            name: name.into(),
            description: None,
            subject_tags: Vec::new(),
        }
    }

    /// Attributes for a new content resource.
    pub fn content_resource(name: impl Into<String>) -> Self {
        Self::ContentResource {
            name: name.into(),
            description: None,
            subject_tags: Vec::new(),
        }
    }

    /// Attributes for a new trust fund with a zero balance.
    pub fn trust_fund(name: impl Into<String>) -> Self {
        Self::TrustFund {
            name: name.into(),
            description: None,
            balance_cents: 0,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let value = Some(description.into());
        match &mut self {
            Self::Channel { description, .. }
            | Self::StudyGroup { description, .. }
            | Self::ContentResource { description, .. }
            | Self::TrustFund { description, .. } => *description = value,
        }
        self
    }

    /// Set the subject tags. No-op for trust funds, which carry none.
    pub fn with_subject_tags(mut self, tags: Vec<String>) -> Self {
        match &mut self {
            Self::Channel { subject_tags, .. }
            | Self::StudyGroup { subject_tags, .. }
            | Self::ContentResource { subject_tags, .. } => *subject_tags = tags,
            Self::TrustFund { .. } => {}
        }
        self
    }

    /// Set the opening balance. No-op for kinds other than trust funds.
    pub fn with_opening_balance(mut self, cents: i64) -> Self {
        if let Self::TrustFund { balance_cents, .. } = &mut self {
            *balance_cents = cents;
        }
        self
    }

    /// The kind this attribute payload belongs to.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Channel { .. } => ResourceKind::Channel,
            Self::StudyGroup { .. } => ResourceKind::StudyGroup,
            Self::ContentResource { .. } => ResourceKind::ContentResource,
            Self::TrustFund { .. } => ResourceKind::TrustFund,
        }
    }

    /// The resource name.
    pub fn name(&self) -> &str {
        match self {
            Self::Channel { name, .. }
            | Self::StudyGroup { name, .. }
            | Self::ContentResource { name, .. }
            | Self::TrustFund { name, .. } => name,
        }
    }

    /// The resource description, if set.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Channel { description, .. }
            | Self::StudyGroup { description, .. }
            | Self::ContentResource { description, .. }
            | Self::TrustFund { description, .. } => description.as_deref(),
        }
    }

    /// Subject tags; empty for trust funds.
    pub fn subject_tags(&self) -> &[String] {
        match self {
            Self::Channel { subject_tags, .. }
            | Self::StudyGroup { subject_tags, .. }
            | Self::ContentResource { subject_tags, .. } => subject_tags,
            Self::TrustFund { .. } => &[],
        }
    }

    /// Trust-fund balance in cents; `None` for other kinds.
    pub fn balance_cents(&self) -> Option<i64> {
        match self {
            Self::TrustFund { balance_cents, .. } => Some(*balance_cents),
            _ => None,
        }
    }

    fn set_name(&mut self, value: String) {
        match self {
            Self::Channel { name, .. }
            | Self::StudyGroup { name, .. }
            | Self::ContentResource { name, .. }
            | Self::TrustFund { name, .. } => *name = value,
        }
    }

    fn set_description(&mut self, value: String) {
        match self {
            Self::Channel { description, .. }
            | Self::StudyGroup { description, .. }
            | Self::ContentResource { description, .. }
            | Self::TrustFund { description, .. } => *description = Some(value),
        }
    }

    fn set_subject_tags(&mut self, value: Vec<String>) {
        match self {
            Self::Channel { subject_tags, .. }
            | Self::StudyGroup { subject_tags, .. }
            | Self::ContentResource { subject_tags, .. } => *subject_tags = value,
            Self::TrustFund { .. } => {}
        }
    }
}

/// A group-like resource instance.
///
/// Resources are created together with their `Creator` member (for roster
/// kinds) and transition through exactly two states: active, then deleted.
/// Deletion cascades to the roster and the resource's messages.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use campus_domain::{Resource, ResourceAttrs, ResourceKind};
///
/// let creator_id = Uuid::now_v7();
/// let attrs = ResourceAttrs::study_group("Linear Algebra II")
///     .with_subject_tags(vec!["math".into(), "algebra".into()]);
/// let group = Resource::new(attrs, creator_id);
///
/// assert_eq!(group.kind(), ResourceKind::StudyGroup);
/// assert_eq!(group.name(), "Linear Algebra II");
/// assert_eq!(group.created_by, creator_id);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier for the resource
    pub id: Uuid,

    /// Actor who created the resource
    pub created_by: Uuid,

    /// Kind-specific attributes
    pub attrs: ResourceAttrs,

    /// Custom metadata for extensibility
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    /// When the resource was created
    pub created_at: DateTime<Utc>,

    /// When the resource was last updated
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Creates a new resource.
    ///
    /// The resource is created with:
    /// - A newly generated UUID v7 ID
    /// - Current timestamp for created_at and updated_at
    /// - Empty metadata
    ///
    /// # Arguments
    ///
    /// * `attrs` - Kind-specific attributes
    /// * `created_by` - Actor creating the resource
    pub fn new(attrs: ResourceAttrs, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            created_by,
            attrs,
            metadata: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// The resource kind.
    pub fn kind(&self) -> ResourceKind {
        self.attrs.kind()
    }

    /// The resource name.
    pub fn name(&self) -> &str {
        self.attrs.name()
    }

    /// The resource description, if set.
    pub fn description(&self) -> Option<&str> {
        self.attrs.description()
    }

    /// Subject tags; empty for trust funds.
    pub fn subject_tags(&self) -> &[String] {
        self.attrs.subject_tags()
    }

    /// Trust-fund balance in cents; `None` for other kinds.
    pub fn balance_cents(&self) -> Option<i64> {
        self.attrs.balance_cents()
    }

    /// Apply a partial update and bump `updated_at`.
    ///
    /// Fields left as `None` in the patch are unchanged. The trust-fund
    /// balance is not reachable from here.
    pub fn apply(&mut self, patch: ResourcePatch) {
        if let Some(name) = patch.name {
            self.attrs.set_name(name);
        }
        if let Some(description) = patch.description {
            self.attrs.set_description(description);
        }
        if let Some(tags) = patch.subject_tags {
            self.attrs.set_subject_tags(tags);
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update payload for a resource.
///
/// `None` fields are left unchanged. Balances are deliberately absent:
/// they move only through deposit/withdraw transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcePatch {
    /// New name, if changing
    pub name: Option<String>,

    /// New description, if changing
    pub description: Option<String>,

    /// New subject tags, if changing (replaces the whole set)
    pub subject_tags: Option<Vec<String>>,
}

impl ResourcePatch {
    /// An empty patch that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the subject tags.
    pub fn with_subject_tags(mut self, tags: Vec<String>) -> Self {
        self.subject_tags = Some(tags);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_creation() {
        let creator_id = Uuid::now_v7();
        let channel = Resource::new(ResourceAttrs::channel("algebra-help"), creator_id);

        assert_eq!(channel.kind(), ResourceKind::Channel);
        assert_eq!(channel.name(), "algebra-help");
        assert_eq!(channel.created_by, creator_id);
        assert!(channel.description().is_none());
        assert!(channel.subject_tags().is_empty());
        assert!(channel.balance_cents().is_none());
    }

    #[test]
    fn test_trust_fund_attributes() {
        let creator_id = Uuid::now_v7();
        let attrs = ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(10_000);
        let fund = Resource::new(attrs, creator_id);

        assert_eq!(fund.kind(), ResourceKind::TrustFund);
        assert_eq!(fund.balance_cents(), Some(10_000));
        assert!(fund.subject_tags().is_empty());
    }

    #[test]
    fn test_kind_roster_flags() {
        assert!(ResourceKind::Channel.has_roster());
        assert!(ResourceKind::StudyGroup.has_roster());
        assert!(!ResourceKind::ContentResource.has_roster());
        assert!(!ResourceKind::TrustFund.has_roster());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(ResourceKind::parse("channel"), Some(ResourceKind::Channel));
        assert_eq!(
            ResourceKind::parse("STUDY_GROUP"),
            Some(ResourceKind::StudyGroup)
        );
        assert_eq!(
            ResourceKind::parse("content-resource"),
            Some(ResourceKind::ContentResource)
        );
        assert_eq!(ResourceKind::parse("fund"), Some(ResourceKind::TrustFund));
        assert_eq!(ResourceKind::parse("invalid"), None);
    }

    #[test]
    fn test_apply_patch() {
        let creator_id = Uuid::now_v7();
        let attrs = ResourceAttrs::channel("algebra-help").with_description("drop-in questions");
        let mut channel = Resource::new(attrs, creator_id);
        let before = channel.updated_at;

        channel.apply(
            ResourcePatch::new()
                .with_name("algebra-help-2")
                .with_subject_tags(vec!["math".into()]),
        );

        assert_eq!(channel.name(), "algebra-help-2");
        assert_eq!(channel.description(), Some("drop-in questions"));
        assert_eq!(channel.subject_tags(), &["math".to_string()]);
        assert!(channel.updated_at >= before);
    }

    #[test]
    fn test_patch_cannot_touch_balance() {
        let creator_id = Uuid::now_v7();
        let attrs = ResourceAttrs::trust_fund("Scholarship Pool").with_opening_balance(5_000);
        let mut fund = Resource::new(attrs, creator_id);

        fund.apply(
            ResourcePatch::new()
                .with_name("Bursary Pool")
                .with_subject_tags(vec!["ignored".into()]),
        );

        assert_eq!(fund.name(), "Bursary Pool");
        assert_eq!(fund.balance_cents(), Some(5_000));
        // Trust funds carry no tags; the patch field is ignored for them.
        assert!(fund.subject_tags().is_empty());
    }

    #[test]
    fn test_metadata_builder() {
        let creator_id = Uuid::now_v7();
        let resource = Resource::new(ResourceAttrs::content_resource("Calc Notes"), creator_id)
            .with_metadata("source", serde_json::json!("import"));

        assert_eq!(
            resource.metadata.get("source"),
            Some(&serde_json::json!("import"))
        );
    }
}
