//! # Domain Model: Copy Items, Drafts and Identity
//!
//! This module defines the data that flows through a reconciliation run:
//! [`Scope`], [`PersistedRecord`], [`DraftItem`], [`NewRecord`], [`RecordPatch`]
//! and the derived [`IdentityKey`].
//!
//! ## Records vs Drafts
//!
//! A **record** is a copy item the store already holds. It has a storage
//! assigned `id`, belongs to exactly one scope and carries timestamps.
//!
//! A **draft** is the user-edited counterpart held by the client. It carries
//! the same content fields but no timestamps, and an `id` only when it started
//! life as a persisted record and the UI kept that id around.
//!
//! Both share [`CopyContent`], flattened into their serialized form:
//!
//! ```text
//! { "id": "…", "title": "Launch Tweet", "body": "…", "category": "tweet",
//!   "audience": "founders", "use_case": "launch", "notes": null,
//!   "labels": ["q3"], "status": "draft" }
//! ```
//!
//! ## Emptiness
//!
//! A draft is *empty* when both title and body are blank after trimming.
//! Empty drafts are in-progress form rows: they are never written, and when
//! they match a record that record is left untouched.
//!
//! ## Identity Keys
//!
//! When a draft has no usable id it is matched by its [`IdentityKey`]: the
//! scope plus the trimmed title. Keys are derived on the fly, never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;

/// Owner of a collection: one site, one user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Scope {
    pub site_id: String,
    pub user_id: String,
}

impl Scope {
    pub fn new(site_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Both ids are required and must be non-blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.site_id.trim().is_empty() {
            return Err(ValidationError::MissingSiteId);
        }
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingUserId);
        }
        Ok(())
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site_id, self.user_id)
    }
}

/// Message type of a copy item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tweet,
    Email,
    Script,
    Post,
    Ad,
    #[default]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    #[default]
    Draft,
    Review,
    Approved,
    Published,
    Archived,
}

/// The editable fields shared by drafts and records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CopyContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub audience: String,
    #[serde(default, alias = "useCase")]
    pub use_case: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub status: CopyStatus,
}

impl CopyContent {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty() && self.body.trim().is_empty()
    }
}

/// A copy item already held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRecord {
    pub id: Uuid,
    pub scope: Scope,
    #[serde(flatten)]
    pub content: CopyContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersistedRecord {
    /// Materialize a new record the way a store does on insert.
    pub fn from_new(record: NewRecord, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            scope: record.scope,
            content: record.content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn identity_key(&self) -> IdentityKey {
        IdentityKey::new(&self.scope, &self.content.title)
    }
}

/// The client-held, user-edited counterpart of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DraftItem {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(flatten)]
    pub content: CopyContent,
}

impl DraftItem {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            content: CopyContent::new(title, body),
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn identity_key(&self, scope: &Scope) -> IdentityKey {
        IdentityKey::new(scope, &self.content.title)
    }

    /// Fields of `record` this draft would change.
    pub fn diff(&self, record: &PersistedRecord) -> RecordPatch {
        RecordPatch::between(&record.content, &self.content)
    }
}

impl From<&PersistedRecord> for DraftItem {
    fn from(record: &PersistedRecord) -> Self {
        Self {
            id: Some(record.id),
            content: record.content.clone(),
        }
    }
}

/// Payload for `insert_many`: draft content stamped with its scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub scope: Scope,
    #[serde(flatten)]
    pub content: CopyContent,
}

impl NewRecord {
    pub fn from_draft(scope: &Scope, draft: &DraftItem) -> Self {
        Self {
            scope: scope.clone(),
            content: draft.content.clone(),
        }
    }
}

/// Partial field set for `update_one`. `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    // Outer None: untouched. Some(None): clear the notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CopyStatus>,
}

fn changed<T: Clone + PartialEq>(old: &T, new: &T) -> Option<T> {
    (old != new).then(|| new.clone())
}

impl RecordPatch {
    pub fn between(old: &CopyContent, new: &CopyContent) -> Self {
        Self {
            title: changed(&old.title, &new.title),
            body: changed(&old.body, &new.body),
            category: changed(&old.category, &new.category),
            audience: changed(&old.audience, &new.audience),
            use_case: changed(&old.use_case, &new.use_case),
            notes: changed(&old.notes, &new.notes),
            labels: changed(&old.labels, &new.labels),
            status: changed(&old.status, &new.status),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, content: &mut CopyContent) {
        if let Some(title) = &self.title {
            content.title = title.clone();
        }
        if let Some(body) = &self.body {
            content.body = body.clone();
        }
        if let Some(category) = self.category {
            content.category = category;
        }
        if let Some(audience) = &self.audience {
            content.audience = audience.clone();
        }
        if let Some(use_case) = &self.use_case {
            content.use_case = use_case.clone();
        }
        if let Some(notes) = &self.notes {
            content.notes = notes.clone();
        }
        if let Some(labels) = &self.labels {
            content.labels = labels.clone();
        }
        if let Some(status) = self.status {
            content.status = status;
        }
    }
}

/// Fallback identity of a draft or record: scope plus trimmed title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityKey {
    pub scope: Scope,
    pub title: String,
}

impl IdentityKey {
    pub fn new(scope: &Scope, title: &str) -> Self {
        Self {
            scope: scope.clone(),
            title: title.trim().to_string(),
        }
    }
}
