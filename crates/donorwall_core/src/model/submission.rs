//! Submission domain model.
//!
//! # Responsibility
//! - Define the canonical record for one community donation photo post.
//! - Own the public visibility predicate used by every curated read path.
//!
//! # Invariants
//! - `id` is assigned once at intake and never reused for another record.
//! - `consent` is fixed at intake; nothing in core mutates it afterwards.
//! - A record is publicly visible iff `approved && consent`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of a submission.
pub type SubmissionId = Uuid;

/// Caller-supplied payload accepted by intake.
///
/// Identity, timestamp and moderation state are never taken from the
/// caller, except for the optional `featured` hint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub submitter_name: String,
    pub contact: String,
    /// Opaque references (URLs or encoded blobs), kept in caller order.
    #[serde(default)]
    pub photos: Vec<String>,
    pub city: String,
    pub drop_off_location: String,
    #[serde(default)]
    pub caption: String,
    pub consent: bool,
    /// Pre-set feature mark; honored only when the moderation policy allows it.
    #[serde(default)]
    pub featured: Option<bool>,
}

/// Validation failure for a submission draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionValidationError {
    NilId,
    NoPhotos,
    BlankPhoto { index: usize },
    BlankField(&'static str),
}

impl Display for SubmissionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "submission id cannot be nil"),
            Self::NoPhotos => write!(f, "submission must carry at least one photo"),
            Self::BlankPhoto { index } => write!(f, "photo reference #{index} is blank"),
            Self::BlankField(field) => write!(f, "`{field}` cannot be blank"),
        }
    }
}

impl Error for SubmissionValidationError {}

impl SubmissionDraft {
    /// Checks the draft against strict intake rules.
    ///
    /// Consent is not checked: a non-consenting submission is legal, it just
    /// never becomes publicly visible.
    pub fn validate(&self) -> Result<(), SubmissionValidationError> {
        if self.submitter_name.trim().is_empty() {
            return Err(SubmissionValidationError::BlankField("submitter_name"));
        }
        if self.photos.is_empty() {
            return Err(SubmissionValidationError::NoPhotos);
        }
        if let Some(index) = self.photos.iter().position(|photo| photo.trim().is_empty()) {
            return Err(SubmissionValidationError::BlankPhoto { index });
        }
        if self.city.trim().is_empty() {
            return Err(SubmissionValidationError::BlankField("city"));
        }
        if self.drop_off_location.trim().is_empty() {
            return Err(SubmissionValidationError::BlankField("drop_off_location"));
        }
        Ok(())
    }
}

/// Canonical stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub submitter_name: String,
    pub contact: String,
    pub photos: Vec<String>,
    pub city: String,
    pub drop_off_location: String,
    pub caption: String,
    /// Set at intake only.
    pub consent: bool,
    /// Unix epoch milliseconds, non-decreasing across intakes.
    pub created_at: i64,
    pub approved: bool,
    pub featured: bool,
}

impl Submission {
    /// Builds an unapproved record from a draft with a fresh random id.
    pub fn from_draft(draft: SubmissionDraft, created_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    /// Builds an unapproved record with a caller-provided id.
    ///
    /// Used by tests and import paths; the repository still rejects nil or
    /// duplicate ids on insert.
    pub fn with_id(id: SubmissionId, draft: SubmissionDraft, created_at: i64) -> Self {
        Self {
            id,
            submitter_name: draft.submitter_name,
            contact: draft.contact,
            photos: draft.photos,
            city: draft.city,
            drop_off_location: draft.drop_off_location,
            caption: draft.caption,
            consent: draft.consent,
            created_at,
            approved: false,
            featured: draft.featured.unwrap_or(false),
        }
    }

    /// The public visibility predicate.
    pub fn is_publicly_visible(&self) -> bool {
        self.approved && self.consent
    }

    pub fn is_pending(&self) -> bool {
        !self.approved
    }
}

/// Lowercases a free-text key for case-insensitive exact matching.
pub fn match_key(value: &str) -> String {
    value.to_lowercase()
}
