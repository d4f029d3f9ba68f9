//! Moderation and intake policy knobs.
//!
//! Hosts usually deserialize this from their own settings file; every field
//! has a default so a partial document is accepted.

use serde::{Deserialize, Serialize};

/// Draft checks applied by intake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeValidation {
    /// Store any draft as-is; the calling form owns validation.
    #[default]
    AcceptAll,
    /// Reject drafts failing `SubmissionDraft::validate`.
    Strict,
}

/// Policy shared by intake and moderation services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModerationPolicy {
    /// When set, `feature` refuses unapproved records and intake drops the
    /// caller's `featured` hint.
    pub feature_requires_approval: bool,
    pub intake_validation: IntakeValidation,
}

impl Default for ModerationPolicy {
    fn default() -> Self {
        Self {
            feature_requires_approval: true,
            intake_validation: IntakeValidation::AcceptAll,
        }
    }
}

impl ModerationPolicy {
    /// Accept-anything intake and unconditional featuring.
    pub fn permissive() -> Self {
        Self {
            feature_requires_approval: false,
            intake_validation: IntakeValidation::AcceptAll,
        }
    }
}
