//! Moderation use-case service.
//!
//! # Responsibility
//! - Apply approve/reject/feature transitions for a trusted operator.
//! - Provide point lookup regardless of moderation state.
//!
//! # Invariants
//! - An unknown id is `Ok(false)`/`Ok(None)`, never an error.
//! - `approve` and `feature` are idempotent.
//! - `reject` hard-deletes; nothing about the record survives.
//! - Under `feature_requires_approval`, an unapproved record is never
//!   marked featured.

use crate::model::submission::{Submission, SubmissionId};
use crate::policy::ModerationPolicy;
use crate::repo::submission_repo::{ModerationFlag, RepoError, SubmissionRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Moderation failure other than a missing id.
#[derive(Debug)]
pub enum ModerationError {
    /// `feature` was called on a record that is not approved yet.
    FeatureRequiresApproval(SubmissionId),
    Repo(RepoError),
}

impl Display for ModerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FeatureRequiresApproval(id) => {
                write!(f, "submission {id} must be approved before it can be featured")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ModerationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::FeatureRequiresApproval(_) => None,
        }
    }
}

impl From<RepoError> for ModerationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Moderation facade over a submission repository.
pub struct ModerationService<R: SubmissionRepository> {
    repo: R,
    policy: ModerationPolicy,
}

impl<R: SubmissionRepository> ModerationService<R> {
    /// Creates a service with the default policy.
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, ModerationPolicy::default())
    }

    pub fn with_policy(repo: R, policy: ModerationPolicy) -> Self {
        Self { repo, policy }
    }

    /// Marks a submission approved.
    pub fn approve(&self, id: SubmissionId) -> Result<bool, ModerationError> {
        let found = self.repo.set_flag(id, ModerationFlag::Approved)?;
        log_transition("approve", id, found);
        Ok(found)
    }

    /// Permanently removes a submission.
    pub fn reject(&self, id: SubmissionId) -> Result<bool, ModerationError> {
        let found = self.repo.delete_submission(id)?;
        log_transition("reject", id, found);
        Ok(found)
    }

    /// Marks a submission featured.
    ///
    /// # Errors
    /// - `ModerationError::FeatureRequiresApproval` when the policy demands
    ///   approval first and the record is still pending.
    pub fn feature(&self, id: SubmissionId) -> Result<bool, ModerationError> {
        if self.policy.feature_requires_approval {
            match self.repo.get_submission(id)? {
                None => {
                    log_transition("feature", id, false);
                    return Ok(false);
                }
                Some(submission) if !submission.approved => {
                    warn!(
                        "event=moderation module=moderation action=feature status=rejected submission_id={} reason=not_approved",
                        id
                    );
                    return Err(ModerationError::FeatureRequiresApproval(id));
                }
                Some(_) => {}
            }
        }

        // Approval is never revoked, so only a concurrent reject can land
        // between the check above and this write; that reports a miss.
        let found = self.repo.set_flag(id, ModerationFlag::Featured)?;
        log_transition("feature", id, found);
        Ok(found)
    }

    /// Gets one submission in any moderation state.
    pub fn get_by_id(&self, id: SubmissionId) -> Result<Option<Submission>, ModerationError> {
        Ok(self.repo.get_submission(id)?)
    }
}

fn log_transition(action: &str, id: SubmissionId, found: bool) {
    info!(
        "event=moderation module=moderation action={} status={} submission_id={}",
        action,
        if found { "ok" } else { "miss" },
        id
    );
}
