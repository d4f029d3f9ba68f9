//! Submission intake use-case.
//!
//! # Responsibility
//! - Turn a caller draft into a stored, unapproved submission.
//! - Assign identity and a non-decreasing creation timestamp.
//!
//! # Invariants
//! - New records always start with `approved = false`.
//! - The `featured` hint is kept only when the policy allows featuring
//!   unapproved records.
//! - Intake logs identities and counts only, never submitter text.

use crate::clock::{Clock, MonotonicClock, SystemClock};
use crate::model::submission::{Submission, SubmissionDraft, SubmissionId, SubmissionValidationError};
use crate::policy::{IntakeValidation, ModerationPolicy};
use crate::repo::submission_repo::{RepoError, SubmissionRepository};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Intake failure.
#[derive(Debug)]
pub enum IntakeError {
    /// Draft failed strict validation.
    Invalid(SubmissionValidationError),
    /// Store rejected the insert.
    Repo(RepoError),
}

impl Display for IntakeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "submission rejected at intake: {err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntakeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<SubmissionValidationError> for IntakeError {
    fn from(value: SubmissionValidationError) -> Self {
        Self::Invalid(value)
    }
}

impl From<RepoError> for IntakeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Intake entry point over a submission repository.
///
/// The service clock keeps this instance's stamps non-decreasing; the store
/// raises any stamp older than its latest insert, so order also holds across
/// several intake services sharing one store.
pub struct IntakeService<R: SubmissionRepository, C: Clock = SystemClock> {
    repo: R,
    clock: MonotonicClock<C>,
    policy: ModerationPolicy,
}

impl<R: SubmissionRepository> IntakeService<R> {
    /// Creates an intake service on the wall clock with the default policy.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock, ModerationPolicy::default())
    }

    pub fn with_policy(repo: R, policy: ModerationPolicy) -> Self {
        Self::with_clock(repo, SystemClock, policy)
    }
}

impl<R: SubmissionRepository, C: Clock> IntakeService<R, C> {
    pub fn with_clock(repo: R, clock: C, policy: ModerationPolicy) -> Self {
        Self {
            repo,
            clock: MonotonicClock::new(clock),
            policy,
        }
    }

    pub fn policy(&self) -> ModerationPolicy {
        self.policy
    }

    /// Stores a new submission and returns its assigned id.
    ///
    /// # Errors
    /// - `IntakeError::Invalid` when strict validation is on and the draft fails it.
    /// - `IntakeError::Repo` when the store refuses the insert.
    pub fn submit(&self, mut draft: SubmissionDraft) -> Result<SubmissionId, IntakeError> {
        let started_at = Instant::now();

        if self.policy.intake_validation == IntakeValidation::Strict {
            if let Err(err) = draft.validate() {
                warn!(
                    "event=submission_intake module=intake status=rejected reason=\"{}\"",
                    err
                );
                return Err(err.into());
            }
        }

        if self.policy.feature_requires_approval && draft.featured == Some(true) {
            debug!("event=submission_intake module=intake featured_hint=dropped");
            draft.featured = None;
        }

        let photo_count = draft.photos.len();
        let submission = Submission::from_draft(draft, self.clock.now_epoch_ms());
        match self.repo.insert_submission(&submission) {
            Ok(id) => {
                info!(
                    "event=submission_intake module=intake status=ok submission_id={} consent={} photos={} duration_ms={}",
                    id,
                    submission.consent,
                    photo_count,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => {
                error!(
                    "event=submission_intake module=intake status=error submission_id={} error={}",
                    submission.id, err
                );
                Err(err.into())
            }
        }
    }
}
