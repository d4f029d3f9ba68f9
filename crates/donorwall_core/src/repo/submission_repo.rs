//! Submission repository contracts.
//!
//! # Responsibility
//! - Define the storage boundary owned by the moderation store.
//! - Define the shared query shape so every backend filters and orders the
//!   same way.
//!
//! # Invariants
//! - There is no content-update operation: after insert only the
//!   `approved`/`featured` flags change, and `reject` is a hard delete.
//! - Inserting a nil or already-known id fails; ids are never reused.
//! - List results are ordered `created_at DESC`, ties by intake order with
//!   the later intake first.
//! - The store owns timestamp order: a stored `created_at` is never lower
//!   than that of any earlier insert, whichever intake service stamped it.

use crate::model::submission::{match_key, Submission, SubmissionId, SubmissionValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for submission persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(SubmissionValidationError),
    Conflict(SubmissionId),
    LockPoisoned(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Conflict(id) => write!(f, "submission id already exists: {id}"),
            Self::LockPoisoned(store) => write!(f, "{store} lock poisoned by a panicked writer"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Conflict(_) | Self::LockPoisoned(_) => None,
        }
    }
}

impl From<SubmissionValidationError> for RepoError {
    fn from(value: SubmissionValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Moderation flag that a store transition turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationFlag {
    Approved,
    Featured,
}

/// Which moderation states a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisibilityScope {
    /// `approved && consent`.
    #[default]
    Public,
    /// `!approved`, regardless of consent.
    Pending,
    /// Everything, for admin tooling.
    All,
}

/// Query options for listing and counting submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionListQuery {
    pub scope: VisibilityScope,
    pub featured_only: bool,
    /// Case-insensitive exact match on `city`.
    pub city: Option<String>,
    /// Case-insensitive exact match on `drop_off_location`.
    pub location: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

impl SubmissionListQuery {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            scope: VisibilityScope::Pending,
            ..Self::default()
        }
    }

    /// Returns whether `submission` passes every filter of this query.
    ///
    /// Pagination is not applied here.
    pub fn matches(&self, submission: &Submission) -> bool {
        let in_scope = match self.scope {
            VisibilityScope::Public => submission.is_publicly_visible(),
            VisibilityScope::Pending => submission.is_pending(),
            VisibilityScope::All => true,
        };
        if !in_scope || (self.featured_only && !submission.featured) {
            return false;
        }
        if let Some(city) = self.city.as_deref() {
            if match_key(&submission.city) != match_key(city) {
                return false;
            }
        }
        if let Some(location) = self.location.as_deref() {
            if match_key(&submission.drop_off_location) != match_key(location) {
                return false;
            }
        }
        true
    }
}

/// Storage contract for the moderation store.
///
/// Implementations must be safe to share across threads: every call
/// observes one consistent snapshot, and writes are exclusive.
pub trait SubmissionRepository: Send + Sync {
    /// Inserts a freshly stamped record and returns its id.
    ///
    /// A `created_at` older than the latest stored stamp is raised to it.
    fn insert_submission(&self, submission: &Submission) -> RepoResult<SubmissionId>;
    /// Gets one record regardless of moderation state.
    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>>;
    /// Turns `flag` on. Returns `false` when no record has this id.
    fn set_flag(&self, id: SubmissionId, flag: ModerationFlag) -> RepoResult<bool>;
    /// Removes the record permanently. Returns `false` when no record has this id.
    fn delete_submission(&self, id: SubmissionId) -> RepoResult<bool>;
    /// Lists matching records, newest first, with pagination applied.
    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>>;
    /// Counts matching records, ignoring pagination.
    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<usize>;
    /// Lists one page and counts all matches from the same snapshot.
    fn list_with_total(&self, query: &SubmissionListQuery)
        -> RepoResult<(Vec<Submission>, usize)>;
}

impl<T: SubmissionRepository + ?Sized> SubmissionRepository for &T {
    fn insert_submission(&self, submission: &Submission) -> RepoResult<SubmissionId> {
        (**self).insert_submission(submission)
    }

    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>> {
        (**self).get_submission(id)
    }

    fn set_flag(&self, id: SubmissionId, flag: ModerationFlag) -> RepoResult<bool> {
        (**self).set_flag(id, flag)
    }

    fn delete_submission(&self, id: SubmissionId) -> RepoResult<bool> {
        (**self).delete_submission(id)
    }

    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>> {
        (**self).list_submissions(query)
    }

    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<usize> {
        (**self).count_submissions(query)
    }

    fn list_with_total(
        &self,
        query: &SubmissionListQuery,
    ) -> RepoResult<(Vec<Submission>, usize)> {
        (**self).list_with_total(query)
    }
}

impl<T: SubmissionRepository + ?Sized> SubmissionRepository for Arc<T> {
    fn insert_submission(&self, submission: &Submission) -> RepoResult<SubmissionId> {
        (**self).insert_submission(submission)
    }

    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>> {
        (**self).get_submission(id)
    }

    fn set_flag(&self, id: SubmissionId, flag: ModerationFlag) -> RepoResult<bool> {
        (**self).set_flag(id, flag)
    }

    fn delete_submission(&self, id: SubmissionId) -> RepoResult<bool> {
        (**self).delete_submission(id)
    }

    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>> {
        (**self).list_submissions(query)
    }

    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<usize> {
        (**self).count_submissions(query)
    }

    fn list_with_total(
        &self,
        query: &SubmissionListQuery,
    ) -> RepoResult<(Vec<Submission>, usize)> {
        (**self).list_with_total(query)
    }
}

#[cfg(test)]
mod tests {
    use super::{SubmissionListQuery, VisibilityScope};
    use crate::model::submission::{Submission, SubmissionDraft};

    fn record(city: &str, consent: bool, approved: bool) -> Submission {
        let mut submission = Submission::from_draft(
            SubmissionDraft {
                city: city.to_string(),
                drop_off_location: "Town Hall".to_string(),
                consent,
                ..SubmissionDraft::default()
            },
            0,
        );
        submission.approved = approved;
        submission
    }

    #[test]
    fn public_scope_applies_visibility_predicate() {
        let query = SubmissionListQuery::public();
        assert!(query.matches(&record("Braga", true, true)));
        assert!(!query.matches(&record("Braga", false, true)));
        assert!(!query.matches(&record("Braga", true, false)));
    }

    #[test]
    fn pending_scope_ignores_consent() {
        let query = SubmissionListQuery::pending();
        assert!(query.matches(&record("Braga", false, false)));
        assert!(!query.matches(&record("Braga", true, true)));
    }

    #[test]
    fn city_filter_is_case_insensitive_exact_match() {
        let query = SubmissionListQuery {
            city: Some("BRAGA".to_string()),
            ..SubmissionListQuery::public()
        };
        assert!(query.matches(&record("braga", true, true)));
        assert!(!query.matches(&record("Braga Norte", true, true)));
    }

    #[test]
    fn all_scope_with_location_filter() {
        let query = SubmissionListQuery {
            scope: VisibilityScope::All,
            location: Some("town hall".to_string()),
            ..SubmissionListQuery::default()
        };
        assert!(query.matches(&record("Faro", false, false)));
    }
}
