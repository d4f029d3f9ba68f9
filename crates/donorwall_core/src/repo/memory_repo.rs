//! In-memory submission repository.
//!
//! # Responsibility
//! - Hold the authoritative submission collection for a single process.
//! - Serve listings and counts from one consistent snapshot per call.
//!
//! # Invariants
//! - Writers take the lock exclusively; readers share it.
//! - Each insert gets a sequence number, used as the tie-breaker for equal
//!   `created_at` values.
//! - Stored `created_at` never decreases across inserts: a stamp older than
//!   the latest one is raised to it under the write lock.

use crate::model::submission::{Submission, SubmissionId, SubmissionValidationError};
use crate::repo::submission_repo::{
    ModerationFlag, RepoError, RepoResult, SubmissionListQuery, SubmissionRepository,
};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const STORE_NAME: &str = "in-memory submission store";

#[derive(Debug)]
struct StoredSubmission {
    seq: u64,
    submission: Submission,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_seq: u64,
    latest_created_at: Option<i64>,
    rows: HashMap<SubmissionId, StoredSubmission>,
}

impl MemoryState {
    fn matching<'a>(
        &'a self,
        query: &'a SubmissionListQuery,
    ) -> impl Iterator<Item = &'a StoredSubmission> + 'a {
        self.rows
            .values()
            .filter(move |row| query.matches(&row.submission))
    }

    fn page(&self, query: &SubmissionListQuery) -> Vec<Submission> {
        let mut rows: Vec<&StoredSubmission> = self.matching(query).collect();
        rows.sort_by_key(|row| (Reverse(row.submission.created_at), Reverse(row.seq)));

        let page = rows.into_iter().skip(query.offset as usize);
        match query.limit {
            Some(limit) => page
                .take(limit as usize)
                .map(|row| row.submission.clone())
                .collect(),
            None => page.map(|row| row.submission.clone()).collect(),
        }
    }
}

/// Process-local repository backed by a `RwLock`-guarded map.
#[derive(Debug, Default)]
pub struct InMemorySubmissionRepository {
    state: RwLock<MemoryState>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records in any moderation state.
    pub fn len(&self) -> RepoResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> RepoResult<bool> {
        Ok(self.read()?.rows.is_empty())
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| RepoError::LockPoisoned(STORE_NAME))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| RepoError::LockPoisoned(STORE_NAME))
    }
}

impl SubmissionRepository for InMemorySubmissionRepository {
    fn insert_submission(&self, submission: &Submission) -> RepoResult<SubmissionId> {
        if submission.id.is_nil() {
            return Err(SubmissionValidationError::NilId.into());
        }

        let mut state = self.write()?;
        if state.rows.contains_key(&submission.id) {
            return Err(RepoError::Conflict(submission.id));
        }

        let mut stored = submission.clone();
        if let Some(latest) = state.latest_created_at {
            stored.created_at = stored.created_at.max(latest);
        }
        state.latest_created_at = Some(stored.created_at);

        let seq = state.next_seq;
        state.next_seq += 1;
        state.rows.insert(
            submission.id,
            StoredSubmission {
                seq,
                submission: stored,
            },
        );
        Ok(submission.id)
    }

    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>> {
        Ok(self
            .read()?
            .rows
            .get(&id)
            .map(|row| row.submission.clone()))
    }

    fn set_flag(&self, id: SubmissionId, flag: ModerationFlag) -> RepoResult<bool> {
        let mut state = self.write()?;
        let Some(row) = state.rows.get_mut(&id) else {
            return Ok(false);
        };

        match flag {
            ModerationFlag::Approved => row.submission.approved = true,
            ModerationFlag::Featured => row.submission.featured = true,
        }
        Ok(true)
    }

    fn delete_submission(&self, id: SubmissionId) -> RepoResult<bool> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>> {
        Ok(self.read()?.page(query))
    }

    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<usize> {
        Ok(self.read()?.matching(query).count())
    }

    fn list_with_total(
        &self,
        query: &SubmissionListQuery,
    ) -> RepoResult<(Vec<Submission>, usize)> {
        let state = self.read()?;
        Ok((state.page(query), state.matching(query).count()))
    }
}
