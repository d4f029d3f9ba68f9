//! Curation query use-cases.
//!
//! # Responsibility
//! - Provide the read-only views consumed by the public wall and the admin
//!   pending queue.
//! - Sample the public set with an injectable random source.
//!
//! # Invariants
//! - Every view except `get_pending` is gated by `approved && consent`.
//! - Views are ordered by `created_at DESC`.
//! - No method here mutates the store.
//! - `get_approved_count` equals `get_approved().len()` for the same state.

use crate::model::submission::Submission;
use crate::repo::submission_repo::{
    RepoError, RepoResult, SubmissionListQuery, SubmissionRepository,
};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

pub const PUBLIC_PAGE_DEFAULT_LIMIT: u32 = 12;
pub const PUBLIC_PAGE_LIMIT_MAX: u32 = 48;

/// One page of the public feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPage {
    /// Page items, newest first.
    pub items: Vec<Submission>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
    /// Size of the whole public set.
    pub total: usize,
}

/// Read-side facade over a submission repository.
pub struct CurationService<R: SubmissionRepository> {
    repo: R,
    rng: Mutex<StdRng>,
}

impl<R: SubmissionRepository> CurationService<R> {
    /// Creates a service whose sampling RNG is seeded from OS entropy.
    pub fn new(repo: R) -> Self {
        Self::with_rng(repo, StdRng::from_entropy())
    }

    /// Creates a service with reproducible sampling.
    pub fn with_seed(repo: R, seed: u64) -> Self {
        Self::with_rng(repo, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(repo: R, rng: StdRng) -> Self {
        Self {
            repo,
            rng: Mutex::new(rng),
        }
    }

    /// All publicly visible submissions.
    pub fn get_approved(&self) -> RepoResult<Vec<Submission>> {
        self.repo.list_submissions(&SubmissionListQuery::public())
    }

    /// Publicly visible submissions marked featured.
    pub fn get_featured(&self) -> RepoResult<Vec<Submission>> {
        self.repo.list_submissions(&SubmissionListQuery {
            featured_only: true,
            ..SubmissionListQuery::public()
        })
    }

    /// Admin queue: every unapproved submission, consenting or not.
    pub fn get_pending(&self) -> RepoResult<Vec<Submission>> {
        self.repo.list_submissions(&SubmissionListQuery::pending())
    }

    pub fn get_pending_count(&self) -> RepoResult<usize> {
        self.repo.count_submissions(&SubmissionListQuery::pending())
    }

    /// Public submissions whose city matches, ignoring case.
    pub fn get_by_city(&self, city: &str) -> RepoResult<Vec<Submission>> {
        self.repo.list_submissions(&SubmissionListQuery {
            city: Some(city.to_string()),
            ..SubmissionListQuery::public()
        })
    }

    /// Public submissions whose drop-off location matches, ignoring case.
    pub fn get_by_location(&self, location: &str) -> RepoResult<Vec<Submission>> {
        self.repo.list_submissions(&SubmissionListQuery {
            location: Some(location.to_string()),
            ..SubmissionListQuery::public()
        })
    }

    pub fn get_approved_count(&self) -> RepoResult<usize> {
        self.repo.count_submissions(&SubmissionListQuery::public())
    }

    /// Lists one page of the public feed.
    ///
    /// `limit` defaults to 12 and clamps to `1..=48`.
    pub fn get_approved_page(&self, limit: Option<u32>, offset: u32) -> RepoResult<PublicPage> {
        let applied_limit = normalize_page_limit(limit);
        let query = SubmissionListQuery {
            limit: Some(applied_limit),
            offset,
            ..SubmissionListQuery::public()
        };
        let (items, total) = self.repo.list_with_total(&query)?;
        Ok(PublicPage {
            items,
            applied_limit,
            total,
        })
    }

    /// Draws `min(n, |public set|)` distinct public submissions uniformly at
    /// random, using the service RNG.
    pub fn get_random_sample(&self, n: usize) -> RepoResult<Vec<Submission>> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| RepoError::LockPoisoned("curation rng"))?;
        self.random_sample_with_rng(n, &mut *rng)
    }

    /// Same as `get_random_sample` with a caller-owned random source.
    pub fn random_sample_with_rng<G: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut G,
    ) -> RepoResult<Vec<Submission>> {
        let visible = self.get_approved()?;
        let sample: Vec<Submission> = visible.choose_multiple(rng, n).cloned().collect();
        debug!(
            "event=random_sample module=curation requested={} visible={} returned={}",
            n,
            visible.len(),
            sample.len()
        );
        Ok(sample)
    }
}

/// Resolves the effective public page size.
pub fn normalize_page_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(PUBLIC_PAGE_DEFAULT_LIMIT)
        .clamp(1, PUBLIC_PAGE_LIMIT_MAX)
}
