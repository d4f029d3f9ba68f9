//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define the storage contract the moderation store is built on.
//! - Keep backend details away from intake and curation services.
//!
//! # Invariants
//! - Repository APIs report missing ids as `false`/`None`, never as errors.
//! - Every backend filters through `SubmissionListQuery::matches`.

pub mod memory_repo;
pub mod submission_repo;
