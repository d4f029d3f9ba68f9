//! Domain model for community submissions.
//!
//! # Responsibility
//! - Define the submission record and the draft accepted at intake.
//!
//! # Invariants
//! - Every record is identified by a stable `SubmissionId`.
//! - Rejection is a hard delete; there are no tombstones.

pub mod submission;
