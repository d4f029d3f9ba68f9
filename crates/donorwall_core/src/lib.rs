//! Core domain logic for the community donation wall.
//! This crate owns submission intake, moderation and public curation.

pub mod clock;
pub mod logging;
pub mod model;
pub mod policy;
pub mod repo;
pub mod service;

pub use clock::{Clock, MonotonicClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::submission::{
    Submission, SubmissionDraft, SubmissionId, SubmissionValidationError,
};
pub use policy::{IntakeValidation, ModerationPolicy};
pub use repo::memory_repo::InMemorySubmissionRepository;
pub use repo::submission_repo::{
    ModerationFlag, RepoError, RepoResult, SubmissionListQuery, SubmissionRepository,
    VisibilityScope,
};
pub use service::curation_service::{CurationService, PublicPage};
pub use service::intake_service::{IntakeError, IntakeService};
pub use service::moderation_service::{ModerationError, ModerationService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
