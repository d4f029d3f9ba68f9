//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into intake, moderation and curation APIs.
//! - Keep hosting surfaces decoupled from storage details.
//!
//! Services take the repository by value; pass `&repo` or an `Arc` to share
//! one store between them.

pub mod curation_service;
pub mod intake_service;
pub mod moderation_service;
