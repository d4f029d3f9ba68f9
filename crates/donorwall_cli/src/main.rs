//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `donorwall_core` linkage with a deterministic in-memory smoke run.
//! - Optionally write core logs when given an absolute log directory.

use donorwall_core::{
    CurationService, InMemorySubmissionRepository, IntakeService, ModerationService,
    SubmissionDraft,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Some(log_dir) = std::env::args().nth(1) {
        if let Err(err) = donorwall_core::init_logging(donorwall_core::default_log_level(), &log_dir)
        {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("donorwall_core version={}", donorwall_core::core_version());
    match smoke() {
        Ok((visible, pending)) => {
            println!("donorwall_core smoke visible={visible} pending={pending}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("donorwall_core smoke failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn smoke() -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);
    let curation = CurationService::with_seed(&repo, 7);

    let shown = intake.submit(smoke_draft(true))?;
    intake.submit(smoke_draft(false))?;
    moderation.approve(shown)?;

    Ok((curation.get_approved_count()?, curation.get_pending_count()?))
}

fn smoke_draft(consent: bool) -> SubmissionDraft {
    SubmissionDraft {
        submitter_name: "smoke".to_string(),
        contact: "smoke@localhost".to_string(),
        photos: vec!["smoke://photo".to_string()],
        city: "Smoke City".to_string(),
        drop_off_location: "Smoke Hall".to_string(),
        caption: String::new(),
        consent,
        featured: None,
    }
}
