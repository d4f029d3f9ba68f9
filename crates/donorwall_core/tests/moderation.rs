use donorwall_core::{
    CurationService, InMemorySubmissionRepository, IntakeService, ModerationError,
    ModerationPolicy, ModerationService, SubmissionDraft,
};
use uuid::Uuid;

fn draft(consent: bool) -> SubmissionDraft {
    SubmissionDraft {
        submitter_name: "Tiago".to_string(),
        contact: "tiago@example.org".to_string(),
        photos: vec!["https://cdn.example.org/tiago.jpg".to_string()],
        city: "Braga".to_string(),
        drop_off_location: "Se Cathedral".to_string(),
        caption: "Canned food".to_string(),
        consent,
        featured: None,
    }
}

#[test]
fn consenting_submission_walks_full_lifecycle() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);
    let curation = CurationService::with_seed(&repo, 1);

    let id = intake.submit(draft(true)).unwrap();
    assert!(curation.get_approved().unwrap().is_empty());

    assert!(moderation.approve(id).unwrap());
    let approved = curation.get_approved().unwrap();
    assert_eq!(approved.len(), 1);
    assert_eq!(approved[0].id, id);

    assert!(moderation.feature(id).unwrap());
    let featured = curation.get_featured().unwrap();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0].id, id);

    assert!(moderation.reject(id).unwrap());
    assert!(curation.get_approved().unwrap().is_empty());
    assert!(curation.get_featured().unwrap().is_empty());
    assert!(moderation.get_by_id(id).unwrap().is_none());
}

#[test]
fn approval_does_not_override_missing_consent() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);
    let curation = CurationService::with_seed(&repo, 1);

    let id = intake.submit(draft(false)).unwrap();
    assert!(moderation.approve(id).unwrap());

    assert!(curation.get_approved().unwrap().is_empty());
    assert_eq!(curation.get_approved_count().unwrap(), 0);
    let stored = moderation.get_by_id(id).unwrap().unwrap();
    assert!(stored.approved);
    assert!(!stored.consent);
}

#[test]
fn approve_and_feature_are_idempotent() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);

    let id = intake.submit(draft(true)).unwrap();
    assert!(moderation.approve(id).unwrap());
    let once = moderation.get_by_id(id).unwrap().unwrap();
    assert!(moderation.approve(id).unwrap());
    assert_eq!(moderation.get_by_id(id).unwrap().unwrap(), once);

    assert!(moderation.feature(id).unwrap());
    let featured_once = moderation.get_by_id(id).unwrap().unwrap();
    assert!(moderation.feature(id).unwrap());
    assert_eq!(moderation.get_by_id(id).unwrap().unwrap(), featured_once);
}

#[test]
fn unknown_ids_report_false_without_error() {
    let repo = InMemorySubmissionRepository::new();
    let moderation = ModerationService::new(&repo);
    let missing = Uuid::new_v4();

    assert!(!moderation.approve(missing).unwrap());
    assert!(!moderation.reject(missing).unwrap());
    assert!(!moderation.feature(missing).unwrap());
    assert!(moderation.get_by_id(missing).unwrap().is_none());
}

#[test]
fn reject_twice_reports_miss_the_second_time() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);

    let id = intake.submit(draft(true)).unwrap();
    assert!(moderation.reject(id).unwrap());
    assert!(!moderation.reject(id).unwrap());
    assert!(!moderation.approve(id).unwrap());
}

#[test]
fn feature_before_approval_is_refused_by_default() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);

    let id = intake.submit(draft(true)).unwrap();
    let err = moderation.feature(id).unwrap_err();
    assert!(matches!(err, ModerationError::FeatureRequiresApproval(rejected) if rejected == id));
    assert!(!moderation.get_by_id(id).unwrap().unwrap().featured);
}

#[test]
fn permissive_policy_features_pending_records_without_exposing_them() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::with_policy(&repo, ModerationPolicy::permissive());
    let curation = CurationService::with_seed(&repo, 3);

    let id = intake.submit(draft(true)).unwrap();
    assert!(moderation.feature(id).unwrap());
    assert!(moderation.get_by_id(id).unwrap().unwrap().featured);
    assert!(curation.get_featured().unwrap().is_empty());

    moderation.approve(id).unwrap();
    assert_eq!(curation.get_featured().unwrap().len(), 1);
}

#[test]
fn consent_survives_every_transition() {
    let repo = InMemorySubmissionRepository::new();
    let intake = IntakeService::new(&repo);
    let moderation = ModerationService::new(&repo);

    let id = intake.submit(draft(false)).unwrap();
    moderation.approve(id).unwrap();
    moderation.feature(id).unwrap();
    assert!(!moderation.get_by_id(id).unwrap().unwrap().consent);
}
