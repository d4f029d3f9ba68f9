use donorwall_core::{Submission, SubmissionDraft, SubmissionValidationError};
use uuid::Uuid;

fn draft() -> SubmissionDraft {
    SubmissionDraft {
        submitter_name: "Marta".to_string(),
        contact: "+351 900 000 000".to_string(),
        photos: vec![
            "https://cdn.example.org/a.jpg".to_string(),
            "data:image/png;base64,iVBORw0KGgo=".to_string(),
        ],
        city: "Coimbra".to_string(),
        drop_off_location: "Parish Hall".to_string(),
        caption: "Winter coats".to_string(),
        consent: true,
        featured: None,
    }
}

#[test]
fn from_draft_starts_unapproved_and_keeps_photo_order() {
    let record = Submission::from_draft(draft(), 1_700_000_000_000);

    assert!(!record.id.is_nil());
    assert!(!record.approved);
    assert!(!record.featured);
    assert!(record.is_pending());
    assert_eq!(record.created_at, 1_700_000_000_000);
    assert_eq!(record.photos[0], "https://cdn.example.org/a.jpg");
    assert_eq!(record.photos[1], "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn from_draft_carries_featured_hint() {
    let mut hinted = draft();
    hinted.featured = Some(true);
    let record = Submission::from_draft(hinted, 0);
    assert!(record.featured);
    assert!(!record.approved);
}

#[test]
fn submission_serialization_uses_snake_case_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let mut record = Submission::with_id(id, draft(), 42);
    record.approved = true;

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["submitter_name"], "Marta");
    assert_eq!(json["drop_off_location"], "Parish Hall");
    assert_eq!(json["created_at"], 42);
    assert_eq!(json["approved"], true);
    assert_eq!(json["featured"], false);
    assert_eq!(json["photos"].as_array().unwrap().len(), 2);

    let decoded: Submission = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn draft_deserialization_defaults_optional_fields() {
    let value = serde_json::json!({
        "submitter_name": "Rui",
        "contact": "rui@example.org",
        "city": "Faro",
        "drop_off_location": "Marina",
        "consent": false
    });

    let parsed: SubmissionDraft = serde_json::from_value(value).unwrap();
    assert!(parsed.photos.is_empty());
    assert!(parsed.caption.is_empty());
    assert_eq!(parsed.featured, None);
    assert_eq!(parsed.validate(), Err(SubmissionValidationError::NoPhotos));
}

#[test]
fn validate_accepts_complete_draft_without_consent() {
    let mut no_consent = draft();
    no_consent.consent = false;
    assert_eq!(no_consent.validate(), Ok(()));
}

#[test]
fn validate_rejects_blank_submitter_and_location() {
    let mut blank_name = draft();
    blank_name.submitter_name = "   ".to_string();
    assert_eq!(
        blank_name.validate(),
        Err(SubmissionValidationError::BlankField("submitter_name"))
    );

    let mut blank_location = draft();
    blank_location.drop_off_location = String::new();
    assert_eq!(
        blank_location.validate(),
        Err(SubmissionValidationError::BlankField("drop_off_location"))
    );
}
