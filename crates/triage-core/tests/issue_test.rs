use chrono::{TimeZone, Utc};
use triage_core::errors::TriageErrorCode;
use triage_core::{Issue, IssueRecord, IssueState};

#[test]
fn valid_record_normalizes_defaults() {
    let record = IssueRecord {
        id: Some(42),
        updated_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
        labels: vec!["bug".into(), "bug".into()],
        ..Default::default()
    };
    let issue = Issue::try_from(&record).unwrap();
    assert_eq!(issue.id, 42);
    assert_eq!(issue.title, "");
    assert_eq!(issue.body, "");
    assert_eq!(issue.labels.len(), 1);
    assert_eq!(issue.state, IssueState::Open);
}

#[test]
fn missing_id_is_invalid_input() {
    let record = IssueRecord {
        title: Some("No id".to_string()),
        updated_at: Some(Utc::now()),
        ..Default::default()
    };
    let err = Issue::try_from(&record).unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn missing_updated_at_is_invalid_input() {
    let record = IssueRecord {
        id: Some(1),
        ..Default::default()
    };
    let err = Issue::try_from(&record).unwrap_err();
    assert!(err.to_string().contains("updated_at"));
}

#[test]
fn issue_converts_back_into_a_record() {
    let issue = Issue::new(9, "Title", Utc::now())
        .with_body("Body")
        .with_labels(["docs"])
        .with_state(IssueState::Closed);
    let record = IssueRecord::from(&issue);
    assert_eq!(Issue::try_from(&record).unwrap(), issue);
}
