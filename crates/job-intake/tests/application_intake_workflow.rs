//! End-to-end behavior of the intake flow through the public facade: a form draft is validated,
//! stored on disk, listed, exported, and cleared.

use std::sync::Arc;

use job_intake::applications::{
    render_cards, ApplicationDraft, ApplicationIntakeService, ErrorBoundary, Field, FileStorage,
    IntakeError, Locale, Rendered, SubmissionStore,
};
use serde_json::json;

fn draft(name: &str, phone: &str) -> ApplicationDraft {
    serde_json::from_value(json!({
        "name": name,
        "email": "candidate@example.com",
        "phone": phone,
        "linkedinUrl": "https://www.linkedin.com/in/candidate",
        "educationLevel": "high_school",
        "course": "Técnico em Informática",
        "institution": "ETEC",
        "lastCompany": "Loja Central",
        "lastPosition": "Suporte",
        "experiencePeriod": "2022-2025",
        "technicalSkills": "Redes, Linux",
        "softSkills": "Proatividade",
        "salaryExpectation": 3200,
        "languages": ["Portuguese"],
        "resumeUrl": "https://example.com/cv.pdf",
        "termsAccepted": true
    }))
    .expect("draft json")
}

fn open_service(dir: &std::path::Path) -> ApplicationIntakeService<FileStorage> {
    let store = Arc::new(SubmissionStore::open(FileStorage::new(dir)));
    ApplicationIntakeService::new(store, Locale::En)
}

#[test]
fn submissions_persist_across_service_restarts() {
    let dir = tempfile::tempdir().expect("temp dir");

    let service = open_service(dir.path());
    let first = service
        .submit(&draft("Paulo Lima", "11911112222"))
        .expect("first accepted");
    let second = service
        .submit(&draft("Rita Alves", "1144445555"))
        .expect("second accepted");
    assert!(second.id > first.id, "ids increase with insertion order");

    let restarted = open_service(dir.path());
    let names: Vec<String> = restarted
        .submissions()
        .into_iter()
        .map(|record| record.application.name)
        .collect();
    assert_eq!(names, vec!["Paulo Lima", "Rita Alves"]);
}

#[test]
fn invalid_draft_reports_each_failing_field() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = open_service(dir.path());

    let mut invalid = draft("", "123");
    invalid.remove(Field::LinkedinUrl);

    match service.submit(&invalid) {
        Err(IntakeError::Validation(errors)) => {
            let fields: Vec<Field> = errors.fields().collect();
            assert_eq!(fields, vec![Field::Name, Field::Phone, Field::LinkedinUrl]);
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
    assert!(service.submissions().is_empty());
}

#[test]
fn export_and_clear_cover_the_list_actions() {
    let dir = tempfile::tempdir().expect("temp dir");
    let service = open_service(dir.path());
    service
        .submit(&draft("Paulo Lima", "11911112222"))
        .expect("accepted");

    let export_path = service
        .export_to(dir.path(), "candidaturas.json")
        .expect("export written");
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(export_path).expect("read export"))
            .expect("export is json");
    assert_eq!(exported[0]["name"], "Paulo Lima");

    service.clear().expect("clear");
    assert!(!dir.path().join("jobApplications.json").exists());
    assert!(open_service(dir.path()).submissions().is_empty());
}

#[test]
fn corrupt_storage_renders_empty_list_and_reset_recovers() {
    let dir = tempfile::tempdir().expect("temp dir");
    std::fs::write(dir.path().join("jobApplications.json"), "[{\"id\":")
        .expect("seed corrupt file");

    let service = open_service(dir.path());
    let rendered = ErrorBoundary::new(Locale::En)
        .render(|| Ok(render_cards(&service.cards()?, Locale::En)));
    match rendered {
        Rendered::View(text) => assert_eq!(text, "No applications stored.\n"),
        Rendered::Fallback(notice) => panic!("unexpected fault notice: {notice:?}"),
    }

    service.reset().expect("reset");
    assert!(!dir.path().join("jobApplications.json").exists());
}
