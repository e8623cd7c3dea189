use super::common::*;
use serde_json::json;

use crate::applications::domain::{EducationLevel, Field, Language};
use crate::applications::messages::Locale;
use crate::applications::validation::{validate, ApplicationDraft, Validator};

#[test]
fn valid_draft_produces_trimmed_application() {
    let draft = valid_draft().with(Field::Name, "  Joana Silva  ");
    let application = validate(&draft).expect("draft is valid");

    assert_eq!(application.name, "Joana Silva");
    assert_eq!(application.education_level, EducationLevel::Bachelor);
    assert_eq!(
        application.languages,
        vec![Language::Portuguese, Language::English]
    );
    assert_eq!(application.salary_expectation, 9500.0);
    assert!(application.terms_accepted);
}

#[test]
fn reports_every_invalid_field_in_one_pass() {
    let draft = valid_draft()
        .with(Field::Name, "")
        .with(Field::Phone, "12-3456");

    let errors = validate(&draft).expect_err("two fields invalid");

    assert_eq!(errors.len(), 2, "unexpected errors: {errors}");
    assert!(errors.contains(Field::Name));
    assert!(errors.contains(Field::Phone));
}

#[test]
fn empty_draft_flags_all_sixteen_fields() {
    let errors = validate(&ApplicationDraft::new()).expect_err("nothing supplied");
    assert_eq!(errors.len(), Field::ordered().len());
    assert_eq!(
        errors.get(Field::Languages),
        Some("Select at least one language")
    );
    assert_eq!(
        errors.get(Field::TermsAccepted),
        Some("You must accept the terms and conditions")
    );
}

#[test]
fn two_character_name_fails_only_on_minimum_length() {
    let draft = valid_draft().with(Field::Name, "Jo");
    let errors = validate(&draft).expect_err("name too short");

    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::Name]);
    let message = errors.get(Field::Name).expect("name message");
    assert!(message.contains("Minimum length"), "{message}");
}

#[test]
fn phone_length_bounds() {
    for accepted in ["1234567890", "12345678901"] {
        let draft = valid_draft().with(Field::Phone, accepted);
        assert!(validate(&draft).is_ok(), "{accepted} should pass");
    }
    for rejected in ["123", "123456789012"] {
        let draft = valid_draft().with(Field::Phone, rejected);
        let errors = validate(&draft).expect_err("phone rejected");
        assert_eq!(
            errors.get(Field::Phone),
            Some("Phone must have 10 or 11 digits")
        );
    }
}

#[test]
fn linkedin_url_must_point_at_linkedin() {
    let draft = valid_draft().with(Field::LinkedinUrl, "https://github.com/joana");
    let errors = validate(&draft).expect_err("not a linkedin url");
    assert_eq!(errors.get(Field::LinkedinUrl), Some("Must be a LinkedIn link"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn salary_must_be_strictly_positive() {
    for rejected in [json!(0), json!(-100), json!("abc")] {
        let draft = valid_draft().with(Field::SalaryExpectation, rejected.clone());
        let errors = validate(&draft).expect_err("salary rejected");
        assert!(errors.contains(Field::SalaryExpectation), "{rejected}");
    }

    let draft = valid_draft().with(Field::SalaryExpectation, 1);
    let application = validate(&draft).expect("salary of one accepted");
    assert_eq!(application.salary_expectation, 1.0);
}

#[test]
fn languages_must_be_non_empty_and_known() {
    let empty = valid_draft().with(Field::Languages, json!([]));
    assert!(validate(&empty)
        .expect_err("empty languages")
        .contains(Field::Languages));

    let unknown = valid_draft().with(Field::Languages, json!(["English", "Esperanto"]));
    let errors = validate(&unknown).expect_err("unknown language");
    assert_eq!(
        errors.get(Field::Languages),
        Some("Unsupported language \"Esperanto\"")
    );
}

#[test]
fn terms_must_be_accepted() {
    let draft = valid_draft().with(Field::TermsAccepted, false);
    let errors = validate(&draft).expect_err("terms declined");
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec![Field::TermsAccepted]);
}

#[test]
fn malformed_email_and_resume_url_are_rejected() {
    let draft = valid_draft()
        .with(Field::Email, "joana-at-example")
        .with(Field::ResumeUrl, "drive/joana-cv");
    let errors = validate(&draft).expect_err("email and resume invalid");
    assert_eq!(errors.get(Field::Email), Some("Invalid e-mail address"));
    assert_eq!(errors.get(Field::ResumeUrl), Some("Must be a valid URL"));
}

#[test]
fn resume_url_accepts_ftp_links() {
    let draft = valid_draft().with(Field::ResumeUrl, "ftp://files.example.com/cv.pdf");
    let application = validate(&draft).expect("ftp resume link is valid");
    assert_eq!(application.resume_url, "ftp://files.example.com/cv.pdf");
}

#[test]
fn portuguese_locale_uses_form_messages() {
    let validator = Validator::new(Locale::PtBr);
    let draft = valid_draft()
        .with(Field::Name, "Jo")
        .with(Field::SalaryExpectation, -1);
    let errors = validator.validate(&draft).expect_err("invalid");

    assert_eq!(errors.get(Field::Name), Some("Mínimo de 3 caracteres"));
    assert_eq!(
        errors.get(Field::SalaryExpectation),
        Some("Deve ser um valor positivo")
    );
}

#[test]
fn errors_serialize_keyed_by_wire_name() {
    let draft = valid_draft()
        .with(Field::LinkedinUrl, "")
        .with(Field::ExperiencePeriod, "");
    let errors = validate(&draft).expect_err("invalid");
    let encoded = serde_json::to_value(&errors).expect("serializes");

    assert_eq!(
        encoded,
        json!({
            "linkedinUrl": "LinkedIn is required",
            "experiencePeriod": "Period is required",
        })
    );
}

#[test]
fn draft_deserializes_from_form_json() {
    let draft: ApplicationDraft = serde_json::from_value(json!({
        "name": "Ana Costa",
        "email": "ana@example.com",
        "phone": "1133334444",
        "linkedinUrl": "https://linkedin.com/in/ana",
        "educationLevel": "doctorate",
        "course": "Física",
        "institution": "UNICAMP",
        "lastCompany": "Lab",
        "lastPosition": "Pesquisadora",
        "experiencePeriod": "2018-2024",
        "technicalSkills": "Python",
        "softSkills": "Liderança",
        "salaryExpectation": "12000",
        "languages": "Português, Francês",
        "resumeUrl": "https://example.com/ana.pdf",
        "termsAccepted": "on",
        "unrelated": "ignored"
    }))
    .expect("draft deserializes");

    let application = validate(&draft).expect("valid");
    assert_eq!(application.education_level, EducationLevel::Doctorate);
    assert_eq!(
        application.languages,
        vec![Language::Portuguese, Language::French]
    );
    assert_eq!(application.salary_expectation, 12000.0);
}
