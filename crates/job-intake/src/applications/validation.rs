use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{Application, EducationLevel, Field, Language};
use super::messages::{Locale, Violation};
use super::schema::{FieldValue, FIELDS};

/// Unvalidated form input keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationDraft(BTreeMap<String, Value>);

impl ApplicationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<Value>) {
        self.0.insert(field.key().to_string(), value.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<Value> {
        self.0.remove(field.key())
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.0.get(field.key())
    }
}

impl From<BTreeMap<String, Value>> for ApplicationDraft {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self(values)
    }
}

/// One message per invalid field, collected in a single pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: String) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "invalid application ({})", rendered.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Schema-driven validator; the locale only affects error messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    locale: Locale,
}

impl Validator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn validate(&self, draft: &ApplicationDraft) -> Result<Application, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut values = BTreeMap::new();

        for descriptor in FIELDS.iter() {
            match descriptor.check(draft.get(descriptor.field)) {
                Ok(value) => {
                    values.insert(descriptor.field, value);
                }
                Err(violation) => {
                    errors.insert(
                        descriptor.field,
                        violation.message(descriptor.field, self.locale),
                    );
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        assemble(values).map_err(|field| {
            errors.insert(field, Violation::WrongType.message(field, self.locale));
            errors
        })
    }
}

/// Validate with English messages.
pub fn validate(draft: &ApplicationDraft) -> Result<Application, ValidationErrors> {
    Validator::default().validate(draft)
}

/// Build the record from checked values; a value of the wrong kind names its field.
fn assemble(mut values: BTreeMap<Field, FieldValue>) -> Result<Application, Field> {
    Ok(Application {
        name: take_text(&mut values, Field::Name)?,
        email: take_text(&mut values, Field::Email)?,
        phone: take_text(&mut values, Field::Phone)?,
        linkedin_url: take_text(&mut values, Field::LinkedinUrl)?,
        education_level: take_education(&mut values)?,
        course: take_text(&mut values, Field::Course)?,
        institution: take_text(&mut values, Field::Institution)?,
        last_company: take_text(&mut values, Field::LastCompany)?,
        last_position: take_text(&mut values, Field::LastPosition)?,
        experience_period: take_text(&mut values, Field::ExperiencePeriod)?,
        technical_skills: take_text(&mut values, Field::TechnicalSkills)?,
        soft_skills: take_text(&mut values, Field::SoftSkills)?,
        salary_expectation: take_number(&mut values, Field::SalaryExpectation)?,
        languages: take_languages(&mut values)?,
        resume_url: take_text(&mut values, Field::ResumeUrl)?,
        terms_accepted: take_flag(&mut values, Field::TermsAccepted)?,
    })
}

fn take_text(values: &mut BTreeMap<Field, FieldValue>, field: Field) -> Result<String, Field> {
    match values.remove(&field) {
        Some(FieldValue::Text(text)) => Ok(text),
        _ => Err(field),
    }
}

fn take_number(values: &mut BTreeMap<Field, FieldValue>, field: Field) -> Result<f64, Field> {
    match values.remove(&field) {
        Some(FieldValue::Number(number)) => Ok(number),
        _ => Err(field),
    }
}

fn take_flag(values: &mut BTreeMap<Field, FieldValue>, field: Field) -> Result<bool, Field> {
    match values.remove(&field) {
        Some(FieldValue::Flag(flag)) => Ok(flag),
        _ => Err(field),
    }
}

fn take_education(values: &mut BTreeMap<Field, FieldValue>) -> Result<EducationLevel, Field> {
    match values.remove(&Field::EducationLevel) {
        Some(FieldValue::Education(level)) => Ok(level),
        _ => Err(Field::EducationLevel),
    }
}

fn take_languages(values: &mut BTreeMap<Field, FieldValue>) -> Result<Vec<Language>, Field> {
    match values.remove(&Field::Languages) {
        Some(FieldValue::Languages(languages)) => Ok(languages),
        _ => Err(Field::Languages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checked(draft: &ApplicationDraft) -> BTreeMap<Field, FieldValue> {
        FIELDS
            .iter()
            .map(|descriptor| {
                let value = descriptor
                    .check(draft.get(descriptor.field))
                    .expect("field passes");
                (descriptor.field, value)
            })
            .collect()
    }

    fn complete_draft() -> ApplicationDraft {
        ApplicationDraft::new()
            .with(Field::Name, "Ana Souza")
            .with(Field::Email, "ana@example.com")
            .with(Field::Phone, "1133334444")
            .with(Field::LinkedinUrl, "https://linkedin.com/in/ana")
            .with(Field::EducationLevel, "doctorate")
            .with(Field::Course, "Física")
            .with(Field::Institution, "Unicamp")
            .with(Field::LastCompany, "Lab")
            .with(Field::LastPosition, "Pesquisadora")
            .with(Field::ExperiencePeriod, "2018-2024")
            .with(Field::TechnicalSkills, "Python")
            .with(Field::SoftSkills, "Didática")
            .with(Field::SalaryExpectation, 12000)
            .with(Field::Languages, "German")
            .with(Field::ResumeUrl, "https://example.com/ana.pdf")
            .with(Field::TermsAccepted, true)
    }

    #[test]
    fn assemble_uses_every_checked_value() {
        let application = assemble(checked(&complete_draft())).expect("assembles");
        assert_eq!(application.education_level, EducationLevel::Doctorate);
        assert_eq!(application.languages, vec![Language::German]);
        assert!(application.terms_accepted);
    }

    #[test]
    fn assemble_names_the_field_holding_the_wrong_kind() {
        let mut values = checked(&complete_draft());
        values.insert(Field::SalaryExpectation, FieldValue::Text("12000".to_string()));
        assert_eq!(assemble(values.clone()), Err(Field::SalaryExpectation));

        values.remove(&Field::Course);
        assert_eq!(assemble(values), Err(Field::Course));
    }
}
