//! Explicit field descriptors for the intake form.
//!
//! Each descriptor pairs a [`Field`] with the kind of input it collects and the ordered rules its
//! value must satisfy. Every field is required; the coercion step reports a missing value before
//! any rule runs, and the first failing rule is the one reported for that field.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use url::Url;
use validator::ValidateEmail;

use super::domain::{EducationLevel, Field, Language};
use super::messages::{Locale, Violation};

const NAME_MIN_CHARS: usize = 3;
const LINKEDIN_HOST: &str = "linkedin.com";

/// Input widget category; decides how the raw value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Url,
    Choice,
    Number,
    MultiChoice,
    Checkbox,
}

impl FieldKind {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Url => "url",
            Self::Choice => "choice",
            Self::Number => "number",
            Self::MultiChoice => "multi_choice",
            Self::Checkbox => "checkbox",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    MinChars(usize),
    Email,
    PhoneDigits,
    Url,
    Contains(&'static str),
    EducationLevel,
    Positive,
    KnownLanguages,
    MustBeTrue,
}

/// Coerced value for a single field once all of its rules passed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Education(EducationLevel),
    Languages(Vec<Language>),
    Flag(bool),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub field: Field,
    pub kind: FieldKind,
    pub rules: &'static [Rule],
}

pub static FIELDS: [FieldDescriptor; 16] = [
    FieldDescriptor {
        field: Field::Name,
        kind: FieldKind::Text,
        rules: &[Rule::MinChars(NAME_MIN_CHARS)],
    },
    FieldDescriptor {
        field: Field::Email,
        kind: FieldKind::Email,
        rules: &[Rule::Email],
    },
    FieldDescriptor {
        field: Field::Phone,
        kind: FieldKind::Phone,
        rules: &[Rule::PhoneDigits],
    },
    FieldDescriptor {
        field: Field::LinkedinUrl,
        kind: FieldKind::Url,
        rules: &[Rule::Url, Rule::Contains(LINKEDIN_HOST)],
    },
    FieldDescriptor {
        field: Field::EducationLevel,
        kind: FieldKind::Choice,
        rules: &[Rule::EducationLevel],
    },
    FieldDescriptor {
        field: Field::Course,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::Institution,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::LastCompany,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::LastPosition,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::ExperiencePeriod,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::TechnicalSkills,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::SoftSkills,
        kind: FieldKind::Text,
        rules: &[],
    },
    FieldDescriptor {
        field: Field::SalaryExpectation,
        kind: FieldKind::Number,
        rules: &[Rule::Positive],
    },
    FieldDescriptor {
        field: Field::Languages,
        kind: FieldKind::MultiChoice,
        rules: &[Rule::KnownLanguages],
    },
    FieldDescriptor {
        field: Field::ResumeUrl,
        kind: FieldKind::Url,
        rules: &[Rule::Url],
    },
    FieldDescriptor {
        field: Field::TermsAccepted,
        kind: FieldKind::Checkbox,
        rules: &[Rule::MustBeTrue],
    },
];

pub fn descriptor(field: Field) -> &'static FieldDescriptor {
    // FIELDS is declared in `Field::ordered()` order.
    &FIELDS[field as usize]
}

/// Coerced raw value before rule evaluation.
enum Coerced {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Flag(bool),
}

impl FieldDescriptor {
    pub fn label(&self, locale: Locale) -> &'static str {
        self.field.label(locale)
    }

    /// Check a raw draft value, returning the coerced value or the first violated rule.
    pub fn check(&self, raw: Option<&Value>) -> Result<FieldValue, Violation> {
        let mut coerced = self.coerce(raw)?;
        for rule in self.rules {
            coerced = apply(*rule, coerced)?;
        }
        self.finish(coerced)
    }

    fn coerce(&self, raw: Option<&Value>) -> Result<Coerced, Violation> {
        match self.kind {
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Phone
            | FieldKind::Url
            | FieldKind::Choice => coerce_text(raw).map(Coerced::Text),
            FieldKind::Number => coerce_number(raw).map(Coerced::Number),
            FieldKind::MultiChoice => coerce_list(raw).map(Coerced::List),
            FieldKind::Checkbox => Ok(Coerced::Flag(coerce_flag(raw))),
        }
    }

    fn finish(&self, coerced: Coerced) -> Result<FieldValue, Violation> {
        match (self.kind, coerced) {
            (FieldKind::Choice, Coerced::Text(text)) => EducationLevel::from_key(&text)
                .map(FieldValue::Education)
                .ok_or(Violation::UnknownChoice(text)),
            (FieldKind::MultiChoice, Coerced::List(items)) => parse_languages(&items),
            (_, Coerced::Text(text)) => Ok(FieldValue::Text(text)),
            (_, Coerced::Number(number)) => Ok(FieldValue::Number(number)),
            (_, Coerced::List(items)) => parse_languages(&items),
            (_, Coerced::Flag(flag)) => Ok(FieldValue::Flag(flag)),
        }
    }
}

fn apply(rule: Rule, value: Coerced) -> Result<Coerced, Violation> {
    match violation(rule, &value) {
        Some(violation) => Err(violation),
        None => Ok(value),
    }
}

fn violation(rule: Rule, value: &Coerced) -> Option<Violation> {
    match (rule, value) {
        (Rule::MinChars(min), Coerced::Text(text)) if text.chars().count() < min => {
            Some(Violation::TooShort { min })
        }
        (Rule::Email, Coerced::Text(text)) if !text.validate_email() => {
            Some(Violation::InvalidEmail)
        }
        (Rule::PhoneDigits, Coerced::Text(text)) if !phone_pattern().is_match(text) => {
            Some(Violation::InvalidPhone)
        }
        (Rule::Url, Coerced::Text(text)) if !is_web_url(text) => Some(Violation::InvalidUrl),
        (Rule::Contains(needle), Coerced::Text(text)) if !text.contains(needle) => {
            Some(Violation::MissingSubstring(needle))
        }
        (Rule::EducationLevel, Coerced::Text(text)) if EducationLevel::from_key(text).is_none() => {
            Some(Violation::UnknownChoice(text.clone()))
        }
        (Rule::Positive, Coerced::Number(number)) if *number <= 0.0 => {
            Some(Violation::NotPositive)
        }
        (Rule::KnownLanguages, Coerced::List(items)) => items
            .iter()
            .find(|item| Language::parse(item).is_none())
            .map(|unknown| Violation::UnknownLanguage(unknown.clone())),
        (Rule::MustBeTrue, Coerced::Flag(false)) => Some(Violation::MustAccept),
        _ => None,
    }
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10,11}$").expect("phone pattern compiles"))
}

/// http, https and ftp URLs with a host. Scheme-relative `//host/path` links are read as https.
fn is_web_url(raw: &str) -> bool {
    let parsed = match raw.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(raw),
    };
    match parsed {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https" | "ftp") && url.host_str().is_some()
        }
        Err(_) => false,
    }
}

fn coerce_text(raw: Option<&Value>) -> Result<String, Violation> {
    match raw {
        None | Some(Value::Null) => Err(Violation::Required),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                Err(Violation::Required)
            } else {
                Ok(trimmed.to_string())
            }
        }
        Some(Value::Number(number)) => Ok(number.to_string()),
        Some(_) => Err(Violation::WrongType),
    }
}

fn coerce_number(raw: Option<&Value>) -> Result<f64, Violation> {
    let number = match raw {
        None | Some(Value::Null) => return Err(Violation::Required),
        Some(Value::Number(number)) => number.as_f64().ok_or(Violation::NotANumber)?,
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(Violation::Required);
            }
            trimmed.parse::<f64>().map_err(|_| Violation::NotANumber)?
        }
        Some(_) => return Err(Violation::NotANumber),
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(Violation::NotANumber)
    }
}

/// Arrays of strings, or a single comma separated string as posted by plain HTML forms.
fn coerce_list(raw: Option<&Value>) -> Result<Vec<String>, Violation> {
    let items: Vec<String> = match raw {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(values)) => {
            let mut items = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    Value::String(text) if text.trim().is_empty() => {}
                    Value::String(text) => items.push(text.trim().to_string()),
                    other => return Err(Violation::UnknownLanguage(other.to_string())),
                }
            }
            items
        }
        Some(_) => return Err(Violation::WrongType),
    };

    if items.is_empty() {
        Err(Violation::EmptyList)
    } else {
        Ok(items)
    }
}

fn coerce_flag(raw: Option<&Value>) -> bool {
    match raw {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        ),
        Some(Value::Number(number)) => number.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Languages in first-selected order with duplicates collapsed.
fn parse_languages(items: &[String]) -> Result<FieldValue, Violation> {
    let mut languages = Vec::with_capacity(items.len());
    for item in items {
        let language =
            Language::parse(item).ok_or_else(|| Violation::UnknownLanguage(item.clone()))?;
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    Ok(FieldValue::Languages(languages))
}
