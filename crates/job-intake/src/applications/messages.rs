use serde::{Deserialize, Serialize};

use super::domain::Field;

/// Language used for labels and validation messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" | "english" => Some(Self::En),
            "pt" | "pt-br" | "portuguese" => Some(Self::PtBr),
            _ => None,
        }
    }
}

/// The first rule a field value failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Required,
    WrongType,
    TooShort { min: usize },
    InvalidEmail,
    InvalidPhone,
    InvalidUrl,
    MissingSubstring(&'static str),
    UnknownChoice(String),
    NotANumber,
    NotPositive,
    EmptyList,
    UnknownLanguage(String),
    MustAccept,
}

impl Violation {
    pub fn message(&self, field: Field, locale: Locale) -> String {
        match locale {
            Locale::En => self.english(field),
            Locale::PtBr => self.portuguese(field),
        }
    }

    fn english(&self, field: Field) -> String {
        match self {
            Violation::Required => match field {
                Field::Languages => "Select at least one language".to_string(),
                Field::TermsAccepted => "You must accept the terms and conditions".to_string(),
                other => format!("{} is required", other.label(Locale::En)),
            },
            Violation::WrongType => "Unexpected value type".to_string(),
            Violation::TooShort { min } => format!("Minimum length is {min} characters"),
            Violation::InvalidEmail => "Invalid e-mail address".to_string(),
            Violation::InvalidPhone => "Phone must have 10 or 11 digits".to_string(),
            Violation::InvalidUrl => "Must be a valid URL".to_string(),
            Violation::MissingSubstring(needle) if *needle == "linkedin.com" => {
                "Must be a LinkedIn link".to_string()
            }
            Violation::MissingSubstring(needle) => format!("Must contain \"{needle}\""),
            Violation::UnknownChoice(value) => format!("Unknown option \"{value}\""),
            Violation::NotANumber => "Must be a number".to_string(),
            Violation::NotPositive => "Must be a positive value".to_string(),
            Violation::EmptyList => "Select at least one language".to_string(),
            Violation::UnknownLanguage(value) => format!("Unsupported language \"{value}\""),
            Violation::MustAccept => "You must accept the terms and conditions".to_string(),
        }
    }

    fn portuguese(&self, field: Field) -> String {
        match self {
            Violation::Required => required_pt(field).to_string(),
            Violation::WrongType => "Tipo de valor inesperado".to_string(),
            Violation::TooShort { min } => format!("Mínimo de {min} caracteres"),
            Violation::InvalidEmail => "E-mail inválido".to_string(),
            Violation::InvalidPhone => "Telefone deve ter 10 ou 11 dígitos".to_string(),
            Violation::InvalidUrl => "Deve ser uma URL válida".to_string(),
            Violation::MissingSubstring(needle) if *needle == "linkedin.com" => {
                "Deve ser um link do LinkedIn".to_string()
            }
            Violation::MissingSubstring(needle) => format!("Deve conter \"{needle}\""),
            Violation::UnknownChoice(value) => format!("Opção desconhecida \"{value}\""),
            Violation::NotANumber => "Deve ser um número".to_string(),
            Violation::NotPositive => "Deve ser um valor positivo".to_string(),
            Violation::EmptyList => "Selecione pelo menos um idioma".to_string(),
            Violation::UnknownLanguage(value) => format!("Idioma não suportado \"{value}\""),
            Violation::MustAccept => "Você deve aceitar os termos e condições".to_string(),
        }
    }
}

fn required_pt(field: Field) -> &'static str {
    match field {
        Field::Name => "Nome é obrigatório",
        Field::Email => "E-mail é obrigatório",
        Field::Phone => "Telefone é obrigatório",
        Field::LinkedinUrl => "LinkedIn é obrigatório",
        Field::EducationLevel => "Nível de escolaridade é obrigatório",
        Field::Course => "Curso é obrigatório",
        Field::Institution => "Instituição é obrigatória",
        Field::LastCompany => "Última empresa é obrigatória",
        Field::LastPosition => "Último cargo é obrigatório",
        Field::ExperiencePeriod => "Período de experiência é obrigatório",
        Field::TechnicalSkills => "Habilidades técnicas são obrigatórias",
        Field::SoftSkills => "Habilidades comportamentais são obrigatórias",
        Field::SalaryExpectation => "Pretensão salarial é obrigatória",
        Field::Languages => "Selecione pelo menos um idioma",
        Field::ResumeUrl => "Link do currículo é obrigatório",
        Field::TermsAccepted => "Você deve aceitar os termos e condições",
    }
}
