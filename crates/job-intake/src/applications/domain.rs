use std::fmt;

use serde::{Deserialize, Serialize};

use super::messages::Locale;

/// Identifier assigned by the submission store: creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub i64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every applicant-supplied attribute of the intake form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    LinkedinUrl,
    EducationLevel,
    Course,
    Institution,
    LastCompany,
    LastPosition,
    ExperiencePeriod,
    TechnicalSkills,
    SoftSkills,
    SalaryExpectation,
    Languages,
    ResumeUrl,
    TermsAccepted,
}

impl Field {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::Name,
            Self::Email,
            Self::Phone,
            Self::LinkedinUrl,
            Self::EducationLevel,
            Self::Course,
            Self::Institution,
            Self::LastCompany,
            Self::LastPosition,
            Self::ExperiencePeriod,
            Self::TechnicalSkills,
            Self::SoftSkills,
            Self::SalaryExpectation,
            Self::Languages,
            Self::ResumeUrl,
            Self::TermsAccepted,
        ]
    }

    /// Key used in drafts, stored records, and error payloads.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::LinkedinUrl => "linkedinUrl",
            Self::EducationLevel => "educationLevel",
            Self::Course => "course",
            Self::Institution => "institution",
            Self::LastCompany => "lastCompany",
            Self::LastPosition => "lastPosition",
            Self::ExperiencePeriod => "experiencePeriod",
            Self::TechnicalSkills => "technicalSkills",
            Self::SoftSkills => "softSkills",
            Self::SalaryExpectation => "salaryExpectation",
            Self::Languages => "languages",
            Self::ResumeUrl => "resumeUrl",
            Self::TermsAccepted => "termsAccepted",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|field| field.key() == key)
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Name => "Full name",
                Self::Email => "E-mail",
                Self::Phone => "Phone",
                Self::LinkedinUrl => "LinkedIn",
                Self::EducationLevel => "Education level",
                Self::Course => "Course",
                Self::Institution => "Institution",
                Self::LastCompany => "Last company",
                Self::LastPosition => "Last position",
                Self::ExperiencePeriod => "Period",
                Self::TechnicalSkills => "Technical skills",
                Self::SoftSkills => "Soft skills",
                Self::SalaryExpectation => "Salary expectation",
                Self::Languages => "Languages",
                Self::ResumeUrl => "Resume link",
                Self::TermsAccepted => "Terms and conditions",
            },
            Locale::PtBr => match self {
                Self::Name => "Nome completo",
                Self::Email => "E-mail",
                Self::Phone => "Telefone",
                Self::LinkedinUrl => "LinkedIn",
                Self::EducationLevel => "Nível de escolaridade",
                Self::Course => "Curso",
                Self::Institution => "Instituição",
                Self::LastCompany => "Última empresa",
                Self::LastPosition => "Cargo",
                Self::ExperiencePeriod => "Período",
                Self::TechnicalSkills => "Habilidades técnicas",
                Self::SoftSkills => "Habilidades comportamentais",
                Self::SalaryExpectation => "Pretensão salarial",
                Self::Languages => "Idiomas",
                Self::ResumeUrl => "Link do currículo",
                Self::TermsAccepted => "Termos e condições",
            },
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Doctorate,
}

impl EducationLevel {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::HighSchool,
            Self::Bachelor,
            Self::Master,
            Self::Doctorate,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::HighSchool => "high_school",
            Self::Bachelor => "bachelor",
            Self::Master => "master",
            Self::Doctorate => "doctorate",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|level| level.key() == key)
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::HighSchool) => "High school",
            (Locale::En, Self::Bachelor) => "Bachelor's degree",
            (Locale::En, Self::Master) => "Master's degree",
            (Locale::En, Self::Doctorate) => "Doctorate",
            (Locale::PtBr, Self::HighSchool) => "Ensino Médio",
            (Locale::PtBr, Self::Bachelor) => "Graduação",
            (Locale::PtBr, Self::Master) => "Mestrado",
            (Locale::PtBr, Self::Doctorate) => "Doutorado",
        }
    }
}

/// Fixed language vocabulary offered by the form.
///
/// The pt-BR aliases keep blobs written by the browser form readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(alias = "Português")]
    Portuguese,
    #[serde(alias = "Inglês")]
    English,
    #[serde(alias = "Espanhol")]
    Spanish,
    #[serde(alias = "Francês")]
    French,
    #[serde(alias = "Alemão")]
    German,
}

impl Language {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Portuguese,
            Self::English,
            Self::Spanish,
            Self::French,
            Self::German,
        ]
    }

    pub const fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, Self::Portuguese) => "Portuguese",
            (Locale::En, Self::English) => "English",
            (Locale::En, Self::Spanish) => "Spanish",
            (Locale::En, Self::French) => "French",
            (Locale::En, Self::German) => "German",
            (Locale::PtBr, Self::Portuguese) => "Português",
            (Locale::PtBr, Self::English) => "Inglês",
            (Locale::PtBr, Self::Spanish) => "Espanhol",
            (Locale::PtBr, Self::French) => "Francês",
            (Locale::PtBr, Self::German) => "Alemão",
        }
    }

    /// Accepts the English or pt-BR name, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        Self::ordered().into_iter().find(|language| {
            [Locale::En, Locale::PtBr]
                .into_iter()
                .any(|locale| language.label(locale).to_lowercase() == needle)
        })
    }
}

/// A draft that passed validation. The store assigns its identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(alias = "linkedin")]
    pub linkedin_url: String,
    pub education_level: EducationLevel,
    pub course: String,
    pub institution: String,
    pub last_company: String,
    pub last_position: String,
    pub experience_period: String,
    pub technical_skills: String,
    pub soft_skills: String,
    pub salary_expectation: f64,
    pub languages: Vec<Language>,
    #[serde(alias = "resumeLink")]
    pub resume_url: String,
    #[serde(alias = "terms")]
    pub terms_accepted: bool,
}

/// Stored submission; serialized as a single flat JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    #[serde(flatten)]
    pub application: Application,
}

impl ApplicationRecord {
    pub fn new(id: ApplicationId, application: Application) -> Self {
        Self { id, application }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_round_trip() {
        for field in Field::ordered() {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("linkedin"), None);
    }

    #[test]
    fn language_parse_accepts_both_vocabularies() {
        assert_eq!(Language::parse("English"), Some(Language::English));
        assert_eq!(Language::parse(" inglês "), Some(Language::English));
        assert_eq!(Language::parse("Alemão"), Some(Language::German));
        assert_eq!(Language::parse("Klingon"), None);
    }

    #[test]
    fn education_level_uses_snake_case_keys() {
        let encoded = serde_json::to_string(&EducationLevel::HighSchool).expect("serializes");
        assert_eq!(encoded, "\"high_school\"");
        assert_eq!(
            EducationLevel::from_key("doctorate"),
            Some(EducationLevel::Doctorate)
        );
    }
}
