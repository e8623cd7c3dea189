use std::fmt::Write;

use serde::Serialize;

use super::domain::{ApplicationId, ApplicationRecord, Field};
use super::messages::Locale;

/// Read-only card shown for each stored submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCard {
    pub id: ApplicationId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub education: &'static str,
    pub course: String,
    pub institution: String,
    pub last_company: String,
    pub last_position: String,
    pub experience_period: String,
    pub technical_skills: String,
    pub soft_skills: String,
    pub salary: String,
    pub languages: String,
    pub resume_url: String,
}

impl SubmissionCard {
    pub fn from_record(record: &ApplicationRecord, locale: Locale) -> Self {
        let application = &record.application;
        let languages: Vec<&str> = application
            .languages
            .iter()
            .map(|language| language.label(locale))
            .collect();

        Self {
            id: record.id,
            name: application.name.clone(),
            email: application.email.clone(),
            phone: application.phone.clone(),
            linkedin_url: application.linkedin_url.clone(),
            education: application.education_level.label(locale),
            course: application.course.clone(),
            institution: application.institution.clone(),
            last_company: application.last_company.clone(),
            last_position: application.last_position.clone(),
            experience_period: application.experience_period.clone(),
            technical_skills: application.technical_skills.clone(),
            soft_skills: application.soft_skills.clone(),
            salary: format!("R${}", application.salary_expectation),
            languages: languages.join(", "),
            resume_url: application.resume_url.clone(),
        }
    }

    fn rows(&self) -> [(Field, &str); 14] {
        [
            (Field::Email, self.email.as_str()),
            (Field::Phone, self.phone.as_str()),
            (Field::LinkedinUrl, self.linkedin_url.as_str()),
            (Field::EducationLevel, self.education),
            (Field::Course, self.course.as_str()),
            (Field::Institution, self.institution.as_str()),
            (Field::LastCompany, self.last_company.as_str()),
            (Field::LastPosition, self.last_position.as_str()),
            (Field::ExperiencePeriod, self.experience_period.as_str()),
            (Field::TechnicalSkills, self.technical_skills.as_str()),
            (Field::SoftSkills, self.soft_skills.as_str()),
            (Field::SalaryExpectation, self.salary.as_str()),
            (Field::Languages, self.languages.as_str()),
            (Field::ResumeUrl, self.resume_url.as_str()),
        ]
    }
}

pub fn list_heading(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Received applications",
        Locale::PtBr => "Candidaturas Recebidas",
    }
}

/// Plain-text rendering of the submission list.
pub fn render_cards(cards: &[SubmissionCard], locale: Locale) -> String {
    let mut out = String::new();
    if cards.is_empty() {
        let empty = match locale {
            Locale::En => "No applications stored.",
            Locale::PtBr => "Nenhuma candidatura salva.",
        };
        out.push_str(empty);
        out.push('\n');
        return out;
    }

    let _ = writeln!(out, "{} ({})", list_heading(locale), cards.len());
    for card in cards {
        let _ = writeln!(out);
        let _ = writeln!(out, "#{} {}", card.id, card.name);
        for (field, value) in card.rows() {
            let _ = writeln!(out, "  {}: {}", field.label(locale), value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::domain::{Application, EducationLevel, Language};

    fn record() -> ApplicationRecord {
        ApplicationRecord::new(
            ApplicationId(1_727_000_000_000),
            Application {
                name: "Joana Silva".to_string(),
                email: "joana@example.com".to_string(),
                phone: "11999998888".to_string(),
                linkedin_url: "https://www.linkedin.com/in/joana".to_string(),
                education_level: EducationLevel::Bachelor,
                course: "Sistemas de Informação".to_string(),
                institution: "USP".to_string(),
                last_company: "Acme".to_string(),
                last_position: "Backend Developer".to_string(),
                experience_period: "2020-2025".to_string(),
                technical_skills: "Rust, SQL".to_string(),
                soft_skills: "Communication".to_string(),
                salary_expectation: 8500.0,
                languages: vec![Language::Portuguese, Language::English],
                resume_url: "https://drive.google.com/joana".to_string(),
                terms_accepted: true,
            },
        )
    }

    #[test]
    fn card_localizes_education_and_languages() {
        let card = SubmissionCard::from_record(&record(), Locale::PtBr);
        assert_eq!(card.education, "Graduação");
        assert_eq!(card.languages, "Português, Inglês");
        assert_eq!(card.salary, "R$8500");
    }

    #[test]
    fn render_lists_every_card() {
        let card = SubmissionCard::from_record(&record(), Locale::En);
        let rendered = render_cards(&[card], Locale::En);
        assert!(rendered.starts_with("Received applications (1)"));
        assert!(rendered.contains("#1727000000000 Joana Silva"));
        assert!(rendered.contains("  Education level: Bachelor's degree"));
        assert_eq!(
            render_cards(&[], Locale::PtBr),
            "Nenhuma candidatura salva.\n"
        );
    }
}
