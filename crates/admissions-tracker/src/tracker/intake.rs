//! Form drafts submitted by the presentation layer and the rules that gate them.
//!
//! Stores borrow drafts rather than consuming them: a rejected submission
//! leaves both the store and the caller's draft untouched so the form can be
//! corrected and resubmitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classification::classify;
use super::domain::{
    AppliesTo, CandidateType, ClientId, ReminderFrequency, StageId, UniversityId,
};

/// Reasons a mutation was not applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationRejection {
    #[error("{entity} name is required")]
    MissingName { entity: &'static str },
    #[error("requirement must be assigned to a stage")]
    MissingStage,
    #[error("stage {0} does not exist")]
    UnknownStage(StageId),
    #[error("deadline date is required")]
    MissingDate,
    #[error("client intake is missing {field}")]
    MissingContactField { field: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversityDraft {
    pub name: String,
    pub city: String,
    pub website: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageDraft {
    pub name: String,
    /// Falls back to one past the current stage count.
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequirementDraft {
    pub name: String,
    pub description: Option<String>,
    pub due_by: Option<NaiveDate>,
    pub applies_to: Option<AppliesTo>,
    pub university_id: Option<UniversityId>,
    pub reminder_frequency: Option<ReminderFrequency>,
    pub stage_id: Option<StageId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeadlineDraft {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub applies_to: Option<AppliesTo>,
    pub university_id: Option<UniversityId>,
    pub client_id: Option<ClientId>,
    pub reminder_frequency: Option<ReminderFrequency>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientIntake {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub passport_country: String,
    pub residence_country: String,
    pub preferred_universities: Vec<UniversityId>,
}

impl ClientIntake {
    /// Stream the client would be filed under if submitted now. Countries are
    /// compared as stored, i.e. trimmed.
    pub fn preview_stream(&self) -> CandidateType {
        classify(self.passport_country.trim(), self.residence_country.trim())
    }

    pub(crate) fn missing_field(&self) -> Option<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("passport country", &self.passport_country),
            ("residence country", &self.residence_country),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

pub(crate) fn required_name(
    raw: &str,
    entity: &'static str,
) -> Result<String, ValidationRejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationRejection::MissingName { entity })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Forms post empty strings for untouched optional inputs.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub(crate) fn non_blank_id<T: Clone + AsRef<str>>(value: &Option<T>) -> Option<T> {
    value
        .as_ref()
        .filter(|id| !id.as_ref().trim().is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_name_trims_and_rejects_blank() {
        assert_eq!(required_name("  Visa  ", "stage"), Ok("Visa".to_string()));
        assert_eq!(
            required_name("   ", "stage"),
            Err(ValidationRejection::MissingName { entity: "stage" })
        );
    }

    #[test]
    fn blank_optionals_collapse_to_none() {
        assert_eq!(non_blank(&Some("  ".to_string())), None);
        assert_eq!(non_blank(&Some(" x ".to_string())), Some("x".to_string()));
        assert_eq!(non_blank_id(&Some(UniversityId::new(""))), None);
        assert_eq!(
            non_blank_id(&Some(UniversityId::new("2"))),
            Some(UniversityId::new("2"))
        );
    }

    #[test]
    fn intake_reports_first_missing_field() {
        let intake = ClientIntake {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
            ..ClientIntake::default()
        };
        assert_eq!(intake.missing_field(), Some("phone"));
    }

    #[test]
    fn preview_stream_tracks_country_edits() {
        let mut intake = ClientIntake {
            passport_country: "United Kingdom".to_string(),
            residence_country: "United Kingdom".to_string(),
            ..ClientIntake::default()
        };
        assert_eq!(intake.preview_stream(), CandidateType::NonEu);
        intake.residence_country = "Ireland".to_string();
        assert_eq!(intake.preview_stream(), CandidateType::Eu);
    }

    #[test]
    fn preview_ignores_padding_around_countries() {
        let intake = ClientIntake {
            passport_country: "Italy ".to_string(),
            residence_country: " India".to_string(),
            ..ClientIntake::default()
        };
        assert_eq!(intake.preview_stream(), CandidateType::Eu);
    }
}
