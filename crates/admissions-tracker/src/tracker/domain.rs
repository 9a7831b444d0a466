use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

entity_id!(UniversityId);
entity_id!(StageId);
entity_id!(RequirementId);
entity_id!(DeadlineId);
entity_id!(
    /// Identifier assigned to a client at intake.
    ClientId
);

/// Processing stream a client is classified into at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateType {
    Eu,
    NonEu,
}

impl CandidateType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::NonEu => "Non-EU",
        }
    }
}

/// Stream filter carried by requirements and deadlines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppliesTo {
    Eu,
    NonEu,
    #[default]
    Both,
}

impl AppliesTo {
    pub const fn matches(self, candidate: CandidateType) -> bool {
        match self {
            Self::Both => true,
            Self::Eu => matches!(candidate, CandidateType::Eu),
            Self::NonEu => matches!(candidate, CandidateType::NonEu),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Eu => "EU",
            Self::NonEu => "NON_EU",
            Self::Both => "BOTH",
        }
    }
}

/// How often a reminder should be raised. Stored only; nothing schedules it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderFrequency {
    Daily,
    #[default]
    Weekly,
    #[serde(rename = "Bi-weekly")]
    BiWeekly,
    None,
}

impl ReminderFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::BiWeekly => "Bi-weekly",
            Self::None => "None",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub city: String,
    pub website: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub order: i32,
}

/// Checklist item attached to a stage.
///
/// `stage_id` is not guaranteed to resolve: deleting a stage leaves its
/// requirements pointing at an id that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: RequirementId,
    pub name: String,
    pub description: Option<String>,
    pub due_by: Option<NaiveDate>,
    pub applies_to: AppliesTo,
    pub university_id: Option<UniversityId>,
    pub reminder_frequency: ReminderFrequency,
    pub stage_id: StageId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: DeadlineId,
    pub name: String,
    pub date: NaiveDate,
    pub applies_to: AppliesTo,
    pub university_id: Option<UniversityId>,
    pub client_id: Option<ClientId>,
    pub reminder_frequency: ReminderFrequency,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub upload_date: DateTime<Utc>,
    pub url: String,
}

/// Intake record for a candidate.
///
/// `candidate_type` is computed once when the client is created and never
/// recomputed from the country fields afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub passport_country: String,
    pub residence_country: String,
    pub candidate_type: CandidateType,
    pub preferred_universities: BTreeSet<UniversityId>,
    pub completed_requirement_ids: BTreeSet<RequirementId>,
    pub files: Vec<ClientFile>,
    pub created_at: DateTime<Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn prefers(&self, university: &UniversityId) -> bool {
        self.preferred_universities.contains(university)
    }

    pub fn has_completed(&self, requirement: &RequirementId) -> bool {
        self.completed_requirement_ids.contains(requirement)
    }
}

/// Monotonic id source scoped to one store.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl IdSequence {
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    pub(crate) fn next_raw(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("{}-{id:06}", self.prefix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    ClientNotFound(ClientId),
    StageNotFound(StageId),
    RequirementNotFound(RequirementId),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::ClientNotFound(id) => write!(f, "client with id {id} not found"),
            TrackerError::StageNotFound(id) => write!(f, "stage with id {id} not found"),
            TrackerError::RequirementNotFound(id) => {
                write!(f, "requirement with id {id} not found")
            }
        }
    }
}

impl std::error::Error for TrackerError {}
