use super::super::domain::{
    AppliesTo, CandidateType, ClientId, DeadlineId, ReminderFrequency, RequirementId, StageId,
    UniversityId,
};
use super::super::progress::{OverallProgress, StageStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementChecklistItem {
    pub id: RequirementId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<NaiveDate>,
    pub applies_to: AppliesTo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<UniversityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    pub reminder_frequency: ReminderFrequency,
    pub reminder_label: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageProgressEntry {
    pub stage_id: StageId,
    pub stage_name: String,
    pub order: i32,
    pub completed: usize,
    pub total: usize,
    pub status: StageStatus,
    pub status_label: &'static str,
    pub requirements: Vec<RequirementChecklistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeadlineView {
    pub id: DeadlineId,
    pub name: String,
    pub date: NaiveDate,
    pub applies_to: AppliesTo,
    pub applies_to_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    pub reminder_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-client tracker view: overall progress, stages in order, and requirements
/// whose stage has been deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProgressReport {
    pub client_id: ClientId,
    pub client_name: String,
    pub candidate_type: CandidateType,
    pub stream_label: &'static str,
    pub overall: OverallProgress,
    pub stages: Vec<StageProgressEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned: Vec<RequirementChecklistItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deadlines: Vec<DeadlineView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientSummaryView {
    pub client_id: ClientId,
    pub name: String,
    pub email: String,
    pub candidate_type: CandidateType,
    pub stream_label: &'static str,
    pub progress_percent: u8,
    pub applicable: usize,
    pub completed: usize,
    pub stages_complete: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageCatalogEntry {
    pub id: StageId,
    pub name: String,
    pub order: i32,
    pub requirement_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub eu_stream: usize,
    pub non_eu_stream: usize,
    pub active_deadlines: usize,
    pub upcoming_deadlines: Vec<DeadlineView>,
}
