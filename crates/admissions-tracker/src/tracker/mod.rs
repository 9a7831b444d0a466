//! Admissions tracker: catalog and client stores, the applicability and
//! progress engines, and the service and router that expose them.

pub mod applicability;
pub mod catalog;
pub mod classification;
pub mod clients;
pub mod domain;
pub mod intake;
pub mod progress;
pub mod report;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use applicability::{applicable_requirements, deadlines_for_client, is_applicable};
pub use catalog::CatalogStore;
pub use classification::{classify, intake_countries, EU_COUNTRIES};
pub use clients::ClientStore;
pub use domain::{
    AppliesTo, CandidateType, Client, ClientId, Deadline, DeadlineId, ReminderFrequency,
    Requirement, RequirementId, Stage, StageId, TrackerError, University, UniversityId,
};
pub use intake::{
    ClientIntake, DeadlineDraft, RequirementDraft, StageDraft, UniversityDraft,
    ValidationRejection,
};
pub use progress::{
    ordered_stages, overall_progress, stage_progress, OverallProgress, StageProgress, StageStatus,
};
pub use report::ClientProgressReport;
pub use router::tracker_router;
pub use service::{TrackerService, TrackerServiceError, TrackerState};
