use serde::Serialize;

use super::domain::{Client, Requirement, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Nothing in the stage applies to the client.
    NotApplicable,
    Pending,
    Complete,
}

impl StageStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotApplicable => "Not Applicable",
            Self::Pending => "Pending",
            Self::Complete => "Complete",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageProgress {
    pub completed: usize,
    pub total: usize,
}

impl StageProgress {
    /// A stage with no applicable requirements is never complete.
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }

    pub const fn status(&self) -> StageStatus {
        if self.total == 0 {
            StageStatus::NotApplicable
        } else if self.completed == self.total {
            StageStatus::Complete
        } else {
            StageStatus::Pending
        }
    }
}

/// Completion across every applicable requirement.
///
/// `applicable == 0` reports `percent == 0`; callers that need to tell "nothing
/// applies" apart from "nothing done" check [`OverallProgress::has_applicable`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverallProgress {
    pub percent: u8,
    pub completed: usize,
    pub applicable: usize,
}

impl OverallProgress {
    pub const fn has_applicable(&self) -> bool {
        self.applicable > 0
    }
}

pub fn stage_progress(client: &Client, stage: &Stage, applicable: &[&Requirement]) -> StageProgress {
    applicable
        .iter()
        .filter(|requirement| requirement.stage_id == stage.id)
        .fold(StageProgress::default(), |mut progress, requirement| {
            progress.total += 1;
            if client.has_completed(&requirement.id) {
                progress.completed += 1;
            }
            progress
        })
}

/// Completion ids outside `applicable` (stale or inapplicable toggles) do not count.
pub fn overall_progress(client: &Client, applicable: &[&Requirement]) -> OverallProgress {
    let completed = applicable
        .iter()
        .filter(|requirement| client.has_completed(&requirement.id))
        .count();
    let total = applicable.len();
    let ratio = completed as f64 / total.max(1) as f64;
    let percent = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;

    OverallProgress {
        percent,
        completed,
        applicable: total,
    }
}

/// Stages ascending by `order`; equal orders keep their input position.
pub fn ordered_stages(stages: &[Stage]) -> Vec<&Stage> {
    let mut ordered: Vec<&Stage> = stages.iter().collect();
    ordered.sort_by_key(|stage| stage.order);
    ordered
}
