use super::domain::{
    Deadline, DeadlineId, IdSequence, Requirement, RequirementId, Stage, StageId, TrackerError,
    University, UniversityId,
};
use super::intake::{
    non_blank, non_blank_id, required_name, DeadlineDraft, RequirementDraft, StageDraft,
    UniversityDraft, ValidationRejection,
};
use super::seed;

/// Universities, stages, requirements, and deadlines held for the process lifetime.
///
/// Stages are kept stably sorted by `order`; every other collection keeps
/// insertion order.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    universities: Vec<University>,
    stages: Vec<Stage>,
    requirements: Vec<Requirement>,
    deadlines: Vec<Deadline>,
    university_ids: IdSequence,
    stage_ids: IdSequence,
    requirement_ids: IdSequence,
    deadline_ids: IdSequence,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self {
            universities: Vec::new(),
            stages: Vec::new(),
            requirements: Vec::new(),
            deadlines: Vec::new(),
            university_ids: IdSequence::new("uni"),
            stage_ids: IdSequence::new("stage"),
            requirement_ids: IdSequence::new("req"),
            deadline_ids: IdSequence::new("deadline"),
        }
    }
}

impl CatalogStore {
    /// Catalog preloaded with the embedded universities and workflow stages.
    pub fn seeded() -> Self {
        let mut catalog = Self {
            universities: seed::default_universities(),
            stages: seed::default_stages(),
            ..Self::default()
        };
        catalog.sort_stages();
        catalog
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    pub fn deadlines(&self) -> &[Deadline] {
        &self.deadlines
    }

    pub fn university(&self, id: &UniversityId) -> Option<&University> {
        self.universities.iter().find(|university| &university.id == id)
    }

    pub fn stage(&self, id: &StageId) -> Option<&Stage> {
        self.stages.iter().find(|stage| &stage.id == id)
    }

    pub fn requirement(&self, id: &RequirementId) -> Option<&Requirement> {
        self.requirements
            .iter()
            .find(|requirement| &requirement.id == id)
    }

    /// Requirements whose stage reference still resolves to `stage`.
    pub fn requirements_for_stage(&self, stage: &StageId) -> Vec<&Requirement> {
        self.requirements
            .iter()
            .filter(|requirement| &requirement.stage_id == stage)
            .filter(|requirement| self.stage(&requirement.stage_id).is_some())
            .collect()
    }

    /// Requirements whose stage has been deleted.
    pub fn orphaned_requirements(&self) -> Vec<&Requirement> {
        self.requirements
            .iter()
            .filter(|requirement| self.stage(&requirement.stage_id).is_none())
            .collect()
    }

    /// Deadlines by ascending date, ties in insertion order.
    pub fn deadlines_by_date(&self) -> Vec<&Deadline> {
        let mut deadlines: Vec<&Deadline> = self.deadlines.iter().collect();
        deadlines.sort_by_key(|deadline| deadline.date);
        deadlines
    }

    pub fn add_university(
        &mut self,
        draft: &UniversityDraft,
    ) -> Result<University, ValidationRejection> {
        let name = required_name(&draft.name, "university")?;
        let university = University {
            id: UniversityId(self.university_ids.next_raw()),
            name,
            city: draft.city.trim().to_string(),
            website: draft.website.trim().to_string(),
            description: draft.description.trim().to_string(),
        };
        self.universities.push(university.clone());
        Ok(university)
    }

    pub fn add_stage(&mut self, draft: &StageDraft) -> Result<Stage, ValidationRejection> {
        let name = required_name(&draft.name, "stage")?;
        let order = draft
            .order
            .unwrap_or_else(|| i32::try_from(self.stages.len() + 1).unwrap_or(i32::MAX));
        let stage = Stage {
            id: StageId(self.stage_ids.next_raw()),
            name,
            order,
        };
        self.stages.push(stage.clone());
        self.sort_stages();
        Ok(stage)
    }

    /// Removes the stage only. Requirements that referenced it are left in
    /// place with a dangling `stage_id`.
    pub fn delete_stage(&mut self, id: &StageId) -> Result<Stage, TrackerError> {
        let index = self
            .stages
            .iter()
            .position(|stage| &stage.id == id)
            .ok_or_else(|| TrackerError::StageNotFound(id.clone()))?;
        Ok(self.stages.remove(index))
    }

    pub fn add_requirement(
        &mut self,
        draft: &RequirementDraft,
    ) -> Result<Requirement, ValidationRejection> {
        let name = required_name(&draft.name, "requirement")?;
        let stage_id = non_blank_id(&draft.stage_id).ok_or(ValidationRejection::MissingStage)?;
        if self.stage(&stage_id).is_none() {
            return Err(ValidationRejection::UnknownStage(stage_id));
        }

        let requirement = Requirement {
            id: RequirementId(self.requirement_ids.next_raw()),
            name,
            description: non_blank(&draft.description),
            due_by: draft.due_by,
            applies_to: draft.applies_to.unwrap_or_default(),
            university_id: non_blank_id(&draft.university_id),
            reminder_frequency: draft.reminder_frequency.unwrap_or_default(),
            stage_id,
        };
        self.requirements.push(requirement.clone());
        Ok(requirement)
    }

    /// Points a requirement at another live stage, replacing the stored record.
    pub fn reassign_requirement(
        &mut self,
        requirement_id: &RequirementId,
        stage_id: &StageId,
    ) -> Result<Requirement, TrackerError> {
        if self.stage(stage_id).is_none() {
            return Err(TrackerError::StageNotFound(stage_id.clone()));
        }
        let slot = self
            .requirements
            .iter_mut()
            .find(|requirement| &requirement.id == requirement_id)
            .ok_or_else(|| TrackerError::RequirementNotFound(requirement_id.clone()))?;

        let replacement = Requirement {
            stage_id: stage_id.clone(),
            ..slot.clone()
        };
        *slot = replacement.clone();
        Ok(replacement)
    }

    pub fn add_deadline(&mut self, draft: &DeadlineDraft) -> Result<Deadline, ValidationRejection> {
        let name = required_name(&draft.name, "deadline")?;
        let date = draft.date.ok_or(ValidationRejection::MissingDate)?;
        let deadline = Deadline {
            id: DeadlineId(self.deadline_ids.next_raw()),
            name,
            date,
            applies_to: draft.applies_to.unwrap_or_default(),
            university_id: non_blank_id(&draft.university_id),
            client_id: non_blank_id(&draft.client_id),
            reminder_frequency: draft.reminder_frequency.unwrap_or_default(),
            description: non_blank(&draft.description),
        };
        self.deadlines.push(deadline.clone());
        Ok(deadline)
    }

    fn sort_stages(&mut self) {
        // stable: equal orders stay in insertion order
        self.stages.sort_by_key(|stage| stage.order);
    }
}
