use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use super::catalog::CatalogStore;
use super::clients::ClientStore;
use super::domain::{
    Client, ClientId, Deadline, Requirement, RequirementId, Stage, StageId, TrackerError,
    University,
};
use super::intake::{
    ClientIntake, DeadlineDraft, RequirementDraft, StageDraft, UniversityDraft,
    ValidationRejection,
};
use super::report::views::{ClientSummaryView, DashboardSummary, StageCatalogEntry};
use super::report::{self, ClientProgressReport};
use crate::config::TrackerConfig;

/// Both stores, mutated together under one lock.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    pub catalog: CatalogStore,
    pub clients: ClientStore,
}

/// Mutation API and read models over the catalog and client stores.
///
/// Every call takes the single state lock, so mutations from concurrent
/// request handlers are applied one at a time.
pub struct TrackerService {
    state: Mutex<TrackerState>,
    upcoming_deadlines: usize,
}

impl TrackerService {
    pub fn new(state: TrackerState, upcoming_deadlines: usize) -> Self {
        Self {
            state: Mutex::new(state),
            upcoming_deadlines,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        let catalog = if config.seed_catalog {
            CatalogStore::seeded()
        } else {
            CatalogStore::default()
        };
        Self::new(
            TrackerState {
                catalog,
                clients: ClientStore::default(),
            },
            config.upcoming_deadlines,
        )
    }

    fn lock(&self) -> Result<MutexGuard<'_, TrackerState>, TrackerServiceError> {
        self.state
            .lock()
            .map_err(|_| TrackerServiceError::Unavailable)
    }

    /// Copy of both stores for callers that render several views at once.
    pub fn snapshot(&self) -> Result<TrackerState, TrackerServiceError> {
        Ok(self.lock()?.clone())
    }

    pub fn universities(&self) -> Result<Vec<University>, TrackerServiceError> {
        Ok(self.lock()?.catalog.universities().to_vec())
    }

    pub fn stages(&self) -> Result<Vec<StageCatalogEntry>, TrackerServiceError> {
        Ok(report::stage_catalog(&self.lock()?.catalog))
    }

    pub fn requirements(&self) -> Result<Vec<Requirement>, TrackerServiceError> {
        Ok(self.lock()?.catalog.requirements().to_vec())
    }

    pub fn deadlines(&self) -> Result<Vec<Deadline>, TrackerServiceError> {
        Ok(self.lock()?.catalog.deadlines().to_vec())
    }

    pub fn client(&self, id: &ClientId) -> Result<Client, TrackerServiceError> {
        let state = self.lock()?;
        let client = state
            .clients
            .get(id)
            .ok_or_else(|| TrackerError::ClientNotFound(id.clone()))?;
        Ok(client.clone())
    }

    pub fn roster(&self) -> Result<Vec<ClientSummaryView>, TrackerServiceError> {
        let state = self.lock()?;
        Ok(report::client_roster(&state.clients, &state.catalog))
    }

    /// Recomputed from the current catalog on every call.
    pub fn client_progress(
        &self,
        id: &ClientId,
    ) -> Result<ClientProgressReport, TrackerServiceError> {
        let state = self.lock()?;
        let client = state
            .clients
            .get(id)
            .ok_or_else(|| TrackerError::ClientNotFound(id.clone()))?;
        Ok(ClientProgressReport::build(client, &state.catalog))
    }

    pub fn dashboard(&self) -> Result<DashboardSummary, TrackerServiceError> {
        let state = self.lock()?;
        Ok(report::dashboard(
            &state.clients,
            &state.catalog,
            self.upcoming_deadlines,
        ))
    }

    pub fn add_university(
        &self,
        draft: &UniversityDraft,
    ) -> Result<University, TrackerServiceError> {
        let university = self
            .lock()?
            .catalog
            .add_university(draft)
            .inspect_err(|rejection| debug!(%rejection, "university rejected"))?;
        info!(university_id = %university.id, name = %university.name, "university added");
        Ok(university)
    }

    pub fn add_stage(&self, draft: &StageDraft) -> Result<Stage, TrackerServiceError> {
        let stage = self
            .lock()?
            .catalog
            .add_stage(draft)
            .inspect_err(|rejection| debug!(%rejection, "stage rejected"))?;
        info!(stage_id = %stage.id, order = stage.order, "stage added");
        Ok(stage)
    }

    /// Callers are responsible for confirming with the user first.
    pub fn delete_stage(&self, id: &StageId) -> Result<Stage, TrackerServiceError> {
        let mut state = self.lock()?;
        let stage = state.catalog.delete_stage(id)?;
        let orphaned = state
            .catalog
            .requirements()
            .iter()
            .filter(|requirement| &requirement.stage_id == id)
            .count();
        info!(stage_id = %stage.id, orphaned, "stage deleted");
        Ok(stage)
    }

    pub fn add_requirement(
        &self,
        draft: &RequirementDraft,
    ) -> Result<Requirement, TrackerServiceError> {
        let requirement = self
            .lock()?
            .catalog
            .add_requirement(draft)
            .inspect_err(|rejection| debug!(%rejection, "requirement rejected"))?;
        info!(
            requirement_id = %requirement.id,
            stage_id = %requirement.stage_id,
            applies_to = requirement.applies_to.label(),
            "requirement added"
        );
        Ok(requirement)
    }

    pub fn reassign_requirement(
        &self,
        requirement_id: &RequirementId,
        stage_id: &StageId,
    ) -> Result<Requirement, TrackerServiceError> {
        let requirement = self
            .lock()?
            .catalog
            .reassign_requirement(requirement_id, stage_id)?;
        info!(%requirement_id, %stage_id, "requirement reassigned");
        Ok(requirement)
    }

    pub fn add_deadline(&self, draft: &DeadlineDraft) -> Result<Deadline, TrackerServiceError> {
        let deadline = self
            .lock()?
            .catalog
            .add_deadline(draft)
            .inspect_err(|rejection| debug!(%rejection, "deadline rejected"))?;
        info!(deadline_id = %deadline.id, date = %deadline.date, "deadline added");
        Ok(deadline)
    }

    pub fn add_client(&self, intake: &ClientIntake) -> Result<Client, TrackerServiceError> {
        let client = self
            .lock()?
            .clients
            .admit(intake)
            .inspect_err(|rejection| debug!(%rejection, "client intake rejected"))?;
        info!(
            client_id = %client.id,
            stream = client.candidate_type.label(),
            "client admitted"
        );
        Ok(client)
    }

    /// Flips completion of `requirement_id` for the client and returns the new state.
    ///
    /// Marking complete requires the requirement to exist; applicability is not
    /// checked. Unmarking always succeeds.
    pub fn toggle_requirement(
        &self,
        client_id: &ClientId,
        requirement_id: &RequirementId,
    ) -> Result<bool, TrackerServiceError> {
        let mut guard = self.lock()?;
        let TrackerState { catalog, clients } = &mut *guard;

        let client = clients
            .get(client_id)
            .ok_or_else(|| TrackerError::ClientNotFound(client_id.clone()))?;
        if !client.has_completed(requirement_id) && catalog.requirement(requirement_id).is_none()
        {
            return Err(TrackerError::RequirementNotFound(requirement_id.clone()).into());
        }

        let completed = clients.toggle_requirement(client_id, requirement_id)?;
        info!(%client_id, %requirement_id, completed, "requirement toggled");
        Ok(completed)
    }
}

/// Error raised by the tracker service.
#[derive(Debug, thiserror::Error)]
pub enum TrackerServiceError {
    #[error(transparent)]
    Rejected(#[from] ValidationRejection),
    #[error(transparent)]
    NotFound(#[from] TrackerError),
    #[error("tracker state unavailable")]
    Unavailable,
}
