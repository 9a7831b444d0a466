use chrono::{DateTime, Utc};

use super::domain::{CandidateType, Client, ClientId, IdSequence, RequirementId, TrackerError};
use super::intake::{ClientIntake, ValidationRejection};

/// Client records. Clients are never edited or removed once admitted; only
/// their completion sets change.
#[derive(Debug, Clone)]
pub struct ClientStore {
    clients: Vec<Client>,
    ids: IdSequence,
}

impl Default for ClientStore {
    fn default() -> Self {
        Self {
            clients: Vec::new(),
            ids: IdSequence::new("client"),
        }
    }
}

impl ClientStore {
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Roster with the most recent intake first.
    pub fn roster(&self) -> impl Iterator<Item = &Client> + '_ {
        self.clients.iter().rev()
    }

    pub fn get(&self, id: &ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| &client.id == id)
    }

    pub fn count_in_stream(&self, stream: CandidateType) -> usize {
        self.clients
            .iter()
            .filter(|client| client.candidate_type == stream)
            .count()
    }

    pub fn admit(&mut self, intake: &ClientIntake) -> Result<Client, ValidationRejection> {
        self.admit_at(intake, Utc::now())
    }

    /// Classifies the intake and freezes the resulting stream onto the record.
    pub fn admit_at(
        &mut self,
        intake: &ClientIntake,
        created_at: DateTime<Utc>,
    ) -> Result<Client, ValidationRejection> {
        if let Some(field) = intake.missing_field() {
            return Err(ValidationRejection::MissingContactField { field });
        }

        let candidate_type = intake.preview_stream();

        let client = Client {
            id: ClientId(self.ids.next_raw()),
            first_name: intake.first_name.trim().to_string(),
            last_name: intake.last_name.trim().to_string(),
            email: intake.email.trim().to_string(),
            phone: intake.phone.trim().to_string(),
            address: intake.address.trim().to_string(),
            passport_country: intake.passport_country.trim().to_string(),
            residence_country: intake.residence_country.trim().to_string(),
            candidate_type,
            preferred_universities: intake.preferred_universities.iter().cloned().collect(),
            completed_requirement_ids: Default::default(),
            files: Vec::new(),
            created_at,
        };
        self.clients.push(client.clone());
        Ok(client)
    }

    /// Flips `requirement` in the client's completion set and returns whether
    /// it is now marked complete.
    pub fn toggle_requirement(
        &mut self,
        client_id: &ClientId,
        requirement: &RequirementId,
    ) -> Result<bool, TrackerError> {
        let client = self
            .clients
            .iter_mut()
            .find(|client| &client.id == client_id)
            .ok_or_else(|| TrackerError::ClientNotFound(client_id.clone()))?;

        let mut completed = client.completed_requirement_ids.clone();
        let now_complete = if completed.remove(requirement) {
            false
        } else {
            completed.insert(requirement.clone());
            true
        };

        *client = Client {
            completed_requirement_ids: completed,
            ..client.clone()
        };
        Ok(now_complete)
    }
}
