use super::super::applicability::{applicable_requirements, deadlines_for_client};
use super::super::catalog::CatalogStore;
use super::super::clients::ClientStore;
use super::super::domain::{CandidateType, Client, Deadline, Requirement};
use super::super::progress::{ordered_stages, overall_progress, stage_progress};
use super::views::{
    ClientProgressReport, ClientSummaryView, DashboardSummary, DeadlineView,
    RequirementChecklistItem, StageCatalogEntry, StageProgressEntry,
};

impl ClientProgressReport {
    pub fn build(client: &Client, catalog: &CatalogStore) -> Self {
        let applicable = applicable_requirements(client, catalog.requirements());

        let stages = ordered_stages(catalog.stages())
            .into_iter()
            .map(|stage| {
                let progress = stage_progress(client, stage, &applicable);
                let requirements = applicable
                    .iter()
                    .filter(|requirement| requirement.stage_id == stage.id)
                    .map(|requirement| checklist_item(client, requirement, catalog))
                    .collect();
                let status = progress.status();

                StageProgressEntry {
                    stage_id: stage.id.clone(),
                    stage_name: stage.name.clone(),
                    order: stage.order,
                    completed: progress.completed,
                    total: progress.total,
                    status,
                    status_label: status.label(),
                    requirements,
                }
            })
            .collect();

        let orphaned = applicable
            .iter()
            .filter(|requirement| catalog.stage(&requirement.stage_id).is_none())
            .map(|requirement| checklist_item(client, requirement, catalog))
            .collect();

        let mut deadlines: Vec<DeadlineView> = deadlines_for_client(client, catalog.deadlines())
            .into_iter()
            .map(|deadline| {
                // a client-specific deadline here can only be addressed to this client
                let client_name = deadline.client_id.as_ref().map(|_| client.full_name());
                deadline_view(deadline, catalog, client_name)
            })
            .collect();
        deadlines.sort_by_key(|deadline| deadline.date);

        Self {
            client_id: client.id.clone(),
            client_name: client.full_name(),
            candidate_type: client.candidate_type,
            stream_label: client.candidate_type.label(),
            overall: overall_progress(client, &applicable),
            stages,
            orphaned,
            deadlines,
        }
    }

    pub fn stages_complete(&self) -> usize {
        self.stages
            .iter()
            .filter(|stage| stage.total > 0 && stage.completed == stage.total)
            .count()
    }

    pub fn to_summary(&self, client: &Client) -> ClientSummaryView {
        ClientSummaryView {
            client_id: self.client_id.clone(),
            name: self.client_name.clone(),
            email: client.email.clone(),
            candidate_type: self.candidate_type,
            stream_label: self.stream_label,
            progress_percent: self.overall.percent,
            applicable: self.overall.applicable,
            completed: self.overall.completed,
            stages_complete: self.stages_complete(),
            created_at: client.created_at,
        }
    }
}

fn checklist_item(
    client: &Client,
    requirement: &Requirement,
    catalog: &CatalogStore,
) -> RequirementChecklistItem {
    RequirementChecklistItem {
        id: requirement.id.clone(),
        name: requirement.name.clone(),
        description: requirement.description.clone(),
        due_by: requirement.due_by,
        applies_to: requirement.applies_to,
        university_id: requirement.university_id.clone(),
        university_name: requirement
            .university_id
            .as_ref()
            .and_then(|id| catalog.university(id))
            .map(|university| university.name.clone()),
        reminder_frequency: requirement.reminder_frequency,
        reminder_label: requirement.reminder_frequency.label(),
        completed: client.has_completed(&requirement.id),
    }
}

pub(crate) fn deadline_view(
    deadline: &Deadline,
    catalog: &CatalogStore,
    client_name: Option<String>,
) -> DeadlineView {
    DeadlineView {
        id: deadline.id.clone(),
        name: deadline.name.clone(),
        date: deadline.date,
        applies_to: deadline.applies_to,
        applies_to_label: deadline.applies_to.label(),
        university_name: deadline
            .university_id
            .as_ref()
            .and_then(|id| catalog.university(id))
            .map(|university| university.name.clone()),
        client_id: deadline.client_id.clone(),
        client_name,
        reminder_label: deadline.reminder_frequency.label(),
        description: deadline.description.clone(),
    }
}

/// Roster rows, newest intake first.
pub fn client_roster(clients: &ClientStore, catalog: &CatalogStore) -> Vec<ClientSummaryView> {
    clients
        .roster()
        .map(|client| ClientProgressReport::build(client, catalog).to_summary(client))
        .collect()
}

pub fn stage_catalog(catalog: &CatalogStore) -> Vec<StageCatalogEntry> {
    catalog
        .stages()
        .iter()
        .map(|stage| StageCatalogEntry {
            id: stage.id.clone(),
            name: stage.name.clone(),
            order: stage.order,
            requirement_count: catalog.requirements_for_stage(&stage.id).len(),
        })
        .collect()
}

pub fn dashboard(
    clients: &ClientStore,
    catalog: &CatalogStore,
    upcoming_limit: usize,
) -> DashboardSummary {
    let upcoming_deadlines = catalog
        .deadlines_by_date()
        .into_iter()
        .take(upcoming_limit)
        .map(|deadline| {
            let client_name = deadline
                .client_id
                .as_ref()
                .and_then(|id| clients.get(id))
                .map(Client::full_name);
            deadline_view(deadline, catalog, client_name)
        })
        .collect();

    DashboardSummary {
        total_clients: clients.len(),
        eu_stream: clients.count_in_stream(CandidateType::Eu),
        non_eu_stream: clients.count_in_stream(CandidateType::NonEu),
        active_deadlines: catalog.deadlines().len(),
        upcoming_deadlines,
    }
}
