use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::classification::{classify, intake_countries};
use super::domain::{CandidateType, ClientId, RequirementId, StageId};
use super::intake::{ClientIntake, DeadlineDraft, RequirementDraft, StageDraft, UniversityDraft};
use super::report::roster_csv_string;
use super::service::{TrackerService, TrackerServiceError};

/// Router exposing the catalog, intake, and progress endpoints.
pub fn tracker_router(service: Arc<TrackerService>) -> Router {
    Router::new()
        .route(
            "/api/v1/universities",
            get(list_universities).post(add_university),
        )
        .route("/api/v1/stages", get(list_stages).post(add_stage))
        .route("/api/v1/stages/:stage_id", delete(delete_stage))
        .route(
            "/api/v1/requirements",
            get(list_requirements).post(add_requirement),
        )
        .route(
            "/api/v1/requirements/:requirement_id/stage",
            put(reassign_requirement),
        )
        .route("/api/v1/deadlines", get(list_deadlines).post(add_deadline))
        .route("/api/v1/clients", get(list_clients).post(add_client))
        .route("/api/v1/clients/:client_id", get(get_client))
        .route("/api/v1/clients/:client_id/progress", get(client_progress))
        .route(
            "/api/v1/clients/:client_id/requirements/:requirement_id/toggle",
            post(toggle_requirement),
        )
        .route("/api/v1/roster.csv", get(export_roster))
        .route("/api/v1/dashboard", get(dashboard))
        .route("/api/v1/countries", get(countries))
        .route("/api/v1/classify", get(classify_preview))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DeleteStageQuery {
    #[serde(default)]
    pub(crate) confirm: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReassignRequest {
    pub(crate) stage_id: StageId,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ClassifyQuery {
    #[serde(default)]
    pub(crate) passport: String,
    #[serde(default)]
    pub(crate) residence: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ClassifyResponse {
    pub(crate) candidate_type: CandidateType,
    pub(crate) stream_label: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ToggleResponse {
    pub(crate) client_id: ClientId,
    pub(crate) requirement_id: RequirementId,
    pub(crate) completed: bool,
}

pub(crate) fn error_response(error: TrackerServiceError) -> Response {
    let status = match &error {
        TrackerServiceError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TrackerServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        TrackerServiceError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    };
    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, TrackerServiceError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_universities(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.universities())
}

pub(crate) async fn add_university(
    State(service): State<Arc<TrackerService>>,
    Json(draft): Json<UniversityDraft>,
) -> Response {
    respond(StatusCode::CREATED, service.add_university(&draft))
}

pub(crate) async fn list_stages(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.stages())
}

pub(crate) async fn add_stage(
    State(service): State<Arc<TrackerService>>,
    Json(draft): Json<StageDraft>,
) -> Response {
    respond(StatusCode::CREATED, service.add_stage(&draft))
}

/// Deletion is destructive, so the caller must pass `?confirm=true`.
pub(crate) async fn delete_stage(
    State(service): State<Arc<TrackerService>>,
    Path(stage_id): Path<String>,
    Query(query): Query<DeleteStageQuery>,
) -> Response {
    if !query.confirm {
        let payload = json!({
            "error": "confirm stage deletion; requirements in this stage will lose their association",
            "stage_id": stage_id,
        });
        return (StatusCode::PRECONDITION_REQUIRED, Json(payload)).into_response();
    }
    respond(StatusCode::OK, service.delete_stage(&StageId(stage_id)))
}

pub(crate) async fn list_requirements(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.requirements())
}

pub(crate) async fn add_requirement(
    State(service): State<Arc<TrackerService>>,
    Json(draft): Json<RequirementDraft>,
) -> Response {
    respond(StatusCode::CREATED, service.add_requirement(&draft))
}

pub(crate) async fn reassign_requirement(
    State(service): State<Arc<TrackerService>>,
    Path(requirement_id): Path<String>,
    Json(request): Json<ReassignRequest>,
) -> Response {
    respond(
        StatusCode::OK,
        service.reassign_requirement(&RequirementId(requirement_id), &request.stage_id),
    )
}

pub(crate) async fn list_deadlines(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.deadlines())
}

pub(crate) async fn add_deadline(
    State(service): State<Arc<TrackerService>>,
    Json(draft): Json<DeadlineDraft>,
) -> Response {
    respond(StatusCode::CREATED, service.add_deadline(&draft))
}

pub(crate) async fn list_clients(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.roster())
}

pub(crate) async fn add_client(
    State(service): State<Arc<TrackerService>>,
    Json(intake): Json<ClientIntake>,
) -> Response {
    respond(StatusCode::CREATED, service.add_client(&intake))
}

pub(crate) async fn get_client(
    State(service): State<Arc<TrackerService>>,
    Path(client_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.client(&ClientId(client_id)))
}

pub(crate) async fn client_progress(
    State(service): State<Arc<TrackerService>>,
    Path(client_id): Path<String>,
) -> Response {
    respond(StatusCode::OK, service.client_progress(&ClientId(client_id)))
}

pub(crate) async fn toggle_requirement(
    State(service): State<Arc<TrackerService>>,
    Path((client_id, requirement_id)): Path<(String, String)>,
) -> Response {
    let client_id = ClientId(client_id);
    let requirement_id = RequirementId(requirement_id);
    let result = service
        .toggle_requirement(&client_id, &requirement_id)
        .map(|completed| ToggleResponse {
            client_id,
            requirement_id,
            completed,
        });
    respond(StatusCode::OK, result)
}

pub(crate) async fn export_roster(State(service): State<Arc<TrackerService>>) -> Response {
    let rows = match service.roster() {
        Ok(rows) => rows,
        Err(error) => return error_response(error),
    };
    match roster_csv_string(&rows) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn dashboard(State(service): State<Arc<TrackerService>>) -> Response {
    respond(StatusCode::OK, service.dashboard())
}

pub(crate) async fn countries() -> Json<Vec<&'static str>> {
    Json(intake_countries())
}

pub(crate) async fn classify_preview(Query(query): Query<ClassifyQuery>) -> Json<ClassifyResponse> {
    let candidate_type = classify(query.passport.trim(), query.residence.trim());
    Json(ClassifyResponse {
        candidate_type,
        stream_label: candidate_type.label(),
    })
}
