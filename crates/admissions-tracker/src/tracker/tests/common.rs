use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::config::TrackerConfig;
use crate::tracker::catalog::CatalogStore;
use crate::tracker::clients::ClientStore;
use crate::tracker::domain::{
    AppliesTo, CandidateType, Client, ClientId, Requirement, RequirementId, StageId, UniversityId,
};
use crate::tracker::intake::{ClientIntake, RequirementDraft};
use crate::tracker::service::TrackerService;

pub(super) fn client(candidate_type: CandidateType, preferred: &[&str]) -> Client {
    Client {
        id: ClientId::new("client-test"),
        first_name: "Elena".to_string(),
        last_name: "Bianchi".to_string(),
        email: "elena@example.com".to_string(),
        phone: "+39 333 000".to_string(),
        address: "Corso Italia 5".to_string(),
        passport_country: "Italy".to_string(),
        residence_country: "Italy".to_string(),
        candidate_type,
        preferred_universities: preferred.iter().map(|id| UniversityId::new(*id)).collect(),
        completed_requirement_ids: Default::default(),
        files: Vec::new(),
        created_at: Utc
            .with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn requirement(
    id: &str,
    stage: &str,
    applies_to: AppliesTo,
    university: Option<&str>,
) -> Requirement {
    Requirement {
        id: RequirementId::new(id),
        name: format!("Requirement {id}"),
        description: None,
        due_by: None,
        applies_to,
        university_id: university.map(UniversityId::new),
        reminder_frequency: Default::default(),
        stage_id: StageId::new(stage),
    }
}

pub(super) fn requirement_draft(name: &str, stage: &str) -> RequirementDraft {
    RequirementDraft {
        name: name.to_string(),
        stage_id: Some(StageId::new(stage)),
        ..RequirementDraft::default()
    }
}

pub(super) fn intake(first_name: &str, passport: &str, residence: &str) -> ClientIntake {
    ClientIntake {
        first_name: first_name.to_string(),
        last_name: "Conti".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "+44 20 7946 0000".to_string(),
        address: "1 High Street".to_string(),
        passport_country: passport.to_string(),
        residence_country: residence.to_string(),
        preferred_universities: vec![UniversityId::new("1")],
    }
}

pub(super) fn seeded_stores() -> (CatalogStore, ClientStore) {
    (CatalogStore::seeded(), ClientStore::default())
}

pub(super) fn build_service() -> Arc<TrackerService> {
    Arc::new(TrackerService::from_config(&TrackerConfig::default()))
}

pub(super) fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("serializes")))
        .expect("request builds")
}

pub(super) fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}
