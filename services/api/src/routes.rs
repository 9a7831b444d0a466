use crate::infra::AppState;
use admissions_tracker::tracker::{tracker_router, TrackerService};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

/// Tracker API plus health, readiness, and metrics endpoints.
pub(crate) fn with_operational_routes(service: Arc<TrackerService>) -> axum::Router {
    tracker_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Ready once the listener is bound and the tracker state lock is usable.
pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let listening = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let tracker = state.tracker.dashboard();

    match (listening, tracker) {
        (true, Ok(summary)) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "clients": summary.total_clients,
            })),
        ),
        (false, _) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "initializing" })),
        ),
        (true, Err(err)) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded", "error": err.to_string() })),
        ),
    }
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use admissions_tracker::config::TrackerConfig;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_with_state(ready: bool) -> (axum::Router, AppState) {
        let tracker = Arc::new(TrackerService::from_config(&TrackerConfig::default()));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            tracker: tracker.clone(),
        };
        let app = with_operational_routes(tracker).layer(Extension(state.clone()));
        (app, state)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn readiness_tracks_listener_flag() {
        let (app, state) = app_with_state(false);

        let response = app
            .clone()
            .oneshot(get("/ready"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = app.oneshot(get("/ready")).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ready");
        assert_eq!(body["clients"], 0);
    }

    #[tokio::test]
    async fn health_and_tracker_routes_share_one_router() {
        let (app, _) = app_with_state(true);

        let response = app
            .clone()
            .oneshot(get("/health"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(get("/api/v1/universities"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let universities = json_body(response).await;
        assert_eq!(universities.as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let (app, _) = app_with_state(true);
        let response = app.oneshot(get("/metrics")).await.expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }
}
