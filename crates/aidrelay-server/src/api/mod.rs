mod alerts;
mod campaigns;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use aidrelay_drafting::{EmergencyEngine, PlatformClient};

use crate::middleware::{request_id, require_bearer_auth, AuthState, RequestId};

/// The concrete engine used by the running server: cycles draft through the
/// platform's REST API.
pub type Engine = EmergencyEngine<PlatformClient>;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

/// Static capability descriptor for the health route. No side effects and
/// no upstream calls: the service is healthy if it can answer at all.
#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    sources: &'static [&'static str],
    schedule: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/emergency/check", post(campaigns::trigger_check))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/emergency/alerts", get(alerts::list_current_alerts))
        .route(
            "/api/v1/emergency/campaigns",
            get(campaigns::list_emergency_campaigns),
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                sources: &["usgs", "openweather", "gdacs", "bulletins"],
                schedule: "hourly",
            },
            meta,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use aidrelay_alerts::AlertAggregator;
    use aidrelay_core::{AppConfig, Environment};

    /// Engine whose upstreams are unreachable: every source degrades to
    /// empty and the platform boundary errors.
    fn offline_state() -> AppState {
        let config = AppConfig {
            env: Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            platform_api_url: "http://127.0.0.1:9/api".to_string(),
            platform_api_token: None,
            locations_path: std::path::PathBuf::from("unused"),
            seismic_base_url: "http://127.0.0.1:9".to_string(),
            seismic_min_magnitude: 4.5,
            seismic_window_hours: 24,
            region_min_latitude: 6.0,
            region_max_latitude: 38.0,
            region_min_longitude: 68.0,
            region_max_longitude: 98.0,
            weather_base_url: "http://127.0.0.1:9".to_string(),
            weather_api_key: None,
            feed_url: "http://127.0.0.1:9/feed.xml".to_string(),
            region_keywords: vec!["india".to_string()],
            source_timeout_secs: 1,
        };
        let aggregator = AlertAggregator::new(&config, Vec::new()).expect("aggregator");
        let platform =
            PlatformClient::new(&config.platform_api_url, None, 1).expect("platform client");
        AppState {
            engine: Arc::new(EmergencyEngine::new(aggregator, platform)),
        }
    }

    fn dev_auth() -> AuthState {
        AuthState::from_keys(true, "").expect("auth")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn health_reports_capabilities_without_upstream_calls() {
        let app = build_app(offline_state(), dev_auth());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["schedule"], "hourly");
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn alerts_degrade_to_empty_list_when_sources_are_down() {
        let app = build_app(offline_state(), dev_auth());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/emergency/alerts")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn campaigns_degrade_to_empty_list_when_platform_is_down() {
        let app = build_app(offline_state(), dev_auth());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/emergency/campaigns")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn trigger_check_returns_report_and_next_run() {
        let app = build_app(offline_state(), dev_auth());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/emergency/check")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["report"]["collected"], 0);
        assert_eq!(json["data"]["report"]["drafted"], 0);
        assert!(json["data"]["next_scheduled_at"].is_string());
    }

    #[tokio::test]
    async fn trigger_check_rejects_missing_token_when_auth_enabled() {
        let auth = AuthState::from_keys(false, "secret-key").expect("auth");
        let app = build_app(offline_state(), auth);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/emergency/check")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn trigger_check_accepts_configured_bearer_token() {
        let auth = AuthState::from_keys(false, "secret-key").expect("auth");
        let app = build_app(offline_state(), auth);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/emergency/check")
                    .header("authorization", "Bearer secret-key")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["report"]["collected"], 0);
    }

    #[tokio::test]
    async fn request_id_header_round_trips() {
        let app = build_app(offline_state(), dev_auth());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .header("x-request-id", "req-abc")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(
            response.headers().get("x-request-id").unwrap(),
            &"req-abc".parse::<axum::http::HeaderValue>().unwrap()
        );
        let json = body_json(response).await;
        assert_eq!(json["meta"]["request_id"], "req-abc");
    }
}
