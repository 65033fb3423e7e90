mod facilities;
mod feedback;
mod view;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use parkmap_core::{AppConfig, FacilityCatalog, FacilityKind, LatLng};
use parkmap_feedback::FeedbackCache;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Page-level settings shared by every handler.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub feedback_form_url: String,
    pub map_center: LatLng,
    pub map_zoom: u8,
}

impl PageSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            feedback_form_url: config.feedback_form_url.clone(),
            map_center: config.map_center,
            map_zoom: config.map_zoom,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: FacilityCatalog,
    pub feedback: Arc<FeedbackCache>,
    pub settings: Arc<PageSettings>,
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

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

/// Machine-readable error category; also decides the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    InternalError,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationError => StatusCode::BAD_REQUEST,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    parks: usize,
    toilets: usize,
    feedback: Option<usize>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(request_id: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code,
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.error.code.status(), Json(self)).into_response()
    }
}

/// Parses a `park`/`toilet` tag from a path or query, as a 400 on failure.
pub(super) fn parse_kind(request_id: &str, raw: &str) -> Result<FacilityKind, ApiError> {
    raw.parse::<FacilityKind>().map_err(|e| {
        ApiError::new(
            request_id,
            ErrorCode::ValidationError,
            format!("{e}; expected 'park' or 'toilet'"),
        )
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/facilities", get(facilities::list_facilities))
        .route(
            "/api/v1/facilities/{kind}/{id}",
            get(facilities::get_facility),
        )
        .route("/api/v1/feedback", get(feedback::list_feedback))
        .route("/api/v1/view", get(view::page_view))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let feedback = state.feedback.peek().await.map(|index| index.len());
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            parks: state.catalog.parks().len(),
            toilets: state.catalog.toilets().len(),
            feedback,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
