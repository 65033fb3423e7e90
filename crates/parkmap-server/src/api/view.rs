//! `GET /api/v1/view`: what the map page renders for a given query string.

use axum::{
    extract::{RawQuery, State},
    Extension, Json,
};
use parkmap_core::{Feedback, LatLng};
use parkmap_selection::{initial_center, HistoryRouter, MapSession, Router, Viewport};
use serde::Serialize;
use url::Url;

use crate::middleware::RequestId;

use super::facilities::FacilityItem;
use super::{ApiError, ApiResponse, AppState, ErrorCode, ResponseMeta};

/// Origin the page query is resolved against. Only the query matters.
const PAGE_ORIGIN: &str = "http://localhost/";

#[derive(Debug, Serialize)]
pub(super) struct ViewportItem {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Serialize)]
pub(super) struct PageView {
    pub selection: Option<FacilityItem>,
    pub drawer_open: bool,
    pub initial_center: LatLng,
    pub viewport: ViewportItem,
    pub query: Option<String>,
    pub feedback: Vec<Feedback>,
    pub feedback_form_url: Option<String>,
}

pub(super) async fn page_view(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<PageView>>, ApiError> {
    let internal = |message: &str| ApiError::new(req_id.0.clone(), ErrorCode::InternalError, message);

    let mut page = Url::parse(PAGE_ORIGIN).map_err(|_| internal("invalid page origin"))?;
    page.set_query(query.as_deref().filter(|q| !q.is_empty()));

    let settings = &state.settings;
    let center = initial_center(&state.catalog, &page, settings.map_center);
    let mut session = MapSession::start(
        state.catalog.clone(),
        HistoryRouter::new(page),
        Viewport::new(center, settings.map_zoom),
        settings.map_zoom,
    );
    session.set_feedback(state.feedback.current().await);

    let feedback_form_url = session
        .selected_form_url(&settings.feedback_form_url)
        .map_err(|e| {
            tracing::error!(error = %e, "feedback form url is not absolute");
            internal("feedback form url is misconfigured")
        })?
        .map(String::from);

    let machine = session.machine();
    let viewport = machine.map();
    let data = PageView {
        selection: machine.selected().map(FacilityItem::from),
        drawer_open: machine.drawer_open(),
        initial_center: center,
        viewport: ViewportItem {
            center: viewport.center,
            zoom: viewport.zoom,
        },
        query: machine.router().current().query().map(str::to_owned),
        feedback: session.selected_feedback().into_iter().cloned().collect(),
        feedback_form_url,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
