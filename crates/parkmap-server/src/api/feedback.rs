use axum::{
    extract::{Query, State},
    Extension, Json,
};
use parkmap_core::Feedback;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct FeedbackQuery {
    pub facility_id: Option<String>,
    #[serde(default)]
    pub orphans: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct FeedbackList {
    pub items: Vec<Feedback>,
    /// Number of `items`, after filtering.
    pub total: usize,
}

/// Newest-first feedback, optionally for one facility or only the records
/// that match no loaded facility.
pub(super) async fn list_feedback(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FeedbackQuery>,
) -> Json<ApiResponse<FeedbackList>> {
    let index = state.feedback.current().await;

    let mut selected = match query.facility_id.as_deref() {
        Some(id) => index.feedback_for(id),
        None => index.all_newest_first(),
    };
    if query.orphans {
        selected.retain(|f| !state.catalog.contains_id(&f.facility_id));
    }

    let items: Vec<Feedback> = selected.into_iter().cloned().collect();
    Json(ApiResponse {
        data: FeedbackList {
            total: items.len(),
            items,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}
