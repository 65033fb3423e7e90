use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use parkmap_core::{
    FacilityKind, FacilityRef, Feedback, LatLng, ToiletAccessibility, ToiletFixtures,
};
use parkmap_selection::feedback_form_url;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{parse_kind, ApiError, ApiResponse, AppState, ErrorCode, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct AccessibilityLabels {
    pub wheelchair: &'static str,
    pub baby_room: &'static str,
    pub ostomy: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct ToiletDetails {
    pub fixtures: ToiletFixtures,
    pub accessibility: ToiletAccessibility,
    pub accessibility_labels: AccessibilityLabels,
}

#[derive(Debug, Serialize)]
pub(super) struct FacilityItem {
    #[serde(rename = "type")]
    pub kind: FacilityKind,
    pub label: &'static str,
    pub id: String,
    pub name: String,
    pub address: String,
    pub position: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toilet: Option<ToiletDetails>,
}

impl From<&FacilityRef> for FacilityItem {
    fn from(facility: &FacilityRef) -> Self {
        let toilet = match facility {
            FacilityRef::Park(_) => None,
            FacilityRef::Toilet(t) => Some(ToiletDetails {
                fixtures: t.fixtures,
                accessibility: t.accessibility,
                accessibility_labels: AccessibilityLabels {
                    wheelchair: t.accessibility.wheelchair.label(),
                    baby_room: t.accessibility.baby_room.label(),
                    ostomy: t.accessibility.ostomy.label(),
                },
            }),
        };
        Self {
            kind: facility.kind(),
            label: facility.kind().label(),
            id: facility.id().to_owned(),
            name: facility.name().to_owned(),
            address: facility.address().to_owned(),
            position: facility.position(),
            toilet,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct FacilitiesQuery {
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct FacilityDetail {
    pub facility: FacilityItem,
    pub feedback: Vec<Feedback>,
    pub feedback_form_url: String,
}

pub(super) async fn list_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FacilitiesQuery>,
) -> Result<Json<ApiResponse<Vec<FacilityItem>>>, ApiError> {
    let kind = query
        .kind
        .as_deref()
        .map(|raw| parse_kind(&req_id.0, raw))
        .transpose()?;

    let data = state
        .catalog
        .iter()
        .filter(|f| kind.is_none_or(|k| f.kind() == k))
        .map(|f| FacilityItem::from(&f))
        .collect();

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_facility(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<FacilityDetail>>, ApiError> {
    let kind = parse_kind(&req_id.0, &kind)?;
    let facility = state.catalog.find(kind, &id).ok_or_else(|| {
        ApiError::new(
            req_id.0.clone(),
            ErrorCode::NotFound,
            format!("{kind} '{id}' not found"),
        )
    })?;

    let form_url = feedback_form_url(&state.settings.feedback_form_url, kind, &id).map_err(|e| {
        tracing::error!(error = %e, "feedback form url is not absolute");
        ApiError::new(req_id.0.clone(), ErrorCode::InternalError, "feedback form url is misconfigured")
    })?;

    let index = state.feedback.current().await;
    let feedback = index.feedback_for(&id).into_iter().cloned().collect();

    Ok(Json(ApiResponse {
        data: FacilityDetail {
            facility: FacilityItem::from(&facility),
            feedback,
            feedback_form_url: form_url.to_string(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
