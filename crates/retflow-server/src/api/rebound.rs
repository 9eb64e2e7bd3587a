use axum::{
    extract::{Query, State},
    Extension, Json,
};
use retflow_core::geo::{rank_by_distance, GeoPoint, Ranked};
use retflow_rebound::{DropOffPoint, DropOffQuery, PostalServicePage};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_rebound_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Order reference sent to the partner when the page context supplies none,
/// matching the consumer-portal default.
const DEFAULT_REFERENCE_ID: &str = "1019";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReturnMethodsQuery {
    country: Option<String>,
}

pub(super) async fn list_return_methods(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ReturnMethodsQuery>,
) -> Result<Json<ApiResponse<PostalServicePage>>, ApiError> {
    let country = query
        .country
        .unwrap_or_else(|| state.config.default_country.clone());

    let token = state
        .rebound
        .bearer_token(&state.token_cache)
        .await
        .map_err(|e| map_rebound_error(req_id.0.clone(), &e))?;

    let page = state
        .rebound
        .search_postal_services(&token, &country)
        .await
        .map_err(|e| map_rebound_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: page,
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct DropOffPointsQuery {
    reference_id: Option<String>,
    search_radius: Option<u32>,
    postal_code: Option<String>,
    country_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct DropOffPointsData {
    /// Geocoded customer address the distances are measured from.
    pub customer_location: GeoPoint,
    /// Candidates ordered by ascending distance. Points the upstream could
    /// not geocode carry `distance_m: 0` and `has_location: false`.
    pub points: Vec<Ranked<DropOffPoint>>,
}

pub(super) async fn list_drop_off_points(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<DropOffPointsQuery>,
) -> Result<Json<ApiResponse<DropOffPointsData>>, ApiError> {
    let search = DropOffQuery {
        reference_id: query
            .reference_id
            .unwrap_or_else(|| DEFAULT_REFERENCE_ID.to_string()),
        search_radius_km: query
            .search_radius
            .unwrap_or(state.config.default_search_radius_km),
        postal_code: query
            .postal_code
            .unwrap_or_else(|| state.config.default_postal_code.clone()),
        country_code: query
            .country_code
            .unwrap_or_else(|| state.config.default_country.clone()),
    };

    let token = state
        .rebound
        .bearer_token(&state.token_cache)
        .await
        .map_err(|e| map_rebound_error(req_id.0.clone(), &e))?;

    let response = state
        .rebound
        .drop_off_points(&token, &search)
        .await
        .map_err(|e| map_rebound_error(req_id.0.clone(), &e))?;

    let origin = response.customer_street_geo_location;
    let points = rank_by_distance(origin, response.drop_off_point_list, |p| p.geo_location);
    tracing::debug!(count = points.len(), "ranked drop-off points");

    Ok(Json(ApiResponse {
        data: DropOffPointsData {
            customer_location: origin,
            points,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
