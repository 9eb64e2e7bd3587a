mod orders;
mod rebound;
mod returns;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use retflow_core::AppConfig;
use retflow_orders::OrdersClient;
use retflow_rebound::{ReboundClient, TokenCache};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub orders: Arc<OrdersClient>,
    pub rebound: Arc<ReboundClient>,
    pub token_cache: Arc<TokenCache>,
}

impl AppState {
    /// Builds the shared state: both API clients plus a fresh token cache.
    ///
    /// # Errors
    ///
    /// Fails when a configured base URL is invalid or an HTTP client cannot
    /// be constructed.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let orders = OrdersClient::from_app_config(&config)?;
        let rebound = ReboundClient::from_app_config(&config)?;
        Ok(Self {
            config: Arc::new(config),
            orders: Arc::new(orders),
            rebound: Arc::new(rebound),
            token_cache: Arc::new(TokenCache::new()),
        })
    }
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

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    partner_token: &'static str,
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
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "upstream_error" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_rebound_error(
    request_id: String,
    error: &retflow_rebound::ReboundError,
) -> ApiError {
    tracing::error!(error = %error, "returns partner request failed");
    ApiError::new(request_id, "upstream_error", "returns partner request failed")
}

pub(super) fn map_orders_error(
    request_id: String,
    error: &retflow_orders::OrdersError,
) -> ApiError {
    if let retflow_orders::OrdersError::Http(inner) = error {
        if inner.status().is_some_and(|s| s.as_u16() == 404) {
            return ApiError::new(request_id, "not_found", "order not found");
        }
    }
    tracing::error!(error = %error, "order history request failed");
    ApiError::new(request_id, "upstream_error", "order history request failed")
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/orders/{order_id}", get(orders::get_order))
        .route(
            "/api/v1/return-methods",
            get(rebound::list_return_methods),
        )
        .route(
            "/api/v1/drop-off-points",
            get(rebound::list_drop_off_points),
        )
        .route("/api/v1/returns", post(returns::create_return))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let partner_token = if state.token_cache.is_valid().await {
        "warm"
    } else {
        "cold"
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                partner_token,
            },
            meta,
        }),
    )
}
