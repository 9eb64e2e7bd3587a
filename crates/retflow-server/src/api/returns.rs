use axum::{extract::State, Extension, Json};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum ReturnMethod {
    Pickup,
    Dropoff,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateReturnRequest {
    pub order_id: String,
    #[serde(default)]
    pub country_code: Option<String>,
    pub return_items: Vec<ReturnItem>,
    pub return_method: ReturnMethod,
    #[serde(default)]
    pub drop_off_location_id: Option<String>,
    #[serde(default)]
    pub pickup_address: Option<PickupAddress>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReturnItem {
    pub order_line_id: String,
    pub item_id: String,
    pub quantity: u32,
    pub return_reason: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PickupAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReturnConfirmation {
    pub return_order_id: String,
    pub return_status: String,
    pub return_method: ReturnMethod,
    pub return_label_doc_id: String,
    pub lines: Vec<ReturnLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReturnLine {
    pub item_id: String,
    pub quantity: u32,
    pub return_reason: String,
}

/// Checks the request for the constraints the upstream return API enforces,
/// so the shopper gets an immediate 400 instead of a partner-side rejection.
fn validate(request: &CreateReturnRequest) -> Result<(), &'static str> {
    if request.order_id.trim().is_empty() {
        return Err("orderId must not be empty");
    }
    if request.return_items.is_empty() {
        return Err("at least one return item is required");
    }
    if request.return_items.iter().any(|item| item.quantity == 0) {
        return Err("return item quantities must be at least 1");
    }
    match request.return_method {
        ReturnMethod::Pickup if request.pickup_address.is_none() => {
            Err("pickup returns require a pickupAddress")
        }
        ReturnMethod::Dropoff if request.drop_off_location_id.is_none() => {
            Err("dropoff returns require a dropOffLocationId")
        }
        _ => Ok(()),
    }
}

pub(super) async fn create_return(
    State(_state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<CreateReturnRequest>,
) -> Result<Json<ApiResponse<ReturnConfirmation>>, ApiError> {
    if let Err(reason) = validate(&request) {
        return Err(ApiError::new(req_id.0, "validation_error", reason));
    }

    let mut rng = rand::rng();
    let return_order_id = format!("RET_{}_{}", rng.random_range(0..1000), request.order_id);
    let return_label_doc_id = format!(
        "RL{:06}X{:05}",
        rng.random_range(0..1_000_000),
        rng.random_range(0..100_000)
    );

    let lines = request
        .return_items
        .iter()
        .map(|item| ReturnLine {
            item_id: item.item_id.clone(),
            quantity: item.quantity,
            return_reason: item.return_reason.clone(),
        })
        .collect();

    tracing::info!(
        order_id = %request.order_id,
        return_order_id = %return_order_id,
        method = ?request.return_method,
        "registered return request"
    );

    Ok(Json(ApiResponse {
        data: ReturnConfirmation {
            return_order_id,
            return_status: "Pending Return".to_string(),
            return_method: request.return_method,
            return_label_doc_id,
            lines,
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32) -> ReturnItem {
        ReturnItem {
            order_line_id: "line-1".to_string(),
            item_id: "item-1".to_string(),
            quantity,
            return_reason: "Too small".to_string(),
        }
    }

    fn pickup_request() -> CreateReturnRequest {
        CreateReturnRequest {
            order_id: "1019".to_string(),
            country_code: Some("ES".to_string()),
            return_items: vec![item(1)],
            return_method: ReturnMethod::Pickup,
            drop_off_location_id: None,
            pickup_address: Some(PickupAddress {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                address: "Calle Mayor 1".to_string(),
                city: "Madrid".to_string(),
                postal_code: "28014".to_string(),
                country: "ES".to_string(),
            }),
        }
    }

    #[test]
    fn validate_accepts_complete_pickup_request() {
        assert!(validate(&pickup_request()).is_ok());
    }

    #[test]
    fn validate_rejects_empty_item_list() {
        let mut request = pickup_request();
        request.return_items.clear();
        assert!(validate(&request).is_err());
    }

    #[test]
    fn validate_rejects_zero_quantity() {
        let mut request = pickup_request();
        request.return_items = vec![item(0)];
        assert!(validate(&request).is_err());
    }

    #[test]
    fn validate_rejects_pickup_without_address() {
        let mut request = pickup_request();
        request.pickup_address = None;
        assert!(validate(&request).is_err());
    }

    #[test]
    fn validate_rejects_dropoff_without_location() {
        let mut request = pickup_request();
        request.return_method = ReturnMethod::Dropoff;
        request.drop_off_location_id = None;
        assert!(validate(&request).is_err());
    }

    #[test]
    fn validate_accepts_dropoff_with_location() {
        let mut request = pickup_request();
        request.return_method = ReturnMethod::Dropoff;
        request.drop_off_location_id = Some("do-1".to_string());
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn return_method_deserializes_lowercase() {
        let method: ReturnMethod = serde_json::from_str("\"dropoff\"").expect("parse");
        assert_eq!(method, ReturnMethod::Dropoff);
    }
}
