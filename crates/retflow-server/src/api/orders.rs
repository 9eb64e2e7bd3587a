use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use retflow_core::sizing::{size_label, ProductSizes};
use retflow_orders::{Customer, ShippingAddress};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_orders_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderQuery {
    account_number: Option<String>,
    /// Shopper market, drives the localized size label. Defaults to the
    /// configured country when the page context supplies none.
    country: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct OrderData {
    pub order_id: String,
    pub status: String,
    pub order_date: String,
    pub currency_code: String,
    pub currency_sign: String,
    pub total_amount: f64,
    pub order_items: Vec<OrderItemData>,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Serialize)]
pub(super) struct OrderItemData {
    pub name: String,
    pub quantity: u32,
    pub total: f64,
    pub image_url: String,
    /// Rendered for the shopper's market, e.g. `"46 (EU)"` or `"36 (UK)"`.
    pub size_label: String,
    pub sizes: ProductSizes,
}

pub(super) async fn get_order(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(order_id): Path<String>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<ApiResponse<OrderData>>, ApiError> {
    let account_number = query
        .account_number
        .unwrap_or_else(|| state.config.order_account_number.clone());
    let country = query
        .country
        .unwrap_or_else(|| state.config.default_country.clone());

    let order = state
        .orders
        .get_order(&order_id, &account_number)
        .await
        .map_err(|e| map_orders_error(req_id.0.clone(), &e))?;

    let order_items = order
        .order_items
        .into_iter()
        .map(|item| OrderItemData {
            size_label: size_label(&country, &item.sizes),
            name: item.name,
            quantity: item.quantity,
            total: item.total,
            image_url: item.image_url,
            sizes: item.sizes,
        })
        .collect();

    let data = OrderData {
        order_id: order.order_id,
        status: order.status,
        order_date: order.order_date,
        currency_code: order.currency_code,
        currency_sign: order.currency_sign,
        total_amount: order.total_amount,
        order_items,
        customer: order.customer,
        shipping_address: order.shipping_address,
    };

    Ok(Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    }))
}
