//! Wire and domain types for the order-history webstore API.
//!
//! The webstore response nests image URLs under `productCode.images[]`; the
//! mapped [`OrderDetails`] flattens that to one `image_url` per line item and
//! carries the per-system size set for localized size rendering downstream.

use retflow_core::sizing::ProductSizes;
use serde::{Deserialize, Serialize};

/// Raw webstore order payload, as served by
/// `GET /api/internal/webstore/orders/{orderId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WebstoreOrder {
    pub order_id: String,
    pub status: String,
    pub order_date: String,
    pub currency_code: String,
    pub currency_sign: String,
    pub total_amount: f64,
    pub items: Vec<WebstoreItem>,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WebstoreItem {
    pub name: String,
    pub quantity: u32,
    pub total: f64,
    #[serde(default)]
    pub product_details: ProductSizes,
    #[serde(default)]
    pub product_code: Option<ProductCode>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProductCode {
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductImage {
    pub secure_url: String,
}

/// An order as the returns flow consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    pub order_id: String,
    pub status: String,
    pub order_date: String,
    pub currency_code: String,
    pub currency_sign: String,
    pub total_amount: f64,
    pub order_items: Vec<OrderItem>,
    pub customer: Customer,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: u32,
    pub total: f64,
    pub sizes: ProductSizes,
    /// First product image, or empty when the webstore carries none.
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address_line1: String,
    #[serde(default)]
    pub address_line2: String,
    pub city: String,
    pub country: String,
    pub postal_code: String,
}

impl From<WebstoreOrder> for OrderDetails {
    fn from(order: WebstoreOrder) -> Self {
        let order_items = order
            .items
            .into_iter()
            .map(|item| {
                let image_url = item
                    .product_code
                    .and_then(|code| code.images.into_iter().next())
                    .map(|image| image.secure_url)
                    .unwrap_or_default();
                OrderItem {
                    name: item.name,
                    quantity: item.quantity,
                    total: item.total,
                    sizes: item.product_details,
                    image_url,
                }
            })
            .collect();

        OrderDetails {
            order_id: order.order_id,
            status: order.status,
            order_date: order.order_date,
            currency_code: order.currency_code,
            currency_sign: order.currency_sign,
            total_amount: order.total_amount,
            order_items,
            customer: order.customer,
            shipping_address: order.shipping_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webstore_order_maps_first_image_and_sizes() {
        let json = serde_json::json!({
            "orderId": "1019",
            "status": "Delivered",
            "orderDate": "2025-05-01",
            "currencyCode": "EUR",
            "currencySign": "€",
            "totalAmount": 379.0,
            "items": [
                {
                    "name": "Black Lazio Tuxedo Jacket",
                    "quantity": 1,
                    "total": 379.0,
                    "productDetails": { "sizeEUR": "46" },
                    "productCode": {
                        "images": [
                            { "secureUrl": "https://cdn.example.com/a.jpg" },
                            { "secureUrl": "https://cdn.example.com/b.jpg" }
                        ]
                    }
                },
                {
                    "name": "White Shirt",
                    "quantity": 2,
                    "total": 198.0,
                    "productDetails": {}
                }
            ],
            "customer": {
                "firstName": "John",
                "lastName": "Doe",
                "email": "johndoe@example.com"
            },
            "shippingAddress": {
                "firstName": "John",
                "lastName": "Doe",
                "addressLine1": "Calle Mayor 1",
                "addressLine2": "",
                "city": "Madrid",
                "country": "ES",
                "postalCode": "28014"
            }
        });

        let order: WebstoreOrder = serde_json::from_value(json).expect("parse webstore order");
        let details = OrderDetails::from(order);

        assert_eq!(details.order_items.len(), 2);
        assert_eq!(details.order_items[0].image_url, "https://cdn.example.com/a.jpg");
        assert_eq!(details.order_items[0].sizes.size_eur.as_deref(), Some("46"));
        // No images at all: empty string, not an error.
        assert_eq!(details.order_items[1].image_url, "");
        assert!(details.order_items[1].sizes.size_eur.is_none());
    }
}
