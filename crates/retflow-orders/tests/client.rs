//! Integration tests for `OrdersClient` using wiremock HTTP mocks.

use retflow_orders::OrdersClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OrdersClient {
    OrdersClient::with_base_url(base_url, "test-key", 30, "retflow-test/0.1")
        .expect("client construction should not fail")
}

fn webstore_body() -> serde_json::Value {
    serde_json::json!({
        "orderId": "1019",
        "status": "Delivered",
        "orderDate": "2025-05-01T10:30:00Z",
        "currencyCode": "EUR",
        "currencySign": "€",
        "totalAmount": 379.0,
        "items": [
            {
                "name": "Black Lazio Tuxedo Jacket",
                "quantity": 1,
                "total": 379.0,
                "productDetails": { "sizeEUR": "46", "sizeUK": "36" },
                "productCode": {
                    "images": [{ "secureUrl": "https://cdn.example.com/jacket.jpg" }]
                }
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
            "addressLine2": "3B",
            "city": "Madrid",
            "country": "ES",
            "postalCode": "28014"
        }
    })
}

#[tokio::test]
async fn get_order_maps_webstore_payload() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/internal/webstore/orders/1019"))
        .and(query_param("accountNumber", "SF007353795"))
        .and(query_param("code", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(webstore_body()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let order = client
        .get_order("1019", "SF007353795")
        .await
        .expect("should parse order");

    assert_eq!(order.order_id, "1019");
    assert_eq!(order.status, "Delivered");
    assert_eq!(order.order_items.len(), 1);
    assert_eq!(order.order_items[0].image_url, "https://cdn.example.com/jacket.jpg");
    assert_eq!(order.order_items[0].sizes.size_uk.as_deref(), Some("36"));
    assert_eq!(order.customer.email, "johndoe@example.com");
    assert_eq!(order.shipping_address.postal_code, "28014");
}

#[tokio::test]
async fn get_order_surfaces_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/internal/webstore/orders/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_order("missing", "SF007353795").await;

    assert!(result.is_err(), "404 from the webstore must surface");
}

#[tokio::test]
async fn get_order_rejects_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/internal/webstore/orders/1019"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_order("1019", "SF007353795").await;

    let err = result.expect_err("malformed body must fail");
    assert!(err.to_string().contains("get_order(order_id=1019)"));
}
