//! HTTP client for the order-history webstore REST API.

use std::time::Duration;

use reqwest::{header, Client, Url};
use retflow_core::AppConfig;

use crate::error::OrdersError;
use crate::types::{OrderDetails, WebstoreOrder};

/// Client for the order-history webstore API.
///
/// The API authenticates with a function key passed as the `code` query
/// parameter. Use [`OrdersClient::from_app_config`] for production or
/// [`OrdersClient::with_base_url`] to point at a mock server in tests.
pub struct OrdersClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OrdersClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OrdersError::Api`] if the configured base
    /// URL is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, OrdersError> {
        Self::with_base_url(
            &config.order_api_base_url,
            &config.order_api_key,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OrdersError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OrdersError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OrdersError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent.to_owned())
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| OrdersError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
        })
    }

    /// Fetches one order by ID and maps the webstore payload to
    /// [`OrderDetails`].
    ///
    /// # Errors
    ///
    /// - [`OrdersError::Http`] on network failure or non-2xx HTTP status.
    /// - [`OrdersError::Deserialize`] if the response does not match the
    ///   webstore shape.
    pub async fn get_order(
        &self,
        order_id: &str,
        account_number: &str,
    ) -> Result<OrderDetails, OrdersError> {
        let url = self.build_order_url(order_id, account_number)?;

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let order: WebstoreOrder =
            serde_json::from_str(&body).map_err(|e| OrdersError::Deserialize {
                context: format!("get_order(order_id={order_id})"),
                source: e,
            })?;
        tracing::debug!(order_id, items = order.items.len(), "fetched webstore order");

        Ok(OrderDetails::from(order))
    }

    /// Builds the order URL with percent-encoded `accountNumber` and `code`
    /// query parameters via [`Url::query_pairs_mut`].
    fn build_order_url(&self, order_id: &str, account_number: &str) -> Result<Url, OrdersError> {
        let mut url = self
            .base_url
            .join(&format!("api/internal/webstore/orders/{order_id}"))
            .map_err(|e| OrdersError::Api(format!("invalid order id '{order_id}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("accountNumber", account_number);
            pairs.append_pair("code", &self.api_key);
        }
        Ok(url)
    }
}
