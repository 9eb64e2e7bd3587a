use thiserror::Error;

/// Errors returned by the order-history API client.
#[derive(Debug, Error)]
pub enum OrdersError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status from the order-history API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client misconfiguration, e.g. an unparseable base URL.
    #[error("order API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
