use thiserror::Error;

/// Errors returned by the Rebound API client.
#[derive(Debug, Error)]
pub enum ReboundError {
    /// Network or TLS failure from the underlying HTTP client, or a non-2xx
    /// HTTP status from the partner API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Client misconfiguration, e.g. an unparseable base URL.
    #[error("Rebound API error: {0}")]
    Api(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
