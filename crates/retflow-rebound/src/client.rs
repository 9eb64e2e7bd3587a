//! HTTP client for the Rebound consumer-portal REST API.
//!
//! Wraps `reqwest` with Rebound-specific error handling, client-credentials
//! token issuance, and typed response deserialization. All data endpoints
//! carry a bearer token obtained from [`ReboundClient::fetch_token`] (usually
//! through [`ReboundClient::bearer_token`] and a [`TokenCache`]).

use std::time::Duration;

use chrono::Utc;
use reqwest::{header, Client, Url};
use retflow_core::AppConfig;

use crate::error::ReboundError;
use crate::token::{IssuedToken, TokenCache};
use crate::types::{DropOffSearchResponse, PostalServicePage, TokenResponse};

const SEARCH_PATH: &str = "api/postal-services/search";
const DROP_OFF_PATH: &str = "api/postal-services/drop-off-points";
const TOKEN_SCOPE: &str = "email subject profile";

/// Parameters for the drop-off-point search around a customer address.
#[derive(Debug, Clone)]
pub struct DropOffQuery {
    pub reference_id: String,
    pub search_radius_km: u32,
    pub postal_code: String,
    pub country_code: String,
}

/// Client for the Rebound consumer-portal API.
///
/// Holds the HTTP client, the token-endpoint URL, the API base URL, and the
/// client-credentials pair. Use [`ReboundClient::from_app_config`] for
/// production or [`ReboundClient::with_base_urls`] to point at a mock server
/// in tests.
pub struct ReboundClient {
    client: Client,
    auth_url: Url,
    api_base: Url,
    client_id: String,
    client_secret: String,
    client_ref: String,
}

impl ReboundClient {
    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ReboundError::Api`] if a configured URL is
    /// invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ReboundError> {
        Self::with_base_urls(
            &config.rebound_auth_url,
            &config.rebound_base_url,
            &config.rebound_client_id,
            &config.rebound_client_secret,
            &config.rebound_client_ref,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with explicit endpoint URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ReboundError::Api`] if `auth_url` or
    /// `api_base` is not a valid URL.
    pub fn with_base_urls(
        auth_url: &str,
        api_base: &str,
        client_id: &str,
        client_secret: &str,
        client_ref: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ReboundError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent.to_owned())
            .build()?;

        let auth_url = Url::parse(auth_url)
            .map_err(|e| ReboundError::Api(format!("invalid auth URL '{auth_url}': {e}")))?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // join() appends path segments instead of replacing the last one.
        let normalised = format!("{}/", api_base.trim_end_matches('/'));
        let api_base = Url::parse(&normalised)
            .map_err(|e| ReboundError::Api(format!("invalid base URL '{api_base}': {e}")))?;

        Ok(Self {
            client,
            auth_url,
            api_base,
            client_id: client_id.to_owned(),
            client_secret: client_secret.to_owned(),
            client_ref: client_ref.to_owned(),
        })
    }

    /// Exchanges the client credentials for a fresh bearer token.
    ///
    /// Posts `grant_type=client_credentials` with HTTP basic auth and computes
    /// the expiry instant from the reported `expires_in` lifetime.
    ///
    /// # Errors
    ///
    /// - [`ReboundError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ReboundError::Deserialize`] if the token payload is malformed.
    pub async fn fetch_token(&self) -> Result<IssuedToken, ReboundError> {
        let response = self
            .client
            .post(self.auth_url.clone())
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", TOKEN_SCOPE)])
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: TokenResponse =
            serde_json::from_str(&body).map_err(|e| ReboundError::Deserialize {
                context: "token endpoint".to_string(),
                source: e,
            })?;

        let expires_at_ms = Utc::now().timestamp_millis() + parsed.expires_in * 1000;
        tracing::debug!(expires_in = parsed.expires_in, "issued partner token");

        Ok(IssuedToken {
            access_token: parsed.access_token,
            expires_at_ms,
        })
    }

    /// Returns a currently valid bearer token, fetching and caching a fresh
    /// one when the cache is empty or expired.
    ///
    /// # Errors
    ///
    /// Propagates [`ReboundError`] from [`ReboundClient::fetch_token`]; cache
    /// reads themselves never fail.
    pub async fn bearer_token(&self, cache: &TokenCache) -> Result<String, ReboundError> {
        if let Some(token) = cache.get().await {
            return Ok(token);
        }
        let issued = self.fetch_token().await?;
        cache.store(issued.access_token.clone(), issued.expires_at_ms).await;
        Ok(issued.access_token)
    }

    /// Searches available postal services (return methods) for a country.
    ///
    /// # Errors
    ///
    /// - [`ReboundError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ReboundError::Deserialize`] if the response does not match the
    ///   expected page shape.
    pub async fn search_postal_services(
        &self,
        token: &str,
        country: &str,
    ) -> Result<PostalServicePage, ReboundError> {
        let country_upper = country.to_uppercase();
        let url = self.build_url(
            SEARCH_PATH,
            &[
                ("clientRefString", self.client_ref.as_str()),
                ("country", &country_upper),
            ],
        )?;
        self.get_json(&url, token).await
    }

    /// Searches drop-off points around the customer's postal code.
    ///
    /// # Errors
    ///
    /// - [`ReboundError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ReboundError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn drop_off_points(
        &self,
        token: &str,
        query: &DropOffQuery,
    ) -> Result<DropOffSearchResponse, ReboundError> {
        let radius = query.search_radius_km.to_string();
        let country_upper = query.country_code.to_uppercase();
        let url = self.build_url(
            DROP_OFF_PATH,
            &[
                ("referenceId", query.reference_id.as_str()),
                ("searchRadius", &radius),
                ("postalCode", &query.postal_code),
                ("countryCode", &country_upper),
            ],
        )?;
        self.get_json(&url, token).await
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ReboundError> {
        let mut url = self
            .api_base
            .join(path)
            .map_err(|e| ReboundError::Api(format!("invalid endpoint path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a bearer-authorized GET, asserts a 2xx status, and parses the
    /// body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ReboundError::Http`] on network failure or a non-2xx status,
    /// [`ReboundError::Deserialize`] if the body does not parse as `T`.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &Url,
        token: &str,
    ) -> Result<T, ReboundError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ReboundError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
