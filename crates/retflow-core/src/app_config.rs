use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub order_api_base_url: String,
    pub order_api_key: String,
    pub order_account_number: String,
    pub rebound_base_url: String,
    pub rebound_auth_url: String,
    pub rebound_client_id: String,
    pub rebound_client_secret: String,
    pub rebound_client_ref: String,
    pub default_country: String,
    pub default_postal_code: String,
    pub default_search_radius_km: u32,
    pub http_timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("order_api_base_url", &self.order_api_base_url)
            .field("order_api_key", &"[redacted]")
            .field("order_account_number", &self.order_account_number)
            .field("rebound_base_url", &self.rebound_base_url)
            .field("rebound_auth_url", &self.rebound_auth_url)
            .field("rebound_client_id", &self.rebound_client_id)
            .field("rebound_client_secret", &"[redacted]")
            .field("rebound_client_ref", &self.rebound_client_ref)
            .field("default_country", &self.default_country)
            .field("default_postal_code", &self.default_postal_code)
            .field("default_search_radius_km", &self.default_search_radius_km)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
