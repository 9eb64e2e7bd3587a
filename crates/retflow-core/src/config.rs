use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let order_api_key = require("RETFLOW_ORDER_API_KEY")?;
    let rebound_client_id = require("RETFLOW_REBOUND_CLIENT_ID")?;
    let rebound_client_secret = require("RETFLOW_REBOUND_CLIENT_SECRET")?;
    let rebound_client_ref = require("RETFLOW_REBOUND_CLIENT_REF")?;

    let env = parse_environment(&or_default("RETFLOW_ENV", "development"));
    let bind_addr = parse_addr("RETFLOW_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("RETFLOW_LOG_LEVEL", "info");

    let order_api_base_url = or_default(
        "RETFLOW_ORDER_API_BASE_URL",
        "https://orderhistory-tst-af.azurewebsites.net",
    );
    let order_account_number = or_default("RETFLOW_ORDER_ACCOUNT_NUMBER", "SF007353795");

    let rebound_base_url = or_default(
        "RETFLOW_REBOUND_BASE_URL",
        "https://pre-consumer-api.cycleon.net",
    );
    let rebound_auth_url = or_default(
        "RETFLOW_REBOUND_AUTH_URL",
        "https://presso.cycleon.net/auth/realms/master/protocol/openid-connect/token",
    );

    let default_country = or_default("RETFLOW_DEFAULT_COUNTRY", "ES");
    let default_postal_code = or_default("RETFLOW_DEFAULT_POSTAL_CODE", "28014");
    let default_search_radius_km = parse_u32("RETFLOW_DEFAULT_SEARCH_RADIUS_KM", "1")?;

    let http_timeout_secs = parse_u64("RETFLOW_HTTP_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("RETFLOW_USER_AGENT", "retflow/0.1 (returns-flow)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        order_api_base_url,
        order_api_key,
        order_account_number,
        rebound_base_url,
        rebound_auth_url,
        rebound_client_id,
        rebound_client_secret,
        rebound_client_ref,
        default_country,
        default_postal_code,
        default_search_radius_km,
        http_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
