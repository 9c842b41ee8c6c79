use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(raw.trim_end_matches('/').to_string())
        } else {
            Err(invalid(var, format!("expected an http(s) URL, got '{raw}'")))
        }
    };

    let env = parse_environment(&or_default("BIZSEARCH_ENV", "development"))?;
    let log_level = or_default("BIZSEARCH_LOG_LEVEL", "info");

    let api_base_url = parse_url("BIZSEARCH_API_BASE_URL", "http://127.0.0.1:3000")?;
    let database_url = or_default("BIZSEARCH_DATABASE_URL", "sqlite://bizsearch-favorites.db");
    let db_max_connections = parse_u32("BIZSEARCH_DB_MAX_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("BIZSEARCH_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let request_timeout_secs = parse_u64("BIZSEARCH_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BIZSEARCH_USER_AGENT", "bizsearch/0.1 (business-search)");

    let bind_addr = parse_addr("BIZSEARCH_BIND_ADDR", "0.0.0.0:3000")?;
    let rate_limit_per_minute = parse_usize("BIZSEARCH_RATE_LIMIT_PER_MINUTE", "120")?;
    let yelp_api_base_url = parse_url("YELP_API_BASE_URL", "https://api.yelp.com/v3")?;
    let yelp_api_key = lookup("YELP_API_KEY").ok().filter(|k| !k.trim().is_empty());

    Ok(AppConfig {
        env,
        log_level,
        api_base_url,
        database_url,
        db_max_connections,
        db_acquire_timeout_secs,
        request_timeout_secs,
        user_agent,
        bind_addr,
        rate_limit_per_minute,
        yelp_api_base_url,
        yelp_api_key,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BIZSEARCH_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

impl AppConfig {
    /// Returns the Yelp API key, which only the proxy server needs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `YELP_API_KEY` was not set.
    pub fn require_yelp_api_key(&self) -> Result<&str, ConfigError> {
        self.yelp_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("YELP_API_KEY".to_string()))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
