use crate::app_config::{AppConfig, Environment};
use crate::coords::LatLng;
use crate::feedback::FeedSchema;
use crate::ConfigError;

/// Public form that visitors use to submit feedback.
pub const DEFAULT_FEEDBACK_FORM_URL: &str =
    "https://docs.google.com/forms/d/e/1FAIpQLSfAM_EddPsoFw4jmLZ9RQ9SKOWbWNnLdpIABZCh6FiTXJRsQw/viewform";

/// Centre of Oyama city.
pub const DEFAULT_MAP_CENTER: LatLng = LatLng::new(36.3147, 139.8003);

pub const DEFAULT_MAP_ZOOM: u8 = 13;

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let feedback_api_url = require("PARKMAP_FEEDBACK_API_URL")?;
    if !feedback_api_url.starts_with("http://") && !feedback_api_url.starts_with("https://") {
        return Err(invalid(
            "PARKMAP_FEEDBACK_API_URL",
            "expected an http(s) URL".to_string(),
        ));
    }

    let env = parse_environment(&or_default("PARKMAP_ENV", "development"))?;

    let bind_addr = or_default("PARKMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("PARKMAP_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("PARKMAP_LOG_LEVEL", "info");

    let data_dir = PathBuf::from(or_default("PARKMAP_DATA_DIR", "./data"));
    let park_csv_path = lookup("PARKMAP_PARK_CSV")
        .map_or_else(|_| data_dir.join("park.csv"), PathBuf::from);
    let toilet_csv_path = lookup("PARKMAP_TOILET_CSV")
        .map_or_else(|_| data_dir.join("public_toilet.csv"), PathBuf::from);

    let feedback_schema = or_default("PARKMAP_FEEDBACK_SCHEMA", "auto")
        .parse::<FeedSchema>()
        .map_err(|e| invalid("PARKMAP_FEEDBACK_SCHEMA", e.to_string()))?;
    let feedback_revalidate_secs = parse_u64("PARKMAP_FEEDBACK_REVALIDATE_SECS", "60")?;
    let feedback_timeout_secs = parse_u64("PARKMAP_FEEDBACK_TIMEOUT_SECS", "30")?;
    let feedback_max_retries = parse_u32("PARKMAP_FEEDBACK_MAX_RETRIES", "2")?;
    let feedback_form_url = or_default("PARKMAP_FEEDBACK_FORM_URL", DEFAULT_FEEDBACK_FORM_URL);
    let user_agent = or_default("PARKMAP_USER_AGENT", "parkmap/0.1 (facility-map)");

    let map_center = match lookup("PARKMAP_MAP_CENTER") {
        Ok(raw) => parse_lat_lng(&raw).ok_or_else(|| {
            invalid(
                "PARKMAP_MAP_CENTER",
                format!("expected `lat,lng`, got '{raw}'"),
            )
        })?,
        Err(_) => DEFAULT_MAP_CENTER,
    };
    let map_zoom = or_default("PARKMAP_MAP_ZOOM", &DEFAULT_MAP_ZOOM.to_string())
        .parse::<u8>()
        .map_err(|e| invalid("PARKMAP_MAP_ZOOM", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        park_csv_path,
        toilet_csv_path,
        feedback_api_url,
        feedback_schema,
        feedback_revalidate_secs,
        feedback_timeout_secs,
        feedback_max_retries,
        feedback_form_url,
        user_agent,
        map_center,
        map_zoom,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PARKMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parses `"lat,lng"` into a position, rejecting non-finite values.
fn parse_lat_lng(raw: &str) -> Option<LatLng> {
    let (lat, lng) = raw.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    let lng = lng.trim().parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(LatLng::new(lat, lng))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
