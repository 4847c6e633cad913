use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::app_config::{AppConfig, Environment};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read locations file {path}: {source}")]
    LocationsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse locations file: {0}")]
    LocationsFileParse(#[from] serde_yaml::Error),

    #[error("invalid locations file: {0}")]
    InvalidLocations(String),
}

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

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The core parsing/validation logic is decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let platform_api_url = require("AIDRELAY_PLATFORM_API_URL")?;
    let platform_api_token = lookup("AIDRELAY_PLATFORM_API_TOKEN").ok();

    let env = parse_environment(&or_default("AIDRELAY_ENV", "development"));
    let bind_addr = parse_addr("AIDRELAY_BIND_ADDR", "0.0.0.0:3100")?;
    let log_level = or_default("AIDRELAY_LOG_LEVEL", "info");
    let locations_path = PathBuf::from(or_default(
        "AIDRELAY_LOCATIONS_PATH",
        "./config/locations.yaml",
    ));

    let seismic_base_url = or_default("AIDRELAY_SEISMIC_BASE_URL", "https://earthquake.usgs.gov");
    let seismic_min_magnitude = parse_f64("AIDRELAY_SEISMIC_MIN_MAGNITUDE", "4.5")?;
    let seismic_window_hours = parse_u64("AIDRELAY_SEISMIC_WINDOW_HOURS", "24")?;

    // Default bounding box covers the Indian subcontinent, the platform's
    // operating region.
    let region_min_latitude = parse_f64("AIDRELAY_REGION_MIN_LAT", "6.0")?;
    let region_max_latitude = parse_f64("AIDRELAY_REGION_MAX_LAT", "38.0")?;
    let region_min_longitude = parse_f64("AIDRELAY_REGION_MIN_LON", "68.0")?;
    let region_max_longitude = parse_f64("AIDRELAY_REGION_MAX_LON", "98.0")?;

    let weather_base_url = or_default(
        "AIDRELAY_WEATHER_BASE_URL",
        "https://api.openweathermap.org",
    );
    let weather_api_key = lookup("AIDRELAY_WEATHER_API_KEY").ok();

    let feed_url = or_default("AIDRELAY_FEED_URL", "https://www.gdacs.org/xml/rss.xml");
    let region_keywords = or_default("AIDRELAY_REGION_KEYWORDS", "india")
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let source_timeout_secs = parse_u64("AIDRELAY_SOURCE_TIMEOUT_SECS", "20")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        platform_api_url,
        platform_api_token,
        locations_path,
        seismic_base_url,
        seismic_min_magnitude,
        seismic_window_hours,
        region_min_latitude,
        region_max_latitude,
        region_min_longitude,
        region_max_longitude,
        weather_base_url,
        weather_api_key,
        feed_url,
        region_keywords,
        source_timeout_secs,
    })
}

/// Parse the environment name, defaulting to development for unknown values.
fn parse_environment(raw: &str) -> Environment {
    match raw.to_lowercase().as_str() {
        "production" | "prod" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
