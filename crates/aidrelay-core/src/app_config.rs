use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
    /// Base URL of the donation platform's REST API (campaigns, users).
    pub platform_api_url: String,
    pub platform_api_token: Option<String>,
    /// Watched-locations file for the weather adapter.
    pub locations_path: PathBuf,
    pub seismic_base_url: String,
    pub seismic_min_magnitude: f64,
    /// Trailing window of the earthquake-catalog query, in hours.
    pub seismic_window_hours: u64,
    pub region_min_latitude: f64,
    pub region_max_latitude: f64,
    pub region_min_longitude: f64,
    pub region_max_longitude: f64,
    pub weather_base_url: String,
    pub weather_api_key: Option<String>,
    pub feed_url: String,
    /// Keywords matching the target geography in multi-hazard feed entries.
    pub region_keywords: Vec<String>,
    /// Per-request timeout for every source adapter and the platform client.
    pub source_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("platform_api_url", &self.platform_api_url)
            .field(
                "platform_api_token",
                &self.platform_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("locations_path", &self.locations_path)
            .field("seismic_base_url", &self.seismic_base_url)
            .field("seismic_min_magnitude", &self.seismic_min_magnitude)
            .field("seismic_window_hours", &self.seismic_window_hours)
            .field("region_min_latitude", &self.region_min_latitude)
            .field("region_max_latitude", &self.region_max_latitude)
            .field("region_min_longitude", &self.region_min_longitude)
            .field("region_max_longitude", &self.region_max_longitude)
            .field("weather_base_url", &self.weather_base_url)
            .field(
                "weather_api_key",
                &self.weather_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("feed_url", &self.feed_url)
            .field("region_keywords", &self.region_keywords)
            .field("source_timeout_secs", &self.source_timeout_secs)
            .finish()
    }
}
