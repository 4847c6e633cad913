use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One location the weather adapter polls every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchedLocation {
    pub name: String,
    /// ISO 3166 country code appended to the conditions query, e.g. `IN`.
    pub country_code: Option<String>,
}

impl WatchedLocation {
    /// Query string for the weather API: `"Mumbai,IN"` or just `"Mumbai"`.
    #[must_use]
    pub fn query(&self) -> String {
        match &self.country_code {
            Some(code) => format!("{},{}", self.name, code),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocationsFile {
    pub locations: Vec<WatchedLocation>,
}

/// Load and validate the watched-locations configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_locations(path: &Path) -> Result<LocationsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LocationsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: LocationsFile = serde_yaml::from_str(&content)?;
    validate_locations(&file)?;
    Ok(file)
}

fn validate_locations(file: &LocationsFile) -> Result<(), ConfigError> {
    if file.locations.is_empty() {
        return Err(ConfigError::InvalidLocations(
            "locations list must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for location in &file.locations {
        if location.name.trim().is_empty() {
            return Err(ConfigError::InvalidLocations(
                "location name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(location.name.to_lowercase()) {
            return Err(ConfigError::InvalidLocations(format!(
                "duplicate location name: '{}'",
                location.name
            )));
        }
    }

    Ok(())
}
