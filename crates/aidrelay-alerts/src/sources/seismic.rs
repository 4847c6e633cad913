//! Earthquake-catalog adapter (USGS FDSN event service).

use aidrelay_core::{policy, Coordinates, DisasterAlert, HazardType};
use chrono::{Duration, TimeZone, Utc};
use serde::Deserialize;

use crate::error::AlertError;

const SOURCE_LABEL: &str = "usgs";

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    features: Vec<CatalogFeature>,
}

#[derive(Debug, Deserialize)]
struct CatalogFeature {
    properties: FeatureProperties,
    geometry: Option<FeatureGeometry>,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    mag: Option<f64>,
    place: Option<String>,
    /// Event time in milliseconds since the epoch.
    time: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct FeatureGeometry {
    /// `[longitude, latitude, depth]`.
    #[serde(default)]
    coordinates: Vec<f64>,
}

/// Queries a region-bounded earthquake catalog for recent events above a
/// minimum magnitude.
pub(crate) struct SeismicSource {
    client: reqwest::Client,
    base_url: String,
    min_magnitude: f64,
    window_hours: u64,
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
}

impl SeismicSource {
    pub(crate) fn new(client: reqwest::Client, config: &aidrelay_core::AppConfig) -> Self {
        Self {
            client,
            base_url: config.seismic_base_url.trim_end_matches('/').to_string(),
            min_magnitude: config.seismic_min_magnitude,
            window_hours: config.seismic_window_hours,
            min_latitude: config.region_min_latitude,
            max_latitude: config.region_max_latitude,
            min_longitude: config.region_min_longitude,
            max_longitude: config.region_max_longitude,
        }
    }

    /// Fetch recent earthquakes. Never fails: errors are logged and degrade
    /// to an empty list.
    pub(crate) async fn fetch(&self) -> Vec<DisasterAlert> {
        match self.query_catalog().await {
            Ok(alerts) => {
                tracing::debug!(source = SOURCE_LABEL, count = alerts.len(), "collected seismic alerts");
                alerts
            }
            Err(e) => {
                tracing::warn!(source = SOURCE_LABEL, error = %e, "seismic catalog fetch failed");
                Vec::new()
            }
        }
    }

    async fn query_catalog(&self) -> Result<Vec<DisasterAlert>, AlertError> {
        #[allow(clippy::cast_possible_wrap)]
        let start = Utc::now() - Duration::hours(self.window_hours as i64);
        let url = format!("{}/fdsnws/event/1/query", self.base_url);

        let response: CatalogResponse = self
            .client
            .get(&url)
            .query(&[
                ("format", "geojson".to_string()),
                ("starttime", start.format("%Y-%m-%dT%H:%M:%S").to_string()),
                ("minmagnitude", self.min_magnitude.to_string()),
                ("minlatitude", self.min_latitude.to_string()),
                ("maxlatitude", self.max_latitude.to_string()),
                ("minlongitude", self.min_longitude.to_string()),
                ("maxlongitude", self.max_longitude.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(normalize_features(response))
    }
}

/// Convert catalog features into alerts, skipping entries without a
/// magnitude or place.
fn normalize_features(response: CatalogResponse) -> Vec<DisasterAlert> {
    response
        .features
        .into_iter()
        .filter_map(|feature| {
            let magnitude = feature.properties.mag?;
            let place = feature.properties.place?;
            let timestamp = feature
                .properties
                .time
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
                .unwrap_or_else(Utc::now);

            let coordinates = feature.geometry.and_then(|g| {
                if g.coordinates.len() >= 2 {
                    Some(Coordinates {
                        longitude: g.coordinates[0],
                        latitude: g.coordinates[1],
                    })
                } else {
                    None
                }
            });

            Some(DisasterAlert {
                hazard_type: HazardType::Earthquake,
                severity: policy::seismic_severity(magnitude),
                description: format!("Magnitude {magnitude:.1} earthquake near {place}"),
                location: place,
                magnitude: Some(magnitude),
                timestamp,
                coordinates,
                source: SOURCE_LABEL.to_string(),
            })
        })
        .collect()
}
