//! Current-conditions weather adapter (OpenWeather-style API).
//!
//! Polls each watched location and flags heatwave, flood, and cyclone
//! conditions. Every location is fetched and guarded independently, so one
//! city's failure never aborts the others.

use aidrelay_core::{policy, Coordinates, DisasterAlert, HazardType, Severity, WatchedLocation};
use chrono::{TimeZone, Utc};
use futures::future::join_all;
use serde::Deserialize;

use crate::error::AlertError;

const SOURCE_LABEL: &str = "openweather";

#[derive(Debug, Deserialize)]
struct ConditionsResponse {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
    main: MainReadings,
    wind: Option<WindReadings>,
    coord: Option<CoordReadings>,
    /// Observation time in seconds since the epoch.
    dt: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    id: u32,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoordReadings {
    lat: f64,
    lon: f64,
}

pub(crate) struct WeatherSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    locations: Vec<WatchedLocation>,
}

impl WeatherSource {
    pub(crate) fn new(
        client: reqwest::Client,
        config: &aidrelay_core::AppConfig,
        locations: Vec<WatchedLocation>,
    ) -> Self {
        Self {
            client,
            base_url: config.weather_base_url.trim_end_matches('/').to_string(),
            api_key: config.weather_api_key.clone(),
            locations,
        }
    }

    /// Fetch conditions for every watched location. Never fails: each
    /// location is guarded independently and failures degrade to nothing.
    pub(crate) async fn fetch(&self) -> Vec<DisasterAlert> {
        let Some(api_key) = &self.api_key else {
            tracing::warn!(
                source = SOURCE_LABEL,
                "no weather API key configured; skipping weather source"
            );
            return Vec::new();
        };

        let fetches = self
            .locations
            .iter()
            .map(|location| self.fetch_location(api_key, location));

        let mut alerts = Vec::new();
        for (location, result) in self.locations.iter().zip(join_all(fetches).await) {
            match result {
                Ok(location_alerts) => alerts.extend(location_alerts),
                Err(e) => {
                    tracing::warn!(
                        source = SOURCE_LABEL,
                        location = %location.name,
                        error = %e,
                        "weather fetch failed for location"
                    );
                }
            }
        }

        tracing::debug!(source = SOURCE_LABEL, count = alerts.len(), "collected weather alerts");
        alerts
    }

    async fn fetch_location(
        &self,
        api_key: &str,
        location: &WatchedLocation,
    ) -> Result<Vec<DisasterAlert>, AlertError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response: ConditionsResponse = self
            .client
            .get(&url)
            .query(&[
                ("q", location.query()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(classify_conditions(&location.name, &response))
    }
}

/// Map one location's current conditions onto zero or more alerts.
///
/// Heatwave, flood, and cyclone checks are independent: a city can be both
/// flooded and under cyclonic winds in the same observation.
fn classify_conditions(location_name: &str, obs: &ConditionsResponse) -> Vec<DisasterAlert> {
    let timestamp = obs
        .dt
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now);
    let coordinates = obs.coord.as_ref().map(|c| Coordinates {
        latitude: c.lat,
        longitude: c.lon,
    });

    let mut alerts = Vec::new();

    if let Some(severity) = policy::heat_severity(obs.main.temp) {
        alerts.push(DisasterAlert {
            hazard_type: HazardType::Heatwave,
            location: location_name.to_string(),
            severity,
            magnitude: Some(obs.main.temp),
            description: format!(
                "Extreme heat in {location_name}: {:.1}\u{b0}C recorded",
                obs.main.temp
            ),
            timestamp,
            coordinates,
            source: SOURCE_LABEL.to_string(),
        });
    }

    if let Some((severity, condition)) = flood_condition(&obs.weather) {
        alerts.push(DisasterAlert {
            hazard_type: HazardType::Flood,
            location: location_name.to_string(),
            severity,
            magnitude: None,
            description: format!("Flood-risk conditions in {location_name}: {condition}"),
            timestamp,
            coordinates,
            source: SOURCE_LABEL.to_string(),
        });
    }

    if let Some(speed) = obs.wind.as_ref().and_then(|w| w.speed) {
        if let Some(severity) = policy::wind_severity(speed) {
            alerts.push(DisasterAlert {
                hazard_type: HazardType::Cyclone,
                location: location_name.to_string(),
                severity,
                magnitude: Some(speed),
                description: format!(
                    "Cyclonic winds in {location_name}: {speed:.1} m/s sustained"
                ),
                timestamp,
                coordinates,
                source: SOURCE_LABEL.to_string(),
            });
        }
    }

    alerts
}

/// Flood severity from coded weather conditions, with the matched
/// description for the alert text.
///
/// Condition IDs follow the OpenWeather scheme: 5xx is rain (50x heavy
/// rain, 52x showers), 2xx is thunderstorm.
fn flood_condition(conditions: &[WeatherCondition]) -> Option<(Severity, String)> {
    let mut best: Option<(Severity, String)> = None;
    for condition in conditions {
        let severity = match condition.id {
            503 | 504 | 511 | 522 => Some(Severity::High),
            502 | 521 | 531 | 202 | 212 => Some(Severity::Medium),
            _ => None,
        };
        if let Some(severity) = severity {
            let description = condition
                .description
                .clone()
                .unwrap_or_else(|| "heavy rain".to_string());
            match &best {
                Some((current, _)) if *current >= severity => {}
                _ => best = Some((severity, description)),
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(temp: f64, wind: Option<f64>, condition_ids: &[u32]) -> ConditionsResponse {
        ConditionsResponse {
            weather: condition_ids
                .iter()
                .map(|&id| WeatherCondition {
                    id,
                    description: Some(format!("condition {id}")),
                })
                .collect(),
            main: MainReadings { temp },
            wind: Some(WindReadings { speed: wind }),
            coord: Some(CoordReadings { lat: 19.0, lon: 72.8 }),
            dt: Some(1_717_200_000),
        }
    }

    #[test]
    fn forty_six_degrees_is_a_critical_heatwave() {
        let alerts = classify_conditions("Nagpur", &observation(46.0, Some(3.0), &[]));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard_type, HazardType::Heatwave);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].magnitude, Some(46.0));
    }

    #[test]
    fn mild_conditions_produce_no_alerts() {
        let alerts = classify_conditions("Pune", &observation(31.0, Some(5.0), &[500]));
        assert!(alerts.is_empty());
    }

    #[test]
    fn heavy_rain_flags_flood() {
        let alerts = classify_conditions("Mumbai", &observation(29.0, Some(4.0), &[503]));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard_type, HazardType::Flood);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn storm_winds_flag_cyclone() {
        let alerts = classify_conditions("Bhubaneswar", &observation(30.0, Some(33.0), &[]));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard_type, HazardType::Cyclone);
        assert_eq!(alerts[0].severity, Severity::Critical);
    }

    #[test]
    fn concurrent_hazards_produce_independent_alerts() {
        let alerts = classify_conditions("Kolkata", &observation(41.0, Some(18.0), &[502]));
        let hazards: Vec<HazardType> = alerts.iter().map(|a| a.hazard_type).collect();
        assert_eq!(
            hazards,
            vec![HazardType::Heatwave, HazardType::Flood, HazardType::Cyclone]
        );
    }

    #[test]
    fn flood_condition_keeps_most_severe_code() {
        let conditions = vec![
            WeatherCondition {
                id: 502,
                description: Some("heavy intensity rain".to_string()),
            },
            WeatherCondition {
                id: 504,
                description: Some("extreme rain".to_string()),
            },
        ];
        let (severity, description) = flood_condition(&conditions).expect("flood flagged");
        assert_eq!(severity, Severity::High);
        assert_eq!(description, "extreme rain");
    }

    #[test]
    fn parses_conditions_response_shape() {
        let body = r#"{
            "weather": [{"id": 503, "main": "Rain", "description": "very heavy rain"}],
            "main": {"temp": 28.5, "humidity": 90},
            "wind": {"speed": 12.0, "deg": 220},
            "coord": {"lat": 19.07, "lon": 72.87},
            "dt": 1717200000,
            "name": "Mumbai"
        }"#;
        let obs: ConditionsResponse = serde_json::from_str(body).expect("parse conditions");
        let alerts = classify_conditions("Mumbai", &obs);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].hazard_type, HazardType::Flood);
    }
}
