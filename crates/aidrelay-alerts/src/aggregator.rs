//! Alert aggregation: concurrent fan-out, dedupe, rank.

use std::collections::HashMap;
use std::time::Duration;

use aidrelay_core::{AppConfig, DisasterAlert, ProcessedAlertKey, WatchedLocation};
use chrono::Utc;

use crate::error::AlertError;
use crate::sources::{BulletinSource, FeedSource, SeismicSource, WeatherSource};
use crate::synthetic::demo_alerts;

/// Runs every source adapter concurrently and merges their output into one
/// deduplicated, severity-ranked feed.
///
/// Holds no state between calls: each [`AlertAggregator::collect`] produces
/// a fresh list, and recency filtering is a caller responsibility.
pub struct AlertAggregator {
    seismic: SeismicSource,
    weather: WeatherSource,
    feed: FeedSource,
    bulletins: BulletinSource,
}

impl AlertAggregator {
    /// Build the aggregator and its shared HTTP client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig, locations: Vec<WatchedLocation>) -> Result<Self, AlertError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.source_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aidrelay/0.1 (disaster-monitoring)")
            .build()?;

        Ok(Self {
            seismic: SeismicSource::new(client.clone(), config),
            weather: WeatherSource::new(client.clone(), config, locations),
            feed: FeedSource::new(client, config),
            bulletins: BulletinSource::new(),
        })
    }

    /// Collect the current alert feed.
    ///
    /// All adapters run concurrently; each one degrades to an empty list on
    /// failure, so a partial outage shrinks the feed instead of emptying it.
    /// Synthetic demo alerts are appended only when explicitly requested and
    /// take part in dedupe and ranking like any other entry.
    pub async fn collect(&self, include_synthetic: bool) -> Vec<DisasterAlert> {
        let (seismic, weather, feed, bulletins) = tokio::join!(
            self.seismic.fetch(),
            self.weather.fetch(),
            self.feed.fetch(),
            self.bulletins.fetch(),
        );

        let mut alerts = seismic;
        alerts.extend(weather);
        alerts.extend(feed);
        alerts.extend(bulletins);

        if include_synthetic {
            alerts.extend(demo_alerts(Utc::now()));
        }

        let mut merged = dedupe_alerts(alerts);
        sort_alerts(&mut merged);

        tracing::info!(count = merged.len(), "aggregated alert feed");
        merged
    }
}

/// Collapse alerts sharing a [`ProcessedAlertKey`] to one entry, keeping the
/// highest severity; on equal severity the more recent report wins.
pub(crate) fn dedupe_alerts(alerts: Vec<DisasterAlert>) -> Vec<DisasterAlert> {
    let mut by_key: HashMap<ProcessedAlertKey, DisasterAlert> = HashMap::new();

    for alert in alerts {
        let key = ProcessedAlertKey::for_alert(&alert);
        match by_key.get(&key) {
            Some(existing)
                if (existing.severity, existing.timestamp)
                    >= (alert.severity, alert.timestamp) => {}
            _ => {
                by_key.insert(key, alert);
            }
        }
    }

    by_key.into_values().collect()
}

/// Rank by severity descending, ties broken by event time descending.
pub(crate) fn sort_alerts(alerts: &mut [DisasterAlert]) {
    alerts.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then(b.timestamp.cmp(&a.timestamp))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidrelay_core::{HazardType, Severity};
    use chrono::{DateTime, TimeZone, Utc};

    fn alert(
        hazard: HazardType,
        location: &str,
        severity: Severity,
        ts: DateTime<Utc>,
    ) -> DisasterAlert {
        DisasterAlert {
            hazard_type: hazard,
            location: location.to_string(),
            severity,
            magnitude: None,
            description: format!("{severity} {hazard} in {location}"),
            timestamp: ts,
            coordinates: None,
            source: "test".to_string(),
        }
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn dedupe_keeps_highest_severity_per_event() {
        // Two sources report the same quake: 5.0 (medium) and 6.5 (high).
        let merged = dedupe_alerts(vec![
            alert(HazardType::Earthquake, "Jorhat", Severity::Medium, at(10)),
            alert(HazardType::Earthquake, "Jorhat", Severity::High, at(9)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].severity, Severity::High);
    }

    #[test]
    fn dedupe_tie_keeps_most_recent_report() {
        let merged = dedupe_alerts(vec![
            alert(HazardType::Flood, "Majuli", Severity::High, at(8)),
            alert(HazardType::Flood, "Majuli", Severity::High, at(11)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].timestamp, at(11));
    }

    #[test]
    fn dedupe_treats_different_hazards_as_distinct_events() {
        let merged = dedupe_alerts(vec![
            alert(HazardType::Flood, "Puri", Severity::High, at(10)),
            alert(HazardType::Cyclone, "Puri", Severity::High, at(10)),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn dedupe_is_case_insensitive_on_location() {
        let merged = dedupe_alerts(vec![
            alert(HazardType::Flood, "Silchar", Severity::Medium, at(10)),
            alert(HazardType::Flood, "silchar ", Severity::Critical, at(10)),
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].severity, Severity::Critical);
    }

    #[test]
    fn sort_ranks_severity_then_recency() {
        let mut alerts = vec![
            alert(HazardType::Flood, "A", Severity::Medium, at(12)),
            alert(HazardType::Earthquake, "B", Severity::Critical, at(6)),
            alert(HazardType::Cyclone, "C", Severity::High, at(9)),
            alert(HazardType::Flood, "D", Severity::Critical, at(11)),
        ];
        sort_alerts(&mut alerts);

        let order: Vec<(&str, Severity)> = alerts
            .iter()
            .map(|a| (a.location.as_str(), a.severity))
            .collect();
        assert_eq!(
            order,
            vec![
                ("D", Severity::Critical),
                ("B", Severity::Critical),
                ("C", Severity::High),
                ("A", Severity::Medium),
            ]
        );
    }
}
