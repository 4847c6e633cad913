use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Category of disaster event covered by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Earthquake,
    Flood,
    Cyclone,
    Landslide,
    Tsunami,
    Heatwave,
    Drought,
}

impl std::fmt::Display for HazardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HazardType::Earthquake => write!(f, "earthquake"),
            HazardType::Flood => write!(f, "flood"),
            HazardType::Cyclone => write!(f, "cyclone"),
            HazardType::Landslide => write!(f, "landslide"),
            HazardType::Tsunami => write!(f, "tsunami"),
            HazardType::Heatwave => write!(f, "heatwave"),
            HazardType::Drought => write!(f, "drought"),
        }
    }
}

/// Ordinal severity tier derived from source signals.
///
/// Variant order defines the ranking (`Low < Medium < High < Critical`),
/// which the derived `Ord` relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One normalized observation of a hazard event.
///
/// Created fresh on every poll cycle and never mutated. `severity` is always
/// computed by [`crate::policy`] from the hazard type and the raw measurement;
/// upstream severity text is only trusted where it is a controlled vocabulary
/// (feed alert colors).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisasterAlert {
    pub hazard_type: HazardType,
    /// Free-text place description as reported by the source.
    pub location: String,
    pub severity: Severity,
    /// Seismic magnitude, temperature in °C, or wind speed in m/s depending
    /// on `hazard_type`. Absent for sources that report no measurement.
    pub magnitude: Option<f64>,
    pub description: String,
    /// Event time as reported by the source, not ingestion time.
    pub timestamp: DateTime<Utc>,
    pub coordinates: Option<Coordinates>,
    /// Provenance label: adapter name or upstream service identity.
    pub source: String,
}

/// Composite identity treating reports of the same hazard at the same place
/// on the same calendar day as one real-world event, regardless of which
/// source reported it or how often.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessedAlertKey {
    pub hazard_type: HazardType,
    /// Lowercased, trimmed location so inconsistent source spellings
    /// ("Guwahati " vs "guwahati") collapse to one key.
    pub location: String,
    pub event_day: NaiveDate,
}

impl ProcessedAlertKey {
    #[must_use]
    pub fn for_alert(alert: &DisasterAlert) -> Self {
        Self {
            hazard_type: alert.hazard_type,
            location: alert.location.trim().to_lowercase(),
            event_day: alert.timestamp.date_naive(),
        }
    }
}

impl std::fmt::Display for ProcessedAlertKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.hazard_type, self.location, self.event_day)
    }
}
