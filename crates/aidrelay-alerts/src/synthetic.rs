//! Fixed synthetic alerts for demos and dashboard testing.
//!
//! Only appended when a caller explicitly asks for them; the production
//! polling path never includes these.

use aidrelay_core::{Coordinates, DisasterAlert, HazardType, Severity};
use chrono::{DateTime, Duration, Utc};

pub const SYNTHETIC_SOURCE: &str = "synthetic";

/// A small illustrative set covering the main hazard types and tiers.
#[must_use]
pub fn demo_alerts(now: DateTime<Utc>) -> Vec<DisasterAlert> {
    vec![
        DisasterAlert {
            hazard_type: HazardType::Earthquake,
            location: "Demo: Shillong Plateau".to_string(),
            severity: Severity::Critical,
            magnitude: Some(7.1),
            description: "Synthetic magnitude 7.1 earthquake for demonstration".to_string(),
            timestamp: now - Duration::hours(2),
            coordinates: Some(Coordinates {
                latitude: 25.6,
                longitude: 91.9,
            }),
            source: SYNTHETIC_SOURCE.to_string(),
        },
        DisasterAlert {
            hazard_type: HazardType::Flood,
            location: "Demo: Brahmaputra Valley".to_string(),
            severity: Severity::High,
            magnitude: None,
            description: "Synthetic monsoon flooding for demonstration".to_string(),
            timestamp: now - Duration::hours(5),
            coordinates: None,
            source: SYNTHETIC_SOURCE.to_string(),
        },
        DisasterAlert {
            hazard_type: HazardType::Heatwave,
            location: "Demo: Vidarbha".to_string(),
            severity: Severity::Medium,
            magnitude: Some(41.0),
            description: "Synthetic heatwave for demonstration".to_string(),
            timestamp: now - Duration::hours(8),
            coordinates: None,
            source: SYNTHETIC_SOURCE.to_string(),
        },
    ]
}
