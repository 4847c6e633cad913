//! Pure severity, goal, and category policy.
//!
//! Everything here is total over the closed [`HazardType`] and [`Severity`]
//! enums and side-effect-free, so funding policy can change and be reviewed
//! without touching any I/O code. Adapters never hand-roll severity; they
//! call the mapping functions below.

use crate::alert::{HazardType, Severity};

/// Base funding goal per hazard type, in whole currency units.
#[must_use]
pub fn base_goal(hazard: HazardType) -> i64 {
    match hazard {
        HazardType::Earthquake => 500_000,
        HazardType::Flood => 300_000,
        HazardType::Cyclone => 400_000,
        HazardType::Tsunami => 600_000,
        HazardType::Landslide | HazardType::Drought => 200_000,
        HazardType::Heatwave => 150_000,
    }
}

/// Multiplier applied to the base goal for a severity tier.
#[must_use]
pub fn severity_factor(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 2.0,
        Severity::High => 1.5,
        Severity::Medium => 1.0,
        Severity::Low => 0.5,
    }
}

/// Suggested funding goal for a drafted campaign, rounded to the nearest
/// whole currency unit.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn goal_amount(hazard: HazardType, severity: Severity) -> i64 {
    (base_goal(hazard) as f64 * severity_factor(severity)).round() as i64
}

/// Donation category a drafted campaign is filed under.
#[must_use]
pub fn category(hazard: HazardType) -> &'static str {
    match hazard {
        HazardType::Earthquake
        | HazardType::Flood
        | HazardType::Cyclone
        | HazardType::Tsunami
        | HazardType::Landslide => "Emergency Relief",
        HazardType::Heatwave => "Medical Aid",
        HazardType::Drought => "Food & Water",
    }
}

/// Severity of a seismic event by magnitude.
#[must_use]
pub fn seismic_severity(magnitude: f64) -> Severity {
    if magnitude >= 7.0 {
        Severity::Critical
    } else if magnitude >= 6.0 {
        Severity::High
    } else if magnitude >= 4.5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Temperature (°C) at or above which a location counts as a heatwave.
pub const HEATWAVE_THRESHOLD_C: f64 = 40.0;

/// Severity of a heatwave by temperature. `None` below the flagging
/// threshold: the location is not in a heatwave at all.
#[must_use]
pub fn heat_severity(temp_c: f64) -> Option<Severity> {
    if temp_c >= 45.0 {
        Some(Severity::Critical)
    } else if temp_c >= 42.0 {
        Some(Severity::High)
    } else if temp_c >= HEATWAVE_THRESHOLD_C {
        Some(Severity::Medium)
    } else {
        None
    }
}

/// Wind speed (m/s) at or above which conditions count as cyclonic.
pub const CYCLONE_WIND_THRESHOLD_MS: f64 = 17.0;

/// Severity of cyclonic winds by speed. `None` below gale strength.
#[must_use]
pub fn wind_severity(speed_ms: f64) -> Option<Severity> {
    if speed_ms >= 32.0 {
        Some(Severity::Critical)
    } else if speed_ms >= 24.0 {
        Some(Severity::High)
    } else if speed_ms >= CYCLONE_WIND_THRESHOLD_MS {
        Some(Severity::Medium)
    } else {
        None
    }
}
