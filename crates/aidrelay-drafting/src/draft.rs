//! Deterministic draft payload construction.

use aidrelay_core::{policy, DisasterAlert};
use chrono::{DateTime, Duration, Utc};

use crate::types::CampaignDraft;

/// Funding window of an emergency campaign, from draft time.
const CAMPAIGN_WINDOW_DAYS: i64 = 90;

pub const PENDING_REVIEW_STATUS: &str = "pending-review";

/// Build the campaign draft for one alert.
///
/// The title embeds hazard type and location; the description is a fixed
/// template carrying severity, event and detection times, provenance, and
/// explicit pending-review language so the draft cannot be mistaken for a
/// live campaign. Goal and category come from the pure policy.
#[must_use]
pub fn build_draft(alert: &DisasterAlert, drafted_at: DateTime<Utc>) -> CampaignDraft {
    let goal = policy::goal_amount(alert.hazard_type, alert.severity);
    let category = policy::category(alert.hazard_type);

    let title = format!(
        "Emergency: {} relief for {}",
        capitalize(&alert.hazard_type.to_string()),
        alert.location
    );

    let description = format!(
        "AUTOMATED EMERGENCY CAMPAIGN DRAFT — PENDING ADMIN REVIEW\n\
         \n\
         Hazard: {hazard}\n\
         Location: {location}\n\
         Severity: {severity}\n\
         Event time: {event_time}\n\
         Detected: {detected} (source: {source})\n\
         \n\
         {details}\n\
         \n\
         Suggested funding goal: {goal}. This draft was generated \
         automatically from disaster monitoring data and is not a live \
         campaign until an administrator reviews and approves it.",
        hazard = alert.hazard_type,
        location = alert.location,
        severity = alert.severity,
        event_time = alert.timestamp.to_rfc3339(),
        detected = drafted_at.to_rfc3339(),
        source = alert.source,
        details = alert.description,
        goal = goal,
    );

    CampaignDraft {
        title,
        description,
        goal_amount: goal,
        start_date: drafted_at,
        end_date: drafted_at + Duration::days(CAMPAIGN_WINDOW_DAYS),
        is_emergency: true,
        category: category.to_string(),
        status: PENDING_REVIEW_STATUS.to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidrelay_core::{HazardType, Severity};
    use chrono::TimeZone;

    fn alert(hazard: HazardType, severity: Severity, location: &str) -> DisasterAlert {
        DisasterAlert {
            hazard_type: hazard,
            location: location.to_string(),
            severity,
            magnitude: None,
            description: "test event".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
            coordinates: None,
            source: "usgs".to_string(),
        }
    }

    #[test]
    fn critical_earthquake_draft_matches_policy() {
        let now = Utc::now();
        let draft = build_draft(
            &alert(HazardType::Earthquake, Severity::Critical, "Region X"),
            now,
        );
        assert_eq!(draft.goal_amount, 1_000_000);
        assert_eq!(draft.category, "Emergency Relief");
        assert!(draft.is_emergency);
        assert_eq!(draft.status, "pending-review");
    }

    #[test]
    fn critical_heatwave_draft_is_medical_aid() {
        let draft = build_draft(
            &alert(HazardType::Heatwave, Severity::Critical, "Nagpur"),
            Utc::now(),
        );
        assert_eq!(draft.goal_amount, 300_000);
        assert_eq!(draft.category, "Medical Aid");
    }

    #[test]
    fn title_embeds_hazard_and_location() {
        let draft = build_draft(
            &alert(HazardType::Cyclone, Severity::High, "Odisha Coast"),
            Utc::now(),
        );
        assert_eq!(draft.title, "Emergency: Cyclone relief for Odisha Coast");
    }

    #[test]
    fn description_carries_review_language_and_provenance() {
        let draft = build_draft(
            &alert(HazardType::Flood, Severity::High, "Majuli"),
            Utc::now(),
        );
        assert!(draft.description.contains("PENDING ADMIN REVIEW"));
        assert!(draft.description.contains("not a live campaign"));
        assert!(draft.description.contains("source: usgs"));
        assert!(draft.description.contains("Severity: high"));
    }

    #[test]
    fn campaign_window_is_ninety_days() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let draft = build_draft(&alert(HazardType::Flood, Severity::High, "Majuli"), now);
        assert_eq!(draft.start_date, now);
        assert_eq!(draft.end_date - draft.start_date, Duration::days(90));
    }
}
