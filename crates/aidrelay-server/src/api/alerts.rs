use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use aidrelay_core::DisasterAlert;

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Alerts older than this never appear in the read-only query.
const RECENCY_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    include_synthetic: bool,
}

/// Current alert feed, limited to the last 24 hours by event time.
///
/// Degrades to an empty list on any upstream failure; callers never see an
/// error page for a momentarily incomplete feed.
pub async fn list_current_alerts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<AlertsQuery>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let alerts = state
        .engine
        .aggregator()
        .collect(query.include_synthetic)
        .await;

    let recent = recent_only(alerts, Utc::now());
    (StatusCode::OK, Json(ApiResponse { data: recent, meta }))
}

/// Keep alerts whose event time falls inside the recency window ending at
/// `now`. Ranking from the aggregator is preserved.
fn recent_only(alerts: Vec<DisasterAlert>, now: DateTime<Utc>) -> Vec<DisasterAlert> {
    let cutoff = now - Duration::hours(RECENCY_WINDOW_HOURS);
    alerts
        .into_iter()
        .filter(|alert| alert.timestamp >= cutoff)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aidrelay_core::{HazardType, Severity};
    use chrono::TimeZone;

    fn stale_and_fresh(now: DateTime<Utc>) -> Vec<DisasterAlert> {
        let base = DisasterAlert {
            hazard_type: HazardType::Flood,
            location: "Majuli".to_string(),
            severity: Severity::High,
            magnitude: None,
            description: "monsoon flooding".to_string(),
            timestamp: now - Duration::hours(2),
            coordinates: None,
            source: "gdacs".to_string(),
        };
        let stale = DisasterAlert {
            location: "Silchar".to_string(),
            timestamp: now - Duration::hours(30),
            ..base.clone()
        };
        vec![base, stale]
    }

    #[test]
    fn alerts_older_than_the_window_are_dropped() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        let recent = recent_only(stale_and_fresh(now), now);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].location, "Majuli");
    }

    #[test]
    fn alert_exactly_at_the_cutoff_is_kept() {
        let now = Utc.with_ymd_and_hms(2025, 6, 2, 12, 0, 0).unwrap();
        let mut alerts = stale_and_fresh(now);
        alerts[1].timestamp = now - Duration::hours(RECENCY_WINDOW_HOURS);
        let recent = recent_only(alerts, now);
        assert_eq!(recent.len(), 2);
    }
}
