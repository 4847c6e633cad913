use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::Serialize;

use aidrelay_drafting::{Campaign, CampaignStore, CycleReport};

use super::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// All campaigns flagged emergency, straight from the platform.
///
/// Degrades to an empty list when the platform is unreachable.
pub async fn list_emergency_campaigns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let campaigns = match state.engine.platform().list_emergency_campaigns().await {
        Ok(campaigns) => campaigns,
        Err(e) => {
            tracing::warn!(error = %e, "emergency campaigns query failed; returning empty list");
            Vec::<Campaign>::new()
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: campaigns,
            meta,
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct CheckData {
    pub report: CycleReport,
    pub next_scheduled_at: DateTime<Utc>,
}

/// Force one polling cycle now and report when the next scheduled one runs.
///
/// Shares the engine's cycle lock and ledger with the hourly job, so a
/// manual trigger can never re-draft an alert the schedule already handled,
/// and waits out any cycle in flight instead of overlapping it.
pub async fn trigger_check(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    let report = state.engine.run_cycle().await;

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: CheckData {
                report,
                next_scheduled_at: next_top_of_hour(Utc::now()),
            },
            meta,
        }),
    )
}

/// Next automatic cycle time under the hourly cron schedule.
fn next_top_of_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    now.duration_trunc(TimeDelta::hours(1)).unwrap_or(now) + TimeDelta::hours(1)
}
