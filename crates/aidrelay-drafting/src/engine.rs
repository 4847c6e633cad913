//! The per-cycle state machine: collect, filter, draft.

use aidrelay_alerts::AlertAggregator;
use aidrelay_core::{DisasterAlert, ProcessedAlertKey, Severity};
use chrono::Utc;
use serde::Serialize;

use crate::draft::build_draft;
use crate::error::DraftError;
use crate::ledger::DedupLedger;
use crate::store::{CampaignStore, IdentityLookup};
use crate::types::Campaign;

/// Outcome counts for one polling cycle, returned to the trigger endpoint.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CycleReport {
    pub collected: usize,
    pub eligible: usize,
    pub drafted: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// Drives one polling cycle at a time: COLLECTING → FILTERING → DRAFTING.
///
/// Cycles never overlap: a cycle mutex serializes the scheduled job and any
/// manual trigger, so the ledger only ever sees one writer. Nothing in a
/// cycle escalates to a crash; every failure is logged and isolated to the
/// alert it affected.
pub struct EmergencyEngine<P> {
    aggregator: AlertAggregator,
    platform: P,
    ledger: DedupLedger,
    cycle_lock: tokio::sync::Mutex<()>,
}

impl<P> EmergencyEngine<P>
where
    P: CampaignStore + IdentityLookup + Sync,
{
    pub fn new(aggregator: AlertAggregator, platform: P) -> Self {
        Self {
            aggregator,
            platform,
            ledger: DedupLedger::new(),
            cycle_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// The aggregator, for the read-only alerts query.
    pub fn aggregator(&self) -> &AlertAggregator {
        &self.aggregator
    }

    /// The platform boundary, for the read-only campaigns query.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Run one full polling cycle.
    ///
    /// A concurrent call (manual trigger during the scheduled run) waits for
    /// the in-flight cycle to finish rather than overlapping it. Production
    /// cycles never include synthetic alerts.
    pub async fn run_cycle(&self) -> CycleReport {
        let _guard = self.cycle_lock.lock().await;

        tracing::info!("emergency cycle: collecting alerts");
        let alerts = self.aggregator.collect(false).await;
        let collected = alerts.len();

        let eligible: Vec<DisasterAlert> = alerts
            .into_iter()
            .filter(|alert| alert.severity >= Severity::High)
            .collect();
        tracing::info!(
            collected,
            eligible = eligible.len(),
            "emergency cycle: filtered to actionable severity"
        );

        let mut report = self.draft_alerts(&eligible).await;
        report.collected = collected;
        tracing::info!(
            drafted = report.drafted,
            skipped = report.skipped_duplicates,
            failed = report.failed,
            "emergency cycle complete"
        );
        report
    }

    /// The DRAFTING phase: attempt a draft for each alert, in the given
    /// (severity-ranked) order so the most severe events are handled first.
    ///
    /// Keys are marked processed before the attempt and unmarked on failure:
    /// a failed submission is retried next cycle, while a successful one is
    /// never drafted twice even if the same alert reappears.
    pub async fn draft_alerts(&self, alerts: &[DisasterAlert]) -> CycleReport {
        let mut report = CycleReport {
            eligible: alerts.len(),
            ..CycleReport::default()
        };

        for alert in alerts {
            let key = ProcessedAlertKey::for_alert(alert);
            if self.ledger.has_processed(&key) {
                tracing::debug!(key = %key, "skipping already-drafted alert");
                report.skipped_duplicates += 1;
                continue;
            }

            self.ledger.mark_processed(key.clone());
            match self.submit_draft(alert).await {
                Ok(campaign) => {
                    tracing::info!(
                        key = %key,
                        campaign_id = %campaign.id,
                        goal = campaign.goal_amount,
                        "emergency campaign drafted"
                    );
                    report.drafted += 1;
                }
                Err(e) => {
                    tracing::error!(key = %key, error = %e, "draft attempt failed; will retry next cycle");
                    self.ledger.unmark(&key);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Resolve a creator and submit one draft.
    ///
    /// An administrator account owns the draft when one exists, otherwise an
    /// organization account; with neither, the attempt fails.
    async fn submit_draft(&self, alert: &DisasterAlert) -> Result<Campaign, DraftError> {
        let creator = match self.platform.find_by_role("admin").await? {
            Some(identity) => identity,
            None => self
                .platform
                .find_by_role("organization")
                .await?
                .ok_or(DraftError::NoEligibleCreator)?,
        };

        let draft = build_draft(alert, Utc::now());
        let campaign = self.platform.create_campaign(&creator.id, &draft).await?;
        Ok(campaign)
    }
}
