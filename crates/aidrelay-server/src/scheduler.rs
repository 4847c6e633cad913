//! Background job scheduler.
//!
//! Registers the hourly emergency check at server startup. The returned
//! [`JobScheduler`] handle must be kept alive for the lifetime of the
//! process; dropping it shuts down the job.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::api::Engine;

/// Hourly, at the top of the hour.
pub const CYCLE_SCHEDULE: &str = "0 0 * * * *";

/// Builds and starts the background job scheduler.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(engine: Arc<Engine>) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(CYCLE_SCHEDULE, move |_uuid, _lock| {
        let engine = Arc::clone(&engine);

        Box::pin(async move {
            tracing::info!("scheduler: starting hourly emergency check");
            let report = engine.run_cycle().await;
            tracing::info!(
                collected = report.collected,
                drafted = report.drafted,
                failed = report.failed,
                "scheduler: hourly emergency check complete"
            );
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    Ok(scheduler)
}
