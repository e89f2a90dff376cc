use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::server::{
    error::AppError,
    model::reminder::DispatchSettings,
    service::{
        notification::{Broadcaster, EmailSender},
        reminder_dispatch::{DispatchReport, ReminderDispatcher},
    },
};

/// Everything one dispatch cycle needs, cheap to clone into scheduled closures.
#[derive(Clone)]
pub struct ReminderDispatchJob {
    db: DatabaseConnection,
    mailer: Arc<dyn EmailSender>,
    broadcaster: Arc<dyn Broadcaster>,
    settings: Arc<DispatchSettings>,
    running: Arc<Mutex<()>>,
    cancel: CancellationToken,
}

impl ReminderDispatchJob {
    pub fn new(
        db: DatabaseConnection,
        mailer: Arc<dyn EmailSender>,
        broadcaster: Arc<dyn Broadcaster>,
        settings: DispatchSettings,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            db,
            mailer,
            broadcaster,
            settings: Arc::new(settings),
            running: Arc::new(Mutex::new(())),
            cancel,
        }
    }

    /// Runs one cycle unless one is already in progress or shutdown has begun.
    ///
    /// Errors are logged, never propagated; the next tick tries again.
    ///
    /// # Returns
    /// - `Some(DispatchReport)` - The cycle ran
    /// - `None` - Skipped, cancelled, or failed
    pub async fn run_cycle(&self) -> Option<DispatchReport> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("Previous reminder dispatch cycle still running, skipping tick");
            return None;
        };

        if self.cancel.is_cancelled() {
            return None;
        }

        let dispatcher = ReminderDispatcher::new(
            &self.db,
            self.mailer.as_ref(),
            self.broadcaster.as_ref(),
            &self.settings,
        );

        match dispatcher.dispatch_due(Utc::now(), &self.cancel).await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!("Error processing reminder dispatch cycle: {}", e);
                None
            }
        }
    }
}

/// Starts the reminder dispatch scheduler
///
/// Registers a job that runs a dispatch cycle every `interval`. When
/// `dispatch_on_startup` is set, one cycle is also spawned immediately.
///
/// # Arguments
/// - `job`: Shared dispatch resources and cancellation token
/// - `interval`: Time between cycles
/// - `dispatch_on_startup`: Whether to run a cycle right away
///
/// # Returns
/// The running `JobScheduler`; the caller shuts it down on exit.
pub async fn start_scheduler(
    job: ReminderDispatchJob,
    interval: Duration,
    dispatch_on_startup: bool,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let tick_job = job.clone();
    let repeated = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let job = tick_job.clone();

        Box::pin(async move {
            job.run_cycle().await;
        })
    })?;

    scheduler.add(repeated).await?;
    scheduler.start().await?;

    if dispatch_on_startup {
        tokio::spawn(async move {
            job.run_cycle().await;
        });
    }

    tracing::info!(
        "Reminder dispatch scheduler started (every {}s)",
        interval.as_secs()
    );

    Ok(scheduler)
}
