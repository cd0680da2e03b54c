mod session_sweep;

pub use session_sweep::{sweep_expired_sessions, SweepStats};

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::config::SrsConfig;
use crate::srs::SessionMemory;

pub struct WorkerManager {
    scheduler: Mutex<JobScheduler>,
    shutdown_tx: broadcast::Sender<()>,
    session_memory: Arc<dyn SessionMemory>,
    config: SrsConfig,
    running: AtomicBool,
    scheduled_jobs: AtomicUsize,
}

impl WorkerManager {
    pub async fn new(
        session_memory: Arc<dyn SessionMemory>,
        config: SrsConfig,
    ) -> Result<Self, WorkerError> {
        let scheduler = JobScheduler::new().await?;
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            scheduler: Mutex::new(scheduler),
            shutdown_tx,
            session_memory,
            config,
            running: AtomicBool::new(false),
            scheduled_jobs: AtomicUsize::new(0),
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn scheduled_jobs(&self) -> usize {
        self.scheduled_jobs.load(Ordering::Relaxed)
    }

    /// Runs one sweep immediately, outside the schedule.
    pub fn run_sweep_once(&self) -> SweepStats {
        sweep_expired_sessions(self.session_memory.as_ref(), Utc::now())
    }

    pub async fn start(&self) -> Result<(), WorkerError> {
        if !self.config.sweep_enabled {
            info!("SRS_SWEEP_ENABLED is off, skipping session sweep worker");
            return Ok(());
        }

        let schedule = self.config.sweep_schedule.trim().to_string();
        if schedule.is_empty() {
            return Err(WorkerError::InvalidSchedule(self.config.sweep_schedule.clone()));
        }

        let scheduler = self.scheduler.lock().await;
        if self.is_running() {
            info!("Workers already running, skipping start");
            return Ok(());
        }

        let store = Arc::clone(&self.session_memory);
        let shutdown_rx = self.shutdown_tx.subscribe();
        let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let store = Arc::clone(&store);
            let mut rx = shutdown_rx.resubscribe();
            Box::pin(async move {
                tokio::select! {
                    _ = rx.recv() => {},
                    _ = async {
                        sweep_expired_sessions(store.as_ref(), Utc::now());
                    } => {}
                }
            })
        })?;
        scheduler.add(job).await?;
        self.scheduled_jobs.fetch_add(1, Ordering::Relaxed);
        info!(schedule = %schedule, "Session sweep worker scheduled");

        scheduler.start().await?;
        self.running.store(true, Ordering::Relaxed);
        info!("All workers started");

        Ok(())
    }

    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::Relaxed) {
            return;
        }

        info!("Stopping workers...");
        let _ = self.shutdown_tx.send(());

        let mut scheduler = self.scheduler.lock().await;
        if let Err(e) = scheduler.shutdown().await {
            warn!(error = %e, "Error shutting down scheduler");
        }
        self.scheduled_jobs.store(0, Ordering::Relaxed);

        info!("Workers stopped");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
    #[error("Invalid sweep schedule: {0:?}")]
    InvalidSchedule(String),
}
