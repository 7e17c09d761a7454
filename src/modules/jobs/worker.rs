/// Background worker that runs orchestration passes on a poll interval
///
/// Passes never overlap within one worker because the loop awaits each
/// pass before starting the next; the atomic claim in the repository keeps
/// concurrent workers in other processes safe too.
use crate::modules::jobs::domain::repository::JobRepository;
use crate::modules::jobs::orchestrator::Orchestrator;
use crate::shared::errors::AppResult;
use crate::{log_error, log_info};
use std::sync::Arc;
use std::time::Duration;

pub struct BackgroundWorker {
    orchestrator: Arc<Orchestrator>,
    job_repository: Arc<dyn JobRepository>,
    poll_interval: Duration,
    is_running: Arc<tokio::sync::RwLock<bool>>,
}

impl BackgroundWorker {
    pub fn new(orchestrator: Arc<Orchestrator>, job_repository: Arc<dyn JobRepository>) -> Self {
        Self {
            orchestrator,
            job_repository,
            poll_interval: Duration::from_secs(5),
            is_running: Arc::new(tokio::sync::RwLock::new(false)),
        }
    }

    /// Start the background worker
    ///
    /// This method runs the worker loop. Call it with tokio::spawn to run
    /// in the background.
    pub async fn run(self: Arc<Self>) {
        log_info!("Background worker started");

        {
            let mut running = self.is_running.write().await;
            *running = true;
        }

        loop {
            {
                let running = self.is_running.read().await;
                if !*running {
                    log_info!("Background worker stopped");
                    break;
                }
            }

            match self.orchestrator.process_queued_jobs().await {
                Ok(pass) => {
                    if pass.processed == 0 {
                        // Queue empty, sleep before next poll
                        tokio::time::sleep(self.poll_interval).await;
                    }
                    // Jobs were processed: immediately look for more
                }
                Err(e) => {
                    log_error!("Orchestration pass failed: {}", e);
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Stop the background worker
    pub async fn stop(&self) {
        let mut running = self.is_running.write().await;
        *running = false;
        log_info!("Background worker stop requested");
    }

    /// Get statistics about the worker and job queue
    pub async fn get_statistics(&self) -> AppResult<WorkerStatistics> {
        let job_stats = self.job_repository.get_statistics().await?;
        let is_running = *self.is_running.read().await;

        Ok(WorkerStatistics {
            is_running,
            queued_jobs: job_stats.queued_count,
            running_jobs: job_stats.running_count,
            completed_jobs: job_stats.completed_count,
            failed_jobs: job_stats.failed_count,
            total_jobs: job_stats.total_count,
        })
    }
}

/// Worker statistics for monitoring
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WorkerStatistics {
    pub is_running: bool,
    pub queued_jobs: i64,
    pub running_jobs: i64,
    pub completed_jobs: i64,
    pub failed_jobs: i64,
    pub total_jobs: i64,
}
