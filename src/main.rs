use deckscan::modules::batches::BatchRepositoryImpl;
use deckscan::modules::extraction::{
    CardRepositoryImpl, ExtractionWorker, StorageClient, StorageConfig, VisionClient, VisionConfig,
};
use deckscan::modules::jobs::{BackgroundWorker, JobEventRepositoryImpl, JobRepositoryImpl, Orchestrator};
use deckscan::modules::pairing::{CardPairRepositoryImpl, PairingEngine};
use deckscan::modules::uploads::UploadRepositoryImpl;
use deckscan::shared::errors::{AppError, AppResult};
use deckscan::shared::utils::logger;
use deckscan::shared::Database;
use deckscan::{log_error, log_info};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logger::init_logger();

    if let Err(e) = run().await {
        log_error!("Service startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    let database = Database::new()?;

    {
        let mut conn = database.get_connection()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::DatabaseError(format!("Failed to run migrations: {}", e)))?;
        log_info!("Database migrations completed");
    }

    let pool = database.pool().clone();

    // Repositories
    let upload_repo = Arc::new(UploadRepositoryImpl::new(pool.clone()));
    let pair_repo = Arc::new(CardPairRepositoryImpl::new(pool.clone()));
    let card_repo = Arc::new(CardRepositoryImpl::new(pool.clone()));
    let batch_repo = Arc::new(BatchRepositoryImpl::new(pool.clone()));
    let job_repo = Arc::new(JobRepositoryImpl::new(pool.clone()));
    let event_repo = Arc::new(JobEventRepositoryImpl::new(pool));

    // External collaborators
    let store = Arc::new(StorageClient::new(StorageConfig::from_env()?)?);
    let inference = Arc::new(VisionClient::new(VisionConfig::from_env()?)?);

    // Core services
    let pairing_engine = Arc::new(PairingEngine::new(upload_repo.clone(), pair_repo.clone()));
    let extraction_worker = Arc::new(ExtractionWorker::new(
        pair_repo,
        upload_repo,
        card_repo,
        store,
        inference,
    ));

    let orchestrator = Arc::new(Orchestrator::new(
        job_repo.clone(),
        event_repo,
        batch_repo,
        pairing_engine,
        extraction_worker,
    ));

    let worker = Arc::new(BackgroundWorker::new(orchestrator, job_repo));
    let worker_handle = tokio::spawn(worker.clone().run());
    log_info!("Deckscan worker running, press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to listen for shutdown: {}", e)))?;

    worker.stop().await;
    let _ = worker_handle.await;
    log_info!("Deckscan worker shut down");

    Ok(())
}
