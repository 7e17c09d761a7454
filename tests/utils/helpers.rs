/// Shared wiring for integration tests: every service over in-memory fakes
use super::fakes::{
    FakeInferenceClient, FakeObjectStore, InMemoryBatchRepository, InMemoryCardPairRepository,
    InMemoryCardRepository, InMemoryJobEventRepository, InMemoryJobRepository,
    InMemoryUploadRepository,
};
use deckscan::modules::extraction::ExtractionWorker;
use deckscan::modules::jobs::Orchestrator;
use deckscan::modules::pairing::{ManualPairingService, PairingEngine};
use deckscan::modules::uploads::{IntakeService, NewUploadFile};
use std::sync::Arc;

pub struct TestServices {
    pub uploads: Arc<InMemoryUploadRepository>,
    pub pairs: Arc<InMemoryCardPairRepository>,
    pub cards: Arc<InMemoryCardRepository>,
    pub batches: Arc<InMemoryBatchRepository>,
    pub jobs: Arc<InMemoryJobRepository>,
    pub events: Arc<InMemoryJobEventRepository>,
    pub inference: Arc<FakeInferenceClient>,
    pub intake: IntakeService,
    pub manual: ManualPairingService,
    pub pairing_engine: Arc<PairingEngine>,
    pub extraction_worker: Arc<ExtractionWorker>,
    pub orchestrator: Orchestrator,
}

pub fn build_test_services() -> TestServices {
    build_test_services_with_inference(FakeInferenceClient::default())
}

pub fn build_test_services_with_inference(inference: FakeInferenceClient) -> TestServices {
    let uploads = Arc::new(InMemoryUploadRepository::default());
    let pairs = Arc::new(InMemoryCardPairRepository::default());
    let cards = Arc::new(InMemoryCardRepository::default());
    let batches = Arc::new(InMemoryBatchRepository::default());
    let jobs = Arc::new(InMemoryJobRepository::default());
    let events = Arc::new(InMemoryJobEventRepository::default());
    let inference = Arc::new(inference);
    let store = Arc::new(FakeObjectStore);

    let intake = IntakeService::new(uploads.clone(), batches.clone(), jobs.clone());
    let manual = ManualPairingService::new(uploads.clone(), pairs.clone());

    let pairing_engine = Arc::new(PairingEngine::new(uploads.clone(), pairs.clone()));
    let extraction_worker = Arc::new(ExtractionWorker::new(
        pairs.clone(),
        uploads.clone(),
        cards.clone(),
        store,
        inference.clone(),
    ));

    let orchestrator = Orchestrator::new(
        jobs.clone(),
        events.clone(),
        batches.clone(),
        pairing_engine.clone(),
        extraction_worker.clone(),
    );

    TestServices {
        uploads,
        pairs,
        cards,
        batches,
        jobs,
        events,
        inference,
        intake,
        manual,
        pairing_engine,
        extraction_worker,
        orchestrator,
    }
}

/// Shorthand for intake file lists
pub fn files(names: &[&str]) -> Vec<NewUploadFile> {
    names
        .iter()
        .map(|name| NewUploadFile {
            filename: name.to_string(),
            storage_path: format!("scans/{}", name),
        })
        .collect()
}
