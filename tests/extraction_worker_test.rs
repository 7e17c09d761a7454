/// Extraction worker tests: per-pair isolation, review flagging, re-runs
mod utils;

use deckscan::modules::batches::domain::value_objects::BatchStatus;
use deckscan::modules::jobs::domain::value_objects::JobStatus;
use deckscan::shared::errors::AppError;
use utils::fakes::FakeInferenceClient;
use utils::helpers::{self, files};
use uuid::Uuid;

/// Registers a batch, runs pairing, returns (profile_id, batch_id)
async fn paired_batch(services: &helpers::TestServices, names: &[&str]) -> (Uuid, Uuid) {
    let profile_id = Uuid::new_v4();
    let result = services
        .intake
        .register_uploads(profile_id, "box", files(names))
        .await
        .unwrap();
    let batch_id = result.batch.id;
    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();
    (profile_id, batch_id)
}

#[tokio::test]
async fn one_card_per_pair_with_both_images() {
    let services = helpers::build_test_services();
    let (profile_id, batch_id) =
        paired_batch(&services, &["card_front.jpg", "card_back.jpg"]).await;

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.cards_processed, 1);
    assert_eq!(report.cards_created, 1);
    assert!(report.errors.is_empty());

    let cards = services.cards.all();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].player.as_deref(), Some("Ken Griffey Jr."));
    assert_eq!(cards[0].year, Some(1989));
    assert!(!cards[0].needs_human_review);

    // Both sides were resolved to signed URLs and sent in one call
    let calls = services.inference.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].len(), 2);
    assert!(calls[0][0].contains("card_front.jpg"));
    assert!(calls[0][1].contains("card_back.jpg"));
}

#[tokio::test]
async fn single_sided_pair_sends_one_image() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(profile_id, "box", files(&["solo.jpg"]))
        .await
        .unwrap();
    let batch_id = result.batch.id;
    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    let orphan = &services.uploads.all()[0];
    services
        .manual
        .pair_manually(profile_id, batch_id, orphan.id, None)
        .await
        .unwrap();

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert_eq!(report.cards_created, 1);
    let calls = services.inference.calls.lock().unwrap();
    assert_eq!(calls[0].len(), 1);
}

#[tokio::test]
async fn low_confidence_flags_for_review() {
    let inference = FakeInferenceClient::with_script(vec![Ok(
        r#"{"player": "Unknown Rookie", "confidence": 0.4}"#.to_string(),
    )]);
    let services = helpers::build_test_services_with_inference(inference);
    let (profile_id, batch_id) =
        paired_batch(&services, &["rc_front.jpg", "rc_back.jpg"]).await;

    services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    let cards = services.cards.all();
    assert_eq!(cards.len(), 1);
    assert!(cards[0].needs_human_review);
    assert!((cards[0].confidence - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn unparseable_response_still_creates_a_flagged_card() {
    let inference = FakeInferenceClient::with_script(vec![Ok(
        "I am sorry, I cannot identify this card.".to_string(),
    )]);
    let services = helpers::build_test_services_with_inference(inference);
    let (profile_id, batch_id) =
        paired_batch(&services, &["m_front.jpg", "m_back.jpg"]).await;

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.cards_created, 1);

    let cards = services.cards.all();
    assert_eq!(cards[0].confidence, 0.0);
    assert!(cards[0].needs_human_review);
    assert_eq!(cards[0].player, None);
    assert_eq!(
        cards[0].raw_response,
        "I am sorry, I cannot identify this card."
    );
}

#[tokio::test]
async fn failed_pair_does_not_abort_siblings() {
    let inference = FakeInferenceClient::with_script(vec![
        Err(AppError::ExternalServiceError(
            "inference unreachable".to_string(),
        )),
        Ok(utils::fakes::DEFAULT_CARD_JSON.to_string()),
    ]);
    let services = helpers::build_test_services_with_inference(inference);
    let (profile_id, batch_id) = paired_batch(
        &services,
        &["a_front.jpg", "a_back.jpg", "b_front.jpg", "b_back.jpg"],
    )
    .await;

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert!(report.success, "partial progress still succeeds");
    assert_eq!(report.cards_processed, 2);
    assert_eq!(report.cards_created, 1);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].contains("inference unreachable"));
    assert_eq!(services.cards.all().len(), 1);
}

#[tokio::test]
async fn all_pairs_failing_reports_failure() {
    let inference = FakeInferenceClient::with_script(vec![Err(AppError::ExternalServiceError(
        "inference down".to_string(),
    ))]);
    let services = helpers::build_test_services_with_inference(inference);
    let (profile_id, batch_id) =
        paired_batch(&services, &["x_front.jpg", "x_back.jpg"]).await;

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert!(!report.success);
    assert_eq!(report.cards_created, 0);
    assert_eq!(report.errors.len(), 1);
}

#[tokio::test]
async fn empty_batch_is_an_empty_success() {
    let services = helpers::build_test_services();

    let report = services
        .extraction_worker
        .process_batch_extraction(Uuid::new_v4(), Uuid::new_v4())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.cards_processed, 0);
    assert_eq!(services.inference.call_count(), 0);
}

#[tokio::test]
async fn rerun_skips_pairs_that_already_have_cards() {
    let services = helpers::build_test_services();
    let (profile_id, batch_id) =
        paired_batch(&services, &["r_front.jpg", "r_back.jpg"]).await;

    services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();
    assert_eq!(services.cards.all().len(), 1);

    let report = services
        .extraction_worker
        .process_batch_extraction(batch_id, profile_id)
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.cards_processed, 0);
    assert_eq!(services.cards.all().len(), 1, "no duplicate card");
    assert_eq!(services.inference.call_count(), 1);
}

#[tokio::test]
async fn failed_extraction_job_marks_batch_failed() {
    let inference = FakeInferenceClient::with_script(vec![Err(AppError::ExternalServiceError(
        "inference down".to_string(),
    ))]);
    let services = helpers::build_test_services_with_inference(inference);
    let (profile_id, batch_id) =
        paired_batch(&services, &["f_front.jpg", "f_back.jpg"]).await;

    let job = services
        .intake
        .enqueue_ocr(profile_id, batch_id)
        .await
        .unwrap();

    let pass = services.orchestrator.process_queued_jobs().await.unwrap();
    assert_eq!(pass.processed, 1);
    assert!(!pass.results[0].success);

    let job = services.jobs.get(job.id).unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.error.unwrap().contains("inference down"));
    assert_eq!(
        services.batches.get(batch_id).unwrap().status,
        BatchStatus::Failed
    );
}
