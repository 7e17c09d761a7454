/// Pairing engine tests over in-memory repositories
///
/// Covers:
/// - Upload status transitions after a run
/// - Idempotent re-runs over resolved pools
/// - Partial persistence failure leaving uploads re-runnable
mod utils;

use deckscan::modules::pairing::domain::value_objects::PairingMethod;
use deckscan::modules::uploads::domain::value_objects::UploadStatus;
use std::sync::atomic::Ordering;
use utils::helpers::{self, files};
use uuid::Uuid;

#[tokio::test]
async fn every_upload_ends_paired_or_orphaned() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(
            profile_id,
            "box 1",
            files(&["card_front.jpg", "card_back.jpg", "mystery.jpg"]),
        )
        .await
        .unwrap();
    let batch_id = result.batch.id;

    let report = services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 1);
    assert_eq!(report.orphaned_upload_ids.len(), 1);
    assert!(report.errors.is_empty());

    for upload in services.uploads.all() {
        assert_ne!(
            upload.status,
            UploadStatus::Uploaded,
            "upload {} was left unresolved",
            upload.filename
        );
    }
}

#[tokio::test]
async fn filename_pair_is_oriented_and_scored() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(
            profile_id,
            "box 1",
            files(&["card_front.jpg", "card_back.jpg"]),
        )
        .await
        .unwrap();

    services
        .pairing_engine
        .pair_batch(result.batch.id, profile_id)
        .await
        .unwrap();

    let pairs = services.pairs.all();
    assert_eq!(pairs.len(), 1);
    let pair = &pairs[0];
    assert_eq!(pair.method, PairingMethod::AutoFilename);
    assert_eq!(pair.confidence, 0.95);

    let front = services.uploads.get(pair.front_upload_id).unwrap();
    let back = services.uploads.get(pair.back_upload_id.unwrap()).unwrap();
    assert_eq!(front.filename, "card_front.jpg");
    assert_eq!(back.filename, "card_back.jpg");
}

#[tokio::test]
async fn rerun_over_resolved_pool_changes_nothing() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(
            profile_id,
            "box 1",
            files(&["a_front.jpg", "a_back.jpg", "loose.png"]),
        )
        .await
        .unwrap();
    let batch_id = result.batch.id;

    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();
    let pairs_after_first = services.pairs.all().len();
    let statuses_after_first: Vec<_> =
        services.uploads.all().iter().map(|u| u.status).collect();

    let report = services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 0);
    assert!(report.orphaned_upload_ids.is_empty());
    assert_eq!(services.pairs.all().len(), pairs_after_first);
    let statuses_after_second: Vec<_> =
        services.uploads.all().iter().map(|u| u.status).collect();
    assert_eq!(statuses_after_first, statuses_after_second);
}

#[tokio::test]
async fn failed_pair_insert_leaves_uploads_re_runnable() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(
            profile_id,
            "box 1",
            files(&["card_front.jpg", "card_back.jpg"]),
        )
        .await
        .unwrap();
    let batch_id = result.batch.id;

    services.pairs.fail_inserts.store(true, Ordering::SeqCst);
    let report = services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    assert_eq!(report.pairs_created, 0);
    assert_eq!(report.errors.len(), 1);
    assert!(services.pairs.all().is_empty());
    // Neither paired nor orphaned: both wait for the next run
    for upload in services.uploads.all() {
        assert_eq!(upload.status, UploadStatus::Uploaded);
    }

    // The retry run succeeds once persistence recovers
    services.pairs.fail_inserts.store(false, Ordering::SeqCst);
    let report = services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();
    assert_eq!(report.pairs_created, 1);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn manual_pairing_resolves_orphans() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(profile_id, "box 1", files(&["odd.jpg", "weird.png"]))
        .await
        .unwrap();
    let batch_id = result.batch.id;

    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    let uploads = services.uploads.all();
    assert!(uploads.iter().all(|u| u.status == UploadStatus::Orphaned));

    let pair = services
        .manual
        .pair_manually(profile_id, batch_id, uploads[0].id, Some(uploads[1].id))
        .await
        .unwrap();

    assert_eq!(pair.method, PairingMethod::Manual);
    assert_eq!(pair.confidence, 1.0);
    assert!(services
        .uploads
        .all()
        .iter()
        .all(|u| u.status == UploadStatus::Paired));
}

#[tokio::test]
async fn manual_pairing_rejects_existing_members() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(
            profile_id,
            "box 1",
            files(&["a_front.jpg", "a_back.jpg", "spare.jpg"]),
        )
        .await
        .unwrap();
    let batch_id = result.batch.id;

    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    let uploads = services.uploads.all();
    let paired = uploads
        .iter()
        .find(|u| u.status == UploadStatus::Paired)
        .unwrap();
    let orphan = uploads
        .iter()
        .find(|u| u.status == UploadStatus::Orphaned)
        .unwrap();

    let err = services
        .manual
        .pair_manually(profile_id, batch_id, orphan.id, Some(paired.id))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("already belongs to a pair"));
}

#[tokio::test]
async fn manual_pairing_allows_single_sided_cards() {
    let services = helpers::build_test_services();
    let profile_id = Uuid::new_v4();

    let result = services
        .intake
        .register_uploads(profile_id, "box 1", files(&["solo.jpg"]))
        .await
        .unwrap();
    let batch_id = result.batch.id;

    services
        .pairing_engine
        .pair_batch(batch_id, profile_id)
        .await
        .unwrap();

    let orphan = &services.uploads.all()[0];
    let pair = services
        .manual
        .pair_manually(profile_id, batch_id, orphan.id, None)
        .await
        .unwrap();

    assert_eq!(pair.back_upload_id, None);
    assert_eq!(
        services.uploads.get(orphan.id).unwrap().status,
        UploadStatus::Paired
    );
}
