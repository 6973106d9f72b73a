mod common;

use driving_registry_backend::errors::InternalError;
use driving_registry_backend::errors::internal::RecordError;
use driving_registry_backend::stores::VersionedStore;
use driving_registry_backend::types::db::driver_license;
use driving_registry_backend::types::internal::PageRequest;
use driving_registry_backend::types::internal::context::RequestContext;
use sea_orm::ActiveValue::Set;
use sea_orm::DatabaseConnection;

fn license(license_no: &str) -> driver_license::ActiveModel {
    driver_license::ActiveModel {
        full_name: Set("Pham Van D".to_string()),
        dob: Set("1985-05-05".to_string()),
        identity_no: Set("123456789".to_string()),
        license_no: Set(license_no.to_string()),
        license_type: Set("A1".to_string()),
        issue_date: Set("2019-03-01".to_string()),
        expiry_date: Set(None),
        status: Set("active".to_string()),
        issuing_authority: Set("Da Nang Transport Department".to_string()),
        nationality: Set("VN".to_string()),
        point: Set(12),
        ..Default::default()
    }
}

fn status(value: &str) -> driver_license::ActiveModel {
    driver_license::ActiveModel {
        status: Set(value.to_string()),
        ..Default::default()
    }
}

async fn license_at_version(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    version: i32,
) -> driver_license::Model {
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let mut record = store.create(ctx, license("DL-001")).await.unwrap();
    while record.version < version {
        record = store
            .update(ctx, &record.id, record.version, status("active"))
            .await
            .unwrap();
    }
    record
}

#[tokio::test]
async fn test_concurrent_updates_exactly_one_wins() {
    let db = common::setup_test_db().await;
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let ctx_a = RequestContext::for_system("writer-a");
    let ctx_b = RequestContext::for_system("writer-b");
    let record = store.create(&ctx_a, license("DL-001")).await.unwrap();

    let (a, b) = tokio::join!(
        store.update(&ctx_a, &record.id, 1, status("suspended")),
        store.update(&ctx_b, &record.id, 1, status("revoked")),
    );

    let outcomes = [a, b];
    let successes: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(InternalError::Record(RecordError::Conflict { .. }))))
        .count();

    assert_eq!(successes.len(), 1);
    assert_eq!(conflicts, 1);
    assert_eq!(successes[0].version, 2);

    let current = store.get(&ctx_a, &record.id).await.unwrap();
    assert_eq!(current.version, 2);
    assert_eq!(current.status, successes[0].status);
}

#[tokio::test]
async fn test_many_concurrent_writers_version_advances_once() {
    let db = common::setup_test_db().await;
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let ctx = RequestContext::for_system("seed");
    let record = store.create(&ctx, license("DL-002")).await.unwrap();

    let mut handles = Vec::new();
    for n in 0..8 {
        let store = VersionedStore::<driver_license::Entity>::new(db.clone());
        let id = record.id.clone();
        handles.push(tokio::spawn(async move {
            let ctx = RequestContext::for_system(&format!("writer-{}", n));
            store.update(&ctx, &id, 1, status(&format!("status-{}", n))).await
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(InternalError::Record(RecordError::Conflict { .. })) => conflicts += 1,
            Err(e) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);
    assert_eq!(store.get(&ctx, &record.id).await.unwrap().version, 2);
}

#[tokio::test]
async fn test_repeated_update_with_stale_version_conflicts() {
    let db = common::setup_test_db().await;
    let ctx = RequestContext::for_system("test");
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let record = license_at_version(&db, &ctx, 3).await;

    let updated = store.update(&ctx, &record.id, 3, status("active")).await.unwrap();
    assert_eq!(updated.version, 4);

    let repeated = store.update(&ctx, &record.id, 3, status("paused")).await;
    assert!(matches!(
        repeated,
        Err(InternalError::Record(RecordError::Conflict { expected_version: 3, .. }))
    ));
}

#[tokio::test]
async fn test_soft_deleted_record_is_not_found_for_reads_and_writes() {
    let db = common::setup_test_db().await;
    let ctx = RequestContext::for_system("test");
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let record = store.create(&ctx, license("DL-003")).await.unwrap();

    let deleted = store.soft_delete(&ctx, &record.id, 1).await.unwrap();
    assert_eq!(deleted.version, 2);

    assert!(matches!(
        store.get(&ctx, &record.id).await,
        Err(InternalError::Record(RecordError::NotFound { .. }))
    ));
    // The version returned by the delete does not revive the row
    assert!(matches!(
        store.update(&ctx, &record.id, 2, status("active")).await,
        Err(InternalError::Record(RecordError::NotFound { .. }))
    ));

    let page = store.list(&ctx, PageRequest::default()).await.unwrap();
    assert_eq!(page.total_count, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_expired_deadline_aborts_storage_call() {
    let db = common::setup_test_db().await;
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let ctx = RequestContext::for_system("test").with_timeout(std::time::Duration::ZERO);

    let result = store.create(&ctx, license("DL-004")).await;

    assert!(matches!(result, Err(InternalError::DeadlineExceeded { .. })));
}

#[tokio::test]
async fn test_retry_after_deadline_uses_reread_version() {
    let db = common::setup_test_db().await;
    let store = VersionedStore::<driver_license::Entity>::new(db.clone());
    let ctx = RequestContext::for_system("test");
    let created = store.create(&ctx, license("DL-005")).await.unwrap();
    let expired = RequestContext::for_system("test").with_timeout(std::time::Duration::ZERO);

    let result = store.update(&expired, &created.id, 1, status("suspended")).await;
    assert!(matches!(result, Err(InternalError::DeadlineExceeded { .. })));

    // A 408 does not say whether the write landed; the re-read version decides
    let current = store.get(&ctx, &created.id).await.unwrap();
    if current.version > 1 {
        assert!(matches!(
            store.update(&ctx, &created.id, 1, status("suspended")).await,
            Err(InternalError::Record(RecordError::Conflict { .. }))
        ));
    }
    let retried = store
        .update(&ctx, &created.id, current.version, status("suspended"))
        .await
        .unwrap();
    assert_eq!(retried.version, current.version + 1);
}
