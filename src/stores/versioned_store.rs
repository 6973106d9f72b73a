use std::marker::PhantomData;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, SqlErr, UpdateMany,
};
use uuid::Uuid;

use crate::errors::InternalError;
use crate::errors::internal::RecordError;
use crate::types::db::{VersionedEntity, VersionedModel};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Page, PageRequest};

/// Generic repository implementing the optimistic mutation protocol for any versioned table.
///
/// Mutations are a single conditional `UPDATE ... WHERE id = ? AND version = ? AND active`;
/// the version check is never done by reading first. When that write touches no row, a
/// follow-up read decides between `NotFound` (absent or soft-deleted) and `Conflict`.
pub struct VersionedStore<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> VersionedStore<E>
where
    E: VersionedEntity,
    E::Model: VersionedModel + Send + Sync + 'static,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Insert a new row at version 1, active, under a fresh id
    pub async fn create<A>(&self, ctx: &RequestContext, mut record: A) -> Result<E::Model, InternalError>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().timestamp();

        record.set(E::id_column(), id.clone().into());
        record.set(E::version_column(), 1i32.into());
        record.set(E::active_column(), true.into());
        record.set(E::creator_column(), ctx.actor_id.clone().into());
        record.set(E::created_at_column(), now.into());
        record.set(E::updated_at_column(), now.into());

        ctx.within_deadline("create_record", async {
            E::insert(record)
                .exec_without_returning(&self.db)
                .await
                .map_err(|e| Self::insert_error("create_record", e))?;

            tracing::debug!(
                request_id = %ctx.request_id,
                "{} {} created by {}",
                E::RECORD_NAME,
                id,
                ctx.actor_id
            );

            self.find_any(&id)
                .await?
                .ok_or_else(|| InternalError::from(RecordError::not_found(E::RECORD_NAME, id.clone())))
        })
        .await
    }

    /// Active record by id
    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<E::Model, InternalError> {
        ctx.within_deadline("get_record", async {
            E::find()
                .filter(E::id_column().eq(id))
                .filter(E::active_column().eq(true))
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("get_record", e))?
                .ok_or_else(|| InternalError::from(RecordError::not_found(E::RECORD_NAME, id)))
        })
        .await
    }

    /// One page of active records, most recently updated first
    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<E::Model>, InternalError> {
        self.list_where(ctx, Condition::all(), request).await
    }

    /// One page of active records matching `condition`, most recently updated first
    pub async fn list_where(
        &self,
        ctx: &RequestContext,
        condition: Condition,
        request: PageRequest,
    ) -> Result<Page<E::Model>, InternalError> {
        ctx.within_deadline("list_records", async {
            let paginator = E::find()
                .filter(E::active_column().eq(true))
                .filter(condition)
                .order_by_desc(E::updated_at_column())
                .order_by_asc(E::id_column())
                .paginate(&self.db, request.size);

            let counts = paginator
                .num_items_and_pages()
                .await
                .map_err(|e| InternalError::database("count_records", e))?;
            let items = paginator
                .fetch_page(request.index())
                .await
                .map_err(|e| InternalError::database("list_records", e))?;

            Ok(Page {
                items,
                total_count: counts.number_of_items,
                total_pages: counts.number_of_pages,
                page: request.page,
                size: request.size,
            })
        })
        .await
    }

    /// Most recently updated active record matching `condition`
    pub async fn find_where(
        &self,
        ctx: &RequestContext,
        condition: Condition,
    ) -> Result<Option<E::Model>, InternalError> {
        ctx.within_deadline("find_record", async {
            E::find()
                .filter(E::active_column().eq(true))
                .filter(condition)
                .order_by_desc(E::updated_at_column())
                .one(&self.db)
                .await
                .map_err(|e| InternalError::database("find_record", e))
        })
        .await
    }

    /// Every active record matching `condition`
    pub async fn all_where(
        &self,
        ctx: &RequestContext,
        condition: Condition,
    ) -> Result<Vec<E::Model>, InternalError> {
        ctx.within_deadline("collect_records", async {
            E::find()
                .filter(E::active_column().eq(true))
                .filter(condition)
                .all(&self.db)
                .await
                .map_err(|e| InternalError::database("collect_records", e))
        })
        .await
    }

    /// Apply `patch` if the row is active and still at `expected_version`
    pub async fn update<A>(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
        patch: A,
    ) -> Result<E::Model, InternalError>
    where
        A: ActiveModelTrait<Entity = E> + Send,
    {
        self.conditional_write(ctx, "update_record", id, expected_version, move |stmt| {
            stmt.set(patch)
        })
        .await
    }

    /// Deactivate the row if it is active and still at `expected_version`.
    /// A soft-deleted row can never be updated or restored afterwards.
    pub async fn soft_delete(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
    ) -> Result<E::Model, InternalError> {
        self.conditional_write(ctx, "soft_delete_record", id, expected_version, |stmt| {
            stmt.col_expr(E::active_column(), Expr::value(false))
        })
        .await
    }

    async fn conditional_write<F>(
        &self,
        ctx: &RequestContext,
        operation: &'static str,
        id: &str,
        expected_version: i32,
        apply: F,
    ) -> Result<E::Model, InternalError>
    where
        F: FnOnce(UpdateMany<E>) -> UpdateMany<E> + Send,
    {
        let now = Utc::now().timestamp();
        let version = E::version_column();

        let stmt = apply(E::update_many())
            .col_expr(version, Expr::col(version).add(1))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .col_expr(E::modifier_column(), Expr::value(ctx.actor_id.clone()))
            .filter(E::id_column().eq(id))
            .filter(version.eq(expected_version))
            .filter(E::active_column().eq(true));

        ctx.within_deadline(operation, async {
            let result = stmt
                .exec(&self.db)
                .await
                .map_err(|e| Self::insert_error(operation, e))?;

            if result.rows_affected == 0 {
                return Err(self.classify_failed_write(id, expected_version).await);
            }
            Ok(())
        })
        .await?;

        tracing::debug!(
            request_id = %ctx.request_id,
            "{} {} written at version {} by {}",
            E::RECORD_NAME,
            id,
            expected_version + 1,
            ctx.actor_id
        );

        // Committed: a deadline hit below still leaves the row at the new version,
        // which another writer may already have moved past
        ctx.within_deadline("read_back_record", async {
            self.find_any(id)
                .await?
                .ok_or_else(|| InternalError::from(RecordError::not_found(E::RECORD_NAME, id)))
        })
        .await
    }

    async fn classify_failed_write(&self, id: &str, expected_version: i32) -> InternalError {
        match self.find_any(id).await {
            Err(e) => e,
            Ok(Some(current)) if current.is_active() => {
                tracing::debug!(
                    "{} {} version conflict: expected {}, found {}",
                    E::RECORD_NAME,
                    id,
                    expected_version,
                    current.version()
                );
                RecordError::conflict(E::RECORD_NAME, id, expected_version).into()
            }
            Ok(_) => RecordError::not_found(E::RECORD_NAME, id).into(),
        }
    }

    /// Row by id regardless of `active`
    async fn find_any(&self, id: &str) -> Result<Option<E::Model>, InternalError> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_record", e))
    }

    fn insert_error(operation: &str, e: DbErr) -> InternalError {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => RecordError::Duplicate {
                record: E::RECORD_NAME,
            }
            .into(),
            _ => InternalError::database(operation, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{license_record, setup_test_db};
    use crate::types::db::driver_license;
    use sea_orm::ActiveValue::Set;

    fn store(db: &DatabaseConnection) -> VersionedStore<driver_license::Entity> {
        VersionedStore::new(db.clone())
    }

    fn status_patch(status: &str) -> driver_license::ActiveModel {
        driver_license::ActiveModel {
            status: Set(status.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_starts_at_version_one_and_active() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");

        let created = store(&db).create(&ctx, license_record("DL-001")).await.unwrap();

        assert_eq!(created.version, 1);
        assert!(created.active);
        assert_eq!(created.creator_id, "system:test");
        assert!(created.modifier_id.is_none());
        assert!(Uuid::parse_str(&created.id).is_ok());
    }

    #[tokio::test]
    async fn test_update_increments_version_and_applies_patch() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let created = store.create(&ctx, license_record("DL-001")).await.unwrap();

        let updated = store
            .update(&ctx, &created.id, 1, status_patch("suspended"))
            .await
            .unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.status, "suspended");
        assert_eq!(updated.license_no, "DL-001");
        assert_eq!(updated.modifier_id.as_deref(), Some("system:test"));
    }

    #[tokio::test]
    async fn test_stale_version_is_conflict() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let created = store.create(&ctx, license_record("DL-001")).await.unwrap();
        store.update(&ctx, &created.id, 1, status_patch("active")).await.unwrap();

        let result = store.update(&ctx, &created.id, 1, status_patch("paused")).await;

        assert!(matches!(
            result,
            Err(InternalError::Record(RecordError::Conflict { expected_version: 1, .. }))
        ));
        let current = store.get(&ctx, &created.id).await.unwrap();
        assert_eq!(current.version, 2);
        assert_eq!(current.status, "active");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");

        let result = store(&db).update(&ctx, "missing", 1, status_patch("x")).await;

        assert!(matches!(result, Err(InternalError::Record(RecordError::NotFound { .. }))));
    }

    #[tokio::test]
    async fn test_soft_delete_hides_record_and_blocks_updates() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let created = store.create(&ctx, license_record("DL-001")).await.unwrap();

        let deleted = store.soft_delete(&ctx, &created.id, 1).await.unwrap();
        assert_eq!(deleted.version, 2);
        assert!(!deleted.active);

        assert!(matches!(
            store.get(&ctx, &created.id).await,
            Err(InternalError::Record(RecordError::NotFound { .. }))
        ));
        // Even with the current version, a deleted row stays NotFound
        assert!(matches!(
            store.update(&ctx, &created.id, 2, status_patch("active")).await,
            Err(InternalError::Record(RecordError::NotFound { .. }))
        ));
        assert!(matches!(
            store.soft_delete(&ctx, &created.id, 2).await,
            Err(InternalError::Record(RecordError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_list_excludes_deleted_and_paginates() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let mut ids = Vec::new();
        for n in 0..5 {
            let created = store
                .create(&ctx, license_record(&format!("DL-{:03}", n)))
                .await
                .unwrap();
            ids.push(created.id);
        }
        store.soft_delete(&ctx, &ids[0], 1).await.unwrap();

        let first = store.list(&ctx, PageRequest::new(Some(1), Some(3))).await.unwrap();
        let second = store.list(&ctx, PageRequest::new(Some(2), Some(3))).await.unwrap();

        assert_eq!(first.total_count, 4);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.items.len(), 3);
        assert!(first.has_more());
        assert_eq!(second.items.len(), 1);
        assert!(!second.has_more());
        assert!(first.items.iter().chain(second.items.iter()).all(|m| m.id != ids[0]));
    }

    #[tokio::test]
    async fn test_huge_page_number_returns_empty_page() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        store.create(&ctx, license_record("DL-001")).await.unwrap();

        let page = store
            .list(&ctx, PageRequest::new(Some(u64::MAX), Some(100)))
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 1);
        assert!(!page.has_more());

        let page = store
            .list(&ctx, PageRequest::new(Some(u64::MAX / 50), Some(100)))
            .await
            .unwrap();
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn test_filtered_queries_skip_deleted_rows() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let kept = store.create(&ctx, license_record("DL-100")).await.unwrap();
        let dropped = store.create(&ctx, license_record("DL-101")).await.unwrap();
        store.create(&ctx, license_record("XX-200")).await.unwrap();
        store.soft_delete(&ctx, &dropped.id, 1).await.unwrap();

        let prefix = || Condition::all().add(driver_license::Column::LicenseNo.starts_with("DL-"));

        let page = store.list_where(&ctx, prefix(), PageRequest::default()).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].id, kept.id);

        let all = store.all_where(&ctx, prefix()).await.unwrap();
        assert_eq!(all.len(), 1);

        let found = store
            .find_where(
                &ctx,
                Condition::all().add(driver_license::Column::LicenseNo.eq("DL-101")),
            )
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_never_reused_after_delete() {
        let db = setup_test_db().await;
        let ctx = RequestContext::for_system("test");
        let store = store(&db);
        let deleted = store.create(&ctx, license_record("DL-001")).await.unwrap();
        store.soft_delete(&ctx, &deleted.id, 1).await.unwrap();

        for _ in 0..5 {
            let created = store.create(&ctx, license_record("DL-001")).await.unwrap();
            assert_ne!(created.id, deleted.id);
        }
    }
}
