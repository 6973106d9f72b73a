use std::sync::Arc;

use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, IntoActiveModel};

use crate::AppData;
use crate::errors::InternalError;
use crate::errors::internal::validation::require_non_empty;
use crate::services::AuthorizationGuard;
use crate::stores::VersionedStore;
use crate::types::db::{VersionedEntity, VersionedModel};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{Page, PageRequest, Role};

/***
 * CRUD workflow shared by every registry record type.
 *
 * Create is gated by role membership; update and delete load the live record,
 * require its creator or an admin, then hand the caller's expected version to
 * the conditional write. Reads are public.
 */
pub struct RecordCoordinator<E> {
    store: VersionedStore<E>,
    create_roles: &'static [Role],
}

impl<E> RecordCoordinator<E>
where
    E: VersionedEntity,
    E::Model: VersionedModel + Send + Sync + 'static,
{
    pub fn new(app_data: Arc<AppData>, create_roles: &'static [Role]) -> Self {
        Self {
            store: VersionedStore::new(app_data.db.clone()),
            create_roles,
        }
    }

    pub async fn create<A>(&self, ctx: &RequestContext, record: A) -> Result<E::Model, InternalError>
    where
        A: ActiveModelTrait<Entity = E> + Send,
        E::Model: IntoActiveModel<A>,
    {
        AuthorizationGuard::require_role(ctx, self.create_roles)?;
        self.store.create(ctx, record).await
    }

    pub async fn get(&self, ctx: &RequestContext, id: &str) -> Result<E::Model, InternalError> {
        self.store.get(ctx, id).await
    }

    pub async fn list(
        &self,
        ctx: &RequestContext,
        request: PageRequest,
    ) -> Result<Page<E::Model>, InternalError> {
        self.store.list(ctx, request).await
    }

    /// Active records whose `column` contains `term`
    pub async fn search(
        &self,
        ctx: &RequestContext,
        column: E::Column,
        term: &str,
        request: PageRequest,
    ) -> Result<Page<E::Model>, InternalError> {
        require_non_empty("q", term)?;
        let condition = Condition::all().add(column.contains(term.trim()));
        self.store.list_where(ctx, condition, request).await
    }

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
        self.authorize_mutation(ctx, id).await?;
        self.store.update(ctx, id, expected_version, patch).await
    }

    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: &str,
        expected_version: i32,
    ) -> Result<E::Model, InternalError> {
        self.authorize_mutation(ctx, id).await?;
        self.store.soft_delete(ctx, id, expected_version).await
    }

    /// Unauthenticated first, then NotFound, then ownership
    async fn authorize_mutation(&self, ctx: &RequestContext, id: &str) -> Result<(), InternalError> {
        ctx.principal()?;
        let current = self.store.get(ctx, id).await?;
        AuthorizationGuard::require_owner_or_admin(ctx, current.owner_id())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::{AuthorizationError, RecordError};
    use crate::test::utils::{license_record, principal_context, setup_test_app_data};
    use crate::types::db::driver_license;
    use sea_orm::ActiveValue::Set;

    fn status_patch(status: &str) -> driver_license::ActiveModel {
        driver_license::ActiveModel {
            status: Set(status.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_permitted_role() {
        let app_data = setup_test_app_data().await;
        let coordinator =
            RecordCoordinator::<driver_license::Entity>::new(app_data.clone(), &[Role::Admin]);
        let user_ctx = principal_context(&app_data, "111111111", Some(Role::User)).await;
        let admin_ctx = principal_context(&app_data, "999999999", Some(Role::Admin)).await;

        assert!(matches!(
            coordinator.create(&user_ctx, license_record("DL-001")).await,
            Err(InternalError::Authorization(AuthorizationError::RoleNotPermitted { .. }))
        ));
        assert!(matches!(
            coordinator
                .create(&RequestContext::for_system("test"), license_record("DL-001"))
                .await,
            Err(InternalError::Authorization(AuthorizationError::Unauthenticated))
        ));

        let created = coordinator.create(&admin_ctx, license_record("DL-001")).await.unwrap();
        assert_eq!(created.creator_id, admin_ctx.actor_id);
    }

    #[tokio::test]
    async fn test_only_creator_or_admin_may_mutate() {
        let app_data = setup_test_app_data().await;
        let coordinator = RecordCoordinator::<driver_license::Entity>::new(
            app_data.clone(),
            &[Role::Admin, Role::User],
        );
        let owner_ctx = principal_context(&app_data, "111111111", Some(Role::User)).await;
        let other_ctx = principal_context(&app_data, "222222222", Some(Role::User)).await;
        let admin_ctx = principal_context(&app_data, "999999999", Some(Role::Admin)).await;
        let created = coordinator.create(&owner_ctx, license_record("DL-001")).await.unwrap();

        assert!(matches!(
            coordinator.update(&other_ctx, &created.id, 1, status_patch("x")).await,
            Err(InternalError::Authorization(AuthorizationError::NotOwnerOrAdmin { .. }))
        ));

        let updated = coordinator
            .update(&owner_ctx, &created.id, 1, status_patch("suspended"))
            .await
            .unwrap();
        assert_eq!(updated.version, 2);

        let deleted = coordinator.delete(&admin_ctx, &created.id, 2).await.unwrap();
        assert!(!deleted.active);
        assert_eq!(deleted.modifier_id.as_deref(), Some(admin_ctx.actor_id.as_str()));
    }

    #[tokio::test]
    async fn test_search_matches_substring_of_column() {
        let app_data = setup_test_app_data().await;
        let coordinator =
            RecordCoordinator::<driver_license::Entity>::new(app_data.clone(), &[Role::Admin]);
        let admin_ctx = principal_context(&app_data, "999999999", Some(Role::Admin)).await;
        for license_no in ["HN-0001", "HN-0002", "SG-0001"] {
            coordinator.create(&admin_ctx, license_record(license_no)).await.unwrap();
        }

        let page = coordinator
            .search(&admin_ctx, driver_license::Column::LicenseNo, " HN-", PageRequest::default())
            .await
            .unwrap();

        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|l| l.license_no.starts_with("HN-")));
    }

    #[tokio::test]
    async fn test_blank_search_term_is_rejected() {
        let app_data = setup_test_app_data().await;
        let coordinator =
            RecordCoordinator::<driver_license::Entity>::new(app_data.clone(), &[Role::Admin]);
        let ctx = RequestContext::for_system("test");

        let result = coordinator
            .search(&ctx, driver_license::Column::LicenseNo, "  ", PageRequest::default())
            .await;

        assert!(matches!(result, Err(InternalError::Validation(_))));
    }

    #[tokio::test]
    async fn test_mutating_missing_record_is_not_found() {
        let app_data = setup_test_app_data().await;
        let coordinator =
            RecordCoordinator::<driver_license::Entity>::new(app_data.clone(), &[Role::Admin]);
        let admin_ctx = principal_context(&app_data, "999999999", Some(Role::Admin)).await;

        assert!(matches!(
            coordinator.delete(&admin_ctx, "missing", 1).await,
            Err(InternalError::Record(RecordError::NotFound { .. }))
        ));
    }
}
