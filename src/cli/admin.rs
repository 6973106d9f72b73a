use std::sync::Arc;

use crate::app_data::AppData;
use crate::coordinators::AuthCoordinator;
use crate::errors::InternalError;
use crate::services::crypto::generate_secure_password;
use crate::types::db::principal;
use crate::types::internal::context::RequestContext;

/// Create an admin principal; a generated password is printed exactly once
pub async fn create_admin(
    app_data: Arc<AppData>,
    identity_no: &str,
    password: Option<String>,
) -> Result<principal::Model, InternalError> {
    let ctx = RequestContext::for_cli("create-admin");
    let coordinator = AuthCoordinator::new(app_data);

    let generated = password.is_none();
    let password = password.unwrap_or_else(generate_secure_password);

    let admin = coordinator.create_admin(&ctx, identity_no, &password).await?;
    tracing::info!(principal_id = %admin.id, "Admin principal created via CLI");

    println!("Admin created");
    println!("  id:          {}", admin.id);
    println!("  identity_no: {}", admin.identity_no);
    if generated {
        println!("  password:    {}", password);
        println!("Store this password now; it will not be shown again.");
    }

    Ok(admin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::internal::PrincipalError;
    use crate::test::utils::setup_test_app_data;
    use crate::types::dto::auth::LoginRequest;

    #[tokio::test]
    async fn test_create_admin_with_explicit_password_can_login() {
        let app_data = setup_test_app_data().await;

        let admin = create_admin(app_data.clone(), "999999999", Some("admin-password".to_string()))
            .await
            .unwrap();
        assert_eq!(admin.role.as_deref(), Some("admin"));
        assert_eq!(admin.creator_id.as_deref(), Some("cli:create-admin"));

        let token = AuthCoordinator::new(app_data)
            .login(
                &RequestContext::for_system("test"),
                LoginRequest {
                    identity_no: "999999999".to_string(),
                    password: "admin-password".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(token.principal.id, admin.id);
    }

    #[tokio::test]
    async fn test_create_admin_twice_is_duplicate() {
        let app_data = setup_test_app_data().await;
        create_admin(app_data.clone(), "999999999", None).await.unwrap();

        let result = create_admin(app_data, "999999999", None).await;

        assert!(matches!(
            result,
            Err(InternalError::Principal(PrincipalError::DuplicateIdentity { .. }))
        ));
    }
}
