// Test utilities shared across unit tests
// Only compiled when running tests

use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::ActiveValue::Set;
use sea_orm::{Database, DatabaseConnection};

use crate::AppData;
use crate::config::{BootstrapSettings, MockEnvironment, SecretManager};
use crate::stores::NewPrincipal;
use crate::types::db::{
    driver_license, notification, principal, traffic_violation, vehicle_registration,
};
use crate::types::internal::context::RequestContext;
use crate::types::internal::{AuthenticatedPrincipal, Role};

pub const TEST_JWT_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD_PEPPER: &str = "test-pepper-for-unit-tests";

/// Fresh in-memory database with all migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn test_secret_manager() -> Arc<SecretManager> {
    let env = MockEnvironment::empty().with_vars(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
    ]);
    Arc::new(SecretManager::from_env_provider(&env).expect("test secrets are valid"))
}

/// Defaults for every setting
pub fn test_settings() -> BootstrapSettings {
    BootstrapSettings::from_env_provider(&MockEnvironment::empty()).expect("defaults are valid")
}

/// AppData over a fresh in-memory database
pub async fn setup_test_app_data() -> Arc<AppData> {
    let db = setup_test_db().await;
    Arc::new(AppData::new(db, test_settings(), test_secret_manager()))
}

/// Unsaved principal model for token tests
pub fn test_principal(id: &str, identity_no: &str) -> principal::Model {
    principal::Model {
        id: id.to_string(),
        identity_no: identity_no.to_string(),
        password_hash: None,
        wallet_address: None,
        full_name: None,
        role: Some("user".to_string()),
        version: 1,
        active: true,
        creator_id: None,
        modifier_id: None,
        created_at: 0,
        updated_at: 0,
    }
}

/// Persist a principal and return a context authenticated as it
pub async fn principal_context(
    app_data: &AppData,
    identity_no: &str,
    role: Option<Role>,
) -> RequestContext {
    let seed_ctx = RequestContext::for_system("seed");
    let model = app_data
        .principal_store
        .create(
            &seed_ctx,
            NewPrincipal {
                identity_no: identity_no.to_string(),
                password_hash: None,
                full_name: None,
                role,
            },
        )
        .await
        .expect("Failed to seed principal");

    RequestContext::for_system("test").with_principal(AuthenticatedPrincipal::from(&model))
}

/// Persist a principal, link `wallet_address` to it and return a context reflecting the link
pub async fn wallet_principal_context(
    app_data: &AppData,
    identity_no: &str,
    wallet_address: &str,
) -> RequestContext {
    let ctx = principal_context(app_data, identity_no, Some(Role::User)).await;
    app_data
        .wallet_link_store
        .link(&ctx, identity_no, wallet_address)
        .await
        .expect("Failed to link wallet");
    let model = app_data
        .principal_store
        .by_identity_number(&ctx, identity_no)
        .await
        .expect("Linked principal exists");

    RequestContext::for_system("test").with_principal(AuthenticatedPrincipal::from(&model))
}

/// Insertable driver license with every required field filled
pub fn license_record(license_no: &str) -> driver_license::ActiveModel {
    driver_license::ActiveModel {
        full_name: Set("Nguyen Van A".to_string()),
        dob: Set("1990-01-01".to_string()),
        identity_no: Set("123456789".to_string()),
        license_no: Set(license_no.to_string()),
        license_type: Set("B2".to_string()),
        issue_date: Set("2020-01-01".to_string()),
        expiry_date: Set(None),
        status: Set("active".to_string()),
        issuing_authority: Set("Hanoi Transport Department".to_string()),
        nationality: Set("VN".to_string()),
        point: Set(12),
        wallet_address: Set(None),
        modifier_id: Set(None),
        ..Default::default()
    }
}

/// Driver license issued to `identity_no`, optionally bound to a wallet
pub fn license_for(
    identity_no: &str,
    license_no: &str,
    wallet_address: Option<&str>,
) -> driver_license::ActiveModel {
    driver_license::ActiveModel {
        identity_no: Set(identity_no.to_string()),
        wallet_address: Set(wallet_address.map(str::to_string)),
        ..license_record(license_no)
    }
}

pub fn vehicle_record(vehicle_no: &str) -> vehicle_registration::ActiveModel {
    vehicle_registration::ActiveModel {
        vehicle_no: Set(vehicle_no.to_string()),
        owner_name: Set("Nguyen Van A".to_string()),
        brand: Set("Honda".to_string()),
        type_vehicle: Set("motorbike".to_string()),
        color_vehicle: Set("black".to_string()),
        chassis_no: Set(format!("CH-{}", vehicle_no)),
        engine_no: Set(format!("EN-{}", vehicle_no)),
        seats: Set(Some(2)),
        issue_date: Set("2021-05-01".to_string()),
        issuer: Set("Hanoi Police".to_string()),
        status: Set("active".to_string()),
        modifier_id: Set(None),
        ..Default::default()
    }
}

pub fn violation_record(vehicle_no: &str) -> traffic_violation::ActiveModel {
    traffic_violation::ActiveModel {
        vehicle_no: Set(vehicle_no.to_string()),
        date: Set("2024-03-01".to_string()),
        violation_type: Set("speeding".to_string()),
        address: Set("Nguyen Trai, Hanoi".to_string()),
        description: Set(String::new()),
        points: Set(2),
        fine_amount: Set(800_000),
        status: Set("unpaid".to_string()),
        modifier_id: Set(None),
        ..Default::default()
    }
}

/// Notification for `target` ("all" or "user"), addressed to `target_user` when given
pub fn notification_record(
    code: &str,
    target: &str,
    target_user: Option<&str>,
) -> notification::ActiveModel {
    notification::ActiveModel {
        code: Set(code.to_string()),
        title: Set(format!("Notice {}", code)),
        content: Set("Please check your registry records.".to_string()),
        notification_type: Set("reminder".to_string()),
        target: Set(target.to_string()),
        target_user: Set(target_user.map(str::to_string)),
        status: Set("active".to_string()),
        modifier_id: Set(None),
        ..Default::default()
    }
}
