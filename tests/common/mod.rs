// Common test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use driving_registry_backend::AppData;
use driving_registry_backend::cli::admin::create_admin;
use driving_registry_backend::config::{BootstrapSettings, EnvironmentProvider, SecretManager};
use driving_registry_backend::coordinators::AuthCoordinator;
use driving_registry_backend::types::dto::auth::RegisterRequest;
use driving_registry_backend::types::internal::context::RequestContext;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

pub const TEST_JWT_SECRET: &str = "integration-secret-key-with-at-least-32-chars";
pub const TEST_PASSWORD_PEPPER: &str = "integration-pepper-16";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Fixed environment for settings and secrets
pub struct StaticEnvironment {
    vars: HashMap<String, String>,
}

impl StaticEnvironment {
    pub fn new(vars: &[(&str, &str)]) -> Self {
        Self {
            vars: vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl EnvironmentProvider for StaticEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// AppData over a fresh in-memory database with default settings
pub async fn setup_app_data() -> Arc<AppData> {
    let env = StaticEnvironment::new(&[
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("PASSWORD_PEPPER", TEST_PASSWORD_PEPPER),
    ]);
    let settings = BootstrapSettings::from_env_provider(&env).expect("default settings");
    let secret_manager = Arc::new(SecretManager::from_env_provider(&env).expect("test secrets"));

    Arc::new(AppData::new(setup_test_db().await, settings, secret_manager))
}

/// Registered user principal: (principal id, bearer token)
pub async fn register_user(app_data: &Arc<AppData>, identity_no: &str) -> (String, String) {
    let token = AuthCoordinator::new(Arc::clone(app_data))
        .register(
            &RequestContext::for_system("test"),
            RegisterRequest {
                identity_no: identity_no.to_string(),
                password: TEST_PASSWORD.to_string(),
                full_name: None,
            },
        )
        .await
        .expect("Failed to register user");

    (token.principal.id, token.access_token)
}

/// Admin principal: (principal id, bearer token)
pub async fn create_admin_with_token(app_data: &Arc<AppData>, identity_no: &str) -> (String, String) {
    let admin = create_admin(Arc::clone(app_data), identity_no, Some(TEST_PASSWORD.to_string()))
        .await
        .expect("Failed to create admin");
    let token = app_data.token_service.issue(&admin).expect("Failed to issue token");

    (admin.id, token)
}

/// Context authenticated with `token`
pub async fn authenticated_context(app_data: &Arc<AppData>, token: &str) -> RequestContext {
    AuthCoordinator::new(Arc::clone(app_data))
        .authenticate(RequestContext::for_system("test"), token)
        .await
        .expect("Failed to authenticate")
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Helper to manage environment variables in tests
///
/// Cleans up specified environment variables on creation and drop,
/// ensuring test isolation when dealing with global environment state.
pub struct EnvGuard {
    vars: Vec<String>,
}

impl EnvGuard {
    pub fn new(vars: Vec<&str>) -> Self {
        // Clean up before setting new values
        for var in &vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
        Self {
            vars: vars.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for var in &self.vars {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }
}

/// Global mutex for tests that modify environment variables
///
/// Environment variables are process-global, so tests that modify them
/// must run serially to avoid race conditions.
pub static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());
