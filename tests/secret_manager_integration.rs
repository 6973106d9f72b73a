mod common;

use std::sync::Arc;

use driving_registry_backend::config::{BootstrapError, BootstrapSettings, SecretError, SecretManager};
use driving_registry_backend::services::TokenService;
use driving_registry_backend::types::db::principal;
use uuid::Uuid;

const SECRET_VARS: [&str; 2] = ["JWT_SECRET", "PASSWORD_PEPPER"];

#[test]
fn test_application_startup_with_valid_secrets() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    let result = SecretManager::init();
    assert!(result.is_ok(), "SecretManager should initialize successfully with valid secrets");

    let secret_manager = Arc::new(result.unwrap());
    assert_eq!(secret_manager.jwt_secret(), "this-is-a-valid-jwt-secret-with-32-characters");
    assert_eq!(secret_manager.password_pepper(), "valid-pepper-16ch");
}

#[test]
fn test_application_fails_gracefully_with_missing_jwt_secret() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    let err = SecretManager::init().unwrap_err();
    assert_eq!(err.to_string(), "Required secret 'JWT_SECRET' is missing");
    assert!(matches!(err, SecretError::Missing { secret_name } if secret_name == "JWT_SECRET"));
}

#[test]
fn test_application_fails_gracefully_with_missing_password_pepper() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
    }

    let err = SecretManager::init().unwrap_err();
    assert!(matches!(err, SecretError::Missing { secret_name } if secret_name == "PASSWORD_PEPPER"));
}

#[test]
fn test_application_rejects_short_jwt_secret() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "too-short");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    match SecretManager::init() {
        Err(SecretError::InvalidLength { secret_name, expected, actual }) => {
            assert_eq!(secret_name, "JWT_SECRET");
            assert_eq!(expected, 32);
            assert_eq!(actual, 9);
        }
        other => panic!("Expected InvalidLength, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_secrets_never_appear_in_debug_output() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    let secret_manager = SecretManager::init().unwrap();
    let debug = format!("{:?}", secret_manager);
    let display = format!("{}", secret_manager);

    for rendered in [debug, display] {
        assert!(!rendered.contains("this-is-a-valid-jwt-secret"));
        assert!(!rendered.contains("valid-pepper-16ch"));
    }
}

#[test]
fn test_token_round_trip_with_secret_from_environment() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(SECRET_VARS.to_vec());

    unsafe {
        std::env::set_var("JWT_SECRET", "this-is-a-valid-jwt-secret-with-32-characters");
        std::env::set_var("PASSWORD_PEPPER", "valid-pepper-16ch");
    }

    let token_service = TokenService::new(Arc::new(SecretManager::init().unwrap()), 60);
    let id = Uuid::new_v4();
    let principal = principal::Model {
        id: id.to_string(),
        identity_no: "123456789".to_string(),
        password_hash: None,
        wallet_address: None,
        full_name: None,
        role: None,
        version: 1,
        active: true,
        creator_id: None,
        modifier_id: None,
        created_at: 0,
        updated_at: 0,
    };

    let token = token_service.issue(&principal).unwrap();

    assert_eq!(token_service.validate(&token).unwrap(), id);
}

#[test]
fn test_bootstrap_settings_reject_invalid_port() {
    let _lock = common::ENV_TEST_MUTEX.lock().unwrap();
    let _guard = common::EnvGuard::new(vec!["PORT"]);

    unsafe {
        std::env::set_var("PORT", "not-a-port");
    }

    assert!(matches!(
        BootstrapSettings::from_env(),
        Err(BootstrapError::InvalidFormat { setting_name, .. }) if setting_name == "PORT"
    ));
}
