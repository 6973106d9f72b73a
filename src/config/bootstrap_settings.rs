use std::fmt;
use std::time::Duration;

use crate::config::errors::BootstrapError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

const DEFAULT_DATABASE_URL: &str = "sqlite://registry.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Infrastructure settings read once at startup
pub struct BootstrapSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    token_ttl_minutes: i64,
    request_timeout_seconds: u64,
}

impl BootstrapSettings {
    /// Load bootstrap settings from the given environment source, falling back to defaults
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, BootstrapError> {
        let database_url = env
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(BootstrapError::invalid_setting(
                "DATABASE_URL",
                "must be at least 1 characters long",
            ));
        }

        let server_host = env
            .get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        Self::validate_host(&server_host)?;

        let server_port = match env.get_setting("PORT") {
            Some(raw) => Self::parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let token_ttl_minutes = match env.get_setting("TOKEN_TTL_MINUTES") {
            Some(raw) => Self::parse_positive::<i64>("TOKEN_TTL_MINUTES", &raw)?,
            None => DEFAULT_TOKEN_TTL_MINUTES,
        };

        let request_timeout_seconds = match env.get_setting("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => Self::parse_positive::<u64>("REQUEST_TIMEOUT_SECONDS", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECONDS,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            token_ttl_minutes,
            request_timeout_seconds,
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_env_provider(&SystemEnvironment)
    }

    fn validate_host(value: &str) -> Result<(), BootstrapError> {
        if value.is_empty() {
            return Err(BootstrapError::invalid_setting("HOST", "cannot be empty"));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(BootstrapError::invalid_format(
                "HOST",
                "host name or IP address",
                value,
            ));
        }
        Ok(())
    }

    fn parse_port(value: &str) -> Result<u16, BootstrapError> {
        match value.trim().parse::<u16>() {
            Ok(0) | Err(_) => Err(BootstrapError::invalid_format(
                "PORT",
                "integer between 1 and 65535",
                value,
            )),
            Ok(port) => Ok(port),
        }
    }

    fn parse_positive<T>(setting_name: &str, value: &str) -> Result<T, BootstrapError>
    where
        T: std::str::FromStr + PartialOrd + Default,
    {
        match value.trim().parse::<T>() {
            Ok(parsed) if parsed > T::default() => Ok(parsed),
            _ => Err(BootstrapError::invalid_format(
                setting_name,
                "positive integer",
                value,
            )),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn token_ttl_minutes(&self) -> i64 {
        self.token_ttl_minutes
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl fmt::Debug for BootstrapSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .field("request_timeout_seconds", &self.request_timeout_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MockEnvironment;

    #[test]
    fn test_bootstrap_settings_with_all_vars() {
        let env = MockEnvironment::empty().with_vars(&[
            ("DATABASE_URL", "sqlite://test.db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("TOKEN_TTL_MINUTES", "15"),
            ("REQUEST_TIMEOUT_SECONDS", "5"),
        ]);

        let settings = BootstrapSettings::from_env_provider(&env).unwrap();

        assert_eq!(settings.database_url(), "sqlite://test.db");
        assert_eq!(settings.server_host(), "127.0.0.1");
        assert_eq!(settings.server_port(), 8080);
        assert_eq!(settings.server_address(), "127.0.0.1:8080");
        assert_eq!(settings.token_ttl_minutes(), 15);
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bootstrap_settings_with_defaults() {
        let env = MockEnvironment::empty();

        let settings = BootstrapSettings::from_env_provider(&env).unwrap();

        assert_eq!(settings.database_url(), "sqlite://registry.db?mode=rwc");
        assert_eq!(settings.server_address(), "0.0.0.0:3000");
        assert_eq!(settings.token_ttl_minutes(), 60);
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_bootstrap_settings_empty_database_url_fails_validation() {
        let env = MockEnvironment::empty().with_var("DATABASE_URL", "");

        match BootstrapSettings::from_env_provider(&env).unwrap_err() {
            BootstrapError::InvalidSetting { setting_name, reason } => {
                assert_eq!(setting_name, "DATABASE_URL");
                assert!(reason.contains("must be at least 1 characters long"));
            }
            other => panic!("Expected InvalidSetting for DATABASE_URL, got: {:?}", other),
        }
    }

    #[test]
    fn test_bootstrap_settings_empty_host_fails_validation() {
        let env = MockEnvironment::empty().with_var("HOST", "");

        let result = BootstrapSettings::from_env_provider(&env);

        assert!(matches!(
            result,
            Err(BootstrapError::InvalidSetting { ref setting_name, .. }) if setting_name == "HOST"
        ));
    }

    #[test]
    fn test_bootstrap_settings_invalid_port() {
        for bad in ["0", "70000", "abc", "-1"] {
            let env = MockEnvironment::empty().with_var("PORT", bad);

            match BootstrapSettings::from_env_provider(&env).unwrap_err() {
                BootstrapError::InvalidFormat { setting_name, actual, .. } => {
                    assert_eq!(setting_name, "PORT");
                    assert_eq!(actual, bad);
                }
                other => panic!("Expected InvalidFormat for PORT={}, got: {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_bootstrap_settings_rejects_non_positive_ttl() {
        let env = MockEnvironment::empty().with_var("TOKEN_TTL_MINUTES", "0");

        let err = BootstrapSettings::from_env_provider(&env).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bootstrap setting 'TOKEN_TTL_MINUTES' has invalid format. Expected: positive integer, got: 0"
        );
    }

    #[test]
    fn test_bootstrap_settings_rejects_invalid_timeout() {
        let env = MockEnvironment::empty().with_var("REQUEST_TIMEOUT_SECONDS", "soon");

        assert!(BootstrapSettings::from_env_provider(&env).is_err());
    }
}
