#[cfg(test)]
use std::collections::HashMap;

/// Source of environment variables for settings and secrets
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Trimmed value of an optional setting; blank counts as unset
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the process environment
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed variable set for unit tests
#[cfg(test)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_vars(self, vars: &[(&str, &str)]) -> Self {
        vars.iter()
            .fold(self, |env, (key, value)| env.with_var(key, value))
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_environment_reads_process_env() {
        unsafe {
            std::env::set_var("REGISTRY_ENV_PROVIDER_SET_VAR", "present");
        }

        assert_eq!(
            SystemEnvironment.get_var("REGISTRY_ENV_PROVIDER_SET_VAR"),
            Some("present".to_string())
        );
        assert_eq!(SystemEnvironment.get_var("REGISTRY_ENV_PROVIDER_UNSET_VAR"), None);

        unsafe {
            std::env::remove_var("REGISTRY_ENV_PROVIDER_SET_VAR");
        }
    }

    #[test]
    fn test_mock_environment_with_vars() {
        let env = MockEnvironment::empty().with_vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "8080"),
        ]);

        assert_eq!(env.get_var("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(env.get_var("PORT"), Some("8080".to_string()));
        assert_eq!(env.get_var("TOKEN_TTL_MINUTES"), None);
    }

    #[test]
    fn test_get_setting_trims_and_ignores_blank() {
        let env = MockEnvironment::empty()
            .with_var("LOG_LEVEL", "  debug ")
            .with_var("APP_LOG_FILE", "   ");

        assert_eq!(env.get_setting("LOG_LEVEL"), Some("debug".to_string()));
        assert_eq!(env.get_setting("APP_LOG_FILE"), None);
        assert_eq!(env.get_setting("PORT"), None);
    }
}
