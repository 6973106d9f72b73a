use std::fmt;

/// Invalid infrastructure setting detected at startup
#[derive(Debug)]
pub enum BootstrapError {
    InvalidSetting { setting_name: String, reason: String },
    InvalidFormat { setting_name: String, expected: String, actual: String },
}

impl BootstrapError {
    pub fn invalid_setting(setting_name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting_name: setting_name.to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_format(setting_name: &str, expected: &str, actual: &str) -> Self {
        Self::InvalidFormat {
            setting_name: setting_name.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSetting { setting_name, reason } => {
                write!(f, "Invalid setting '{}': {}", setting_name, reason)
            }
            Self::InvalidFormat { setting_name, expected, actual } => {
                write!(
                    f,
                    "Bootstrap setting '{}' has invalid format. Expected: {}, got: {}",
                    setting_name, expected, actual
                )
            }
        }
    }
}

impl std::error::Error for BootstrapError {}
