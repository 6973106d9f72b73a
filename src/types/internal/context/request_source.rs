use std::fmt;

/// Where a request originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// HTTP endpoint
    API,

    /// CLI command
    CLI,

    /// Automated operations
    System,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestSource::API => f.write_str("api"),
            RequestSource::CLI => f.write_str("cli"),
            RequestSource::System => f.write_str("system"),
        }
    }
}
