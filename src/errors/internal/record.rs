use thiserror::Error;

/// Outcomes of the versioned mutation protocol that are not successes
#[derive(Error, Debug)]
pub enum RecordError {
    /// Absent, or soft-deleted
    #[error("{record} not found: {id}")]
    NotFound { record: &'static str, id: String },

    /// Row is live but carries a different version than the caller expected
    #[error("{record} {id} was modified concurrently (expected version {expected_version})")]
    Conflict {
        record: &'static str,
        id: String,
        expected_version: i32,
    },

    /// Insert violated a uniqueness constraint
    #[error("{record} already exists")]
    Duplicate { record: &'static str },
}

impl RecordError {
    pub fn not_found(record: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            record,
            id: id.into(),
        }
    }

    pub fn conflict(record: &'static str, id: impl Into<String>, expected_version: i32) -> Self {
        Self::Conflict {
            record,
            id: id.into(),
            expected_version,
        }
    }
}
