use thiserror::Error;

/// Errors surfaced by the chore engine and its persistence boundary.
#[derive(Debug, Error)]
pub enum ChoreError {
    /// A calendar date that is not `YYYY-MM-DD` or does not exist.
    #[error("invalid calendar date `{input}`")]
    InvalidDate { input: String },

    #[error("chore document I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("chore document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ChoreError {
    pub(crate) fn invalid_date(input: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
        }
    }
}
