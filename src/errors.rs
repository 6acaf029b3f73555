use std::num::ParseIntError;

use thiserror::Error;

use crate::db::retry::WriteError;

/// Failures raised by the repository and service layers
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connectivity or constraint failure, surfaced once retries are exhausted
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i32 },
}

impl From<WriteError> for StoreError {
    fn from(err: WriteError) -> Self {
        StoreError::Storage(err.into_inner())
    }
}

/// A project id typed at the prompt that is not an integer
#[derive(Debug, Error)]
#[error("'{input}' is not a valid id")]
pub struct InputFormatError {
    pub input: String,
    #[source]
    pub source: ParseIntError,
}

/// Parse an id the way the shell expects it, ignoring surrounding whitespace
pub(crate) fn parse_id(input: &str) -> Result<i32, InputFormatError> {
    input.trim().parse::<i32>().map_err(|source| InputFormatError {
        input: input.trim().to_string(),
        source,
    })
}
