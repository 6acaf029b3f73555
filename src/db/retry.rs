use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// SQLSTATE codes worth another attempt besides the whole `08` class
const TRANSIENT_CODES: &[&str] = &["40001", "40P01", "53300", "57P01"];

/// Fixed-delay retry for recoverable connectivity faults
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Run `op`, retrying it while it fails with a transient error
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        E: Transient + fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Err(err) if attempt < self.max_retries && err.is_transient() => {
                    attempt += 1;
                    warn!(attempt, max = self.max_retries, error = %err, "transient database error, retrying");
                    tokio::time::sleep(self.delay).await;
                }
                result => return result,
            }
        }
    }
}

/// Errors that may succeed when the operation is attempted again
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for sqlx::Error {
    fn is_transient(&self) -> bool {
        is_transient(self)
    }
}

/// Failure of a transactional write, split by whether COMMIT had been sent.
///
/// Once COMMIT is on the wire the outcome is unknown, so a lost reply is
/// never retried: replaying the statements could apply them twice.
#[derive(Debug)]
pub enum WriteError {
    BeforeCommit(sqlx::Error),
    Commit(sqlx::Error),
}

impl WriteError {
    pub fn into_inner(self) -> sqlx::Error {
        match self {
            WriteError::BeforeCommit(err) | WriteError::Commit(err) => err,
        }
    }
}

impl From<sqlx::Error> for WriteError {
    fn from(err: sqlx::Error) -> Self {
        WriteError::BeforeCommit(err)
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::BeforeCommit(err) => write!(f, "{}", err),
            WriteError::Commit(err) => write!(f, "commit failed: {}", err),
        }
    }
}

impl Transient for WriteError {
    fn is_transient(&self) -> bool {
        match self {
            WriteError::BeforeCommit(err) => is_transient(err),
            WriteError::Commit(_) => false,
        }
    }
}

pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map(|code| code.starts_with("08") || TRANSIENT_CODES.contains(&&*code))
            .unwrap_or(false),
        _ => false,
    }
}
