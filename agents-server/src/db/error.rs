//! Store error taxonomy

use sqlx::error::ErrorKind;

/// Failure while talking to the backing store.
///
/// The HTTP layer maps every variant to the same 500 response, but they stay
/// distinct here so logs and tests can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Pool exhausted, closed, or the server is unreachable
    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(#[source] sqlx::Error),

    /// Statement rejected by a table constraint (e.g. duplicate AGENT_CODE)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Any other driver or decode failure
    #[error("statement failed: {0}")]
    ExecutionFailure(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => Self::ConnectionUnavailable(err),
            sqlx::Error::Database(ref db)
                if matches!(
                    db.kind(),
                    ErrorKind::UniqueViolation
                        | ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation
                ) =>
            {
                Self::ConstraintViolation(db.message().to_owned())
            }
            other => Self::ExecutionFailure(other),
        }
    }
}
