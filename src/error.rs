//! Error taxonomy for the reset sequence.
//!
//! Engine errors from `rusqlite` are classified by SQLite result code so callers
//! can tell an ordering bug from an unreachable database or missing privileges.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResetError {
    /// A parent row was deleted while dependent rows still referenced it.
    #[error("referential integrity violated: {0}")]
    ReferentialIntegrity(String),

    /// The database could not be opened or is not a database.
    #[error("cannot connect to database: {0}")]
    Connection(String),

    /// The connection lacks delete/alter privileges (read-only file or denied statement).
    #[error("permission denied: {0}")]
    Permission(String),

    /// A named database object does not exist.
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Pre-flight check found diagnostics tables absent from the database.
    #[error("missing tables: {}", .0.join(", "))]
    MissingTables(Vec<String>),

    #[error(transparent)]
    Database(rusqlite::Error),
}

impl ResetError {
    /// Whether SQLite rolls back the whole enclosing transaction on this error
    /// (BUSY, FULL, IOERR, NOMEM), leaving later statements in autocommit mode.
    pub fn aborts_transaction(&self) -> bool {
        match self {
            ResetError::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                ErrorCode::DatabaseBusy
                    | ErrorCode::DiskFull
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::OutOfMemory
            ),
            _ => false,
        }
    }
}

impl From<rusqlite::Error> for ResetError {
    fn from(err: rusqlite::Error) -> Self {
        let (code, extended_code) = match &err {
            rusqlite::Error::SqliteFailure(e, _) => (e.code, e.extended_code),
            _ => return ResetError::Database(err),
        };

        match code {
            ErrorCode::ConstraintViolation
                if extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                ResetError::ReferentialIntegrity(err.to_string())
            }
            ErrorCode::CannotOpen | ErrorCode::NotADatabase => {
                ResetError::Connection(err.to_string())
            }
            ErrorCode::PermissionDenied
            | ErrorCode::ReadOnly
            | ErrorCode::AuthorizationForStatementDenied => ResetError::Permission(err.to_string()),
            _ => ResetError::Database(err),
        }
    }
}
