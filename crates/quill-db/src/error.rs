use rusqlite::ffi;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Storage failures, with constraint violations split out so callers can
/// treat them as the authoritative conflict signal.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated")]
    ForeignKeyViolation,

    #[error("sqlite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(ref failure, ref msg) = err {
            match failure.extended_code {
                // Primary keys are generated ids, so a collision there is not
                // a user-facing conflict and stays a plain storage failure.
                ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return DbError::UniqueViolation(msg.clone().unwrap_or_default());
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return DbError::ForeignKeyViolation,
                _ => {}
            }
        }
        DbError::Sqlite(err)
    }
}
