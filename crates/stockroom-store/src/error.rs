//! Storage error types.

use thiserror::Error;

/// Result type alias using [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors produced by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A UNIQUE constraint was violated (duplicate item name).
    #[error("unique constraint violated: {constraint}")]
    UniqueViolation {
        /// The constraint description reported by SQLite.
        constraint: String,
    },

    /// Any other SQLite failure.
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            let unique = failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY;
            if failure.code == rusqlite::ErrorCode::ConstraintViolation && unique {
                return Self::UniqueViolation {
                    constraint: message
                        .clone()
                        .unwrap_or_else(|| "constraint violation".to_string()),
                };
            }
        }
        Self::Sqlite(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_failure_maps_to_unique_violation() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: rusqlite::ErrorCode::ConstraintViolation,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE,
            },
            Some("UNIQUE constraint failed: items.name".to_string()),
        );

        match StoreError::from(err) {
            StoreError::UniqueViolation { constraint } => {
                assert!(constraint.contains("items.name"));
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_stay_sqlite() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(StoreError::from(err), StoreError::Sqlite(_)));
    }
}
