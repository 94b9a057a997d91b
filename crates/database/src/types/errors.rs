//! Error types for the database layer

use thiserror::Error;

/// Failure reported by the credential store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database connection error: {0}")]
    ConnectionError(String),

    #[error("database migration error: {0}")]
    MigrationError(String),

    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("duplicate entity: {0}")]
    Duplicate(String),

    #[error("stored value could not be decoded: {0}")]
    Decode(String),

    #[error("database query error: {0}")]
    Query(#[source] sqlx::Error),
}

impl DatabaseError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::Duplicate(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DatabaseError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::Decode(format!("column {index}: {source}"))
            }
            other => DatabaseError::Query(other),
        }
    }
}
