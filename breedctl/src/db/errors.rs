use crate::types::{BreedId, Operation};
use std::fmt;
use thiserror::Error;

/// Failure reported by a storage backend, categorised so callers can tell constraint
/// violations apart from infrastructure problems.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Unique constraint violation
    #[error("Unique constraint violation: {message}")]
    UniqueViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Check constraint violation (empty text column, non-positive weight or id)
    #[error("Check constraint violation: {message}")]
    CheckViolation {
        constraint: Option<String>,
        table: Option<String>,
        message: String,
    },

    /// Connection failures, malformed queries, aborted transactions and everything else
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convert from sqlx::Error using sqlx's database error categorisation
impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StorageError::UniqueViolation {
                constraint: db_err.constraint().map(|s| s.to_string()),
                table: db_err.table().map(|s| s.to_string()),
                message: db_err.message().to_string(),
            },
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => StorageError::CheckViolation {
                constraint: db_err.constraint().map(|s| s.to_string()),
                table: db_err.table().map(|s| s.to_string()),
                message: db_err.message().to_string(),
            },
            _ => StorageError::Other(anyhow::Error::from(err)),
        }
    }
}

/// Identity of an import record, used to point at the row that aborted a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    pub id: BreedId,
    pub name: String,
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "breed {:?} with id {}", self.name, self.id)
    }
}

/// The error kinds callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    NoFieldsToUpdate,
    Persistence,
}

/// Unified error type for breed engine operations
#[derive(Error, Debug)]
pub enum DbError {
    /// Caller input violates a breed invariant. Raised before storage is touched.
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: &'static str },

    /// Entity not found by the given identifier
    #[error("Entity not found")]
    NotFound,

    /// A partial update carried nothing that counts as a change
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// The backend rejected or failed the operation
    #[error("Failed to {operation}: {source}")]
    Persistence {
        operation: Operation,
        #[source]
        source: StorageError,
    },

    /// A bulk import was rolled back because one of its records failed. `position` is 1-based.
    #[error("Import rolled back at record {position} ({record}): {source}")]
    ImportRecord {
        position: usize,
        record: RecordRef,
        #[source]
        source: StorageError,
    },
}

impl DbError {
    /// Wrap a storage failure with the operation it happened in, for use with `map_err`
    pub fn during(operation: Operation) -> impl FnOnce(StorageError) -> DbError {
        move |source| DbError::Persistence { operation, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::Validation { .. } => ErrorKind::Validation,
            DbError::NotFound => ErrorKind::NotFound,
            DbError::NoFieldsToUpdate => ErrorKind::NoFieldsToUpdate,
            DbError::Persistence { .. } | DbError::ImportRecord { .. } => ErrorKind::Persistence,
        }
    }

    /// The underlying backend failure, if this error came from storage
    pub fn storage_error(&self) -> Option<&StorageError> {
        match self {
            DbError::Persistence { source, .. } | DbError::ImportRecord { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Type alias for engine operation results
pub type Result<T> = std::result::Result<T, DbError>;

/// Type alias for storage backend results
pub type StorageResult<T> = std::result::Result<T, StorageError>;
