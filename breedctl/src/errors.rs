use crate::db::errors::{DbError, StorageError};
use crate::import::SourceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Requested resource not found
    #[error("{resource} with ID {id} not found")]
    NotFound { resource: String, id: String },

    /// Catalogue operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Import source could not be read or parsed
    #[error(transparent)]
    Source(#[from] SourceError),
}

fn storage_status(err: &StorageError) -> StatusCode {
    match err {
        StorageError::UniqueViolation { .. } => StatusCode::CONFLICT,
        StorageError::CheckViolation { .. } => StatusCode::BAD_REQUEST,
        StorageError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn storage_message(err: &StorageError) -> &'static str {
    match err {
        StorageError::UniqueViolation { .. } => "Resource already exists",
        StorageError::CheckViolation { .. } => "Invalid data provided",
        StorageError::Other(_) => "Database error occurred",
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Database(db_err) => match db_err {
                DbError::Validation { .. } | DbError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::Persistence { source, .. } | DbError::ImportRecord { source, .. } => storage_status(source),
            },
            Error::Source(SourceError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Source(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound { resource, id } => format!("{resource} with ID {id} not found"),
            Error::Database(db_err) => match db_err {
                DbError::Validation { .. } | DbError::NoFieldsToUpdate => db_err.to_string(),
                DbError::NotFound => "Resource not found".to_string(),
                DbError::Persistence { source, .. } => storage_message(source).to_string(),
                DbError::ImportRecord { position, record, source } => match source {
                    StorageError::Other(_) => "Import failed, no records were imported".to_string(),
                    _ => format!(
                        "Import rejected at record {position} ({record}): {}, no records were imported",
                        storage_message(source).to_lowercase()
                    ),
                },
            },
            Error::Source(SourceError::Io { .. }) => "Failed to read import source".to_string(),
            Error::Source(source_err) => source_err.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Internal service error: {:#}", self);
        } else if matches!(self, Error::Database(DbError::Persistence { .. } | DbError::ImportRecord { .. })) {
            tracing::warn!("Database constraint error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        match &self {
            // Import failures point at the offending record so the source can be fixed
            Error::Database(DbError::ImportRecord { position, record, .. }) if !status.is_server_error() => {
                let body = json!({
                    "message": self.user_message(),
                    "position": position,
                    "id": record.id,
                    "name": record.name,
                });
                (status, axum::response::Json(body)).into_response()
            }
            _ => (status, self.user_message()).into_response(),
        }
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
