//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update the status of a transaction that does not exist.
    #[error("Transaction not found")]
    UpdateMissingTransaction,

    /// An unhandled/unexpected SQL error.
    ///
    /// This covers constraint violations (e.g., a duplicate username or a
    /// status outside of the allowed values) since those checks are left to
    /// the database.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => Error::SqlError(error),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => error_response(StatusCode::NOT_FOUND, "Not found"),
            Error::UpdateMissingTransaction => {
                error_response(StatusCode::NOT_FOUND, "Transaction not found")
            }
            // The database's own message is passed on to the client as is.
            Error::SqlError(error) => {
                tracing::error!("An unexpected SQL error occurred: {error}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
            }
            Error::DatabaseLockError => {
                tracing::error!("Could not acquire the database lock");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "could not acquire the database lock",
                )
            }
        }
    }
}

/// Create a JSON response of the form `{"error": message}` with the given status code.
pub fn error_response(status_code: StatusCode, message: &str) -> Response {
    (status_code, Json(json!({ "error": message }))).into_response()
}
