//! Defines the endpoint for changing the status of a transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{models::TransactionState, update_transaction_status},
};

/// The request body for changing a transaction's status.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Should be "PENDING", "COMPLETED" or "FAILED".
    pub status: String,
}

/// The response body after a transaction's status was changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatedTransactionStatus {
    /// The ID exactly as it appeared in the request path.
    pub transaction_id: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A route handler for setting the status of a transaction.
///
/// The new status does not depend on the current one, e.g. a COMPLETED
/// transaction can go back to PENDING.
///
/// `transaction_id` is taken from the path as text, so an ID that is not a
/// number is treated like any other ID without a transaction.
///
/// Responds with 404 if there is no transaction with the ID
/// `transaction_id`, and with 500 if the database rejects the status.
pub async fn update_transaction_status_endpoint(
    State(state): State<TransactionState>,
    Path(transaction_id): Path<String>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<UpdatedTransactionStatus>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    match update_transaction_status(&transaction_id, &update.status, &connection)? {
        0 => Err(Error::UpdateMissingTransaction),
        _ => {
            tracing::debug!(
                "Set status of transaction {transaction_id} to {}",
                update.status
            );

            Ok(Json(UpdatedTransactionStatus {
                transaction_id,
                status: update.status,
                timestamp: OffsetDateTime::now_utc(),
            }))
        }
    }
}
