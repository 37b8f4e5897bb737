//! Defines the endpoint for creating a new transaction.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, TransactionStatus, create_transaction, models::TransactionState},
    user::UserId,
};

/// The response body for a newly created transaction.
///
/// The fields echo the request, except for the ID assigned by the database
/// and the time the server handled the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedTransaction {
    pub transaction_id: TransactionId,
    pub amount: f64,
    pub transaction_type: String,
    /// Always [TransactionStatus::Pending] for new transactions.
    pub status: TransactionStatus,
    pub user_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the new transaction on success. Transaction types
/// other than DEPOSIT and WITHDRAWAL are rejected by the database and come
/// back as a 500 with the database's message.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Json(new_transaction): Json<NewTransaction>,
) -> Result<(StatusCode, Json<CreatedTransaction>), Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction_id = create_transaction(new_transaction.clone(), &connection)?;
    tracing::debug!(
        "Created transaction {transaction_id} for user {}",
        new_transaction.user_id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedTransaction {
            transaction_id,
            amount: new_transaction.amount,
            transaction_type: new_transaction.transaction_type,
            status: TransactionStatus::default(),
            user_id: new_transaction.user_id,
            timestamp: OffsetDateTime::now_utc(),
        }),
    ))
}
