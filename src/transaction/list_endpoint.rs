//! Defines the endpoint for listing a user's transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    transaction::{Transaction, get_transactions_by_user, models::TransactionState},
};

/// The query string for listing transactions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListTransactionsQuery {
    /// The user whose transactions to list.
    ///
    /// Kept as a string, values that are not a user ID match no transactions.
    pub user_id: Option<String>,
}

/// The response body for the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionList {
    pub transactions: Vec<Transaction>,
}

/// A route handler for listing the transactions that belong to a user.
///
/// Responds with 200 and the matching transactions, oldest first. A user
/// without transactions gets an empty list.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<TransactionList>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_by_user(query.user_id.as_deref(), &connection)?;

    Ok(Json(TransactionList { transactions }))
}
