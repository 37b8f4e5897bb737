//! Database queries for the transaction table.

use rusqlite::{Connection, Row, ToSql};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{NewTransaction, Transaction},
    user::UserId,
};

/// Create the transaction table in the database.
///
/// The allowed values for `transaction_type` and `status` are enforced here
/// with CHECK constraints.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                transaction_type TEXT NOT NULL
                    CHECK(transaction_type IN ('DEPOSIT', 'WITHDRAWAL')),
                status TEXT NOT NULL DEFAULT 'PENDING'
                    CHECK(status IN ('PENDING', 'COMPLETED', 'FAILED')),
                user_id INTEGER NOT NULL,
                timestamp TEXT NOT NULL DEFAULT (DATETIME('now')),
                FOREIGN KEY(user_id) REFERENCES user(user_id)
                )",
        (),
    )?;

    // Used by the list endpoint.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id);",
        (),
    )?;

    Ok(())
}

/// Insert a new transaction with the status PENDING and return its ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if:
/// - `transaction_type` is not "DEPOSIT" or "WITHDRAWAL",
/// - foreign keys are enforced and `user_id` does not refer to a user,
/// - or there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    connection.execute(
        "INSERT INTO \"transaction\" (amount, transaction_type, user_id) VALUES (?1, ?2, ?3)",
        (
            transaction.amount,
            &transaction.transaction_type,
            transaction.user_id.as_i64(),
        ),
    )?;

    Ok(connection.last_insert_rowid())
}

/// Retrieve the transactions belonging to `user_id`, oldest first.
///
/// `user_id` is compared as given, so a value that is not a number simply
/// matches nothing, as does `None`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_transactions_by_user(
    user_id: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT transaction_id, amount, transaction_type, status, user_id, timestamp
             FROM \"transaction\"
             WHERE user_id = ?1
             ORDER BY transaction_id ASC",
        )?
        .query_map((user_id,), map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

type RowsAffected = usize;

/// Set the status of the transaction `id` to `status`.
///
/// Both values are bound as given. An `id` of numeric text matches the
/// integer ID, any other text matches nothing.
///
/// Returns the number of rows changed, which is zero if there is no
/// transaction with the ID `id`.
///
/// # Errors
/// This function will return a [Error::SqlError] if `status` is not one of
/// "PENDING", "COMPLETED" or "FAILED", or if there is some other SQL error.
pub fn update_transaction_status(
    id: impl ToSql,
    status: impl ToSql,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE \"transaction\" SET status = ?1 WHERE transaction_id = ?2",
            (status, id),
        )
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row(
            "SELECT COUNT(transaction_id) FROM \"transaction\";",
            [],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let transaction_id = row.get(0)?;
    let amount = row.get(1)?;
    let transaction_type = row.get(2)?;
    let status = row.get(3)?;
    let user_id = UserId::new(row.get(4)?);
    let timestamp = row.get(5)?;

    Ok(Transaction {
        transaction_id,
        amount,
        transaction_type,
        status,
        user_id,
        timestamp,
    })
}
