//! Sets up the application database: creates the tables and applies connection settings.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table, user::create_user_table};

/// Create the tables for the domain models if they do not already exist.
///
/// The tables are created in a single exclusive transaction. Calling this on
/// a database that has already been initialized does nothing and keeps any
/// existing rows.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Make SQLite reject rows that reference a missing user.
///
/// SQLite ignores `FOREIGN KEY` clauses unless this is turned on for the
/// connection. It has no effect inside a transaction, so call it before
/// [initialize] or any other statement.
///
/// # Errors
/// Returns an [Error::SqlError] if the pragma could not be set.
pub fn enforce_foreign_keys(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    Ok(())
}
