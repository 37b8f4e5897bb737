//! Transactions recorded against users.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the enumerations for its type and status
//! - Database functions for creating, listing and updating transactions
//! - Route handlers for the transaction API endpoints

mod create_endpoint;
mod db;
mod list_endpoint;
mod models;
mod update_status_endpoint;

pub use create_endpoint::{CreatedTransaction, create_transaction_endpoint};
pub use db::{
    create_transaction, create_transaction_table, get_transactions_by_user,
    update_transaction_status,
};
pub use list_endpoint::{ListTransactionsQuery, TransactionList, list_transactions_endpoint};
pub use models::{
    NewTransaction, Transaction, TransactionState, TransactionStatus, TransactionType,
    UnknownVariantError,
};
pub use update_status_endpoint::{
    StatusUpdate, UpdatedTransactionStatus, update_transaction_status_endpoint,
};

#[cfg(test)]
pub use db::count_transactions;
