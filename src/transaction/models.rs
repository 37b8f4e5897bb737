use std::{
    fmt::Display,
    str::FromStr,
    sync::{Arc, Mutex},
};

use axum::extract::FromRef;
use rusqlite::{
    Connection,
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, database_id::TransactionId, user::UserId};

/// A string did not match any of the values of a transaction enumeration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("\"{value}\" is not a valid {kind}")]
pub struct UnknownVariantError {
    /// The string that failed to parse.
    pub value: String,
    /// What the string was parsed as, e.g. "transaction type".
    pub kind: &'static str,
}

impl UnknownVariantError {
    fn new(value: &str, kind: &'static str) -> Self {
        Self {
            value: value.to_owned(),
            kind,
        }
    }
}

fn column_from_str<T>(value: ValueRef<'_>) -> FromSqlResult<T>
where
    T: FromStr<Err = UnknownVariantError>,
{
    value
        .as_str()?
        .parse()
        .map_err(|error| FromSqlError::Other(Box::new(error)))
}

/// Whether money was put into or taken out of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
}

impl TransactionType {
    /// The value stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAWAL" => Ok(TransactionType::Withdrawal),
            other => Err(UnknownVariantError::new(other, "transaction type")),
        }
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        column_from_str(value)
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// Where a transaction is in its lifecycle.
///
/// Any status may be changed to any other status, there is no enforced order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    /// The value stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Failed => "FAILED",
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            other => Err(UnknownVariantError::new(other, "transaction status")),
        }
    }
}

impl FromSql for TransactionStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        column_from_str(value)
    }
}

impl ToSql for TransactionStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

/// A deposit or withdrawal made by a user, as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub transaction_id: TransactionId,
    /// The amount of money moved. Any sign or size is accepted.
    pub amount: f64,
    /// Whether this is a deposit or a withdrawal.
    pub transaction_type: TransactionType,
    /// Where the transaction is in its lifecycle.
    pub status: TransactionStatus,
    /// The user that owns the transaction.
    pub user_id: UserId,
    /// When the row was inserted, in UTC, as formatted by SQLite (`YYYY-MM-DD HH:MM:SS`).
    pub timestamp: String,
}

/// The data needed to insert a transaction.
///
/// `transaction_type` is kept as the raw string from the client. Checking
/// that it is one of the [TransactionType] values is left to the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The amount of money moved.
    pub amount: f64,
    /// Should be "DEPOSIT" or "WITHDRAWAL".
    pub transaction_type: String,
    /// The user that owns the transaction.
    pub user_id: UserId,
}

/// Unified state for all transaction route handlers.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use serde_json::json;

    use super::{TransactionStatus, TransactionType, UnknownVariantError};

    #[test]
    fn enums_serialize_as_upper_case() {
        assert_eq!(
            serde_json::to_value(TransactionType::Withdrawal).unwrap(),
            json!("WITHDRAWAL")
        );
        assert_eq!(
            serde_json::to_value(TransactionStatus::Completed).unwrap(),
            json!("COMPLETED")
        );
    }

    #[test]
    fn display_matches_serialized_form() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
        ] {
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.to_string())
            );
        }
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(TransactionStatus::default(), TransactionStatus::Pending);
    }

    #[test]
    fn parses_database_values() {
        assert_eq!("WITHDRAWAL".parse::<TransactionType>(), Ok(TransactionType::Withdrawal));
        assert_eq!("FAILED".parse::<TransactionStatus>(), Ok(TransactionStatus::Failed));
    }

    #[test]
    fn parse_rejects_unknown_and_lower_case_values() {
        assert_eq!(
            "TRANSFER".parse::<TransactionType>(),
            Err(UnknownVariantError {
                value: "TRANSFER".to_owned(),
                kind: "transaction type",
            })
        );
        assert!("pending".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn converts_to_and_from_sql() {
        let conn = Connection::open_in_memory().unwrap();

        let (transaction_type, status): (TransactionType, TransactionStatus) = conn
            .query_row(
                "SELECT ?1, ?2",
                (TransactionType::Deposit, TransactionStatus::Completed),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();

        assert_eq!(transaction_type, TransactionType::Deposit);
        assert_eq!(status, TransactionStatus::Completed);
    }

    #[test]
    fn unknown_column_value_fails_to_convert() {
        let conn = Connection::open_in_memory().unwrap();

        let result: rusqlite::Result<TransactionStatus> =
            conn.query_row("SELECT 'ARCHIVED'", [], |row| row.get(0));

        assert!(result.is_err(), "got {result:?}, want an error");
    }
}
