//! A small REST API for recording deposits and withdrawals made by users.
//!
//! Users and their transactions are stored in SQLite. The API serves JSON:
//! - `POST /api/users` creates a user,
//! - `POST /api/transactions` creates a PENDING transaction,
//! - `GET /api/transactions?user_id=N` lists a user's transactions,
//! - `PUT /api/transactions/{transaction_id}` changes a transaction's status.
//!
//! Validation of usernames, transaction types and statuses is left to the
//! database constraints.

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod database_id;
mod error;
mod logging;
mod not_found;
mod routing;

pub mod db;
pub mod endpoints;
pub mod transaction;
pub mod user;

pub use app_state::AppState;
pub use database_id::{DatabaseId, TransactionId};
pub use db::{enforce_foreign_keys, initialize as initialize_db};
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the ctrl+c signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
