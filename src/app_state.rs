//! Implements a struct that holds the state of the REST server.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    db::{enforce_foreign_keys, initialize},
};

/// The state of the REST server.
///
/// Route handlers do not take this directly, instead each group of handlers
/// defines a smaller state that implements `FromRef<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection shared by all route handlers.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models if they do not already exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
        })
    }

    /// Open the SQLite database at `db_path` and create the [AppState] for it.
    ///
    /// If `foreign_keys` is set, foreign key constraints are enforced before
    /// the tables are created.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or initialized.
    pub fn open(db_path: &Path, foreign_keys: bool) -> Result<Self, Error> {
        let connection = Connection::open(db_path)?;

        if foreign_keys {
            enforce_foreign_keys(&connection)?;
        }

        Self::new(connection)
    }
}
