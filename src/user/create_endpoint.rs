//! Defines the endpoint for creating a new user.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    user::{User, create_user},
};

/// The state needed to create a user.
#[derive(Debug, Clone)]
pub struct CreateUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating a user.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// The name for the new user.
    pub username: String,
}

/// A route handler for creating a new user.
///
/// Responds with 201 and the new user on success. Taken usernames are
/// rejected by the database and come back as a 500 with the database's
/// message.
pub async fn create_user_endpoint(
    State(state): State<CreateUserState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = create_user(&request.username, &connection)?;
    tracing::debug!("Created user {} ({})", user.user_id, user.username);

    Ok((StatusCode::CREATED, Json(user)))
}
