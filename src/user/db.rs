use rusqlite::Connection;

use crate::{
    Error,
    user::{User, UserId},
};

/// Create the user table.
///
/// Uniqueness of usernames is enforced by the table, not by callers.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                user_id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, including
/// when `username` is already taken.
pub fn create_user(username: &str, connection: &Connection) -> Result<User, Error> {
    connection.execute("INSERT INTO user (username) VALUES (?1)", (username,))?;

    let user_id = UserId::new(connection.last_insert_rowid());

    Ok(User {
        user_id,
        username: username.to_owned(),
    })
}

/// Get the number of users in the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred.
#[cfg(test)]
pub fn count_users(connection: &Connection) -> Result<usize, Error> {
    connection
        .query_row("SELECT COUNT(user_id) FROM user;", [], |row| row.get(0))
        .map_err(|error| error.into())
}
