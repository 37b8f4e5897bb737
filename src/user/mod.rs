//! Users of the application: the user model, the user table, and the endpoint for creating users.

mod create_endpoint;
mod db;
mod models;

pub use create_endpoint::{CreateUserRequest, CreateUserState, create_user_endpoint};
pub use db::{create_user, create_user_table};
pub use models::{User, UserId};

#[cfg(test)]
pub use db::count_users;
