//! Application router configuration.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::{
    AppState, endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, list_transactions_endpoint,
        update_transaction_status_endpoint,
    },
    user::create_user_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::USERS, post(create_user_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_status_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        endpoints::{self, format_endpoint},
        transaction::{CreatedTransaction, TransactionList, TransactionStatus},
        user::User,
    };

    use super::build_router;

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection).expect("Could not initialize database.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create_user(server: &TestServer, username: &str) -> User {
        let response = server
            .post(endpoints::USERS)
            .json(&json!({ "username": username }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<User>()
    }

    async fn create_deposit(server: &TestServer, user: &User) -> CreatedTransaction {
        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 100,
                "transaction_type": "DEPOSIT",
                "user_id": user.user_id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<CreatedTransaction>()
    }

    async fn list_transactions(server: &TestServer, user_id: &str) -> TransactionList {
        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("user_id", user_id)
            .await;
        response.assert_status_ok();

        response.json::<TransactionList>()
    }

    #[tokio::test]
    async fn create_list_and_update_transaction() {
        let server = get_test_server();

        let alice = create_user(&server, "alice").await;
        assert_eq!(alice.user_id.as_i64(), 1);
        assert_eq!(alice.username, "alice");

        let created = create_deposit(&server, &alice).await;
        assert_eq!(created.transaction_id, 1);
        assert_eq!(created.status, TransactionStatus::Pending);
        assert_eq!(created.amount, 100.0);

        let list = list_transactions(&server, "1").await;
        assert_eq!(list.transactions.len(), 1);
        assert_eq!(list.transactions[0].transaction_id, 1);
        assert_eq!(list.transactions[0].status, TransactionStatus::Pending);

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&json!({ "status": "COMPLETED" }))
            .await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["transaction_id"], json!("1"));
        assert_eq!(body["status"], json!("COMPLETED"));
        assert!(body["timestamp"].is_string());

        let list = list_transactions(&server, "1").await;
        assert_eq!(list.transactions[0].status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn duplicate_username_is_500_with_database_message() {
        let server = get_test_server();
        create_user(&server, "alice").await;

        let response = server
            .post(endpoints::USERS)
            .json(&json!({ "username": "alice" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "UNIQUE constraint failed: user.username" }));
        let bob = create_user(&server, "bob").await;
        assert_ne!(bob.user_id.as_i64(), 1);
    }

    #[tokio::test]
    async fn invalid_transaction_type_is_500() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 5.0,
                "transaction_type": "TRANSFER",
                "user_id": alice.user_id,
            }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.json::<Value>()["error"].is_string());
        assert!(list_transactions(&server, "1").await.transactions.is_empty());
    }

    #[tokio::test]
    async fn list_for_user_without_transactions_is_empty() {
        let server = get_test_server();
        create_user(&server, "alice").await;

        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("user_id", 1)
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({ "transactions": [] }));
    }

    #[tokio::test]
    async fn list_returns_every_transaction_of_the_user() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;
        let bob = create_user(&server, "bob").await;
        for _ in 0..3 {
            create_deposit(&server, &alice).await;
        }
        create_deposit(&server, &bob).await;

        let list = list_transactions(&server, &alice.user_id.to_string()).await;

        assert_eq!(list.transactions.len(), 3);
        assert!(list.transactions.iter().all(|t| t.user_id == alice.user_id));
    }

    #[tokio::test]
    async fn update_missing_transaction_is_404() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;
        create_deposit(&server, &alice).await;

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 42))
            .json(&json!({ "status": "FAILED" }))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Transaction not found" }));
        assert_eq!(list_transactions(&server, "1").await.transactions.len(), 1);
    }

    #[tokio::test]
    async fn update_non_numeric_transaction_id_is_404() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;
        create_deposit(&server, &alice).await;

        let response = server
            .put("/api/transactions/abc")
            .json(&json!({ "status": "FAILED" }))
            .await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Transaction not found" }));
        let list = list_transactions(&server, "1").await;
        assert_eq!(list.transactions[0].status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn integer_amount_is_returned_as_float() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;

        let response = server
            .post(endpoints::TRANSACTIONS)
            .json(&json!({
                "amount": 100,
                "transaction_type": "DEPOSIT",
                "user_id": alice.user_id,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["amount"], json!(100.0));
        let response = server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("user_id", 1)
            .await;
        assert_eq!(
            response.json::<Value>()["transactions"][0]["amount"],
            json!(100.0)
        );
    }

    #[tokio::test]
    async fn update_to_invalid_status_is_500_and_keeps_status() {
        let server = get_test_server();
        let alice = create_user(&server, "alice").await;
        create_deposit(&server, &alice).await;

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 1))
            .json(&json!({ "status": "ARCHIVED" }))
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let list = list_transactions(&server, "1").await;
        assert_eq!(list.transactions[0].status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let server = get_test_server();

        let response = server.get("/api/accounts").await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Not found" }));
    }
}
