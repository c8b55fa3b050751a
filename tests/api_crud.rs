//! Integration tests for the generic CRUD endpoints
//!
//! Tests for:
//! - POST /authors
//! - GET /authors
//! - GET /authors/{id}
//! - PUT /authors/{id}
//! - DELETE /authors/{id}

mod common;

#[cfg(test)]
mod crud_tests {
    use super::common::{create_empty_pool, create_test_pool, create_test_server};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    // ============================================================
    // Tests for POST /authors - create_handler
    // ============================================================

    #[tokio::test]
    async fn test_create_assigns_id() {
        let server = create_test_server(create_test_pool().await);

        let response = server.post("/authors").json(&json!({"name": "a"})).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["id"].as_i64().unwrap() > 0, "The store must assign an id");
        assert_eq!(body["name"], "a");
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let server = create_test_server(create_test_pool().await);

        let response = server
            .post("/authors")
            .text("{\"name\":")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].is_string(), "Error body must carry a message");
    }

    #[tokio::test]
    async fn test_create_wrong_field_type() {
        let server = create_test_server(create_test_pool().await);

        let response = server.post("/authors").json(&json!({"name": 42})).await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_missing_content_type() {
        let server = create_test_server(create_test_pool().await);

        let response = server.post("/authors").text("{\"name\": \"a\"}").await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    /// Without tables any store access fails with 500: a 400 proves the store was never reached
    #[tokio::test]
    async fn test_create_decode_error_never_reaches_store() {
        let server = create_test_server(create_empty_pool().await);

        let response = server
            .post("/authors")
            .text("not json")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let server = create_test_server(create_empty_pool().await);

        let response = server.post("/authors").json(&json!({"name": "a"})).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    /// The 500 body carries the database message verbatim
    #[tokio::test]
    async fn test_store_failure_reports_database_message() {
        let server = create_test_server(create_empty_pool().await);

        let created: Value = server
            .post("/authors")
            .json(&json!({"name": "a"}))
            .await
            .json();
        let listed: Value = server.get("/authors").await.json();

        for body in [created, listed] {
            let message = body["error"].as_str().expect("error must be a string");
            assert!(message.contains("no such table"), "unexpected message: {message}");
        }
    }

    // ============================================================
    // Tests for GET /authors - find_all_handler
    // ============================================================

    #[tokio::test]
    async fn test_list_empty() {
        let server = create_test_server(create_test_pool().await);

        let response = server.get("/authors").await;

        response.assert_status_ok();
        response.assert_json(&json!([]));
    }

    #[tokio::test]
    async fn test_list_returns_created_records() {
        let server = create_test_server(create_test_pool().await);
        for name in ["a", "b", "c"] {
            server
                .post("/authors")
                .json(&json!({"name": name}))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get("/authors").await;

        response.assert_status_ok();
        let authors: Vec<Value> = response.json();
        assert_eq!(authors.len(), 3);
        for author in &authors {
            assert!(author.get("id").is_some(), "Every record must have an id");
            assert!(author.get("name").is_some(), "Every record must have a name");
        }
    }

    #[tokio::test]
    async fn test_list_store_failure() {
        let server = create_test_server(create_empty_pool().await);

        let response = server.get("/books").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ============================================================
    // Tests for GET /authors/{id} - find_by_id_handler
    // ============================================================

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let server = create_test_server(create_test_pool().await);

        let response = server.get("/authors/999").await;

        response.assert_status_not_found();
        response.assert_json(&json!({"error": "record not found"}));
    }

    #[tokio::test]
    async fn test_get_by_id_non_numeric() {
        let server = create_test_server(create_test_pool().await);

        let response = server.get("/authors/abc").await;

        response.assert_status_not_found();
    }

    /// Lookup failures other than "no row" also answer 404
    #[tokio::test]
    async fn test_get_by_id_store_failure_is_not_found() {
        let server = create_test_server(create_empty_pool().await);

        let response = server.get("/authors/1").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert!(body["error"].is_string());
    }

    // ============================================================
    // Tests for PUT /authors/{id} - update_handler
    // ============================================================

    #[tokio::test]
    async fn test_update_keeps_fields_absent_from_body() {
        let server = create_test_server(create_test_pool().await);
        let created: Value = server
            .post("/authors")
            .json(&json!({"name": "a", "bio": "first"}))
            .await
            .json();
        let id = created["id"].as_i64().unwrap();

        server
            .put(&format!("/authors/{id}"))
            .json(&json!({"name": "b"}))
            .await
            .assert_status_ok();

        let found: Value = server.get(&format!("/authors/{id}")).await.json();
        assert_eq!(found["name"], "b");
        assert_eq!(found["bio"], "first");
    }

    /// The response echoes the submitted body, not the stored row
    #[tokio::test]
    async fn test_update_returns_submitted_representation() {
        let server = create_test_server(create_test_pool().await);
        let created: Value = server
            .post("/authors")
            .json(&json!({"name": "a", "bio": "first"}))
            .await
            .json();
        let id = created["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/authors/{id}"))
            .json(&json!({"name": "b"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "b");
        assert_eq!(body["id"], 0);
        assert_eq!(body["bio"], Value::Null);
    }

    #[tokio::test]
    async fn test_update_malformed_json() {
        let server = create_test_server(create_test_pool().await);

        let response = server
            .put("/authors/1")
            .text("{")
            .content_type("application/json")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_update_store_failure() {
        let server = create_test_server(create_empty_pool().await);

        let response = server.put("/authors/1").json(&json!({"name": "b"})).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ============================================================
    // Tests for DELETE /authors/{id} - delete_handler
    // ============================================================

    #[tokio::test]
    async fn test_delete_missing_id() {
        let server = create_test_server(create_test_pool().await);

        let response = server.delete("/authors/999").await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.as_bytes().is_empty());
    }

    #[tokio::test]
    async fn test_delete_store_failure() {
        let server = create_test_server(create_empty_pool().await);

        let response = server.delete("/authors/1").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // ============================================================
    // End-to-end lifecycle
    // ============================================================

    #[tokio::test]
    async fn test_full_lifecycle() {
        let server = create_test_server(create_test_pool().await);

        let response = server.post("/authors").json(&json!({"name": "a"})).await;
        response.assert_status(StatusCode::CREATED);
        let created: Value = response.json();
        let id = created["id"].as_i64().expect("id must be assigned");
        let path = format!("/authors/{id}");

        let response = server.get(&path).await;
        response.assert_status_ok();
        let found: Value = response.json();
        assert_eq!(found["name"], "a");

        server
            .put(&path)
            .json(&json!({"name": "b"}))
            .await
            .assert_status_ok();
        let found: Value = server.get(&path).await.json();
        assert_eq!(found["name"], "b");

        server.delete(&path).await.assert_status(StatusCode::NO_CONTENT);
        server.get(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_books_are_served_independently() {
        let server = create_test_server(create_test_pool().await);
        let author: Value = server
            .post("/authors")
            .json(&json!({"name": "a"}))
            .await
            .json();

        let response = server
            .post("/books")
            .json(&json!({"title": "t", "author_id": author["id"], "published_year": 1999}))
            .await;

        response.assert_status(StatusCode::CREATED);
        let book: Value = response.json();
        assert_eq!(book["author_id"], author["id"]);

        let books: Vec<Value> = server.get("/books").await.json();
        assert_eq!(books.len(), 1);
        let authors: Vec<Value> = server.get("/authors").await.json();
        assert_eq!(authors.len(), 1);
    }

    #[tokio::test]
    async fn test_root_health_check() {
        let server = create_test_server(create_test_pool().await);

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_json(&json!({"status": "ok", "message": "Server is running"}));
    }
}
