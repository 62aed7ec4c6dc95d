/// Contact CRUD and ownership tests against the full router

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Duration;
use common::{TestContext, JWT_SECRET};
use contactbook_shared::auth::jwt::{create_token, Claims};
use serde_json::json;

#[tokio::test]
async fn test_alice_creates_contact_bob_is_forbidden() {
    let ctx = TestContext::new();
    let (alice_id, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let (_, bob) = ctx.register("bob@example.com", "pw12345", "Bob").await;

    let contact = ctx
        .create_contact(&alice, json!({ "name": "Bob", "phone": "+1" }))
        .await;
    assert_eq!(contact["userId"], alice_id);
    assert_eq!(contact["name"], "Bob");
    assert_eq!(contact["phone"], "+1");
    assert!(contact["email"].is_null());

    let uri = format!("/contacts/{}", contact["id"]);
    let response = ctx.send(Method::GET, &uri, Some(&bob), None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "You do not have access to this contact");
}

#[tokio::test]
async fn test_foreign_update_and_delete_are_forbidden() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let (_, bob) = ctx.register("bob@example.com", "pw12345", "Bob").await;
    let contact = ctx
        .create_contact(&alice, json!({ "name": "John Doe", "phone": "+1234567890" }))
        .await;
    let uri = format!("/contacts/{}", contact["id"]);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&bob), Some(json!({ "name": "Hacked Name" })))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = ctx.send(Method::DELETE, &uri, Some(&bob), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = ctx.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], contact);
}

#[tokio::test]
async fn test_list_is_scoped_to_caller_and_newest_first() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let (_, bob) = ctx.register("bob@example.com", "pw12345", "Bob").await;

    let first = ctx
        .create_contact(&alice, json!({ "name": "First", "phone": "+1" }))
        .await;
    let second = ctx
        .create_contact(
            &alice,
            json!({ "name": "Second", "phone": "+2", "email": "second@example.com" }),
        )
        .await;
    ctx.create_contact(&bob, json!({ "name": "Bob's", "phone": "+3" }))
        .await;

    let response = ctx.send(Method::GET, "/contacts", Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([second, first]));

    let (_, carol) = ctx.register("carol@example.com", "pw12345", "Carol").await;
    let response = ctx.send(Method::GET, "/contacts", Some(&carol), None).await;
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let contact = ctx
        .create_contact(
            &alice,
            json!({ "name": "John Doe", "phone": "+1234567890", "email": "john@example.com" }),
        )
        .await;
    let uri = format!("/contacts/{}", contact["id"]);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "name": "John Updated" })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let updated = &response.body["data"];
    assert_eq!(updated["name"], "John Updated");
    assert_eq!(updated["phone"], "+1234567890");
    assert_eq!(updated["email"], "john@example.com");
    assert_eq!(updated["createdAt"], contact["createdAt"]);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({})))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "John Updated");
}

#[tokio::test]
async fn test_null_email_clears_it() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let contact = ctx
        .create_contact(
            &alice,
            json!({ "name": "Bob", "phone": "+1", "email": "bob@example.com" }),
        )
        .await;
    let uri = format!("/contacts/{}", contact["id"]);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "email": null })))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["email"].is_null());
    assert_eq!(response.body["data"]["name"], "Bob");

    let response = ctx.send(Method::GET, &uri, Some(&alice), None).await;
    assert!(response.body["data"]["email"].is_null());
    assert_eq!(response.body["data"]["phone"], "+1");
}

#[tokio::test]
async fn test_update_validation() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let contact = ctx
        .create_contact(&alice, json!({ "name": "John", "phone": "+1" }))
        .await;
    let uri = format!("/contacts/{}", contact["id"]);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "email": "not-an-email" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"][0]["field"], "email");

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "userId": 99 })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "name": "n".repeat(300) })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["details"][0]["field"], "name");

    let response = ctx
        .send(Method::PATCH, &uri, Some(&alice), Some(json!({ "phone": "1".repeat(100) })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = ctx.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(response.body["data"], contact);
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let contact = ctx
        .create_contact(&alice, json!({ "name": "John", "phone": "+1" }))
        .await;
    let uri = format!("/contacts/{}", contact["id"]);

    let response = ctx.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.body.is_null());

    let response = ctx.send(Method::GET, &uri, Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Contact not found");

    let response = ctx.send(Method::DELETE, &uri, Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_and_malformed_ids() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;

    let response = ctx.send(Method::GET, "/contacts/99999", Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx
        .send(Method::PATCH, "/contacts/99999", Some(&alice), Some(json!({ "name": "X" })))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = ctx.send(Method::GET, "/contacts/abc", Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_create_validation() {
    let ctx = TestContext::new();
    let (_, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;

    let cases = [
        json!({ "name": "John" }),
        json!({ "name": "", "phone": "+1" }),
        json!({ "name": "John", "phone": "+1", "email": "not-an-email" }),
        json!({ "name": "John", "phone": "+1", "userId": 2 }),
        json!({ "name": "n".repeat(300), "phone": "+1" }),
        json!({ "name": "John", "phone": "1".repeat(100) }),
    ];

    for body in cases {
        let response = ctx
            .send(Method::POST, "/contacts", Some(&alice), Some(body.clone()))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {}", body);
    }

    let response = ctx.send(Method::GET, "/contacts", Some(&alice), None).await;
    assert_eq!(response.body["data"], json!([]));
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/contacts", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["success"], false);

    let response = ctx
        .send(Method::POST, "/contacts", None, Some(json!({ "name": "X", "phone": "+1" })))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = ctx
        .send(Method::GET, "/contacts", Some("invalid-token"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let (_, token) = ctx.register("alice@example.com", "pw12345", "Alice").await;
    let basic_scheme = Request::builder()
        .method(Method::GET)
        .uri("/contacts")
        .header(header::AUTHORIZATION, format!("Basic {}", token))
        .body(Body::empty())
        .unwrap();
    let response = ctx.send_request(basic_scheme).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let ctx = TestContext::new();
    let (alice_id, _) = ctx.register("alice@example.com", "pw12345", "Alice").await;

    let expired = create_token(
        &Claims::new(alice_id, "alice@example.com", Duration::seconds(-3600)),
        JWT_SECRET,
    )
    .unwrap();

    let response = ctx.send(Method::GET, "/contacts", Some(&expired), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token expired");
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let ctx = TestContext::new();
    let (alice_id, alice) = ctx.register("alice@example.com", "pw12345", "Alice").await;

    assert!(ctx.store.remove_user(alice_id).await);

    let response = ctx.send(Method::GET, "/contacts", Some(&alice), None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
