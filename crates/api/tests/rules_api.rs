//! HTTP-level integration tests for the `/rules` API.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router,
//! exercising the production middleware stack, auth extractor, and error
//! mapping end to end.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json, session_token};
use serde_json::json;
use sqlx::PgPool;

fn valid_rule() -> serde_json::Value {
    json!({
        "from": "/a",
        "to": "/b",
        "kind": "Temporary",
        "why": "this is a sufficiently long reason",
        "isRegex": false
    })
}

// ---------------------------------------------------------------------------
// Create + list round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_then_list(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let response = post_json(&app, "/api/v1/rules", valid_rule(), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let rule = &created["data"];
    assert_eq!(rule["from"], "/a");
    assert_eq!(rule["to"], "/b");
    assert_eq!(rule["kind"], "Temporary");
    assert_eq!(rule["who"], "alice@example.com");
    assert_eq!(rule["isRegex"], false);
    assert_eq!(rule["created"], rule["updated"]);
    assert!(rule["id"].as_i64().is_some());

    let response = get(&app, "/api/v1/rules").await;
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    let data = listed["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], rule["id"]);
}

// ---------------------------------------------------------------------------
// Validation failures map to 422
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_empty_from_is_unprocessable(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("bob@example.com");

    let mut payload = valid_rule();
    payload["from"] = json!("");
    let response = post_json(&app, "/api/v1/rules", payload, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(
        body["error"].as_str().unwrap().contains("from"),
        "message should cite the from field: {body}"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_bogus_kind_is_unprocessable(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("bob@example.com");

    let mut payload = valid_rule();
    payload["kind"] = json!("Bogus");
    let response = post_json(&app, "/api/v1/rules", payload, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("kind"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_short_why_is_unprocessable(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("bob@example.com");

    let mut payload = valid_rule();
    payload["why"] = json!("too short");
    let response = post_json(&app, "/api/v1/rules", payload, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_country_token_only_in_regex_mode(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let mut literal = valid_rule();
    literal["from"] = json!("/shop/{country}");
    let response = post_json(&app, "/api/v1/rules", literal, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let regex = json!({
        "from": "/shop/{country}",
        "to": "/store/{country}",
        "kind": "Temporary",
        "why": "country-aware shop migration",
        "isRegex": true
    });
    let response = post_json(&app, "/api/v1/rules", regex, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_regex_mode_bypasses_shape_checks(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let payload = json!({
        "from": "^/products/(\\d+)$",
        "to": "not even close to a url",
        "kind": "Permanent",
        "why": "renumbered the product catalogue",
        "isRegex": true
    });
    let response = post_json(&app, "/api/v1/rules", payload, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_merges_and_restamps_author(pool: PgPool) {
    let app = build_test_app(pool);
    let alice = session_token("alice@example.com");
    let carol = session_token("carol@example.com");

    let response = post_json(&app, "/api/v1/rules", valid_rule(), Some(&alice)).await;
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let patch = json!({ "why": "the campaign ended, keep redirect live" });
    let response = put_json(&app, &format!("/api/v1/rules/{id}"), patch, Some(&carol)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    let rule = &updated["data"];
    assert_eq!(rule["from"], "/a");
    assert_eq!(rule["to"], "/b");
    assert_eq!(rule["kind"], "Temporary");
    assert_eq!(rule["isRegex"], false);
    assert_eq!(rule["why"], "the campaign ended, keep redirect live");
    assert_eq!(rule["who"], "carol@example.com");
    assert_eq!(rule["created"], created["data"]["created"]);
    assert_ne!(rule["updated"], created["data"]["updated"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_unknown_id_is_not_found(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let response = put_json(&app, "/api/v1/rules/9999", json!({}), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_validation_failure_keeps_stored_row(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let response = post_json(&app, "/api/v1/rules", valid_rule(), Some(&token)).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let patch = json!({ "why": "nope" });
    let response = put_json(&app, &format!("/api/v1/rules/{id}"), patch, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let listed = body_json(get(&app, "/api/v1/rules").await).await;
    assert_eq!(
        listed["data"][0]["why"],
        "this is a sufficiently long reason"
    );
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    let response = post_json(&app, "/api/v1/rules", valid_rule(), Some(&token)).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/api/v1/rules/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Deleting the same id again is indistinguishable from the first delete.
    let response = delete(&app, &format!("/api/v1/rules/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let listed = body_json(get(&app, "/api/v1/rules").await).await;
    assert!(listed["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_writes_require_a_token(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/v1/rules", valid_rule(), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = put_json(&app, "/api/v1/rules/1", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(&app, "/api/v1/rules/1", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_is_unauthorized(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/v1/rules", valid_rule(), Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_who_is_never_client_supplied(pool: PgPool) {
    let app = build_test_app(pool);
    let token = session_token("alice@example.com");

    // A "who" in the payload is ignored; the token principal wins.
    let mut payload = valid_rule();
    payload["who"] = json!("mallory@example.com");
    let response = post_json(&app, "/api/v1/rules", payload, Some(&token)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["data"]["who"], "alice@example.com");
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_health_reports_db_status(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
}
