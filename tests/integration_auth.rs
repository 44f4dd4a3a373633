mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{TEST_PASSWORD, app, body_json, create_test_user, get_request, json_request};
use realty::realty_auth::hash_reset_token;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn insert_reset_token(pool: &PgPool, user_id: Uuid, token: &str, expires_in: Duration) {
    sqlx::query(
        "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)",
    )
    .bind(user_id)
    .bind(hash_reset_token(token))
    .bind(Utc::now() + expires_in)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "Login User").await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "phone": user.phone, "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User logged in successfully");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["id"], user.id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_login_wrong_password(pool: PgPool) {
    let user = create_test_user(&pool, "Login User").await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "phone": user.phone, "password": "wrong-password" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_login_unknown_phone(pool: PgPool) {
    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "phone": "0000000000", "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_logout_revokes_token(pool: PgPool) {
    let user = create_test_user(&pool, "Logout User").await;
    let app = app(pool);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/user/logout", Some(&user.token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/api/user/profile", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Token has been revoked");

    // Logging out twice is harmless for the revocation list
    let response = app
        .oneshot(json_request("POST", "/api/user/logout", Some(&user.token), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_forgot_password_stores_token(pool: PgPool) {
    let user = create_test_user(&pool, "Forgetful").await;
    let app = app(pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/user/forgot-password",
            None,
            json!({ "email": user.email.to_uppercase() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let known = body_json(response).await["message"].clone();

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM password_reset_tokens WHERE user_id = $1 AND used_at IS NULL",
    )
    .bind(user.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    // Unknown emails get the same answer
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/user/forgot-password",
            None,
            json!({ "email": "nobody@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], known);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_reset_password_flow(pool: PgPool) {
    let user = create_test_user(&pool, "Resetting").await;
    insert_reset_token(&pool, user.id, "reset-token-1", Duration::minutes(30)).await;
    let app = app(pool);

    let reset = |token: &str| {
        json_request(
            "POST",
            "/api/user/reset-password",
            None,
            json!({ "token": token, "newPassword": "brand-new-pass" }),
        )
    };

    let response = app.clone().oneshot(reset("reset-token-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Tokens are single use
    let response = app.clone().oneshot(reset("reset-token-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Invalid or expired reset token"
    );

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/user/login",
            None,
            json!({ "phone": user.phone, "password": "brand-new-pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_reset_password_expired_token(pool: PgPool) {
    let user = create_test_user(&pool, "Late").await;
    insert_reset_token(&pool, user.id, "stale-token", Duration::minutes(-5)).await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/reset-password",
            None,
            json!({ "token": "stale-token", "newPassword": "brand-new-pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
