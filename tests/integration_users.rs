mod common;

use axum::http::StatusCode;
use common::{
    TEST_PASSWORD, app, body_json, create_test_user, get_request, json_request, unique_phone,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_register_user_success(pool: PgPool) {
    let email = format!("{}@Example.com", Uuid::new_v4());
    let phone = unique_phone();

    let response = app(pool.clone())
        .oneshot(json_request(
            "POST",
            "/api/user/register",
            None,
            json!({
                "fullname": "Asha Verma",
                "email": email,
                "phone": phone,
                "password": TEST_PASSWORD
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["email"], email.to_lowercase());
    assert!(body["user"].get("password").is_none());

    let stored: String = sqlx::query_scalar("SELECT password FROM users WHERE phone = $1")
        .bind(&phone)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_ne!(stored, TEST_PASSWORD);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_register_duplicate_phone(pool: PgPool) {
    let existing = create_test_user(&pool, "Existing").await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/register",
            None,
            json!({
                "fullname": "Someone Else",
                "email": format!("{}@example.com", Uuid::new_v4()),
                "phone": existing.phone,
                "password": TEST_PASSWORD
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_register_duplicate_email_ignores_case(pool: PgPool) {
    let existing = create_test_user(&pool, "Existing").await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/user/register",
            None,
            json!({
                "fullname": "Someone Else",
                "email": existing.email.to_uppercase(),
                "phone": unique_phone(),
                "password": TEST_PASSWORD
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_profile(pool: PgPool) {
    let user = create_test_user(&pool, "Profile User").await;

    let response = app(pool)
        .oneshot(get_request("/api/user/profile", Some(&user.token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User profile retrieved successfully");
    assert_eq!(body["user"]["id"], user.id.to_string());
    assert_eq!(body["user"]["isSubscribed"], false);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_own_account(pool: PgPool) {
    let user = create_test_user(&pool, "Before").await;

    let response = app(pool)
        .oneshot(json_request(
            "PUT",
            &format!("/api/user/update/{}", user.id),
            Some(&user.token),
            json!({ "fullname": "After", "isSubscribed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User updated successfully");
    assert_eq!(body["user"]["fullname"], "After");
    assert_eq!(body["user"]["isSubscribed"], true);
    assert_eq!(body["user"]["phone"], user.phone);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_rejects_taken_phone(pool: PgPool) {
    let user = create_test_user(&pool, "First").await;
    let other = create_test_user(&pool, "Second").await;

    let response = app(pool)
        .oneshot(json_request(
            "PUT",
            &format!("/api/user/update/{}", user.id),
            Some(&user.token),
            json!({ "phone": other.phone }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_update_other_account_forbidden(pool: PgPool) {
    let user = create_test_user(&pool, "Caller").await;
    let other = create_test_user(&pool, "Target").await;

    let response = app(pool)
        .oneshot(json_request(
            "PUT",
            &format!("/api/user/update/{}", other.id),
            Some(&user.token),
            json!({ "fullname": "Hijacked" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_own_account(pool: PgPool) {
    let user = create_test_user(&pool, "Leaving").await;
    let app = app(pool.clone());

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("DELETE")
                .uri(format!("/api/user/delete/{}", user.id))
                .header("authorization", format!("Bearer {}", user.token))
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User deleted successfully");

    let response = app
        .oneshot(get_request("/api/user/profile", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "User not found");
}
