mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    FilePart, MemoryImageStorage, app, app_with_storage, body_json, create_test_user,
    get_request, json_request, multipart_request, rental_json,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn add_rental(app: &axum::Router, token: Option<&str>, listing: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/properties/add", token, listing))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_property_anonymously(pool: PgPool) {
    let app = app(pool);

    let body = add_rental(&app, None, rental_json("Sunny 2BHK", "Pune", 25000)).await;

    assert_eq!(body["message"], "Property added successfully");
    assert_eq!(body["property"]["propertyType"], "Apartment");
    assert_eq!(body["property"]["basicDetails"]["monthlyRent"], 25000);
    assert_eq!(body["property"]["images"][0]["url"], "https://cdn.example/a.jpg");
    assert!(body["property"]["listedBy"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_property_records_owner(pool: PgPool) {
    let user = create_test_user(&pool, "Owner").await;
    let app = app(pool);

    let body = add_rental(
        &app,
        Some(&user.token),
        rental_json("Owner flat", "Pune", 18000),
    )
    .await;
    assert_eq!(body["property"]["listedBy"], user.id.to_string());

    let response = app
        .oneshot(get_request("/api/user/listings", Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listings = body_json(response).await;
    assert_eq!(listings["myProperties"].as_array().unwrap().len(), 1);
    assert_eq!(listings["mySellProperties"].as_array().unwrap().len(), 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_property_multipart(pool: PgPool) {
    let storage = Arc::new(MemoryImageStorage::default());
    let app = app_with_storage(pool, storage.clone());

    let request = multipart_request(
        "/api/properties/add",
        None,
        &[
            ("propertyType", "Villa"),
            ("listingType", "For Rent"),
            ("title", "Garden villa"),
            ("area", "2200"),
            ("monthlyRent", "60000"),
            ("amenities", "Garden"),
            ("amenities", "Pool"),
            ("city", "Goa"),
            ("locality", "Assagao"),
            ("owner", "Ravi"),
            ("phone", "9000000000"),
            ("email", "owner@example.com"),
            ("educationName", "Village School"),
            ("educationDistance", "1.5"),
            ("images", "https://cdn.example/extra.jpg"),
        ],
        &[FilePart {
            field: "images",
            file_name: "garden.jpg",
            content_type: "image/jpeg",
            bytes: &[0xFF, 0xD8, 0xFF],
        }],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let property = &body_json(response).await["property"];
    assert_eq!(property["basicDetails"]["amenities"], json!(["Garden", "Pool"]));
    assert_eq!(property["images"][0]["fileId"], "file_1");
    assert_eq!(property["images"][1]["url"], "https://cdn.example/extra.jpg");
    assert_eq!(property["whatsNearby"]["education"][0]["distance"], 1.5);
    assert!(storage.deleted_ids().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_all_properties_with_filters(pool: PgPool) {
    let app = app(pool);
    add_rental(&app, None, rental_json("Cheap", "Pune", 10000)).await;
    add_rental(&app, None, rental_json("Mid", "Pune", 25000)).await;
    add_rental(&app, None, rental_json("Elsewhere", "Mumbai", 25000)).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/properties/all", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], "All properties fetched successfully");
    assert_eq!(body["count"], 3);
    // Newest first
    assert_eq!(body["properties"][0]["basicDetails"]["title"], "Elsewhere");

    let response = app
        .clone()
        .oneshot(get_request(
            "/api/properties/all?city=pUnE&minPrice=20000&maxPrice=25000",
            None,
        ))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["message"], "Filtered properties fetched successfully");
    assert_eq!(body["count"], 1);
    assert_eq!(body["properties"][0]["basicDetails"]["title"], "Mid");

    let response = app
        .oneshot(get_request("/api/properties/search?city=mum", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body.get("message").is_none());
    assert_eq!(body["count"], 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_city_filter_escapes_wildcards(pool: PgPool) {
    let app = app(pool);
    add_rental(&app, None, rental_json("Flat", "Pune", 10000)).await;

    let response = app
        .oneshot(get_request("/api/properties/all?city=%25", None))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["count"], 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_property_by_id(pool: PgPool) {
    let app = app(pool);
    let created = add_rental(&app, None, rental_json("Find me", "Pune", 10000)).await;
    let id = created["property"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/properties/{}", id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["property"]["basicDetails"]["title"],
        "Find me"
    );

    let response = app
        .oneshot(get_request(&format!("/api/properties/{}", Uuid::new_v4()), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Property not found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_number(pool: PgPool) {
    let response = app(pool)
        .oneshot(get_request("/api/properties/get_number", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Number of properties fetched successfully");
    assert_eq!(body["number"], "7011769523");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_contact_unknown_property(pool: PgPool) {
    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/contact",
            None,
            json!({
                "name": "Asha",
                "email": "asha@example.com",
                "message": "Still available?",
                "propertyId": Uuid::new_v4()
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
