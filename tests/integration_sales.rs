mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    FilePart, MemoryImageStorage, app, app_with_storage, body_json, create_test_user,
    get_request, json_request, multipart_request, sale_json,
};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn add_sale(app: &axum::Router, token: &str, listing: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/sale/add", Some(token), listing))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_sale_property(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;
    let app = app(pool);

    let body = add_sale(&app, &user.token, sale_json("Lake villa", "Bengaluru", 3.5)).await;

    assert_eq!(body["message"], "Sale property added successfully");
    let property = &body["property"];
    assert_eq!(property["listedBy"], user.id.to_string());
    assert_eq!(property["basicDetails"]["priceUnit"], "Crores");
    assert_eq!(property["floorPlan"]["diningArea"], 180.0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_sale_property_requires_auth(pool: PgPool) {
    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/sale/add",
            None,
            sale_json("Villa", "Goa", 2.0),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_add_sale_property_with_virtual_tour_upload(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;
    let storage = Arc::new(MemoryImageStorage::default());
    let app = app_with_storage(pool, storage.clone());

    let request = multipart_request(
        "/api/sale/add",
        Some(&user.token),
        &[
            ("propertyType", "Plot"),
            ("listingType", "For Sale"),
            ("title", "Corner plot"),
            ("area", "1800"),
            ("price", "1.2"),
            ("amenities", "Gated"),
            ("city", "Jaipur"),
            ("locality", "Vaishali Nagar"),
            ("phone", "9111111111"),
            ("email", "sales@example.com"),
            ("virtualTour", "https://tours.example/typed"),
            ("travelName", "Bus stand"),
            ("travelDistance", "0.4"),
            ("healthName", "Clinic"),
        ],
        &[
            FilePart {
                field: "images",
                file_name: "plot.jpg",
                content_type: "image/jpeg",
                bytes: &[0xFF, 0xD8, 0xFF],
            },
            FilePart {
                field: "virtualTour",
                file_name: "tour.mp4",
                content_type: "video/mp4",
                bytes: &[0x00, 0x00, 0x00, 0x18],
            },
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let property = &body_json(response).await["property"];
    assert_eq!(property["virtualTour"], "https://ik.example/test/tour.mp4");
    assert_eq!(property["basicDetails"]["amenities"], json!(["Gated"]));
    assert_eq!(property["whatsNearby"]["travel"][0]["name"], "Bus stand");
    // Name without distance is skipped
    assert_eq!(property["whatsNearby"]["health"], json!([]));
    assert_eq!(storage.uploaded_ids().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_all_sale_properties_is_public(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;
    let app = app(pool);
    add_sale(&app, &user.token, sale_json("Budget", "Pune", 0.8)).await;
    add_sale(&app, &user.token, sale_json("Premium", "Pune", 4.0)).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/sale/all", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 2);

    let response = app
        .oneshot(get_request("/api/sale/all?minPrice=1&maxPrice=5", None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["properties"][0]["basicDetails"]["title"], "Premium");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_sale_property_by_id(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;
    let app = app(pool);
    let created = add_sale(&app, &user.token, sale_json("Find me", "Pune", 1.0)).await;
    let id = created["property"]["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/sale/{}", id), Some(&user.token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["Saleproperty"]["basicDetails"]["title"],
        "Find me"
    );

    let response = app
        .oneshot(get_request(
            &format!("/api/sale/{}", Uuid::new_v4()),
            Some(&user.token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["message"], "Sale Property not found");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_by_ids_preserves_order(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;
    let app = app(pool);
    let first = add_sale(&app, &user.token, sale_json("First", "Pune", 1.0)).await;
    let second = add_sale(&app, &user.token, sale_json("Second", "Pune", 1.0)).await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/sale/getbyids",
            Some(&user.token),
            json!({
                "ids": [
                    second["property"]["id"],
                    Uuid::new_v4(),
                    first["property"]["id"]
                ]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["properties"][0]["basicDetails"]["title"], "Second");
    assert_eq!(body["properties"][1]["basicDetails"]["title"], "First");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_get_by_ids_rejects_empty_list(pool: PgPool) {
    let user = create_test_user(&pool, "Seller").await;

    let response = app(pool)
        .oneshot(json_request(
            "POST",
            "/api/sale/getbyids",
            Some(&user.token),
            json!({ "ids": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_sale_get_number(pool: PgPool) {
    let user = create_test_user(&pool, "Buyer").await;

    let response = app(pool)
        .oneshot(get_request("/api/sale/get_number", Some(&user.token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        "Owner Number fetched successfully"
    );
}
