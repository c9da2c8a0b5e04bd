//! End-to-end API tests against the full router and an in-memory database.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use signcraft_server::config::ServerConfig;
use signcraft_server::db::MIGRATOR;
use signcraft_server::routes;
use signcraft_server::state::AppState;

const TEST_JWT_SECRET: &str = "0J9vYq2kXw7nRt4sLp8dFh3mZc6bAe1u";

/// Build an app over a fresh in-memory database.
///
/// One connection only, so every pool handle sees the same database.
async fn test_app() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();

    let config = ServerConfig {
        database_url: SecretString::from("sqlite::memory:"),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        jwt_secret: SecretString::from(TEST_JWT_SECRET),
        upload_dir: std::env::temp_dir().join(format!(
            "signcraft-test-uploads-{}",
            std::process::id()
        )),
    };

    routes::app(AppState::new(config, pool))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Register a user and return the issued bearer token.
async fn register(app: &Router, email: &str, username: &str, phone: &str) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            None,
            &json!({
                "email": email,
                "username": username,
                "phone": phone,
                "password": "hunter22",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body["token"].as_str().unwrap().to_owned()
}

fn banner_payload() -> Value {
    json!({
        "title": "13oz Vinyl Banner",
        "description": "Durable outdoor banner",
        "price": 29.99,
        "mediaType": "vinyl-banner",
        "category": "banners",
        "sizes": [
            { "id": "2x4", "name": "2' x 4'", "pricing": { "kind": "flat", "amount": 29.99 } },
            { "id": "4x8", "name": "4' x 8'", "pricing": { "kind": "flat", "amount": 79.99 } },
            { "id": "custom", "name": "Custom size",
              "pricing": { "kind": "per_area", "rate": 6.99 } },
        ],
        "finishOptions": [
            { "id": "hemmed", "name": "Hemmed edges", "price": 0 },
            { "id": "grommets", "name": "Grommets", "price": 5 },
            { "id": "double", "name": "Double-sided", "price": 50 },
        ],
    })
}

async fn create_banner(app: &Router, token: &str) {
    let (status, body) = send(
        app,
        json_request("POST", "/products", Some(token), &banner_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "product create failed: {body}");
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = test_app().await;

    let (status, body) = send(&app, get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, get_request("/health/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_register_login_order_flow() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    // Log in again with the same credentials.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({ "email": "ada@example.com", "password": "hunter22" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["username"], "ada");
    assert!(body["user"].get("passwordHash").is_none());
    let token = body["token"].as_str().unwrap().to_owned();

    // 79.99 size + 50 finish = 129.99.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "4x8", "finishId": "double" },
                "totalAmount": 129.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order failed: {body}");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["totalAmount"], json!(129.99));
    assert_eq!(body["customization"]["size"], "4' x 8'");
    assert_eq!(body["customization"]["finishOption"], "Double-sided");
    assert_eq!(body["products"][0]["mediaType"], "vinyl-banner");
    let order_id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, get_request("/orders/user", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Attach a shipping address.
    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            Some(&token),
            &json!({ "address": "1 Infinite Loop" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 Infinite Loop");
    assert_eq!(body["status"], "pending");

    let (status, body) = send(
        &app,
        get_request(&format!("/orders/{order_id}"), Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 Infinite Loop");
}

#[tokio::test]
async fn test_orders_list_newest_first() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    for (size_id, finish_id, total) in [
        ("2x4", "hemmed", json!(29.99)),
        ("4x8", "double", json!(129.99)),
    ] {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/orders",
                Some(&token),
                &json!({
                    "mediaTypeId": "vinyl-banner",
                    "customization": { "sizeId": size_id, "finishId": finish_id },
                    "totalAmount": total,
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "order failed: {body}");
    }

    let (status, body) = send(&app, get_request("/orders/user", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    // The second order placed comes back first.
    assert_eq!(orders[0]["totalAmount"], json!(129.99));
    assert_eq!(orders[1]["totalAmount"], json!(29.99));
    assert!(orders[0]["id"].as_i64().unwrap() > orders[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_register_conflicts_name_the_field() {
    let app = test_app().await;
    register(&app, "ada@example.com", "ada", "5551230001").await;

    let cases = [
        (
            json!({ "email": "ada@example.com", "username": "grace",
                    "phone": "5551230002", "password": "hunter22" }),
            "this email is already registered",
        ),
        (
            json!({ "email": "grace@example.com", "username": "ada",
                    "phone": "5551230002", "password": "hunter22" }),
            "this username is already taken",
        ),
        (
            json!({ "email": "grace@example.com", "username": "grace",
                    "phone": "5551230001", "password": "hunter22" }),
            "this phone number is already registered",
        ),
    ];

    for (payload, expected) in cases {
        let (status, body) = send(&app, json_request("POST", "/auth/register", None, &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], expected);
    }
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = test_app().await;

    let cases = [
        json!({ "email": "not-an-email", "username": "ada",
                "phone": "5551230001", "password": "hunter22" }),
        json!({ "email": "ada@example.com", "username": "a",
                "phone": "5551230001", "password": "hunter22" }),
        json!({ "email": "ada@example.com", "username": "ada",
                "phone": "555-123-0001", "password": "hunter22" }),
        json!({ "email": "ada@example.com", "username": "ada",
                "phone": "5551230001", "password": "12345" }),
    ];

    for payload in cases {
        let (status, _) = send(&app, json_request("POST", "/auth/register", None, &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
    }

    // A six-character password is the accepted minimum.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/auth/register",
            None,
            &json!({ "email": "ada@example.com", "username": "ada",
                     "phone": "5551230001", "password": "123456" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = test_app().await;
    register(&app, "ada@example.com", "ada", "5551230001").await;

    let wrong_password = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({ "email": "ada@example.com", "password": "wrong-pass" }),
        ),
    )
    .await;
    let unknown_account = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({ "email": "nobody@example.com", "password": "hunter22" }),
        ),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    // Same status and body either way; no account probing.
    assert_eq!(wrong_password, unknown_account);

    let (status, _) = send(
        &app,
        json_request("POST", "/auth/login", None, &json!({ "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_by_phone() {
    let app = test_app().await;
    register(&app, "ada@example.com", "ada", "5551230001").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/auth/login",
            None,
            &json!({ "phone": "5551230001", "password": "hunter22" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["phone"], "5551230001");
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = test_app().await;

    let no_header = send(&app, get_request("/orders/user", None)).await;
    assert_eq!(no_header.0, StatusCode::UNAUTHORIZED);

    let garbage = send(&app, get_request("/orders/user", Some("garbage"))).await;
    assert_eq!(garbage.0, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/products", None, &banner_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            None,
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "4x8", "finishId": "double" },
                "totalAmount": 129.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_rejects_price_mismatch() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "4x8", "finishId": "double" },
                "totalAmount": 99.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("129.99"), "{body}");
}

#[tokio::test]
async fn test_per_area_order() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    // 3 * 6 * 6.99 + 5 = 130.82
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": {
                    "sizeId": "custom", "finishId": "grommets",
                    "width": 3, "height": 6,
                },
                "totalAmount": 130.82,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "order failed: {body}");
    assert_eq!(body["totalAmount"], json!(130.82));
    assert_eq!(body["customization"]["size"], "3x6");

    // Same size without dimensions is a validation error.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "custom", "finishId": "grommets" },
                "totalAmount": 130.82,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("width and height"));
}

#[tokio::test]
async fn test_order_unknown_options_rejected() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "9x9", "finishId": "double" },
                "totalAmount": 129.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("9x9"));

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "no-such-product",
                "customization": { "sizeId": "4x8", "finishId": "double" },
                "totalAmount": 129.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_foreign_order_looks_nonexistent() {
    let app = test_app().await;
    let owner = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &owner).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&owner),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "2x4", "finishId": "hemmed" },
                "totalAmount": 29.99,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let order_id = body["id"].as_i64().unwrap();

    let other = register(&app, "grace@example.com", "grace", "5551230002").await;

    let foreign = send(
        &app,
        get_request(&format!("/orders/{order_id}"), Some(&other)),
    )
    .await;
    let missing = send(&app, get_request("/orders/999999", Some(&other))).await;

    assert_eq!(foreign.0, StatusCode::NOT_FOUND);
    // Indistinguishable from an order that never existed.
    assert_eq!(foreign, missing);

    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            Some(&other),
            &json!({ "address": "hijacked" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_status_moves_forward_only() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            Some(&token),
            &json!({
                "mediaTypeId": "vinyl-banner",
                "customization": { "sizeId": "2x4", "finishId": "hemmed" },
                "totalAmount": 29.99,
            }),
        ),
    )
    .await;
    let order_id = body["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            Some(&token),
            &json!({ "status": "shipped" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "shipped");

    // Re-asserting the current status is allowed.
    let (status, _) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            Some(&token),
            &json!({ "status": "shipped" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            Some(&token),
            &json!({ "status": "pending" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("shipped"));
}

#[tokio::test]
async fn test_products_category_filter() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;
    create_banner(&app, &token).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/products",
            Some(&token),
            &json!({
                "title": "Retractable Banner Stand",
                "price": 89.99,
                "mediaType": "banner-stand",
                "category": "displays",
                "sizes": [
                    { "id": "24x63", "name": "24\" x 63\"",
                      "pricing": { "kind": "flat", "amount": 89.99 } },
                ],
                "finishOptions": [
                    { "id": "single", "name": "Single-sided", "price": 0 },
                ],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (_, all_implicit) = send(&app, get_request("/products", None)).await;
    assert_eq!(all_implicit.as_array().unwrap().len(), 2);
    // Newest first.
    assert_eq!(all_implicit[0]["mediaType"], "banner-stand");

    let (_, all_explicit) = send(&app, get_request("/products?category=all", None)).await;
    assert_eq!(all_explicit.as_array().unwrap().len(), 2);

    let (_, banners) = send(&app, get_request("/products?category=banners", None)).await;
    let banners = banners.as_array().unwrap();
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0]["category"], "banners");

    let (_, none) = send(&app, get_request("/products?category=neon", None)).await;
    assert!(none.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_validation() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;

    let mut duplicate_sizes = banner_payload();
    duplicate_sizes["sizes"][1]["id"] = json!("2x4");
    let (status, body) = send(
        &app,
        json_request("POST", "/products", Some(&token), &duplicate_sizes),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("2x4"));

    let mut free_product = banner_payload();
    free_product["price"] = json!(0);
    let (status, _) = send(
        &app,
        json_request("POST", "/products", Some(&token), &free_product),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut untitled = banner_payload();
    untitled["title"] = json!("  ");
    let (status, _) = send(
        &app,
        json_request("POST", "/products", Some(&token), &untitled),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_history_log_limit_and_clear() {
    let app = test_app().await;
    // Registration gives us a real user id to attribute entries to.
    let _token = register(&app, "ada@example.com", "ada", "5551230001").await;

    let (status, _) = send(
        &app,
        json_request("POST", "/search-history", None, &json!({ "query": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for i in 0..12 {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/search-history",
                None,
                &json!({ "query": format!("banner {i}"), "userId": 1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, get_request("/search-history?userId=1", None)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["query"], "banner 11");

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/search-history")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/search-history?userId=1")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "search history cleared");

    let (_, body) = send(&app, get_request("/search-history?userId=1", None)).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_upload() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;

    let boundary = "X-BOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nShop Banner\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"art.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"fake png bytes");
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/signs/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {body}");
    assert_eq!(body["name"], "Shop Banner");

    let image_url = body["imageUrl"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/"));
    assert!(image_url.ends_with("-art.png"));

    // The file actually landed in the upload directory.
    let stored = image_url.strip_prefix("/uploads/").unwrap();
    let path = std::env::temp_dir()
        .join(format!("signcraft-test-uploads-{}", std::process::id()))
        .join(stored);
    let contents = tokio::fs::read(&path).await.unwrap();
    assert_eq!(contents, b"fake png bytes");
    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn test_sign_upload_requires_both_parts() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com", "ada", "5551230001").await;

    let boundary = "X-BOUNDARY";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nNo file\r\n--{boundary}--\r\n"
    );

    let request = Request::builder()
        .method("POST")
        .uri("/signs/upload")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "file and name are required");
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let app = test_app().await;

    let payload = json!({
        "email": "ada@example.com",
        "username": "ada",
        "phone": "5551230001",
        "password": "hunter22",
    });

    let (first, second) = tokio::join!(
        send(&app, json_request("POST", "/auth/register", None, &payload)),
        send(&app, json_request("POST", "/auth/register", None, &payload)),
    );

    let statuses = [first.0, second.0];
    assert_eq!(
        statuses
            .iter()
            .filter(|s| **s == StatusCode::CREATED)
            .count(),
        1,
        "exactly one registration may win: {statuses:?}"
    );
    assert!(
        statuses.contains(&StatusCode::BAD_REQUEST),
        "the loser gets a conflict: {statuses:?}"
    );
}
