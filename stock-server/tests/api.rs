//! HTTP API through the full middleware stack, driven in-process

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use stock_server::auth::{JwtConfig, JwtService, permissions};
use stock_server::db::DbService;
use stock_server::{Config, ServerState};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret-0123456789-abcdef";

async fn app() -> Router {
    let config = Config::for_tests(JwtConfig::with_secret(SECRET));
    let db = DbService::in_memory().await.expect("in-memory database");
    stock_server::api::build_app(ServerState::new(config, db))
}

fn token(role: &str, permissions: &[&str]) -> String {
    JwtService::with_config(JwtConfig::with_secret(SECRET))
        .generate_token(9, "tess", "Tess", role, permissions)
        .expect("token")
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_shoe(app: &Router, admin: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/products",
        Some(admin),
        Some(json!({
            "name": "Trail Runner",
            "category": "shoes",
            "price": 8900,
            "colors": ["Black"],
            "sizes": ["9", "10"],
            "variants": { "Black": { "9": 2, "10": 1 } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["status"], "ok");
}

#[tokio::test]
async fn api_requires_a_token() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/products", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let app = app().await;
    let cashier = token("cashier", &[permissions::POS_SELL]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(&cashier),
        Some(json!({ "name": "X", "category": "shoes", "price": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "POST", "/api/stock/1/reconcile", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Reads only need authentication
    let (status, _) = send(&app, "GET", "/api/products", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn checkout_shortfall_lists_every_line() {
    let app = app().await;
    let admin = token("admin", &[]);
    let id = create_shoe(&app, &admin).await;
    let buyer = token("customer", &[permissions::ORDERS_PLACE]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/checkout",
        Some(&buyer),
        Some(json!({
            "sale_id": "web-1",
            "customer_name": "Ana",
            "items": [
                { "product_id": id, "color": "Black", "size": "9", "quantity": 3 },
                { "product_id": id, "color": "Black", "size": "10", "quantity": 2 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    let items = body["details"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["available"], 2);
    assert_eq!(items[0]["message"], "only 2 left in size 9, Black");

    let (_, levels) = send(&app, "GET", &format!("/api/stock/{id}"), Some(&buyer), None).await;
    assert_eq!(levels["stock_quantity"], 3);
}

#[tokio::test]
async fn checkout_then_fetch_order() {
    let app = app().await;
    let admin = token("admin", &[]);
    let id = create_shoe(&app, &admin).await;
    let buyer = token("customer", &[permissions::ORDERS_PLACE]);

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders/checkout",
        Some(&buyer),
        Some(json!({
            "customer_name": "Ana",
            "customer_email": "ana@example.com",
            "items": [{ "product_id": id, "color": "Black", "size": "9", "quantity": 2 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total"], 2 * 8900);
    let order_id = body["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/api/orders/{order_id}"), Some(&buyer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["customer_name"], "Ana");

    let (status, _) = send(&app, "GET", "/api/orders/12345", Some(&buyer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, variant) = send(
        &app,
        "GET",
        &format!("/api/stock/{id}/variant?color=Black&size=9"),
        Some(&buyer),
        None,
    )
    .await;
    assert_eq!(variant["available"], 0);
}

#[tokio::test]
async fn invalid_checkout_payload_is_rejected() {
    let app = app().await;
    let buyer = token("customer", &[permissions::ORDERS_PLACE]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/orders/checkout",
        Some(&buyer),
        Some(json!({ "customer_name": "Ana", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pos_sale_and_admin_adjustment() {
    let app = app().await;
    let admin = token("admin", &[]);
    let id = create_shoe(&app, &admin).await;
    let cashier = token("cashier", &[permissions::POS_SELL]);

    let (status, sale) = send(
        &app,
        "POST",
        "/api/pos/transactions",
        Some(&cashier),
        Some(json!({
            "payment_method": "CARD",
            "items": [{ "product_id": id, "color": "Black", "size": "10", "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{sale}");
    assert_eq!(sale["cashier_name"], "Tess");

    let date = sale["business_date"].as_str().unwrap().to_string();
    let (status, daily) = send(&app, "GET", &format!("/api/pos/daily-sales/{date}"), Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(daily["units_sold"], 1);

    let (status, adjusted) = send(
        &app,
        "POST",
        &format!("/api/stock/{id}/adjust"),
        Some(&admin),
        Some(json!({ "color": "Black", "size": "10", "adjustment": { "set": 6 } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{adjusted}");
    assert_eq!(adjusted["stock_quantity"], 6);
    assert_eq!(adjusted["aggregate"], 8);

    let (_, movements) = send(&app, "GET", &format!("/api/stock/{id}/movements?limit=1"), Some(&admin), None).await;
    let movements = movements.as_array().unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0]["reference"], "tess");
}
