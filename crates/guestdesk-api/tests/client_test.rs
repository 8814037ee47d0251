#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use guestdesk_api::{ApiClient, Error, ListParams, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "test-token".to_string().into();
    let client = ApiClient::from_token(&server.uri(), &token, &TransportConfig::default()).unwrap();
    (server, client)
}

fn order_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "order_number": format!("ORD20250811AB12CD{id:02}"),
        "customer": {"username": "jdoe", "email": "jdoe@example.com"},
        "status": status,
        "total_amount": "120.00",
        "notes": null,
        "order_items": [],
        "created_at": "2025-08-11T09:00:00Z",
        "updated_at": "2025-08-11T09:00:00Z"
    })
}

// ── List normalization ──────────────────────────────────────────────

#[tokio::test]
async fn list_orders_normalizes_paginated_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/orders/"))
        .and(header("authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 23,
            "next": "http://x/api/admin/orders/?page=2",
            "previous": null,
            "results": [order_json(1, "P"), order_json(2, "D")]
        })))
        .mount(&server)
        .await;

    let page = client.list_orders(&ListParams::new()).await.unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, 23);
    assert!(page.server_paginated);
    assert_eq!(page.items[0].order_number, "ORD20250811AB12CD01");
}

#[tokio::test]
async fn list_orders_normalizes_bare_array() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/orders/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([order_json(1, "P")])),
        )
        .mount(&server)
        .await;

    let page = client.list_orders(&ListParams::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 1);
    assert!(!page.server_paginated);
}

#[tokio::test]
async fn list_rooms_normalizes_data_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/rooms/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": 7,
                "room_code": "R-101",
                "categories": "V",
                "reserved": false,
                "price_per_night": "220.00",
                "capacity": 2,
                "description": "Corner room",
                "is_active": true,
                "created_at": "2025-08-01T08:00:00Z",
                "updated_at": "2025-08-01T08:00:00Z"
            }]
        })))
        .mount(&server)
        .await;

    let page = client.list_rooms(&ListParams::new()).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].categories, "V");
    assert!(!page.server_paginated);
}

// ── Query parameters ────────────────────────────────────────────────

#[tokio::test]
async fn list_params_reach_the_wire() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/"))
        .and(query_param("page", "3"))
        .and(query_param("page_size", "10"))
        .and(query_param("ordering", "-created_at"))
        .and(query_param("search", "ada"))
        .and(query_param("status", "ACTIVE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let params = ListParams::new()
        .page(3)
        .page_size(10)
        .ordering("-created_at")
        .search("ada")
        .status("ACTIVE");
    let page = client.list_users(&params).await.unwrap();
    assert!(page.items.is_empty());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn update_order_status_patches_status_route() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/orders/9/status/"))
        .and(body_json(json!({"status": "C"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(order_json(9, "C")))
        .mount(&server)
        .await;

    let order = client.update_order_status(9, "C").await.unwrap();
    assert_eq!(order.status, "C");
}

#[tokio::test]
async fn delete_room_accepts_204() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/rooms/4/"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client.delete_room(4).await.unwrap();
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn unauthorized_maps_to_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Invalid token."})),
        )
        .mount(&server)
        .await;

    let result = client.list_products(&ListParams::new()).await;
    assert!(
        matches!(result, Err(Error::SessionExpired)),
        "expected SessionExpired, got: {result:?}"
    );
}

#[tokio::test]
async fn drf_detail_body_becomes_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/999/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})),
        )
        .mount(&server)
        .await;

    let result = client.get_order(999).await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not found.");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_failure_maps_to_authentication() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = guestdesk_api::auth::login(
        &server.uri(),
        "admin@example.com",
        &secret,
        &TransportConfig::default(),
    )
    .await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn login_success_returns_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "fresh-token",
            "name": "Desk Admin",
            "role": "ADMIN"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter22".to_string().into();
    let session = guestdesk_api::auth::login(
        &server.uri(),
        "admin@example.com",
        &secret,
        &TransportConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(session.token, "fresh-token");
    assert_eq!(session.role.as_deref(), Some("ADMIN"));
}

// ── Unknown status codes pass through ───────────────────────────────

#[tokio::test]
async fn unknown_status_code_survives_the_trip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/orders/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([order_json(1, "ZZ")])),
        )
        .mount(&server)
        .await;

    let page = client.list_orders(&ListParams::new()).await.unwrap();
    assert_eq!(page.items[0].status, "ZZ");
}
