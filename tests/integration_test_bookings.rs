mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn days_from_now(days: i64) -> String {
    (Utc::now().date_naive() + Duration::days(days))
        .format("%Y-%m-%d")
        .to_string()
}

async fn create_user(app: &TestApp, name: &str, email: &str) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/users")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"name": name, "email": email}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn create_property(app: &TestApp, owner_id: &str, title: &str, price: f64) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/properties")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "title": title,
                "description": "Two rooms and a balcony",
                "address": "Lindenweg 4, Leipzig",
                "pricePerDay": price,
                "ownerId": owner_id
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

/// Owner, tenant and a 100.0/day property.
async fn setup(app: &TestApp) -> (String, String, String) {
    let owner = create_user(app, "Owner", "owner@example.com").await;
    let tenant = create_user(app, "Tenant", "tenant@example.com").await;
    let property = create_property(app, &owner, "Test Flat", 100.0).await;
    (owner, tenant, property)
}

async fn book(app: &TestApp, property_id: &str, tenant_id: &str, start: &str, end: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "propertyId": property_id,
                "tenantId": tenant_id,
                "startDate": start,
                "endDate": end
            }).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_create_booking() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert!(body["id"].as_str().is_some());
    assert_eq!(body["status"], "Confirmed");
    // Two nights at 100.0, the checkout day is not charged.
    assert_eq!(body["totalPrice"], 200.0);
    assert_eq!(body["propertyTitle"], "Test Flat");
    assert_eq!(body["tenantName"], "Tenant");
}

#[tokio::test]
async fn test_create_booking_tenant_from_query_param() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/bookings?tenantId={}", tenant))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "propertyId": property,
                "startDate": days_from_now(10),
                "endDate": days_from_now(12)
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["tenantId"], tenant.as_str());
}

#[tokio::test]
async fn test_create_booking_without_tenant_rejected() {
    let app = TestApp::new().await;
    let (_, _, property) = setup(&app).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/bookings")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({
                "propertyId": property,
                "startDate": days_from_now(10),
                "endDate": days_from_now(12)
            }).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_past_start_rejected() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(-1), &days_from_now(2)).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert!(body["message"].as_str().unwrap().contains("past"));
}

#[tokio::test]
async fn test_create_booking_inverted_range_rejected() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(12), &days_from_now(10)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Zero-length stays are rejected too.
    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(10)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_booking_unknown_references_rejected() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, "no-such-property", &tenant, &days_from_now(10), &days_from_now(12)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = book(&app, &property, "no-such-user", &days_from_now(10), &days_from_now(12)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_cannot_book_own_property() {
    let app = TestApp::new().await;
    let (owner, _, property) = setup(&app).await;

    let res = book(&app, &property, &owner, &days_from_now(10), &days_from_now(12)).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = parse_body(res).await;
    assert!(body["message"].as_str().unwrap().contains("own property"));
}

#[tokio::test]
async fn test_get_booking() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/bookings/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["propertyId"], property.as_str());
    assert_eq!(body["tenantName"], "Tenant");
}

#[tokio::test]
async fn test_get_unknown_booking_not_found() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/bookings/missing")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_bookings_by_user_and_property() {
    let app = TestApp::new().await;
    let (owner, tenant, property) = setup(&app).await;
    let second_tenant = create_user(&app, "Second", "second@example.com").await;
    let second_property = create_property(&app, &owner, "Second Flat", 50.0).await;

    book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    book(&app, &property, &second_tenant, &days_from_now(20), &days_from_now(22)).await;
    book(&app, &second_property, &tenant, &days_from_now(10), &days_from_now(12)).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/bookings")
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await.as_array().unwrap().len(), 3);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/bookings/user/{}", tenant))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|b| b["tenantId"] == tenant.as_str()));

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/bookings/property/{}", property))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let body = parse_body(res).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|b| b["propertyId"] == property.as_str()));
}

#[tokio::test]
async fn test_update_booking_recomputes_price_at_current_rate() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let created = parse_body(res).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["totalPrice"], 200.0);

    // The owner raises the nightly rate before the tenant extends.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/properties/{}", property))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"pricePerDay": 150.0}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // The rate change alone does not touch the stored booking price.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/bookings/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["totalPrice"], 200.0);

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/bookings/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"endDate": days_from_now(13)}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["startDate"], days_from_now(10));
    assert_eq!(body["endDate"], days_from_now(13));
    // Three nights at the current 150.0 rate.
    assert_eq!(body["totalPrice"], 450.0);
}

#[tokio::test]
async fn test_update_booking_status_only_keeps_price() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/bookings/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "Pending"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["status"], "Pending");
    assert_eq!(body["totalPrice"], 200.0);
}

#[tokio::test]
async fn test_update_booking_invalid_status_rejected() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/bookings/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "Archived"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_booking_inverted_range_rejected() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    // Moving the start past the kept end date must fail.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/bookings/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"startDate": days_from_now(14)}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_unknown_booking_not_found() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri("/bookings/missing")
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"status": "Pending"}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancel_booking_is_idempotent() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/bookings/{}/cancel", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/bookings/{}", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(parse_body(res).await["status"], "Cancelled");

    // A second cancel succeeds without complaint.
    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/bookings/{}/cancel", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cancel_unknown_booking_not_found() {
    let app = TestApp::new().await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH").uri("/bookings/missing/cancel")
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cancelled_booking_cannot_be_updated() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    let res = book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;
    let id = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.router.clone().oneshot(
        Request::builder().method("PATCH").uri(format!("/bookings/{}/cancel", id))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/bookings/{}", id))
            .header("Content-Type", "application/json")
            .body(Body::from(json!({"endDate": days_from_now(14)}).to_string())).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_user_with_bookings_conflict() {
    let app = TestApp::new().await;
    let (_, tenant, property) = setup(&app).await;

    book(&app, &property, &tenant, &days_from_now(10), &days_from_now(12)).await;

    // The booking still references the tenant row.
    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/users/{}", tenant))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
}
