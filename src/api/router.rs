use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{health, user, property, booking};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Users
        .route("/users", get(user::list_users).post(user::create_user))
        .route("/users/{id}", get(user::get_user).put(user::update_user).delete(user::delete_user))

        // Properties
        .route("/properties", get(property::list_properties).post(property::create_property))
        .route("/properties/available", get(property::get_available_properties))
        .route("/properties/{id}", get(property::get_property).put(property::update_property))

        // Bookings
        .route("/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/bookings/{id}", get(booking::get_booking).put(booking::update_booking))
        .route("/bookings/{id}/cancel", patch(booking::cancel_booking))
        .route("/bookings/user/{user_id}", get(booking::list_bookings_by_user))
        .route("/bookings/property/{property_id}", get(booking::list_bookings_by_property))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
