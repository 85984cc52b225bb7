use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateBookingRequest, UpdateBookingRequest},
    responses::BookingResponse,
};
use crate::domain::models::booking::{BookingPatch, NewBooking};
use std::collections::HashMap;
use std::sync::Arc;
use crate::error::AppError;
use tracing::info;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_bookings().await?;
    let views: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(views))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_service.get_booking(&id).await?;
    Ok(Json(BookingResponse::from(booking)))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // The tenant comes from the body, with the tenantId query parameter
    // as a fallback for clients that send it there.
    let tenant_id = payload
        .tenant_id
        .filter(|id| !id.is_empty())
        .or_else(|| params.get("tenantId").cloned())
        .ok_or_else(|| AppError::Validation("Tenant id is required".to_string()))?;

    let created = state
        .booking_service
        .create_booking(NewBooking {
            property_id: payload.property_id,
            tenant_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
        })
        .await?;

    info!(
        "Booking created: {} (property {}, {} to {})",
        created.id, created.property_id, created.start_date, created.end_date
    );
    Ok((StatusCode::CREATED, Json(BookingResponse::from(created))))
}

pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = state
        .booking_service
        .update_booking(
            &id,
            BookingPatch {
                start_date: payload.start_date,
                end_date: payload.end_date,
                status: payload.status.filter(|s| !s.is_empty()),
            },
        )
        .await?;

    info!("Booking updated: {}", updated.id);
    Ok(Json(BookingResponse::from(updated)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_service.cancel_booking(&id).await?;

    info!("Booking cancelled: {}", id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_bookings_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.bookings_by_user(&user_id).await?;
    let views: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(views))
}

pub async fn list_bookings_by_property(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.bookings_by_property(&property_id).await?;
    let views: Vec<BookingResponse> = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(views))
}
