use std::sync::Arc;
use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::domain::{
    models::booking::{Booking, BookingDetails, BookingPatch, NewBooking, STATUS_CANCELLED},
    ports::{BookingRepository, PropertyRepository, UserRepository},
    services::availability,
};
use crate::error::AppError;

pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    properties: Arc<dyn PropertyRepository>,
    users: Arc<dyn UserRepository>,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        properties: Arc<dyn PropertyRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { bookings, properties, users }
    }

    /// True when no confirmed booking for the property overlaps the
    /// range. `exclude_booking_id` lets a booking be re-checked against
    /// everyone but itself when its own dates move.
    pub async fn check_availability(
        &self,
        property_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        exclude_booking_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let confirmed = self.bookings.list_confirmed_by_property(property_id).await?;

        let conflict = confirmed
            .iter()
            .filter(|b| exclude_booking_id != Some(b.id.as_str()))
            .any(|b| availability::overlaps(b.start_date, b.end_date, start_date, end_date));

        Ok(!conflict)
    }

    pub async fn create_booking(&self, params: NewBooking) -> Result<BookingDetails, AppError> {
        if params.start_date >= params.end_date {
            return Err(AppError::Validation(
                "Start date must be before end date".to_string(),
            ));
        }

        let today = Utc::now().date_naive();
        if params.start_date < today {
            return Err(AppError::Validation(
                "Start date cannot be in the past".to_string(),
            ));
        }

        let property = self
            .properties
            .find_by_id(&params.property_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Property with id {} does not exist",
                    params.property_id
                ))
            })?;

        let tenant = self
            .users
            .find_by_id(&params.tenant_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("User with id {} does not exist", params.tenant_id))
            })?;

        if property.owner_id == tenant.id {
            return Err(AppError::Conflict(
                "Owners cannot book their own property".to_string(),
            ));
        }

        let available = self
            .check_availability(&property.id, params.start_date, params.end_date, None)
            .await?;
        if !available {
            warn!(
                "Booking rejected: property {} already booked between {} and {}",
                property.id, params.start_date, params.end_date
            );
            return Err(AppError::Conflict(
                "Property is not available for the selected dates".to_string(),
            ));
        }

        let total_price =
            availability::total_price(property.price_per_day, params.start_date, params.end_date);
        let booking = Booking::new(params, total_price);

        let created = self.bookings.create(&booking).await?;

        Ok(BookingDetails::from_parts(created, property.title, tenant.name))
    }

    pub async fn get_booking(&self, id: &str) -> Result<BookingDetails, AppError> {
        self.bookings
            .find_details_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    pub async fn list_bookings(&self) -> Result<Vec<BookingDetails>, AppError> {
        self.bookings.list().await
    }

    pub async fn bookings_by_user(&self, user_id: &str) -> Result<Vec<BookingDetails>, AppError> {
        self.bookings.list_by_tenant(user_id).await
    }

    pub async fn bookings_by_property(&self, property_id: &str) -> Result<Vec<BookingDetails>, AppError> {
        self.bookings.list_by_property(property_id).await
    }

    /// Dates and status can move; cancelled bookings are frozen. When
    /// dates change the price is recomputed from the property's current
    /// rate, not the rate at creation time.
    pub async fn update_booking(&self, id: &str, patch: BookingPatch) -> Result<BookingDetails, AppError> {
        let mut booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        if booking.status == STATUS_CANCELLED {
            return Err(AppError::Conflict(
                "Cancelled bookings can no longer be modified".to_string(),
            ));
        }

        let dates_changed = patch.start_date.is_some() || patch.end_date.is_some();

        if dates_changed {
            let new_start = patch.start_date.unwrap_or(booking.start_date);
            let new_end = patch.end_date.unwrap_or(booking.end_date);

            if new_start >= new_end {
                return Err(AppError::Validation(
                    "Start date must be before end date".to_string(),
                ));
            }

            let available = self
                .check_availability(&booking.property_id, new_start, new_end, Some(&booking.id))
                .await?;
            if !available {
                return Err(AppError::Conflict(
                    "Property is not available for the selected dates".to_string(),
                ));
            }

            booking.start_date = new_start;
            booking.end_date = new_end;

            let property = self
                .properties
                .find_by_id(&booking.property_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "Property with id {} not found",
                        booking.property_id
                    ))
                })?;

            booking.total_price = availability::total_price(
                property.price_per_day,
                booking.start_date,
                booking.end_date,
            );
        }

        if let Some(status) = patch.status {
            booking.status = status;
        }

        let updated = self.bookings.update(&booking).await?;

        self.bookings
            .find_details_by_id(&updated.id)
            .await?
            .ok_or(AppError::Internal)
    }

    /// Idempotent: cancelling an already-cancelled booking succeeds.
    pub async fn cancel_booking(&self, id: &str) -> Result<(), AppError> {
        let mut booking = self
            .bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        if booking.status == STATUS_CANCELLED {
            return Ok(());
        }

        booking.status = STATUS_CANCELLED.to_string();
        self.bookings.update(&booking).await?;

        Ok(())
    }
}
