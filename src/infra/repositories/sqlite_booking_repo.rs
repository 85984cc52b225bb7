use crate::domain::{
    models::booking::{Booking, BookingDetails},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const DETAILS_SELECT: &str = "SELECT b.id, b.property_id, p.title AS property_title, b.tenant_id, u.name AS tenant_name, b.start_date, b.end_date, b.total_price, b.status, b.created_at
     FROM bookings b
     JOIN properties p ON p.id = b.property_id
     JOIN users u ON u.id = b.tenant_id";

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        // The availability re-check lives inside the INSERT so two
        // concurrent requests cannot both pass a prior SELECT and then
        // both write. A zero-row result means the guard fired.
        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, property_id, tenant_id, start_date, end_date, total_price, status, created_at)
             SELECT ?, ?, ?, ?, ?, ?, ?, ?
             WHERE ? != 'Confirmed' OR NOT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE property_id = ? AND status = 'Confirmed'
                   AND start_date <= ? AND end_date >= ?
             )
             RETURNING *",
        )
            .bind(&booking.id)
            .bind(&booking.property_id)
            .bind(&booking.tenant_id)
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(&booking.status)
            .bind(booking.created_at)
            .bind(&booking.status)
            .bind(&booking.property_id)
            .bind(booking.end_date)
            .bind(booking.start_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        created.ok_or_else(|| {
            AppError::Conflict("Property is not available for the selected dates".to_string())
        })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_details_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!("{} WHERE b.id = ?", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!("{} ORDER BY b.start_date ASC", DETAILS_SELECT))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!(
            "{} WHERE b.tenant_id = ? ORDER BY b.start_date ASC",
            DETAILS_SELECT
        ))
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_property(&self, property_id: &str) -> Result<Vec<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!(
            "{} WHERE b.property_id = ? ORDER BY b.start_date ASC",
            DETAILS_SELECT
        ))
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_by_property(&self, property_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE property_id = ? AND status = 'Confirmed' ORDER BY start_date ASC",
        )
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        // Same in-statement guard as create, active only when the row
        // ends up Confirmed. Zero rows is ambiguous between a missing
        // booking and a fired guard, so re-fetch to tell them apart.
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings
             SET start_date = ?, end_date = ?, total_price = ?, status = ?
             WHERE id = ?
               AND (? != 'Confirmed' OR NOT EXISTS (
                   SELECT 1 FROM bookings other
                   WHERE other.property_id = bookings.property_id
                     AND other.id != bookings.id
                     AND other.status = 'Confirmed'
                     AND other.start_date <= ?
                     AND other.end_date >= ?
               ))
             RETURNING *",
        )
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(&booking.status)
            .bind(&booking.id)
            .bind(&booking.status)
            .bind(booking.end_date)
            .bind(booking.start_date)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match updated {
            Some(b) => Ok(b),
            None => {
                if self.find_by_id(&booking.id).await?.is_some() {
                    Err(AppError::Conflict(
                        "Property is not available for the selected dates".to_string(),
                    ))
                } else {
                    Err(AppError::NotFound("Booking not found".into()))
                }
            }
        }
    }
}
