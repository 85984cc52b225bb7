use crate::domain::{
    models::booking::{Booking, BookingDetails},
    ports::BookingRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

const DETAILS_SELECT: &str = "SELECT b.id, b.property_id, p.title AS property_title, b.tenant_id, u.name AS tenant_name, b.start_date, b.end_date, b.total_price, b.status, b.created_at
     FROM bookings b
     JOIN properties p ON p.id = b.property_id
     JOIN users u ON u.id = b.tenant_id";

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        // The bookings_confirmed_no_overlap exclusion constraint rejects
        // a racing overlapping insert with SQLSTATE 23P01.
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, property_id, tenant_id, start_date, end_date, total_price, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_details_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!("{} WHERE b.id = $1", DETAILS_SELECT))
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
            "{} WHERE b.tenant_id = $1 ORDER BY b.start_date ASC",
            DETAILS_SELECT
        ))
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_property(&self, property_id: &str) -> Result<Vec<BookingDetails>, AppError> {
        sqlx::query_as::<_, BookingDetails>(&format!(
            "{} WHERE b.property_id = $1 ORDER BY b.start_date ASC",
            DETAILS_SELECT
        ))
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_confirmed_by_property(&self, property_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE property_id = $1 AND status = 'Confirmed' ORDER BY start_date ASC",
        )
            .bind(property_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        let updated = sqlx::query_as::<_, Booking>(
            "UPDATE bookings
             SET start_date = $1, end_date = $2, total_price = $3, status = $4
             WHERE id = $5
             RETURNING *",
        )
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.total_price)
            .bind(&booking.status)
            .bind(&booking.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        updated.ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }
}
