use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CONFIRMED: &str = "Confirmed";
pub const STATUS_CANCELLED: &str = "Cancelled";

pub const VALID_STATUSES: [&str; 3] = [STATUS_PENDING, STATUS_CONFIRMED, STATUS_CANCELLED];

/// A reservation of a property for a date range. Both bounds are
/// occupied days: a booking ending on the 12th still blocks the 12th.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub property_id: String,
    pub tenant_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBooking {
    pub property_id: String,
    pub tenant_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Booking {
    pub fn new(params: NewBooking, total_price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            property_id: params.property_id,
            tenant_id: params.tenant_id,
            start_date: params.start_date,
            end_date: params.end_date,
            total_price,
            status: STATUS_CONFIRMED.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone)]
pub struct BookingPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Booking row joined with the property title and tenant name, the
/// shape the API returns.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct BookingDetails {
    pub id: String,
    pub property_id: String,
    pub property_title: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl BookingDetails {
    pub fn from_parts(booking: Booking, property_title: String, tenant_name: String) -> Self {
        Self {
            id: booking.id,
            property_id: booking.property_id,
            property_title,
            tenant_id: booking.tenant_id,
            tenant_name,
            start_date: booking.start_date,
            end_date: booking.end_date,
            total_price: booking.total_price,
            status: booking.status,
            created_at: booking.created_at,
        }
    }
}
