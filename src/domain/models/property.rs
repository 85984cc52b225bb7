use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RentalProperty {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_day: f64,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_day: f64,
    pub owner_id: String,
}

impl RentalProperty {
    pub fn new(params: NewProperty) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            address: params.address,
            price_per_day: params.price_per_day,
            owner_id: params.owner_id,
            created_at: Utc::now(),
        }
    }
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone)]
pub struct PropertyPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_day: Option<f64>,
}

/// Property row joined with its owner's name, the shape the API returns.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct PropertyDetails {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_day: f64,
    pub owner_id: String,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
}

/// Optional listing filters, combined with AND.
#[derive(Debug, Default, Clone)]
pub struct PropertyFilter {
    pub owner_id: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}
