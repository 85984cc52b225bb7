use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::models::{booking::BookingDetails, property::PropertyDetails, user::User};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_day: f64,
    pub owner_id: String,
    pub owner_name: String,
}

impl From<PropertyDetails> for PropertyResponse {
    fn from(details: PropertyDetails) -> Self {
        Self {
            id: details.id,
            title: details.title,
            description: details.description,
            address: details.address,
            price_per_day: details.price_per_day,
            owner_id: details.owner_id,
            owner_name: details.owner_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub property_id: String,
    pub property_title: String,
    pub tenant_id: String,
    pub tenant_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_price: f64,
    pub status: String,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        Self {
            id: details.id,
            property_id: details.property_id,
            property_title: details.property_title,
            tenant_id: details.tenant_id,
            tenant_name: details.tenant_name,
            start_date: details.start_date,
            end_date: details.end_date,
            total_price: details.total_price,
            status: details.status,
        }
    }
}
