use crate::domain::models::{
    booking::{Booking, BookingDetails},
    property::{PropertyDetails, PropertyFilter, RentalProperty},
    user::User,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, property: &RentalProperty) -> Result<RentalProperty, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<RentalProperty>, AppError>;
    async fn find_details_by_id(&self, id: &str) -> Result<Option<PropertyDetails>, AppError>;
    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<PropertyDetails>, AppError>;
    async fn list_available(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<PropertyDetails>, AppError>;
    async fn update(&self, property: &RentalProperty) -> Result<RentalProperty, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert refusing to create a confirmed booking that overlaps an
    /// existing confirmed one for the same property.
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_details_by_id(&self, id: &str) -> Result<Option<BookingDetails>, AppError>;
    async fn list(&self) -> Result<Vec<BookingDetails>, AppError>;
    async fn list_by_tenant(&self, tenant_id: &str) -> Result<Vec<BookingDetails>, AppError>;
    async fn list_by_property(&self, property_id: &str) -> Result<Vec<BookingDetails>, AppError>;
    async fn list_confirmed_by_property(&self, property_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Update with the same no-overlap guarantee as `create`.
    async fn update(&self, booking: &Booking) -> Result<Booking, AppError>;
}
