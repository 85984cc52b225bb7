pub mod availability;
pub mod booking_service;
pub mod property_service;
pub mod user_service;
