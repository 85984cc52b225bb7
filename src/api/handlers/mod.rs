pub mod booking;
pub mod health;
pub mod property;
pub mod user;
