use std::sync::Arc;
use crate::domain::services::{
    booking_service::BookingService, property_service::PropertyService, user_service::UserService,
};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_service: Arc<UserService>,
    pub property_service: Arc<PropertyService>,
    pub booking_service: Arc<BookingService>,
}
