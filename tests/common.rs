use rental_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::ports::{BookingRepository, PropertyRepository, UserRepository},
    domain::services::{
        booking_service::BookingService, property_service::PropertyService,
        user_service::UserService,
    },
    infra::repositories::{
        sqlite_booking_repo::SqliteBookingRepo,
        sqlite_property_repo::SqlitePropertyRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::Router;
use std::str::FromStr;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(pool.clone()));
        let property_repo: Arc<dyn PropertyRepository> = Arc::new(SqlitePropertyRepo::new(pool.clone()));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));

        let user_service = Arc::new(UserService::new(user_repo.clone()));
        let property_service = Arc::new(PropertyService::new(property_repo.clone(), user_repo.clone()));
        let booking_service = Arc::new(BookingService::new(booking_repo, property_repo, user_repo));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_service,
            property_service,
            booking_service,
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
