use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::ports::{BookingRepository, PropertyRepository, UserRepository};
use crate::domain::services::{
    booking_service::BookingService, property_service::PropertyService, user_service::UserService,
};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_property_repo::PostgresPropertyRepo,
    postgres_user_repo::PostgresUserRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_property_repo::SqlitePropertyRepo,
    sqlite_user_repo::SqliteUserRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepo::new(pool.clone()));
        let property_repo: Arc<dyn PropertyRepository> = Arc::new(PostgresPropertyRepo::new(pool.clone()));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(PostgresBookingRepo::new(pool.clone()));

        build_state(config, user_repo, property_repo, booking_repo)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true)
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(pool.clone()));
        let property_repo: Arc<dyn PropertyRepository> = Arc::new(SqlitePropertyRepo::new(pool.clone()));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepo::new(pool.clone()));

        build_state(config, user_repo, property_repo, booking_repo)
    }
}

fn build_state(
    config: &Config,
    user_repo: Arc<dyn UserRepository>,
    property_repo: Arc<dyn PropertyRepository>,
    booking_repo: Arc<dyn BookingRepository>,
) -> AppState {
    let user_service = Arc::new(UserService::new(user_repo.clone()));
    let property_service = Arc::new(PropertyService::new(property_repo.clone(), user_repo.clone()));
    let booking_service = Arc::new(BookingService::new(booking_repo, property_repo, user_repo));

    AppState {
        config: config.clone(),
        user_service,
        property_service,
        booking_service,
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
