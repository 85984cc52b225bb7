use crate::domain::{
    models::property::{PropertyDetails, PropertyFilter, RentalProperty},
    ports::PropertyRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

const DETAILS_SELECT: &str = "SELECT p.id, p.title, p.description, p.address, p.price_per_day, p.owner_id, u.name AS owner_name, p.created_at
     FROM properties p
     JOIN users u ON u.id = p.owner_id";

// LIKE treats % and _ as wildcards; search terms are matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

pub struct PostgresPropertyRepo {
    pool: PgPool,
}

impl PostgresPropertyRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PropertyRepository for PostgresPropertyRepo {
    async fn create(&self, property: &RentalProperty) -> Result<RentalProperty, AppError> {
        sqlx::query_as::<_, RentalProperty>(
            "INSERT INTO properties (id, title, description, address, price_per_day, owner_id, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
            .bind(&property.id)
            .bind(&property.title)
            .bind(&property.description)
            .bind(&property.address)
            .bind(property.price_per_day)
            .bind(&property.owner_id)
            .bind(property.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RentalProperty>, AppError> {
        sqlx::query_as::<_, RentalProperty>("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_details_by_id(&self, id: &str) -> Result<Option<PropertyDetails>, AppError> {
        sqlx::query_as::<_, PropertyDetails>(&format!("{} WHERE p.id = $1", DETAILS_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<PropertyDetails>, AppError> {
        let sql = format!(
            "{}
             WHERE ($1::text IS NULL OR p.owner_id = $1)
               AND ($2::text IS NULL OR p.title LIKE '%' || $2 || '%' ESCAPE '\\' OR p.description LIKE '%' || $2 || '%' ESCAPE '\\' OR p.address LIKE '%' || $2 || '%' ESCAPE '\\')
               AND ($3::double precision IS NULL OR p.price_per_day >= $3)
               AND ($4::double precision IS NULL OR p.price_per_day <= $4)
             ORDER BY p.title ASC",
            DETAILS_SELECT
        );

        let search = filter.search.as_deref().map(escape_like);

        sqlx::query_as::<_, PropertyDetails>(&sql)
            .bind(&filter.owner_id)
            .bind(&search)
            .bind(filter.min_price)
            .bind(filter.max_price)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_available(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<PropertyDetails>, AppError> {
        let sql = format!(
            "{}
             WHERE p.id NOT IN (
                 SELECT DISTINCT property_id FROM bookings
                 WHERE status = 'Confirmed' AND start_date <= $1 AND end_date >= $2
             )
             ORDER BY p.title ASC",
            DETAILS_SELECT
        );

        sqlx::query_as::<_, PropertyDetails>(&sql)
            .bind(end_date)
            .bind(start_date)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, property: &RentalProperty) -> Result<RentalProperty, AppError> {
        sqlx::query_as::<_, RentalProperty>(
            "UPDATE properties SET title = $1, description = $2, address = $3, price_per_day = $4
             WHERE id = $5
             RETURNING *",
        )
            .bind(&property.title)
            .bind(&property.description)
            .bind(&property.address)
            .bind(property.price_per_day)
            .bind(&property.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
