use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Validation failed")]
    ValidationErrors(Vec<String>),
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if code == "2067" || code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "message": "Resource already exists (duplicate entry)" })),
                        )
                            .into_response();
                    }

                    // 787 = SQLite Foreign Key Constraint
                    // 23503 = PostgreSQL Foreign Key Violation
                    if code == "787" || code == "23503" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "message": "Resource is referenced by other records" })),
                        )
                            .into_response();
                    }

                    // 23P01 = PostgreSQL Exclusion Violation (confirmed booking overlap)
                    if code == "23P01" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({ "message": "Property is not available for the selected dates" })),
                        )
                            .into_response();
                    }
                }

                error!("Database error: {:?}", e);
                return internal_error_response();
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ValidationErrors(errors) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "message": "Validation failed", "errors": errors })),
                )
                    .into_response();
            }
            AppError::Internal => return internal_error_response(),
        };

        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "message": "Internal server error",
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
        .into_response()
}
