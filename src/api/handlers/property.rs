use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreatePropertyRequest, UpdatePropertyRequest},
    responses::PropertyResponse,
};
use crate::domain::models::property::{NewProperty, PropertyFilter, PropertyPatch};
use std::collections::HashMap;
use std::sync::Arc;
use crate::error::AppError;
use chrono::NaiveDate;
use tracing::info;

pub async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filter = PropertyFilter {
        owner_id: params.get("ownerId").cloned(),
        search: params.get("search").cloned(),
        min_price: parse_price_param(&params, "minPrice")?,
        max_price: parse_price_param(&params, "maxPrice")?,
    };

    let properties = state.property_service.list_properties(&filter).await?;
    let views: Vec<PropertyResponse> = properties.into_iter().map(PropertyResponse::from).collect();
    Ok(Json(views))
}

/// Properties free of confirmed bookings over `startDate..=endDate`.
pub async fn get_available_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_date = parse_date_param(&params, "startDate")?;
    let end_date = parse_date_param(&params, "endDate")?;

    let properties = state
        .property_service
        .available_properties(start_date, end_date)
        .await?;
    let views: Vec<PropertyResponse> = properties.into_iter().map(PropertyResponse::from).collect();
    Ok(Json(views))
}

pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let property = state.property_service.get_property(&id).await?;
    Ok(Json(PropertyResponse::from(property)))
}

pub async fn create_property(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = state
        .property_service
        .create_property(NewProperty {
            title: payload.title,
            description: payload.description,
            address: payload.address,
            price_per_day: payload.price_per_day,
            owner_id: payload.owner_id,
        })
        .await?;

    info!("Property created: {}", created.id);
    Ok((StatusCode::CREATED, Json(PropertyResponse::from(created))))
}

pub async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePropertyRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let updated = state
        .property_service
        .update_property(
            &id,
            PropertyPatch {
                title: payload.title,
                description: payload.description,
                address: payload.address,
                price_per_day: payload.price_per_day,
            },
        )
        .await?;

    info!("Property updated: {}", updated.id);
    Ok(Json(PropertyResponse::from(updated)))
}

fn parse_price_param(params: &HashMap<String, String>, name: &str) -> Result<Option<f64>, AppError> {
    match params.get(name) {
        // "NaN" and "inf" parse as f64 but make no sense as price bounds.
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid {} value", name))),
        None => Ok(None),
    }
}

fn parse_date_param(params: &HashMap<String, String>, name: &str) -> Result<NaiveDate, AppError> {
    let raw = params
        .get(name)
        .ok_or_else(|| AppError::Validation(format!("{} query parameter is required", name)))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected YYYY-MM-DD)", name)))
}
