use std::sync::Arc;
use chrono::NaiveDate;
use crate::domain::{
    models::property::{NewProperty, PropertyDetails, PropertyFilter, PropertyPatch, RentalProperty},
    ports::{PropertyRepository, UserRepository},
};
use crate::error::AppError;

pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    users: Arc<dyn UserRepository>,
}

impl PropertyService {
    pub fn new(properties: Arc<dyn PropertyRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { properties, users }
    }

    pub async fn create_property(&self, params: NewProperty) -> Result<PropertyDetails, AppError> {
        let owner = self
            .users
            .find_by_id(&params.owner_id)
            .await?
            .ok_or_else(|| {
                AppError::Validation(format!("Owner with id {} does not exist", params.owner_id))
            })?;

        let property = RentalProperty::new(params);
        let created = self.properties.create(&property).await?;

        Ok(PropertyDetails {
            id: created.id,
            title: created.title,
            description: created.description,
            address: created.address,
            price_per_day: created.price_per_day,
            owner_id: created.owner_id,
            owner_name: owner.name,
            created_at: created.created_at,
        })
    }

    pub async fn get_property(&self, id: &str) -> Result<PropertyDetails, AppError> {
        self.properties
            .find_details_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property with id {} not found", id)))
    }

    pub async fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<PropertyDetails>, AppError> {
        self.properties.list(filter).await
    }

    /// Properties with no confirmed booking overlapping the requested range.
    pub async fn available_properties(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PropertyDetails>, AppError> {
        if start_date >= end_date {
            return Err(AppError::Validation(
                "Start date must be before end date".to_string(),
            ));
        }

        self.properties.list_available(start_date, end_date).await
    }

    pub async fn update_property(&self, id: &str, patch: PropertyPatch) -> Result<PropertyDetails, AppError> {
        let mut property = self
            .properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Property with id {} not found", id)))?;

        if let Some(title) = patch.title {
            property.title = title;
        }
        if let Some(description) = patch.description {
            property.description = description;
        }
        if let Some(address) = patch.address {
            property.address = address;
        }
        if let Some(price_per_day) = patch.price_per_day {
            property.price_per_day = price_per_day;
        }

        let updated = self.properties.update(&property).await?;

        self.properties
            .find_details_by_id(&updated.id)
            .await?
            .ok_or(AppError::Internal)
    }
}
