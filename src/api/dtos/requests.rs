use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::models::booking::VALID_STATUSES;
use crate::error::AppError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_email(&self.email, &mut errors);
        if let Some(phone) = &self.phone {
            if !phone.is_empty() {
                check_phone(phone, &mut errors);
            }
        }
        collect(errors)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(name) = &self.name {
            check_name(name, &mut errors);
        }
        if let Some(email) = &self.email {
            check_email(email, &mut errors);
        }
        if let Some(phone) = &self.phone {
            // Empty string is the "clear phone" request, anything else
            // must look like a phone number.
            if !phone.is_empty() {
                check_phone(phone, &mut errors);
            }
        }
        collect(errors)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub price_per_day: f64,
    pub owner_id: String,
}

impl CreatePropertyRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        check_title(&self.title, &mut errors);
        check_address(&self.address, &mut errors);
        check_price(self.price_per_day, &mut errors);
        if self.owner_id.trim().is_empty() {
            errors.push("Owner id is required".to_string());
        }
        collect(errors)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub price_per_day: Option<f64>,
}

impl UpdatePropertyRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_title(title, &mut errors);
        }
        if let Some(address) = &self.address {
            check_address(address, &mut errors);
        }
        if let Some(price) = self.price_per_day {
            check_price(price, &mut errors);
        }
        collect(errors)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub property_id: String,
    // Also accepted as the tenantId query parameter.
    pub tenant_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CreateBookingRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.property_id.trim().is_empty() {
            errors.push("Property id is required".to_string());
        }
        collect(errors)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl UpdateBookingRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if let Some(status) = &self.status {
            // Empty string means "leave the status alone".
            if !status.is_empty() && !VALID_STATUSES.contains(&status.as_str()) {
                errors.push(format!(
                    "Status must be one of: {}",
                    VALID_STATUSES.join(", ")
                ));
            }
        }
        collect(errors)
    }
}

fn collect(errors: Vec<String>) -> Result<(), AppError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::ValidationErrors(errors))
    }
}

fn check_name(value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push("Name is required".to_string());
    } else if value.len() > 100 {
        errors.push("Name must not exceed 100 characters".to_string());
    }
}

fn check_email(value: &str, errors: &mut Vec<String>) {
    if !is_plausible_email(value) {
        errors.push(format!("'{}' is not a valid email address", value));
    }
}

fn is_plausible_email(value: &str) -> bool {
    if value.len() > 254 || value.contains(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    }
}

fn check_phone(value: &str, errors: &mut Vec<String>) {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let chars_ok = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | ' '));
    if !chars_ok || !(7..=20).contains(&digits) {
        errors.push(format!("'{}' is not a valid phone number", value));
    }
}

fn check_title(value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push("Title is required".to_string());
    } else if value.len() > 200 {
        errors.push("Title must not exceed 200 characters".to_string());
    }
}

fn check_address(value: &str, errors: &mut Vec<String>) {
    if value.trim().is_empty() {
        errors.push("Address is required".to_string());
    }
}

fn check_price(value: f64, errors: &mut Vec<String>) {
    if !(0.01..=10000.0).contains(&value) {
        errors.push("Price per day must be between 0.01 and 10000".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("anna@example.com"));
        assert!(is_plausible_email("a.b+tag@sub.example.co"));
        assert!(!is_plausible_email("no-at-sign.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("anna@nodot"));
        assert!(!is_plausible_email("anna@.example.com"));
        assert!(!is_plausible_email("anna smith@example.com"));
    }

    #[test]
    fn test_create_user_collects_all_errors() {
        let req = CreateUserRequest {
            name: "".to_string(),
            email: "not-an-email".to_string(),
            phone: Some("abc".to_string()),
        };

        match req.validate() {
            Err(AppError::ValidationErrors(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("Expected ValidationErrors, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_price_bounds() {
        let mut errors = Vec::new();
        check_price(0.01, &mut errors);
        check_price(10000.0, &mut errors);
        assert!(errors.is_empty());

        check_price(0.0, &mut errors);
        check_price(10000.01, &mut errors);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_booking_status_must_be_known() {
        let req = UpdateBookingRequest {
            start_date: None,
            end_date: None,
            status: Some("Archived".to_string()),
        };
        assert!(req.validate().is_err());

        let req = UpdateBookingRequest {
            start_date: None,
            end_date: None,
            status: Some("Cancelled".to_string()),
        };
        assert!(req.validate().is_ok());
    }
}
