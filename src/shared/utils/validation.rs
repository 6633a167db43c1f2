use crate::shared::errors::CatalogError;

pub struct Validator;

impl Validator {
    pub fn validate_name(name: &str) -> Result<(), CatalogError> {
        if name.is_empty() {
            return Err(CatalogError::Validation(
                "Name cannot be empty".to_string(),
            ));
        }
        if name.len() > 255 {
            return Err(CatalogError::Validation(
                "Name too long (max 255 characters)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_id(field: &str, id: i32) -> Result<(), CatalogError> {
        if id < 0 {
            return Err(CatalogError::Validation(format!(
                "{} cannot be negative",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_minutes(field: &str, minutes: i32) -> Result<(), CatalogError> {
        if minutes < 0 {
            return Err(CatalogError::Validation(format!(
                "{} cannot be negative",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_year(year: i32) -> Result<(), CatalogError> {
        if year < 0 {
            return Err(CatalogError::Validation(
                "Year of release cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_rating(rating: f32) -> Result<(), CatalogError> {
        if !rating.is_finite() || rating < 0.0 {
            return Err(CatalogError::Validation(
                "Rating must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_count(field: &str, count: i32) -> Result<(), CatalogError> {
        if count < 0 {
            return Err(CatalogError::Validation(format!(
                "{} cannot be negative",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_login(login: &str) -> Result<(), CatalogError> {
        if login.is_empty() {
            return Err(CatalogError::Validation(
                "Login cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<(), CatalogError> {
        if password.is_empty() {
            return Err(CatalogError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
