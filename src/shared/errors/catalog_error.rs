use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate key: id {id} already exists in the store")]
    DuplicateKey { id: i32 },

    #[error("Not found: no entry with id {id}")]
    NotFound { id: i32 },

    #[error("Id mismatch: entry keyed by {key} cannot be replaced with an entity whose id is {id}")]
    IdMismatch { key: i32, id: i32 },

    #[error("Invalid movie data: {0}")]
    InvalidMovieData(String),

    #[error("Invalid user data: {0}")]
    InvalidUserData(String),

    #[error("Database I/O error: {0}")]
    IoDatabase(String),

    #[error("File error: {0}")]
    File(String),
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::IoDatabase(err.to_string())
    }
}

impl From<quick_xml::Error> for CatalogError {
    fn from(err: quick_xml::Error) -> Self {
        CatalogError::IoDatabase(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::File(err.to_string())
    }
}

// Result type alias for convenience
pub type CatalogResult<T> = Result<T, CatalogError>;
