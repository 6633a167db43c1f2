//! Kinoteka: an in-memory catalog of movies, series and users.
//!
//! Entities are validated at construction, stored in keyed CRUD stores and
//! serialized to JSON or XML files.

pub mod domain;
pub mod serialization;
pub mod shared;
pub mod storage;

pub use domain::entities::{CatalogEntity, Movie, Record, TitleKind, User};
pub use domain::value_objects::MpaaRating;
pub use serialization::ExportFormat;
pub use shared::errors::{CatalogError, CatalogResult};
pub use storage::{CinemaDatabase, EntityStore, UsersDatabase};
