pub mod errors;
pub mod utils;

pub use errors::{CatalogError, CatalogResult};
