pub mod validation;

pub use validation::Validator;
