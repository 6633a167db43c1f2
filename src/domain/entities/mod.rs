mod movie;
mod user;

pub use movie::{Movie, TitleKind};
pub use user::User;

use serde_json::Value;

use crate::shared::errors::{CatalogError, CatalogResult};

/// Structural record shared by the JSON and XML serializers.
pub type Record = serde_json::Map<String, Value>;

/// Contract between entities and the store/serializers: every entity carries
/// its own integer key and converts to/from a flat field record.
pub trait CatalogEntity: Sized {
    /// Kind label used in XML element names (`ID_<kind>_<id>`).
    const KIND: &'static str;

    fn id(&self) -> i32;

    fn encode(&self) -> Record;

    /// Inverse of `encode`. Fails on missing or malformed required fields,
    /// it never fills in defaults.
    fn decode(record: &Record) -> CatalogResult<Self>;

    /// Whether a record plausibly describes this entity kind. Import skips
    /// unrecognized entries instead of failing on them.
    fn recognizes(record: &Record) -> bool;
}

type FieldError = fn(String) -> CatalogError;

pub(crate) fn require<'a>(
    record: &'a Record,
    key: &str,
    err: FieldError,
) -> CatalogResult<&'a Value> {
    record
        .get(key)
        .ok_or_else(|| err(format!("Missing required field \"{}\"", key)))
}

pub(crate) fn string_field(record: &Record, key: &str, err: FieldError) -> CatalogResult<String> {
    match require(record, key, err)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(err(format!("Field \"{}\" must be a string", key))),
    }
}

/// XML records carry every scalar as text, so numbers are accepted either as
/// JSON numbers or as numeric strings.
pub(crate) fn int_field(record: &Record, key: &str, err: FieldError) -> CatalogResult<i32> {
    let value = require(record, key, err)?;
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| err(format!("Field \"{}\" must be an integer", key)))
}

pub(crate) fn float_field(record: &Record, key: &str, err: FieldError) -> CatalogResult<f32> {
    let value = require(record, key, err)?;
    let parsed = match value {
        Value::Number(n) => n.as_f64().map(|n| n as f32),
        Value::String(s) => s.trim().parse::<f32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| err(format!("Field \"{}\" must be a number", key)))
}

/// An empty XML element parses back as an empty string, so that shape is
/// accepted as an empty list.
pub(crate) fn string_list_field(
    record: &Record,
    key: &str,
    err: FieldError,
) -> CatalogResult<Vec<String>> {
    match require(record, key, err)? {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(err(format!("Field \"{}\" must be a list of strings", key))),
            })
            .collect(),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        _ => Err(err(format!("Field \"{}\" must be a list of strings", key))),
    }
}
