//! JSON document rendering and parsing.
//!
//! The document is a single object mapping `"ID:<id>"` labels to entity
//! records, indented with four spaces.

use log::warn;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::domain::entities::CatalogEntity;
use crate::shared::errors::{CatalogError, CatalogResult};
use crate::storage::EntityStore;

pub fn to_document<T: CatalogEntity>(store: &EntityStore<T>) -> CatalogResult<String> {
    let mut root = serde_json::Map::new();
    for (id, entity) in store.iter() {
        root.insert(format!("ID:{}", id), Value::Object(entity.encode()));
    }

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    Value::Object(root).serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|err| CatalogError::IoDatabase(err.to_string()))
}

/// Reconstructs entities from a document and inserts them via `add`.
/// Entries that do not describe the store's entity kind are skipped;
/// recognized but malformed entries fail the whole import.
pub fn from_document<T: CatalogEntity>(
    document: &str,
    store: &mut EntityStore<T>,
) -> CatalogResult<usize> {
    let root: Value = serde_json::from_str(document)?;
    let Value::Object(entries) = root else {
        return Err(CatalogError::IoDatabase(
            "JSON document root must be an object".to_string(),
        ));
    };

    let mut imported = 0;
    for (label, value) in entries {
        let Value::Object(record) = value else {
            warn!("skipping entry {}: not a record", label);
            continue;
        };
        if !T::recognizes(&record) {
            warn!("skipping entry {}: not a {} record", label, T::KIND);
            continue;
        }
        store.add(T::decode(&record)?)?;
        imported += 1;
    }
    Ok(imported)
}
