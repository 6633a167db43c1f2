use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::domain::entities::{CatalogEntity, Movie, User};
use crate::serialization::{self, ExportFormat};
use crate::shared::errors::{CatalogError, CatalogResult};

/// In-memory keyed entity collection. Mutation goes through
/// `add`/`update`/`delete` only, and a failed operation leaves the store
/// untouched. The backing `BTreeMap` keeps exports deterministic.
///
/// Not thread-safe: the catalog is single-threaded by design.
#[derive(Debug)]
pub struct EntityStore<T: CatalogEntity> {
    entries: BTreeMap<i32, T>,
}

impl<T: CatalogEntity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type CinemaDatabase = EntityStore<Movie>;
pub type UsersDatabase = EntityStore<User>;

impl<T: CatalogEntity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn add(&mut self, entity: T) -> CatalogResult<()> {
        let id = entity.id();
        if self.entries.contains_key(&id) {
            return Err(CatalogError::DuplicateKey { id });
        }
        debug!("{} store: adding id {}", T::KIND, id);
        self.entries.insert(id, entity);
        Ok(())
    }

    pub fn get(&self, id: i32) -> CatalogResult<&T> {
        self.entries
            .get(&id)
            .ok_or(CatalogError::NotFound { id })
    }

    /// Replaces the entry at `id`. The replacement must carry the same id as
    /// the key it lands on; key reassignment through update is rejected.
    pub fn update(&mut self, id: i32, entity: T) -> CatalogResult<()> {
        if !self.entries.contains_key(&id) {
            return Err(CatalogError::NotFound { id });
        }
        if entity.id() != id {
            return Err(CatalogError::IdMismatch {
                key: id,
                id: entity.id(),
            });
        }
        debug!("{} store: replacing id {}", T::KIND, id);
        self.entries.insert(id, entity);
        Ok(())
    }

    pub fn delete(&mut self, id: i32) -> CatalogResult<()> {
        if self.entries.remove(&id).is_none() {
            return Err(CatalogError::NotFound { id });
        }
        debug!("{} store: deleted id {}", T::KIND, id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &T)> {
        self.entries.iter().map(|(id, entity)| (*id, entity))
    }

    /// Serializes the whole store to `path`, suffixing the format extension
    /// when missing and truncating any pre-existing file. Returns the path
    /// actually written.
    pub fn export_to_file(
        &self,
        format: ExportFormat,
        path: impl AsRef<Path>,
    ) -> CatalogResult<PathBuf> {
        let document = match format {
            ExportFormat::Json => serialization::json::to_document(self)?,
            ExportFormat::Xml => serialization::xml::to_document(self)?,
        };
        let written = serialization::file::write_document(path.as_ref(), format, &document)?;
        info!(
            "{} store: exported {} entries to {}",
            T::KIND,
            self.len(),
            written.display()
        );
        Ok(written)
    }

    /// Reads a document from `path` and inserts every reconstructed entity
    /// via `add`, so a duplicate id in the document (or one already present
    /// in the store) fails with `DuplicateKey`. Returns the number of
    /// entities imported.
    pub fn import_from_file(
        &mut self,
        format: ExportFormat,
        path: impl AsRef<Path>,
    ) -> CatalogResult<usize> {
        let document = serialization::file::read_document(path.as_ref(), format)?;
        let imported = match format {
            ExportFormat::Json => serialization::json::from_document(&document, self)?,
            ExportFormat::Xml => serialization::xml::from_document(&document, self)?,
        };
        info!(
            "{} store: imported {} entries from {}",
            T::KIND,
            imported,
            path.as_ref().display()
        );
        Ok(imported)
    }
}
