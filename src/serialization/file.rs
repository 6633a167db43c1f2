//! Scoped file access for export/import. The handle lives for a single call
//! and is closed on every exit path by drop.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::ExportFormat;
use crate::shared::errors::{CatalogError, CatalogResult};

/// Appends the format extension unless the filename already ends with it
/// (case-insensitive). A foreign extension is kept, not replaced, so
/// `movies.txt` exported as XML lands in `movies.txt.xml`. An empty filename
/// is rejected outright.
pub fn resolve_path(path: &Path, format: ExportFormat) -> CatalogResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(CatalogError::File("Filename cannot be empty".to_string()));
    }
    let matches_format = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(format.extension()));
    if matches_format {
        Ok(path.to_path_buf())
    } else {
        let mut name = path.as_os_str().to_os_string();
        name.push(format!(".{}", format.extension()));
        Ok(PathBuf::from(name))
    }
}

/// Writes a rendered document, truncating any pre-existing file. Returns the
/// path actually written.
pub fn write_document(path: &Path, format: ExportFormat, document: &str) -> CatalogResult<PathBuf> {
    let path = resolve_path(path, format)?;
    let mut writer = BufWriter::new(File::create(&path)?);
    writer.write_all(document.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(path)
}

pub fn read_document(path: &Path, format: ExportFormat) -> CatalogResult<String> {
    let path = resolve_path(path, format)?;
    let mut document = String::new();
    BufReader::new(File::open(&path)?).read_to_string(&mut document)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_suffixes_extension() {
        assert_eq!(
            resolve_path(Path::new("movies"), ExportFormat::Json).unwrap(),
            PathBuf::from("movies.json")
        );
        assert_eq!(
            resolve_path(Path::new("movies.json"), ExportFormat::Json).unwrap(),
            PathBuf::from("movies.json")
        );
        // A foreign extension is kept and suffixed, not replaced.
        assert_eq!(
            resolve_path(Path::new("movies.txt"), ExportFormat::Xml).unwrap(),
            PathBuf::from("movies.txt.xml")
        );
    }

    #[test]
    fn test_empty_filename_is_rejected() {
        let err = resolve_path(Path::new(""), ExportFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::File(_)));
    }

    #[test]
    fn test_missing_file_on_read_is_a_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent");
        let err = read_document(&path, ExportFormat::Json).unwrap_err();
        assert!(matches!(err, CatalogError::File(_)));
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out");

        let first = write_document(&path, ExportFormat::Json, "{\"a\": 1}").unwrap();
        let second = write_document(&path, ExportFormat::Json, "{}").unwrap();
        assert_eq!(first, second);

        let content = read_document(&path, ExportFormat::Json).unwrap();
        assert_eq!(content, "{}\n");
    }
}
