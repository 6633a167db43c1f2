//! XML document rendering and parsing.
//!
//! The document carries one child of the root per entity, named
//! `ID_<kind>_<id>`, with one element per field. Sequence fields become
//! repeated `<item>` children; an empty element reads back as an empty
//! string, which entity decode accepts for empty sequences.

use log::warn;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;
use quick_xml::Writer;
use serde_json::Value;

use crate::domain::entities::{CatalogEntity, Record};
use crate::shared::errors::{CatalogError, CatalogResult};
use crate::storage::EntityStore;

const ROOT: &str = "catalog";

pub fn to_document<T: CatalogEntity>(store: &EntityStore<T>) -> CatalogResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    emit(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
    for (id, entity) in store.iter() {
        let label = format!("ID_{}_{}", T::KIND, id);
        write_record(&mut writer, &label, &entity.encode())?;
    }
    emit(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

    String::from_utf8(writer.into_inner()).map_err(|err| CatalogError::IoDatabase(err.to_string()))
}

/// Writer failures are serialization failures, not file errors.
fn emit(writer: &mut Writer<Vec<u8>>, event: Event) -> CatalogResult<()> {
    writer
        .write_event(event)
        .map_err(|err| CatalogError::IoDatabase(err.to_string()))
}

fn write_record(writer: &mut Writer<Vec<u8>>, name: &str, record: &Record) -> CatalogResult<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    for (key, value) in record {
        write_value(writer, key, value)?;
    }
    emit(writer, Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_value(writer: &mut Writer<Vec<u8>>, name: &str, value: &Value) -> CatalogResult<()> {
    match value {
        Value::Object(record) => write_record(writer, name, record),
        Value::Array(items) if items.is_empty() => {
            emit(writer, Event::Empty(BytesStart::new(name)))
        }
        Value::Array(items) => {
            emit(writer, Event::Start(BytesStart::new(name)))?;
            for item in items {
                write_value(writer, "item", item)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::String(text) if text.is_empty() => {
            emit(writer, Event::Empty(BytesStart::new(name)))
        }
        scalar => {
            let text = match scalar {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            emit(writer, Event::Start(BytesStart::new(name)))?;
            emit(writer, Event::Text(BytesText::new(&text)))?;
            emit(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

/// Parses a document back into structural records and inserts the decoded
/// entities via `add`, mirroring the JSON importer.
pub fn from_document<T: CatalogEntity>(
    document: &str,
    store: &mut EntityStore<T>,
) -> CatalogResult<usize> {
    // No text trimming: leaf text must survive exactly, padding included.
    // Indentation between elements accumulates as text that read_element
    // discards once child elements are present.
    let mut reader = Reader::from_str(document);

    loop {
        match reader.read_event()? {
            Event::Start(_) => break,
            Event::Empty(_) => return Ok(0),
            Event::Eof => {
                return Err(CatalogError::IoDatabase(
                    "XML document has no root element".to_string(),
                ))
            }
            _ => {}
        }
    }

    let mut imported = 0;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let label = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let Value::Object(record) = read_element(&mut reader)? else {
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
            Event::Empty(e) => {
                let label = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                warn!("skipping entry {}: element carries no fields", label);
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(CatalogError::IoDatabase(
                    "Unexpected end of XML document".to_string(),
                ))
            }
            _ => {}
        }
    }
    Ok(imported)
}

/// Reads the content of an already-opened element. An element with child
/// elements becomes an object (or an array when every child is an `<item>`),
/// otherwise its text content.
fn read_element(reader: &mut Reader<&[u8]>) -> CatalogResult<Value> {
    let mut children: Vec<(String, Value)> = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let value = read_element(reader)?;
                children.push((name, value));
            }
            Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                children.push((name, Value::String(String::new())));
            }
            Event::Text(t) => {
                let unescaped = t
                    .unescape()
                    .map_err(|err| CatalogError::IoDatabase(err.to_string()))?;
                text.push_str(&unescaped);
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(CatalogError::IoDatabase(
                    "Unexpected end of XML document".to_string(),
                ))
            }
            _ => {}
        }
    }

    if children.is_empty() {
        Ok(Value::String(text))
    } else if children.iter().all(|(name, _)| name == "item") {
        Ok(Value::Array(children.into_iter().map(|(_, v)| v).collect()))
    } else {
        let mut record = Record::new();
        for (name, value) in children {
            record.insert(name, value);
        }
        Ok(Value::Object(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Movie, User};
    use crate::domain::value_objects::MpaaRating;
    use crate::storage::{CinemaDatabase, UsersDatabase};

    fn sample_store() -> CinemaDatabase {
        let mut store = CinemaDatabase::new();
        store
            .add(
                Movie::new(
                    "Heat".to_string(),
                    vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
                    170,
                    1995,
                    8.5,
                    MpaaRating::R,
                    vec!["Crime".to_string()],
                    "USA".to_string(),
                    1,
                )
                .unwrap(),
            )
            .unwrap();
        store
            .add(
                Movie::new_series(
                    "The Wire".to_string(),
                    vec![],
                    60,
                    2002,
                    9.25,
                    MpaaRating::Nc17,
                    vec!["Crime".to_string(), "Drama".to_string()],
                    "USA".to_string(),
                    2,
                    5,
                    60,
                    59,
                )
                .unwrap(),
            )
            .unwrap();
        store
    }

    #[test]
    fn test_document_shape() {
        let document = to_document(&sample_store()).unwrap();

        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(document.contains("<catalog>"));
        assert!(document.contains("<ID_movie_1>"));
        assert!(document.contains("<ID_movie_2>"));
        assert!(document.contains("<name>Heat</name>"));
        assert!(document.contains("<item>Al Pacino</item>"));
        assert!(document.contains("<amount_of_seasons>5</amount_of_seasons>"));
    }

    #[test]
    fn test_empty_store_root_has_no_children() {
        let document = to_document(&CinemaDatabase::new()).unwrap();
        assert!(document.contains("<catalog>"));
        assert!(!document.contains("<ID_"));

        let mut fresh = CinemaDatabase::new();
        assert_eq!(from_document(&document, &mut fresh).unwrap(), 0);
        assert!(fresh.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let store = sample_store();
        let document = to_document(&store).unwrap();

        let mut fresh = CinemaDatabase::new();
        let imported = from_document(&document, &mut fresh).unwrap();

        assert_eq!(imported, 2);
        assert_eq!(fresh.get(1).unwrap(), store.get(1).unwrap());
        assert_eq!(fresh.get(2).unwrap(), store.get(2).unwrap());
    }

    #[test]
    fn test_empty_sequence_survives_round_trip() {
        let mut store = CinemaDatabase::new();
        store
            .add(
                Movie::new(
                    "Pi".to_string(),
                    vec![],
                    84,
                    1998,
                    7.25,
                    MpaaRating::R,
                    vec![],
                    "USA".to_string(),
                    3,
                )
                .unwrap(),
            )
            .unwrap();

        let document = to_document(&store).unwrap();
        let mut fresh = CinemaDatabase::new();
        from_document(&document, &mut fresh).unwrap();

        assert!(fresh.get(3).unwrap().genre().is_empty());
        assert!(fresh.get(3).unwrap().leading_actors().is_empty());
    }

    #[test]
    fn test_users_round_trip() {
        let mut store = UsersDatabase::new();
        store
            .add(
                User::new(
                    "alice".to_string(),
                    "hunter2".to_string(),
                    "alice@example.com".to_string(),
                    7,
                )
                .unwrap(),
            )
            .unwrap();

        let document = to_document(&store).unwrap();
        assert!(document.contains("<ID_user_7>"));

        let mut fresh = UsersDatabase::new();
        from_document(&document, &mut fresh).unwrap();
        assert_eq!(fresh.get(7).unwrap(), store.get(7).unwrap());
    }

    #[test]
    fn test_padded_text_survives_round_trip() {
        let mut store = CinemaDatabase::new();
        store
            .add(
                Movie::new(
                    "Heat ".to_string(),
                    vec![" Al Pacino".to_string()],
                    170,
                    1995,
                    8.5,
                    MpaaRating::R,
                    vec!["Crime".to_string()],
                    " USA ".to_string(),
                    1,
                )
                .unwrap(),
            )
            .unwrap();

        let document = to_document(&store).unwrap();
        let mut fresh = CinemaDatabase::new();
        from_document(&document, &mut fresh).unwrap();

        let movie = fresh.get(1).unwrap();
        assert_eq!(movie.name(), "Heat ");
        assert_eq!(movie.leading_actors(), [" Al Pacino"]);
        assert_eq!(movie.country_of_production(), " USA ");
        assert_eq!(movie, store.get(1).unwrap());
    }

    #[test]
    fn test_escaped_text_round_trip() {
        let mut store = CinemaDatabase::new();
        store
            .add(
                Movie::new(
                    "Fast & Furious".to_string(),
                    vec![],
                    107,
                    2009,
                    6.5,
                    MpaaRating::Pg13,
                    vec![],
                    "USA".to_string(),
                    4,
                )
                .unwrap(),
            )
            .unwrap();

        let document = to_document(&store).unwrap();
        assert!(document.contains("Fast &amp; Furious"));

        let mut fresh = CinemaDatabase::new();
        from_document(&document, &mut fresh).unwrap();
        assert_eq!(fresh.get(4).unwrap().name(), "Fast & Furious");
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let mut store = CinemaDatabase::new();
        assert!(matches!(
            from_document("", &mut store),
            Err(CatalogError::IoDatabase(_))
        ));
    }
}
