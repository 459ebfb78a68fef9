//! Tests for catalog loading

use std::io::Write;

use tempfile::NamedTempFile;

use super::*;
use crate::picker::ItemId;

#[test]
fn test_parse_all_sections() {
    let catalog = Catalog::parse(
        r#"{
            "people": [{"idpers": 1, "prenom": "Alice", "nom": "Martin"}],
            "themes": [{"id": 10, "label": "Energy"}],
            "structures": [{"ID": "20", "LABEL": "Hydrology lab"}]
        }"#,
    )
    .unwrap();

    assert_eq!(catalog.people, vec![Item::new(1, "Alice Martin")]);
    assert_eq!(catalog.themes[0].label, "Energy");
    assert_eq!(catalog.structures[0].id, ItemId(20));
}

#[test]
fn test_missing_sections_are_empty() {
    let catalog = Catalog::parse(r#"{"themes": [{"id": 1, "label": "Water"}]}"#).unwrap();

    assert!(catalog.people.is_empty());
    assert!(catalog.structures.is_empty());
    assert_eq!(catalog.themes.len(), 1);
}

#[test]
fn test_invalid_json_is_invalid_catalog() {
    let result = Catalog::parse("[1, 2");

    assert!(matches!(result, Err(PosipickError::InvalidCatalog(_))));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"structures": [{{"id": 5, "label": "Geology"}}]}}"#).unwrap();

    let catalog = Catalog::load(file.path()).unwrap();

    assert_eq!(catalog.structures, vec![Item::new(5, "Geology")]);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let result = Catalog::load(Path::new("/nonexistent/posipick/catalog.json"));

    assert!(matches!(result, Err(PosipickError::Io(_))));
}
