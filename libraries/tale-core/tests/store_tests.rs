//! Profile catalog loading from disk

use std::io::Write;
use tale_core::{CoreError, InMemoryProfileStore, ProfileId, ProfileStore};
use tempfile::NamedTempFile;

const CATALOG: &str = r#"[
    {"id": 0, "name": "Shiori", "audio": "/stories/shiori.ogg", "artwork": "art/shiori.png"},
    {"id": 1, "name": "Mio", "audio": "/stories/mio.ogg"}
]"#;

#[test]
fn load_catalog_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let store = InMemoryProfileStore::load(file.path()).unwrap();
    assert_eq!(store.len(), 2);

    let shiori = store.lookup(ProfileId::new(0)).unwrap();
    assert_eq!(shiori.name, "Shiori");
    assert_eq!(shiori.artwork.unwrap().as_str(), "art/shiori.png");

    let mio = store.lookup(ProfileId::new(1)).unwrap();
    assert!(mio.artwork.is_none());
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = InMemoryProfileStore::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn duplicate_entries_in_file_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"[{"id": 5, "name": "A", "audio": "a.ogg"}, {"id": 5, "name": "B", "audio": "b.ogg"}]"#,
    )
    .unwrap();

    let result = InMemoryProfileStore::load(file.path());
    assert!(matches!(result, Err(CoreError::DuplicateProfile(id)) if id == ProfileId::new(5)));
}

#[test]
fn empty_catalog_is_valid() {
    let store = InMemoryProfileStore::from_json_str("[]").unwrap();
    assert!(store.is_empty());
    assert!(store.lookup(ProfileId::new(0)).is_none());
}
