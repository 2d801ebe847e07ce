//! Resolution against a persistent SQLite record store

use contentpath_core::{
    ContentUri, HostPlatform, InMemoryRecords, PathResolver, Record, RecordCollection,
    SqliteRecords,
};
use tempfile::TempDir;

const FIXTURE: &str = r#"{
    "content://media/external/images/media": [
        { "_id": 42, "_data": "/storage/emulated/0/DCIM/img.jpg" }
    ],
    "content://downloads/public_downloads": [
        { "_id": 17, "_data": "/storage/emulated/0/Download/a.zip" }
    ],
    "content://com.android.providers.downloads.documents/document/99": [
        { "_display_name": "invoice.pdf" }
    ]
}"#;

#[test]
fn test_resolution_from_imported_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("records.db");

    {
        let store = SqliteRecords::open(&db_path).unwrap();
        let fixture = InMemoryRecords::from_json(FIXTURE).unwrap();
        assert_eq!(store.import(&fixture).unwrap(), 3);
    }

    // Reopen to read back what was persisted
    let store = SqliteRecords::open(&db_path).unwrap();
    assert_eq!(store.count().unwrap(), 3);
    let resolver = PathResolver::new(HostPlatform::default(), store);

    let cases = [
        (
            "content://com.android.providers.media.documents/document/image%3A42",
            Some("/storage/emulated/0/DCIM/img.jpg"),
        ),
        (
            "content://com.android.providers.downloads.documents/document/17",
            Some("/storage/emulated/0/Download/a.zip"),
        ),
        (
            "content://com.android.providers.downloads.documents/document/99",
            Some("/storage/emulated/0/Download/invoice.pdf"),
        ),
        ("content://media/external/images/media/42", Some("/storage/emulated/0/DCIM/img.jpg")),
        ("content://media/external/images/media/43", None),
    ];

    for (handle, expected) in cases {
        let handle = ContentUri::parse(handle).unwrap();
        assert_eq!(resolver.resolve_path(&handle).as_deref(), expected, "{}", handle);
    }
}

#[test]
fn test_first_inserted_row_wins() {
    let store = SqliteRecords::open_in_memory().unwrap();
    let target = "content://com.example.provider/items/3";
    store.insert(target, &Record::default().with_data("/first")).unwrap();
    store.insert(target, &Record::default().with_data("/second")).unwrap();

    let resolver = PathResolver::new(HostPlatform::default(), &store);
    let handle = ContentUri::parse(target).unwrap();
    assert_eq!(resolver.resolve_path(&handle).as_deref(), Some("/first"));
}

#[test]
fn test_media_kind_selects_collection() {
    let store = SqliteRecords::open_in_memory().unwrap();
    store
        .insert(RecordCollection::Images.base_uri(), &Record::new(1).with_data("/img/1.jpg"))
        .unwrap();
    store
        .insert(RecordCollection::Audio.base_uri(), &Record::new(1).with_data("/audio/1.mp3"))
        .unwrap();

    let resolver = PathResolver::new(HostPlatform::default(), &store);
    let audio =
        ContentUri::parse("content://com.android.providers.media.documents/document/audio%3A1")
            .unwrap();
    assert_eq!(resolver.resolve_path(&audio).as_deref(), Some("/audio/1.mp3"));
}
