/// In-memory record store for fixtures and tests
use anyhow::{Context, Result};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use crate::error::LookupError;

use super::{
    split_row_target, store_key, target_key, Record, RecordCursor, RecordQuery, RecordSource,
    RowSetCursor,
};

/// Rows keyed by target handle, in insertion order.
///
/// Every query is logged and every cursor is counted until closed, so tests
/// can check which lookups ran and that nothing leaked.
#[derive(Debug, Default)]
pub struct InMemoryRecords {
    rows: RefCell<BTreeMap<String, Vec<Record>>>,
    queries: RefCell<Vec<RecordQuery>>,
    open: Rc<Cell<usize>>,
    unavailable: Cell<bool>,
}

impl InMemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON fixture: `{ "<target>": [ { "_id": 1, "_data": "..." } ] }`
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: BTreeMap<String, Vec<Record>> =
            serde_json::from_str(json).context("Failed to parse record fixture")?;

        let store = Self::new();
        for (target, records) in rows {
            let key = store_key(&target).context(format!("Invalid fixture target '{}'", target))?;
            for record in records {
                store.insert_keyed(key.clone(), record);
            }
        }
        Ok(store)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .context(format!("Failed to read record fixture {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Add a row under `target`. A target that does not parse as a handle is
    /// kept verbatim; no query can reach it.
    pub fn insert(&self, target: &str, record: Record) {
        let key = store_key(target).unwrap_or_else(|e| {
            tracing::warn!("Storing row under unparseable target: {}", e);
            target_key(target).to_string()
        });
        self.insert_keyed(key, record);
    }

    fn insert_keyed(&self, key: String, record: Record) {
        self.rows.borrow_mut().entry(key).or_default().push(record);
    }

    /// All rows as `(target, record)` pairs
    pub fn entries(&self) -> Vec<(String, Record)> {
        self.rows
            .borrow()
            .iter()
            .flat_map(|(target, records)| {
                records
                    .iter()
                    .map(move |record| (target.clone(), record.clone()))
            })
            .collect()
    }

    /// Make every subsequent query fail as if the provider were gone
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn queries(&self) -> Vec<RecordQuery> {
        self.queries.borrow().clone()
    }

    pub fn open_cursors(&self) -> usize {
        self.open.get()
    }

    fn matching_rows(&self, query: &RecordQuery) -> Result<Vec<Record>, LookupError> {
        let predicates = match &query.selection {
            Some(selection) => selection.predicates()?,
            None => Vec::new(),
        };

        let rows = self.rows.borrow();
        let key = target_key(query.target.as_str());

        let candidates: Vec<&Record> = match rows.get(key) {
            Some(records) => records.iter().collect(),
            None => match split_row_target(&query.target) {
                Some((collection, id)) => rows
                    .get(&collection)
                    .map(|records| records.iter().filter(|r| r.id == Some(id)).collect())
                    .unwrap_or_default(),
                None => Vec::new(),
            },
        };

        Ok(candidates
            .into_iter()
            .filter(|record| record.matches(&predicates))
            .cloned()
            .collect())
    }
}

impl RecordSource for InMemoryRecords {
    fn query<'a>(
        &'a self,
        query: &RecordQuery,
    ) -> Result<Option<Box<dyn RecordCursor + 'a>>, LookupError> {
        self.queries.borrow_mut().push(query.clone());

        if self.unavailable.get() {
            return Err(LookupError::Unavailable(query.target.to_string()));
        }

        let rows = self.matching_rows(query)?;
        let cursor = RowSetCursor::new(rows, query.projection.clone()).tracked(self.open.clone());
        Ok(Some(Box::new(cursor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Column, RecordCollection, Selection};
    use crate::uri::ContentUri;

    #[test]
    fn test_row_target_resolves_into_collection() {
        let records = InMemoryRecords::new();
        records.insert(
            RecordCollection::PublicDownloads.base_uri(),
            Record::new(17).with_data("/storage/emulated/0/Download/a.zip"),
        );

        let query = RecordQuery::new(
            RecordCollection::PublicDownloads.row(17),
            vec![Column::Data],
            None,
        );
        let mut cursor = records.query(&query).unwrap().unwrap();
        assert!(cursor.move_to_first());
        assert_eq!(
            cursor.get_string(Column::Data).unwrap().as_deref(),
            Some("/storage/emulated/0/Download/a.zip")
        );
        cursor.close();
        assert_eq!(records.open_cursors(), 0);
    }

    #[test]
    fn test_queries_are_logged() {
        let records = InMemoryRecords::new();
        let target = ContentUri::parse("content://example/none").unwrap();
        let query = RecordQuery::new(target, vec![Column::Data], Some(Selection::by_id("1")));

        let cursor = records.query(&query).unwrap();
        drop(cursor);

        assert_eq!(records.queries(), vec![query]);
    }

    #[test]
    fn test_from_json_fixture() {
        let records = InMemoryRecords::from_json(
            r#"{
                "content://media/external/images/media": [
                    { "_id": 42, "_data": "/sdcard/img.jpg" }
                ],
                "content://com.example/doc/1/": [
                    { "_display_name": "report.pdf" }
                ]
            }"#,
        )
        .unwrap();

        let entries = records.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries
            .iter()
            .any(|(target, record)| target == "content://com.example/doc/1"
                && record.display_name.as_deref() == Some("report.pdf")));
    }

    #[test]
    fn test_fixture_key_with_space_is_reachable() {
        let records = InMemoryRecords::from_json(
            r#"{ "content://com.example.provider/My Files/1": [ { "_data": "/x" } ] }"#,
        )
        .unwrap();

        let target = ContentUri::parse("content://com.example.provider/My Files/1").unwrap();
        let query = RecordQuery::new(target, vec![Column::Data], None);
        let mut cursor = records.query(&query).unwrap().unwrap();
        assert!(cursor.move_to_first());
        assert_eq!(cursor.get_string(Column::Data).unwrap().as_deref(), Some("/x"));
        cursor.close();
    }

    #[test]
    fn test_uppercase_scheme_target_is_normalised() {
        let records = InMemoryRecords::new();
        records.insert("CONTENT://com.example/items", Record::new(1).with_data("/a"));
        assert_eq!(records.entries()[0].0, "content://com.example/items");
    }

    #[test]
    fn test_fixture_rejects_unparseable_target() {
        let result = InMemoryRecords::from_json(r#"{ "not a handle": [ { "_data": "/x" } ] }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unavailable() {
        let records = InMemoryRecords::new();
        records.set_unavailable(true);
        let query = RecordQuery::new(
            RecordCollection::Images.uri(),
            vec![Column::Data],
            None,
        );
        assert!(matches!(records.query(&query), Err(LookupError::Unavailable(_))));
    }
}
