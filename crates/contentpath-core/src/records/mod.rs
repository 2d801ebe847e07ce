//! Record query capability
//!
//! The resolver's only I/O goes through [`RecordSource`]: a query names a
//! target handle, the columns it wants and an optional filter, and gets back a
//! cursor over matching rows. Cursors are always wrapped in a [`CursorGuard`],
//! which closes them when it goes out of scope.
//!
//! Two stores ship with the crate:
//! - [`memory::InMemoryRecords`]: fixtures and tests, with query logging
//! - [`sqlite::SqliteRecords`]: SQLite-backed persistent store

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

use crate::error::{LookupError, UriError};
use crate::uri::ContentUri;

pub mod collection;
pub mod lookup;
pub mod memory;
pub mod selection;
pub mod sqlite;

pub use collection::RecordCollection;
pub use lookup::RecordLookup;
pub use selection::Selection;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Data,
    DisplayName,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "_id",
            Column::Data => "_data",
            Column::DisplayName => "_display_name",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "_id" => Some(Column::Id),
            "_data" => Some(Column::Data),
            "_display_name" => Some(Column::DisplayName),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub target: ContentUri,
    pub projection: Vec<Column>,
    pub selection: Option<Selection>,
}

impl RecordQuery {
    pub fn new(target: ContentUri, projection: Vec<Column>, selection: Option<Selection>) -> Self {
        Self {
            target,
            projection,
            selection,
        }
    }
}

/// Store key for a target handle
pub(crate) fn target_key(target: &str) -> &str {
    target.trim_end_matches('/')
}

/// Key a stored row under the same text a query for `target` will carry
pub(crate) fn store_key(target: &str) -> Result<String, UriError> {
    let uri = ContentUri::parse(target)?;
    Ok(target_key(uri.as_str()).to_string())
}

/// Split `<collection>/<id>` into the collection key and row id
pub(crate) fn split_row_target(target: &ContentUri) -> Option<(String, u64)> {
    let id = target.last_path_segment()?.parse().ok()?;
    let parent = target.parent()?;
    Some((target_key(parent.as_str()).to_string(), id))
}

/// A single row of a record collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "_data", default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(rename = "_display_name", default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Record {
    pub fn new(id: u64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn get(&self, column: Column) -> Option<String> {
        match column {
            Column::Id => self.id.map(|id| id.to_string()),
            Column::Data => self.data.clone(),
            Column::DisplayName => self.display_name.clone(),
        }
    }

    /// Whether every predicate holds for this row
    pub fn matches(&self, predicates: &[(Column, String)]) -> bool {
        predicates
            .iter()
            .all(|(column, expected)| self.get(*column).as_deref() == Some(expected.as_str()))
    }
}

/// The `queryRecords` capability supplied by the host
pub trait RecordSource {
    /// Run a query. `Ok(None)` means the provider handed back no cursor.
    fn query<'a>(
        &'a self,
        query: &RecordQuery,
    ) -> Result<Option<Box<dyn RecordCursor + 'a>>, LookupError>;
}

impl<S: RecordSource + ?Sized> RecordSource for &S {
    fn query<'a>(
        &'a self,
        query: &RecordQuery,
    ) -> Result<Option<Box<dyn RecordCursor + 'a>>, LookupError> {
        (**self).query(query)
    }
}

pub trait RecordCursor {
    /// Position on the first row; false when there are no rows
    fn move_to_first(&mut self) -> bool;

    /// Value of a projected column in the current row
    fn get_string(&self, column: Column) -> Result<Option<String>, LookupError>;

    /// Release the cursor. Must tolerate being called more than once.
    fn close(&mut self);
}

/// Closes the wrapped cursor when dropped
pub struct CursorGuard<'a> {
    cursor: Box<dyn RecordCursor + 'a>,
}

impl<'a> CursorGuard<'a> {
    pub fn new(cursor: Box<dyn RecordCursor + 'a>) -> Self {
        Self { cursor }
    }
}

impl<'a> std::ops::Deref for CursorGuard<'a> {
    type Target = dyn RecordCursor + 'a;

    fn deref(&self) -> &Self::Target {
        self.cursor.as_ref()
    }
}

impl<'a> std::ops::DerefMut for CursorGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cursor.as_mut()
    }
}

impl Drop for CursorGuard<'_> {
    fn drop(&mut self) {
        self.cursor.close();
    }
}

/// Cursor over rows already materialised by a store
pub struct RowSetCursor {
    rows: Vec<Record>,
    projection: Vec<Column>,
    position: Option<usize>,
    open: Option<Rc<Cell<usize>>>,
}

impl RowSetCursor {
    pub fn new(rows: Vec<Record>, projection: Vec<Column>) -> Self {
        Self {
            rows,
            projection,
            position: None,
            open: None,
        }
    }

    /// Track this cursor in a shared open-cursor counter until it is closed
    pub(crate) fn tracked(mut self, open: Rc<Cell<usize>>) -> Self {
        open.set(open.get() + 1);
        self.open = Some(open);
        self
    }
}

impl RecordCursor for RowSetCursor {
    fn move_to_first(&mut self) -> bool {
        self.position = (!self.rows.is_empty()).then_some(0);
        self.position.is_some()
    }

    fn get_string(&self, column: Column) -> Result<Option<String>, LookupError> {
        if !self.projection.contains(&column) {
            return Err(LookupError::MissingColumn(column.name()));
        }
        Ok(self
            .position
            .and_then(|index| self.rows.get(index))
            .and_then(|row| row.get(column)))
    }

    fn close(&mut self) {
        if let Some(open) = self.open.take() {
            open.set(open.get().saturating_sub(1));
        }
        self.rows.clear();
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_matches() {
        let record = Record::new(42).with_data("/sdcard/img.jpg");
        assert!(record.matches(&[(Column::Id, "42".to_string())]));
        assert!(!record.matches(&[(Column::Id, "43".to_string())]));
        assert!(!record.matches(&[(Column::DisplayName, "img.jpg".to_string())]));
        assert!(record.matches(&[]));
    }

    #[test]
    fn test_cursor_projection() {
        let mut cursor = RowSetCursor::new(
            vec![Record::new(1).with_data("/a"), Record::new(2).with_data("/b")],
            vec![Column::Data],
        );
        assert!(cursor.move_to_first());
        assert_eq!(cursor.get_string(Column::Data).unwrap().as_deref(), Some("/a"));
        assert!(matches!(
            cursor.get_string(Column::DisplayName),
            Err(LookupError::MissingColumn("_display_name"))
        ));
    }

    #[test]
    fn test_store_key_matches_query_target() {
        let query_target = ContentUri::parse("content://com.example.provider/My Files/1").unwrap();
        assert_eq!(
            store_key("content://com.example.provider/My Files/1/").unwrap(),
            target_key(query_target.as_str())
        );
        assert_eq!(
            store_key("CONTENT://media/external/images/media").unwrap(),
            "content://media/external/images/media"
        );
        assert!(store_key("not a handle").is_err());
    }

    #[test]
    fn test_guard_closes_on_drop() {
        let open = Rc::new(Cell::new(0));
        {
            let cursor = RowSetCursor::new(vec![], vec![Column::Data]).tracked(open.clone());
            let mut guard = CursorGuard::new(Box::new(cursor));
            assert_eq!(open.get(), 1);
            assert!(!guard.move_to_first());
        }
        assert_eq!(open.get(), 0);
    }
}
