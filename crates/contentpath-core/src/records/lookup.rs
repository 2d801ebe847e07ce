/// Record Lookup: one string field from the first matching row
use crate::error::LookupError;
use crate::uri::ContentUri;

use super::{Column, CursorGuard, RecordQuery, RecordSource, Selection};

/// Adapter turning a [`RecordSource`] query into a single optional field value.
///
/// Lookup failures are logged and reported as absent; callers cannot tell
/// "no record" from "query failed".
pub struct RecordLookup<'s, S: RecordSource + ?Sized> {
    source: &'s S,
}

impl<'s, S: RecordSource + ?Sized> RecordLookup<'s, S> {
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    /// `_data` of the first row matching `selection` in `target`
    pub fn data_path(&self, target: &ContentUri, selection: Option<&Selection>) -> Option<String> {
        self.field(target, Column::Data, selection)
    }

    /// `_display_name` of the first row in `target`
    pub fn display_name(&self, target: &ContentUri) -> Option<String> {
        self.field(target, Column::DisplayName, None)
    }

    fn field(
        &self,
        target: &ContentUri,
        column: Column,
        selection: Option<&Selection>,
    ) -> Option<String> {
        match self.first_string(target, column, selection) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Lookup of {} in {} failed: {}", column.name(), target, e);
                None
            }
        }
    }

    fn first_string(
        &self,
        target: &ContentUri,
        column: Column,
        selection: Option<&Selection>,
    ) -> Result<Option<String>, LookupError> {
        let query = RecordQuery::new(target.clone(), vec![column], selection.cloned());

        let Some(cursor) = self.source.query(&query)? else {
            return Ok(None);
        };
        let mut cursor = CursorGuard::new(cursor);

        if !cursor.move_to_first() {
            return Ok(None);
        }
        cursor.get_string(column)
    }
}
