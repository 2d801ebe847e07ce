/// Media documents: `<image|video|audio>:<row id>`
use crate::document::DocumentId;
use crate::error::{ResolveError, Result};
use crate::records::{RecordCollection, RecordLookup, RecordSource, Selection};
use crate::strategy::Strategy;
use crate::Resolution;

pub fn resolve<S: RecordSource + ?Sized>(
    lookup: &RecordLookup<'_, S>,
    document_id: &DocumentId,
) -> Result<Resolution> {
    let row_id = document_id.require_value()?;

    // An unknown kind has no collection to query
    let collection = RecordCollection::for_media_kind(document_id.tag())
        .ok_or_else(|| ResolveError::UnknownMediaKind(document_id.tag().to_string()))?;

    let target = collection.uri();
    let path = lookup
        .data_path(&target, Some(&Selection::by_id(row_id)))
        .ok_or_else(|| ResolveError::NotFound(format!("{} row {}", target, row_id)))?;

    Ok(Resolution::local(path, Strategy::MediaDocument))
}
