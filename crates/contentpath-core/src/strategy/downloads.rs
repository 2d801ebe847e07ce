//! Downloads documents
//!
//! Three attempts, first success wins:
//! 1. the handle's display name under the public `Download` folder
//! 2. a `raw:<path>` identifier naming an existing file
//! 3. the `_data` of the matching public downloads row

use std::path::Path;

use crate::document::DocumentId;
use crate::error::{ResolveError, Result};
use crate::platform::PlatformCapabilities;
use crate::records::{RecordCollection, RecordLookup, RecordSource};
use crate::strategy::Strategy;
use crate::uri::ContentUri;
use crate::Resolution;

pub const RAW_PREFIX: &str = "raw:";
pub const DOWNLOAD_FOLDER: &str = "Download";

pub fn resolve<P, S>(
    platform: &P,
    lookup: &RecordLookup<'_, S>,
    uri: &ContentUri,
    document_id: &str,
) -> Result<Resolution>
where
    P: PlatformCapabilities + ?Sized,
    S: RecordSource + ?Sized,
{
    if let Some(name) = lookup.display_name(uri).filter(|name| !name.is_empty()) {
        let path = format!("{}/{}/{}", platform.downloads_directory(), DOWNLOAD_FOLDER, name);
        return Ok(Resolution::local(path, Strategy::DownloadsDocument));
    }

    if let Some(raw) = document_id.strip_prefix(RAW_PREFIX) {
        if platform.file_exists(Path::new(raw)) {
            return Ok(Resolution::local(raw, Strategy::DownloadsDocument));
        }
        tracing::debug!("Raw download path {} does not exist", raw);
    }

    let row_id = DocumentId::parse(document_id).numeric_value()?;
    let target = RecordCollection::PublicDownloads.row(row_id);
    let path = lookup
        .data_path(&target, None)
        .ok_or_else(|| ResolveError::NotFound(target.to_string()))?;

    Ok(Resolution::local(path, Strategy::DownloadsDocument))
}
