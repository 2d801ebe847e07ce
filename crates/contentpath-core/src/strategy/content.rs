/// Generic `content://` handles that are not recognised documents
use crate::error::{ResolveError, Result};
use crate::provider::ProviderFamily;
use crate::records::{RecordLookup, RecordSource};
use crate::strategy::Strategy;
use crate::uri::ContentUri;
use crate::Resolution;

/// Remote-only photo handles yield their last segment as an opaque reference;
/// everything else is an unfiltered `_data` lookup on the handle itself.
pub fn resolve<S: RecordSource + ?Sized>(
    lookup: &RecordLookup<'_, S>,
    uri: &ContentUri,
) -> Result<Resolution> {
    if ProviderFamily::of(uri.authority()) == ProviderFamily::GooglePhotosRemote {
        let reference = uri
            .last_path_segment()
            .ok_or_else(|| ResolveError::NotFound(uri.to_string()))?;
        return Ok(Resolution::remote(reference));
    }

    let path = lookup
        .data_path(uri, None)
        .ok_or_else(|| ResolveError::NotFound(uri.to_string()))?;
    Ok(Resolution::local(path, Strategy::ContentQuery))
}
