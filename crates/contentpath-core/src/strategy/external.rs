/// External storage documents: `primary:<relative>` or `<volume>:<relative>`
use crate::document::DocumentId;
use crate::platform::PlatformCapabilities;
use crate::strategy::Strategy;
use crate::Resolution;

pub const PRIMARY_VOLUME: &str = "primary";

/// Synthesize a path on the matching volume. Nothing is checked on disk.
pub fn resolve<P: PlatformCapabilities + ?Sized>(platform: &P, document_id: &DocumentId) -> Resolution {
    let path = if document_id.tag().eq_ignore_ascii_case(PRIMARY_VOLUME) {
        match document_id.value() {
            Some(relative) => format!("{}/{}", platform.external_storage_root(), relative),
            None => platform.external_storage_root().to_string(),
        }
    } else {
        format!(
            "{}/{}",
            platform.secondary_storage_prefix(),
            document_id.raw().replace(':', "/")
        )
    };

    Resolution::local(path, Strategy::ExternalStorageDocument)
}
