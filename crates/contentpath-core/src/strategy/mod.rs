//! Resolution strategies, one per provider family or handle scheme
//!
//! Each strategy is a stateless function. It reads only the handle, the host
//! [`PlatformCapabilities`](crate::platform::PlatformCapabilities) and, where
//! needed, a [`RecordLookup`](crate::records::RecordLookup).

use serde::{Deserialize, Serialize};

pub mod content;
pub mod downloads;
pub mod external;
pub mod file;
pub mod media;

/// Which branch produced a resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    ExternalStorageDocument,
    DownloadsDocument,
    MediaDocument,
    ContentQuery,
    RemoteReference,
    FileReference,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::ExternalStorageDocument => write!(f, "external-storage-document"),
            Strategy::DownloadsDocument => write!(f, "downloads-document"),
            Strategy::MediaDocument => write!(f, "media-document"),
            Strategy::ContentQuery => write!(f, "content-query"),
            Strategy::RemoteReference => write!(f, "remote-reference"),
            Strategy::FileReference => write!(f, "file-reference"),
        }
    }
}
