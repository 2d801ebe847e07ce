/// Fixed record collections queried by the document strategies
use crate::uri::ContentUri;

pub const IMAGES_URI: &str = "content://media/external/images/media";
pub const VIDEO_URI: &str = "content://media/external/video/media";
pub const AUDIO_URI: &str = "content://media/external/audio/media";
pub const PUBLIC_DOWNLOADS_URI: &str = "content://downloads/public_downloads";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordCollection {
    Images,
    Video,
    Audio,
    PublicDownloads,
}

impl RecordCollection {
    /// Media collection for a media document kind tag (`image`, `video`, `audio`)
    pub fn for_media_kind(kind: &str) -> Option<Self> {
        match kind {
            "image" => Some(RecordCollection::Images),
            "video" => Some(RecordCollection::Video),
            "audio" => Some(RecordCollection::Audio),
            _ => None,
        }
    }

    pub fn base_uri(&self) -> &'static str {
        match self {
            RecordCollection::Images => IMAGES_URI,
            RecordCollection::Video => VIDEO_URI,
            RecordCollection::Audio => AUDIO_URI,
            RecordCollection::PublicDownloads => PUBLIC_DOWNLOADS_URI,
        }
    }

    pub fn uri(&self) -> ContentUri {
        // The base URIs are constants known to parse
        ContentUri::parse(self.base_uri()).expect("collection base URI is valid")
    }

    /// Handle for a single row of this collection
    pub fn row(&self, id: u64) -> ContentUri {
        self.uri().with_appended_id(id)
    }
}
