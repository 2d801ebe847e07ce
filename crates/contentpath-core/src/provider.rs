/// Provider family classification by handle authority
use serde::{Deserialize, Serialize};

pub const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";
pub const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
pub const MEDIA_AUTHORITY: &str = "com.android.providers.media.documents";
pub const GOOGLE_PHOTOS_AUTHORITY: &str = "com.google.android.apps.photos.content";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderFamily {
    ExternalStorage,
    Downloads,
    Media,
    GooglePhotosRemote,
    Unrecognized,
}

impl ProviderFamily {
    /// Classify an authority string. Unknown authorities are not an error.
    pub fn classify(authority: &str) -> Self {
        match authority {
            EXTERNAL_STORAGE_AUTHORITY => ProviderFamily::ExternalStorage,
            DOWNLOADS_AUTHORITY => ProviderFamily::Downloads,
            MEDIA_AUTHORITY => ProviderFamily::Media,
            GOOGLE_PHOTOS_AUTHORITY => ProviderFamily::GooglePhotosRemote,
            _ => ProviderFamily::Unrecognized,
        }
    }

    /// Classify an optional authority; a missing authority is unrecognized
    pub fn of(authority: Option<&str>) -> Self {
        authority.map_or(ProviderFamily::Unrecognized, Self::classify)
    }
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderFamily::ExternalStorage => write!(f, "external-storage"),
            ProviderFamily::Downloads => write!(f, "downloads"),
            ProviderFamily::Media => write!(f, "media"),
            ProviderFamily::GooglePhotosRemote => write!(f, "google-photos-remote"),
            ProviderFamily::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_authorities() {
        assert_eq!(
            ProviderFamily::classify("com.android.externalstorage.documents"),
            ProviderFamily::ExternalStorage
        );
        assert_eq!(
            ProviderFamily::classify("com.android.providers.downloads.documents"),
            ProviderFamily::Downloads
        );
        assert_eq!(
            ProviderFamily::classify("com.android.providers.media.documents"),
            ProviderFamily::Media
        );
        assert_eq!(
            ProviderFamily::classify("com.google.android.apps.photos.content"),
            ProviderFamily::GooglePhotosRemote
        );
    }

    #[test]
    fn test_classify_is_exact_match() {
        assert_eq!(ProviderFamily::classify("media"), ProviderFamily::Unrecognized);
        assert_eq!(
            ProviderFamily::classify("COM.ANDROID.PROVIDERS.MEDIA.DOCUMENTS"),
            ProviderFamily::Unrecognized
        );
        assert_eq!(ProviderFamily::of(None), ProviderFamily::Unrecognized);
    }
}
