/// Content handles: scheme, authority and trailing path data
use percent_encoding::percent_decode_str;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use url::Url;

use crate::error::UriError;

pub const CONTENT_SCHEME: &str = "content";
pub const FILE_SCHEME: &str = "file";

/// An opaque content handle issued by a storage provider.
///
/// `url` validates the handle and supplies scheme and authority. The path is
/// always read from the handle text itself, so `.`/`..` segments and
/// percent-escapes survive exactly as the provider issued them.
#[derive(Debug, Clone)]
pub struct ContentUri {
    url: Url,
    /// Handle text with the scheme lowercased, otherwise as given
    text: String,
    path_start: usize,
    path_end: usize,
}

impl ContentUri {
    /// Parse a handle string such as `content://media/external/images/media/42`
    pub fn parse(input: &str) -> Result<Self, UriError> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|source| UriError::Parse {
            input: input.to_string(),
            source,
        })?;

        let rest = input.split_once(':').map_or("", |(_, rest)| rest);
        let text = format!("{}:{}", url.scheme(), rest);
        Ok(Self::from_text(url, text))
    }

    fn from_text(url: Url, text: String) -> Self {
        let scheme_end = url.scheme().len() + 1;
        let after_scheme = &text[scheme_end..];

        let path_start = match after_scheme.strip_prefix("//") {
            Some(hier) => scheme_end + 2 + hier.find(['/', '?', '#']).unwrap_or(hier.len()),
            None => scheme_end,
        };
        let path_end = text[path_start..]
            .find(['?', '#'])
            .map_or(text.len(), |end| path_start + end);

        Self {
            url,
            text,
            path_start,
            path_end,
        }
    }

    /// Same scheme, authority and suffix with a different raw path
    fn with_path(&self, path: &str) -> Self {
        let text = format!(
            "{}{}{}",
            &self.text[..self.path_start],
            path,
            &self.text[self.path_end..]
        );
        Self::from_text(self.url.clone(), text)
    }

    /// Lowercased scheme
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    pub fn is_content(&self) -> bool {
        self.scheme().eq_ignore_ascii_case(CONTENT_SCHEME)
    }

    pub fn is_file(&self) -> bool {
        self.scheme().eq_ignore_ascii_case(FILE_SCHEME)
    }

    /// Issuing provider identity, `None` when the handle has no host part
    pub fn authority(&self) -> Option<&str> {
        self.url.host_str().filter(|host| !host.is_empty())
    }

    /// Path exactly as it appears in the handle, escapes intact
    pub fn encoded_path(&self) -> &str {
        &self.text[self.path_start..self.path_end]
    }

    /// Percent-decoded path
    pub fn path(&self) -> String {
        decode(self.encoded_path())
    }

    /// Decoded, non-empty path segments
    pub fn path_segments(&self) -> Vec<String> {
        self.encoded_path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(decode)
            .collect()
    }

    pub fn last_path_segment(&self) -> Option<String> {
        self.path_segments().pop()
    }

    /// Append a numeric row id as a new trailing segment
    pub fn with_appended_id(&self, id: u64) -> Self {
        let base = self.encoded_path().trim_end_matches('/');
        self.with_path(&format!("{}/{}", base, id))
    }

    /// Handle with its last path segment removed
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.encoded_path().trim_end_matches('/');
        let cut = trimmed.rfind('/')?;
        Some(self.with_path(&trimmed[..cut]))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

impl PartialEq for ContentUri {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for ContentUri {}

impl Hash for ContentUri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for ContentUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_handle_facets() {
        let uri = ContentUri::parse(
            "content://com.android.providers.media.documents/document/image%3A42",
        )
        .unwrap();

        assert!(uri.is_content());
        assert_eq!(uri.authority(), Some("com.android.providers.media.documents"));
        assert_eq!(uri.path_segments(), vec!["document", "image:42"]);
        assert_eq!(uri.last_path_segment().as_deref(), Some("image:42"));
        assert_eq!(uri.encoded_path(), "/document/image%3A42");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let uri = ContentUri::parse("CONTENT://media/external/images/media/1").unwrap();
        assert!(uri.is_content());
        assert_eq!(uri.scheme(), "content");
        assert_eq!(uri.as_str(), "content://media/external/images/media/1");
    }

    #[test]
    fn test_file_handle_path_is_decoded() {
        let uri = ContentUri::parse("file:///sdcard/My%20Photos/a.jpg").unwrap();
        assert!(uri.is_file());
        assert_eq!(uri.authority(), None);
        assert_eq!(uri.path(), "/sdcard/My Photos/a.jpg");
    }

    #[test]
    fn test_dot_segments_are_kept() {
        let up = ContentUri::parse("file:///sdcard/../etc/a.jpg").unwrap();
        assert_eq!(up.path(), "/sdcard/../etc/a.jpg");

        let here = ContentUri::parse("file:///sdcard/./a.jpg").unwrap();
        assert_eq!(here.path(), "/sdcard/./a.jpg");

        let escaped = ContentUri::parse("file:///sdcard/dir/%2e%2e/a.jpg").unwrap();
        assert_eq!(escaped.encoded_path(), "/sdcard/dir/%2e%2e/a.jpg");
        assert_eq!(escaped.path(), "/sdcard/dir/../a.jpg");

        let content = ContentUri::parse("content://com.example/files/../secret").unwrap();
        assert_eq!(content.path_segments(), vec!["files", "..", "secret"]);
        assert_eq!(content.as_str(), "content://com.example/files/../secret");
    }

    #[test]
    fn test_handle_text_is_not_reencoded() {
        let uri = ContentUri::parse("content://com.example.provider/My Files/1").unwrap();
        assert_eq!(uri.as_str(), "content://com.example.provider/My Files/1");
        assert_eq!(uri.authority(), Some("com.example.provider"));
        assert_eq!(uri.path_segments(), vec!["My Files", "1"]);
    }

    #[test]
    fn test_query_and_fragment_are_not_path() {
        let uri = ContentUri::parse("content://media/external/images/media/7?limit=1#top").unwrap();
        assert_eq!(uri.encoded_path(), "/external/images/media/7");
        assert_eq!(uri.last_path_segment().as_deref(), Some("7"));
    }

    #[test]
    fn test_with_appended_id() {
        let base = ContentUri::parse("content://downloads/public_downloads").unwrap();
        let row = base.with_appended_id(17);
        assert_eq!(row.as_str(), "content://downloads/public_downloads/17");
        assert_eq!(row.last_path_segment().as_deref(), Some("17"));

        let trailing = ContentUri::parse("content://downloads/public_downloads/").unwrap();
        assert_eq!(
            trailing.with_appended_id(3).as_str(),
            "content://downloads/public_downloads/3"
        );
    }

    #[test]
    fn test_parent() {
        let row = ContentUri::parse("content://media/external/images/media/42").unwrap();
        let parent = row.parent().unwrap();
        assert_eq!(parent.as_str(), "content://media/external/images/media");
        assert_eq!(parent.authority(), Some("media"));
    }

    #[test]
    fn test_last_segment_skips_trailing_slash() {
        let uri = ContentUri::parse("content://com.google.android.apps.photos.content/a/abc123/")
            .unwrap();
        assert_eq!(uri.last_path_segment().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_rejects_relative_input() {
        assert!(ContentUri::parse("no-scheme/path").is_err());
    }
}
