/// Direct `file://` references
use crate::error::{ResolveError, Result};
use crate::strategy::Strategy;
use crate::uri::ContentUri;
use crate::Resolution;

/// The embedded path, decoded and otherwise unchanged
pub fn resolve(uri: &ContentUri) -> Result<Resolution> {
    if !uri.is_file() {
        return Err(ResolveError::UnsupportedScheme(uri.scheme().to_string()));
    }
    Ok(Resolution::local(uri.path(), Strategy::FileReference))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_identity() {
        let uri = ContentUri::parse("file:///storage/emulated/0/DCIM/a.jpg").unwrap();
        assert_eq!(resolve(&uri).unwrap().path, "/storage/emulated/0/DCIM/a.jpg");
    }

    #[test]
    fn test_rejects_other_schemes() {
        let uri = ContentUri::parse("https://example.com/a.jpg").unwrap();
        assert!(matches!(resolve(&uri), Err(ResolveError::UnsupportedScheme(s)) if s == "https"));
    }
}
