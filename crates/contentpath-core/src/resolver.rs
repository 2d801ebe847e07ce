//! Resolution dispatcher
//!
//! Picks exactly one strategy per handle:
//!
//! ```text
//! structured document (host supports them)
//!   ├── external storage authority → strategy::external
//!   ├── downloads authority        → strategy::downloads
//!   ├── media authority            → strategy::media
//!   └── anything else              → falls through below
//! content scheme                   → strategy::content (remote photos or unfiltered lookup)
//! file scheme                      → strategy::file
//! otherwise                        → unresolved
//! ```
//!
//! Every failure is logged and flattened to `None`.

use crate::document::DocumentId;
use crate::error::{ResolveError, Result};
use crate::platform::PlatformCapabilities;
use crate::provider::ProviderFamily;
use crate::records::{RecordLookup, RecordSource};
use crate::strategy::{content, downloads, external, file, media};
use crate::uri::ContentUri;
use crate::Resolution;

pub struct PathResolver<P, S> {
    platform: P,
    records: S,
}

impl<P: PlatformCapabilities, S: RecordSource> PathResolver<P, S> {
    pub fn new(platform: P, records: S) -> Self {
        Self { platform, records }
    }

    /// Best available path for a handle, or `None` when unresolved
    pub fn resolve_path(&self, uri: &ContentUri) -> Option<String> {
        self.resolve(uri).map(|resolution| resolution.path)
    }

    /// Resolve a handle, keeping which strategy produced the result
    pub fn resolve(&self, uri: &ContentUri) -> Option<Resolution> {
        match self.try_resolve(uri) {
            Ok(resolution) => {
                tracing::debug!("Resolved {} via {} -> {}", uri, resolution.strategy, resolution.path);
                Some(resolution)
            }
            Err(e) => {
                tracing::debug!("Unresolved {}: {}", uri, e);
                None
            }
        }
    }

    /// Parse and resolve a handle string; unparseable input is unresolved
    pub fn resolve_str(&self, input: &str) -> Option<Resolution> {
        match ContentUri::parse(input) {
            Ok(uri) => self.resolve(&uri),
            Err(e) => {
                tracing::debug!("Unresolved: {}", e);
                None
            }
        }
    }

    fn try_resolve(&self, uri: &ContentUri) -> Result<Resolution> {
        let lookup = RecordLookup::new(&self.records);

        if self.platform.supports_document_handles() && self.platform.is_document(uri) {
            match ProviderFamily::of(uri.authority()) {
                ProviderFamily::ExternalStorage => {
                    let document_id = DocumentId::parse(&self.document_id(uri)?);
                    return Ok(external::resolve(&self.platform, &document_id));
                }
                ProviderFamily::Downloads => {
                    let document_id = self.document_id(uri)?;
                    return downloads::resolve(&self.platform, &lookup, uri, &document_id);
                }
                ProviderFamily::Media => {
                    let document_id = DocumentId::parse(&self.document_id(uri)?);
                    return media::resolve(&lookup, &document_id);
                }
                ProviderFamily::GooglePhotosRemote | ProviderFamily::Unrecognized => {}
            }
        }

        if uri.is_content() {
            return content::resolve(&lookup, uri);
        }
        if uri.is_file() {
            return file::resolve(uri);
        }

        Err(ResolveError::UnsupportedScheme(uri.scheme().to_string()))
    }

    fn document_id(&self, uri: &ContentUri) -> Result<String> {
        self.platform
            .document_id(uri)
            .ok_or_else(|| ResolveError::MissingDocumentId(uri.to_string()))
    }
}
