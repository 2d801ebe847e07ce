//! Host capabilities consumed by the resolver
//!
//! Version gating and path conventions come in through [`PlatformCapabilities`]
//! so the dispatcher never reads ambient global state.

use std::path::Path;

use crate::config::PlatformConfig;
use crate::uri::ContentUri;

pub trait PlatformCapabilities {
    /// Whether the host understands structured document handles at all
    fn supports_document_handles(&self) -> bool;

    /// Whether this handle decomposes into a document id
    fn is_document(&self, uri: &ContentUri) -> bool;

    fn document_id(&self, uri: &ContentUri) -> Option<String>;

    fn external_storage_root(&self) -> &str;

    /// Volume hosting the public `Download` folder
    fn downloads_directory(&self) -> &str;

    /// Mount prefix for secondary (removable) volumes
    fn secondary_storage_prefix(&self) -> &str;

    fn file_exists(&self, path: &Path) -> bool;
}

impl<P: PlatformCapabilities + ?Sized> PlatformCapabilities for &P {
    fn supports_document_handles(&self) -> bool {
        (**self).supports_document_handles()
    }

    fn is_document(&self, uri: &ContentUri) -> bool {
        (**self).is_document(uri)
    }

    fn document_id(&self, uri: &ContentUri) -> Option<String> {
        (**self).document_id(uri)
    }

    fn external_storage_root(&self) -> &str {
        (**self).external_storage_root()
    }

    fn downloads_directory(&self) -> &str {
        (**self).downloads_directory()
    }

    fn secondary_storage_prefix(&self) -> &str {
        (**self).secondary_storage_prefix()
    }

    fn file_exists(&self, path: &Path) -> bool {
        (**self).file_exists(path)
    }
}

/// Platform backed by a [`PlatformConfig`] and the local filesystem
#[derive(Debug, Clone, Default)]
pub struct HostPlatform {
    config: PlatformConfig,
}

impl HostPlatform {
    pub fn new(config: PlatformConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

/// Document id segment of `document/<id>` or `tree/<tree>/document/<id>` paths
fn document_segment(uri: &ContentUri) -> Option<String> {
    if !uri.is_content() {
        return None;
    }

    let segments = uri.path_segments();
    match segments.as_slice() {
        [document, id] if document == "document" => Some(id.clone()),
        [tree, _, document, id] if tree == "tree" && document == "document" => Some(id.clone()),
        _ => None,
    }
}

impl PlatformCapabilities for HostPlatform {
    fn supports_document_handles(&self) -> bool {
        self.config.supports_document_handles()
    }

    fn is_document(&self, uri: &ContentUri) -> bool {
        document_segment(uri).is_some()
    }

    fn document_id(&self, uri: &ContentUri) -> Option<String> {
        document_segment(uri)
    }

    fn external_storage_root(&self) -> &str {
        &self.config.external_storage_root
    }

    fn downloads_directory(&self) -> &str {
        self.config.downloads_directory()
    }

    fn secondary_storage_prefix(&self) -> &str {
        &self.config.secondary_storage_prefix
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
