//! Resolve opaque content handles to concrete filesystem paths.
//!
//! A handle issued by a storage provider (`content://…`, `file://…`) is routed
//! by scheme and provider authority to one resolution strategy. Strategies
//! synthesize a path from the handle itself or look it up through the single
//! injected I/O capability, [`records::RecordSource`].
//!
//! ```no_run
//! use contentpath_core::{resolve_path, ContentUri, HostPlatform, SqliteRecords};
//!
//! let records = SqliteRecords::open("records.db")?;
//! let uri = ContentUri::parse("content://com.android.providers.media.documents/document/image%3A42")?;
//! let path = resolve_path(&HostPlatform::default(), &records, &uri);
//! # Ok::<(), anyhow::Error>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod config;
pub mod document;
pub mod error;
pub mod platform;
pub mod provider;
pub mod records;
pub mod resolver;
pub mod strategy;
pub mod uri;

pub use config::PlatformConfig;
pub use document::DocumentId;
pub use error::{LookupError, ResolveError, UriError};
pub use platform::{HostPlatform, PlatformCapabilities};
pub use provider::ProviderFamily;
pub use records::memory::InMemoryRecords;
pub use records::sqlite::SqliteRecords;
pub use records::{Column, Record, RecordCollection, RecordSource, Selection};
pub use resolver::PathResolver;
pub use strategy::Strategy;
pub use uri::ContentUri;

/// What a resolved string refers to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionKind {
    /// A filesystem path on this device
    LocalPath,
    /// An opaque reference to remote-only content, not a path
    RemoteReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub path: String,
    pub kind: ResolutionKind,
    pub strategy: Strategy,
}

impl Resolution {
    pub fn local(path: impl Into<String>, strategy: Strategy) -> Self {
        Self {
            path: path.into(),
            kind: ResolutionKind::LocalPath,
            strategy,
        }
    }

    pub fn remote(reference: impl Into<String>) -> Self {
        Self {
            path: reference.into(),
            kind: ResolutionKind::RemoteReference,
            strategy: Strategy::RemoteReference,
        }
    }

    pub fn is_local(&self) -> bool {
        self.kind == ResolutionKind::LocalPath
    }
}

/// One-shot resolution without keeping a [`PathResolver`] around
pub fn resolve_path<P, S>(platform: &P, records: &S, uri: &ContentUri) -> Option<String>
where
    P: PlatformCapabilities + ?Sized,
    S: RecordSource + ?Sized,
{
    PathResolver::new(platform, records).resolve_path(uri)
}
