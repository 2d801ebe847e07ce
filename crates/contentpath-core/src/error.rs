//! Error types for handle parsing, record lookup and resolution
//!
//! None of these ever reach the caller of [`crate::PathResolver::resolve_path`];
//! the resolver logs them and reports the handle as unresolved.

use thiserror::Error;

/// Failure to parse a handle string
#[derive(Debug, Error)]
pub enum UriError {
    #[error("invalid handle '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failure of the record query capability
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("record provider unavailable: {0}")]
    Unavailable(String),

    #[error("malformed filter '{filter}': {reason}")]
    MalformedFilter { filter: String, reason: String },

    #[error("column '{0}' not in projection")]
    MissingColumn(&'static str),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Reasons a single resolution attempt produced no path
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("document id '{0}' has no value after the tag")]
    MalformedIdentifier(String),

    #[error("document id '{0}' does not carry a numeric row id")]
    InvalidRowId(String),

    #[error("unknown media kind '{0}'")]
    UnknownMediaKind(String),

    #[error("document handle without a document id: {0}")]
    MissingDocumentId(String),

    #[error("no record found for {0}")]
    NotFound(String),

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
