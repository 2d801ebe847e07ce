/// Composite `<tag>:<value>` document identifiers
use crate::error::{ResolveError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentId {
    raw: String,
    tag: String,
    value: Option<String>,
}

impl DocumentId {
    /// Split on the first colon. An empty value is treated as absent.
    pub fn parse(raw: &str) -> Self {
        let (tag, value) = match raw.split_once(':') {
            Some((tag, value)) => (tag, Some(value).filter(|v| !v.is_empty())),
            None => (raw, None),
        };

        Self {
            raw: raw.to_string(),
            tag: tag.to_string(),
            value: value.map(str::to_string),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value part, or a malformed-identifier error when there is none
    pub fn require_value(&self) -> Result<&str> {
        self.value()
            .ok_or_else(|| ResolveError::MalformedIdentifier(self.raw.clone()))
    }

    /// Numeric row id carried by the identifier: the whole identifier (`42`)
    /// or the value of a tagged one (`msf:42`)
    pub fn numeric_value(&self) -> Result<u64> {
        let candidate = self.value().unwrap_or(&self.raw);

        candidate
            .parse()
            .map_err(|_| ResolveError::InvalidRowId(self.raw.clone()))
    }
}
