/// SQL-like filter expressions with positional arguments
use crate::error::LookupError;

use super::Column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub filter: String,
    pub args: Vec<String>,
}

impl Selection {
    pub fn new(filter: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            filter: filter.into(),
            args,
        }
    }

    /// `_id=?` bound to a single row id
    pub fn by_id(row_id: impl Into<String>) -> Self {
        Self::new("_id=?", vec![row_id.into()])
    }

    /// Parse `col=? [AND col=?]...` into column/argument pairs
    pub fn predicates(&self) -> Result<Vec<(Column, String)>, LookupError> {
        let malformed = |reason: &str| LookupError::MalformedFilter {
            filter: self.filter.clone(),
            reason: reason.to_string(),
        };

        let mut columns = Vec::new();
        for clause in split_and(&self.filter) {
            let (name, placeholder) = clause
                .split_once('=')
                .ok_or_else(|| malformed("expected '<column>=?'"))?;
            if placeholder.trim() != "?" {
                return Err(malformed("only '?' placeholders are supported"));
            }
            let column = Column::from_name(name.trim())
                .ok_or_else(|| malformed("unknown column"))?;
            columns.push(column);
        }

        if columns.is_empty() {
            return Err(malformed("empty filter"));
        }
        if columns.len() != self.args.len() {
            return Err(malformed("argument count does not match placeholders"));
        }

        Ok(columns.into_iter().zip(self.args.iter().cloned()).collect())
    }
}

/// Split on case-insensitive ` AND ` separators
fn split_and(filter: &str) -> Vec<&str> {
    let upper = filter.to_ascii_uppercase();
    let mut clauses = Vec::new();
    let mut start = 0;

    while let Some(offset) = upper[start..].find(" AND ") {
        clauses.push(filter[start..start + offset].trim());
        start += offset + " AND ".len();
    }
    clauses.push(filter[start..].trim());

    clauses.into_iter().filter(|c| !c.is_empty()).collect()
}
