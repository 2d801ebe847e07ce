//! SQLite-backed record store
//!
//! All rows live in a single `records` table keyed by target handle. Filters
//! are bound as parameters against whitelisted column names; filter text is
//! never spliced into SQL.

use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

use crate::error::LookupError;

use super::memory::InMemoryRecords;
use super::{
    split_row_target, store_key, target_key, Column, Record, RecordCursor, RecordQuery,
    RecordSource, RowSetCursor,
};

pub struct SqliteRecords {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl SqliteRecords {
    /// Open or create a record database at the specified path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }

        let conn = Connection::open(&db_path)
            .context(format!("Failed to open database at {}", db_path.display()))?;

        let store = Self {
            conn,
            db_path: Some(db_path),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        let store = Self {
            conn,
            db_path: None,
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Get the default database path (~/.contentpath/records.db)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".contentpath").join("records.db"))
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS records (
                target TEXT NOT NULL,
                _id INTEGER,
                _data TEXT,
                _display_name TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_records_target
                ON records(target, _id);
            "#,
            )
            .context("Failed to initialize database schema")?;
        Ok(())
    }

    pub fn insert(&self, target: &str, record: &Record) -> Result<()> {
        let key = store_key(target).context(format!("Invalid target '{}'", target))?;
        let id = record.id.map(i64::try_from).transpose().context("Row id out of range")?;

        self.conn
            .execute(
                "INSERT INTO records (target, _id, _data, _display_name) VALUES (?1, ?2, ?3, ?4)",
                params![key, id, record.data, record.display_name],
            )
            .context("Failed to insert record")?;

        tracing::debug!("Inserted record into {}", key);
        Ok(())
    }

    /// Copy every row of a fixture store into the database
    pub fn import(&self, fixture: &InMemoryRecords) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let entries = fixture.entries();
        for (target, record) in &entries {
            self.insert(target, record)?;
        }
        tx.commit().context("Failed to commit import")?;

        tracing::info!("Imported {} records", entries.len());
        Ok(entries.len())
    }

    /// All rows as `(target, record)` pairs, in insertion order
    pub fn list(&self) -> Result<Vec<(String, Record)>> {
        let mut stmt = self.conn.prepare(
            "SELECT target, _id, _data, _display_name FROM records ORDER BY target, rowid",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let target: String = row.get(0)?;
                let id: Option<i64> = row.get(1)?;
                let data: Option<String> = row.get(2)?;
                let display_name: Option<String> = row.get(3)?;
                Ok((target, id, data, display_name))
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list records")?;

        Ok(rows
            .into_iter()
            .map(|(target, id, data, display_name)| {
                (
                    target,
                    Record {
                        id: to_row_id(id),
                        data,
                        display_name,
                    },
                )
            })
            .collect())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get the database file path (`None` for in-memory databases)
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn has_target(&self, key: &str) -> Result<bool, LookupError> {
        let found = self
            .conn
            .query_row(
                "SELECT 1 FROM records WHERE target = ?1 LIMIT 1",
                [key],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn select_rows(
        &self,
        key: &str,
        row_id: Option<u64>,
        predicates: &[(Column, String)],
    ) -> Result<Vec<Record>, LookupError> {
        let mut sql =
            String::from("SELECT _id, _data, _display_name FROM records WHERE target = ?");
        let mut values = vec![Value::Text(key.to_string())];

        if let Some(id) = row_id {
            sql.push_str(" AND _id = ?");
            values.push(i64::try_from(id).map_or(Value::Null, Value::Integer));
        }
        for (column, arg) in predicates {
            sql.push_str(&format!(" AND {} = ?", column.name()));
            values.push(match column {
                Column::Id => id_value(arg),
                _ => Value::Text(arg.clone()),
            });
        }
        sql.push_str(" ORDER BY rowid");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), |row| {
                Ok(Record {
                    id: to_row_id(row.get(0)?),
                    data: row.get(1)?,
                    display_name: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}

fn id_value(arg: &str) -> Value {
    match arg.parse::<i64>() {
        Ok(id) => Value::Integer(id),
        Err(_) => Value::Text(arg.to_string()),
    }
}

fn to_row_id(id: Option<i64>) -> Option<u64> {
    let id = id?;
    match u64::try_from(id) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!("Skipping negative row id {}", id);
            None
        }
    }
}

impl RecordSource for SqliteRecords {
    fn query<'a>(
        &'a self,
        query: &RecordQuery,
    ) -> Result<Option<Box<dyn RecordCursor + 'a>>, LookupError> {
        let predicates = match &query.selection {
            Some(selection) => selection.predicates()?,
            None => Vec::new(),
        };

        let key = target_key(query.target.as_str());
        let rows = if self.has_target(key)? {
            self.select_rows(key, None, &predicates)?
        } else if let Some((collection, id)) = split_row_target(&query.target) {
            self.select_rows(&collection, Some(id), &predicates)?
        } else {
            Vec::new()
        };

        Ok(Some(Box::new(RowSetCursor::new(
            rows,
            query.projection.clone(),
        ))))
    }
}
