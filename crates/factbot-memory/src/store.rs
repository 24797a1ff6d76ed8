//! Fact store backed by SQLite.
//!
//! Relation arguments of the lookups are matched with `instr`, so they are
//! case-sensitive substrings and never wildcards. Ties prefer an exact
//! relation match, then the first inserted row.

use crate::migration::{list_tables, run_migrations};
use chrono::{DateTime, Utc};
use factbot_types::error::{FactbotError, FactbotResult};
use factbot_types::fact::{Fact, FactLookup, FactSink, Triple};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const FACT_COLUMNS: &str = "id, subject, relation, object, created_at, updated_at";

/// Fact store backed by SQLite.
#[derive(Clone)]
pub struct FactStore {
    conn: Arc<Mutex<Connection>>,
}

impl FactStore {
    /// Create a new fact store wrapping the given (already migrated) connection.
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open (or create) the database at `path` and run migrations.
    pub fn open(path: &Path) -> FactbotResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(store_err)?;
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(store_err)?;
        run_migrations(&conn).map_err(store_err)?;
        info!(path = %path.display(), "Opened fact store");
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> FactbotResult<Self> {
        let conn = Connection::open_in_memory().map_err(store_err)?;
        run_migrations(&conn).map_err(store_err)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// Number of stored facts.
    pub fn count(&self) -> FactbotResult<u64> {
        let conn = self.lock()?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM facts", [], |row| row.get(0))
            .map_err(store_err)?;
        Ok(n as u64)
    }

    /// The first `limit` facts in insertion order.
    pub fn list_facts(&self, limit: usize) -> FactbotResult<Vec<Fact>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {FACT_COLUMNS} FROM facts ORDER BY rowid LIMIT ?1"
            ))
            .map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params![limit as i64], read_fact_row)
            .map_err(store_err)?;
        collect_facts(rows)
    }

    /// Names of the tables in the database.
    pub fn tables(&self) -> FactbotResult<Vec<String>> {
        let conn = self.lock()?;
        list_tables(&conn).map_err(store_err)
    }

    /// Up to `n` facts picked at random.
    pub fn sample(&self, n: usize) -> FactbotResult<Vec<Fact>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {FACT_COLUMNS} FROM facts ORDER BY RANDOM() LIMIT ?1"
            ))
            .map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params![n as i64], read_fact_row)
            .map_err(store_err)?;
        collect_facts(rows)
    }

    /// Every fact whose subject or object is `entity`.
    pub fn facts_about(&self, entity: &str) -> FactbotResult<Vec<Fact>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {FACT_COLUMNS} FROM facts WHERE subject = ?1 OR object = ?1 ORDER BY rowid"
            ))
            .map_err(store_err)?;
        let rows = stmt
            .query_map(rusqlite::params![entity], read_fact_row)
            .map_err(store_err)?;
        collect_facts(rows)
    }

    /// The fact holding an exact `(subject, relation)` pair, if any.
    pub fn get(&self, subject: &str, relation: &str) -> FactbotResult<Option<Fact>> {
        let conn = self.lock()?;
        conn.query_row(
            &format!(
                "SELECT {FACT_COLUMNS} FROM facts WHERE subject = ?1 AND relation = ?2 ORDER BY rowid LIMIT 1"
            ),
            rusqlite::params![subject, relation],
            read_fact_row,
        )
        .optional()
        .map_err(store_err)?
        .map(RawFactRow::into_fact)
        .transpose()
    }

    fn lock(&self) -> FactbotResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| FactbotError::Internal(e.to_string()))
    }

    /// Run a single-column point query.
    fn query_text(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::types::ToSql],
    ) -> FactbotResult<Option<String>> {
        let conn = self.lock()?;
        conn.query_row(sql, params, |row| row.get::<_, String>(0))
            .optional()
            .map_err(store_err)
    }
}

impl FactLookup for FactStore {
    fn forward(&self, subject: &str, relation: &str) -> FactbotResult<Option<String>> {
        self.query_text(
            "SELECT object FROM facts
             WHERE subject = ?1 AND instr(relation, ?2) > 0
             ORDER BY (relation = ?2) DESC, rowid LIMIT 1",
            &[&subject, &relation],
        )
    }

    fn reverse(&self, object: &str, relation: &str) -> FactbotResult<Option<String>> {
        self.query_text(
            "SELECT subject FROM facts
             WHERE object = ?1 AND instr(relation, ?2) > 0
             ORDER BY (relation = ?2) DESC, rowid LIMIT 1",
            &[&object, &relation],
        )
    }

    fn forward_any(&self, subject: &str) -> FactbotResult<Option<String>> {
        self.query_text(
            "SELECT object FROM facts WHERE subject = ?1 ORDER BY rowid LIMIT 1",
            &[&subject],
        )
    }

    fn reverse_any(&self, object: &str) -> FactbotResult<Option<String>> {
        self.query_text(
            "SELECT subject FROM facts WHERE object = ?1 ORDER BY rowid LIMIT 1",
            &[&object],
        )
    }
}

impl FactSink for FactStore {
    fn upsert(&self, triple: &Triple) -> FactbotResult<bool> {
        if !triple.is_complete() {
            return Err(FactbotError::InvalidInput(format!(
                "refusing to store incomplete fact '{triple}'"
            )));
        }
        let mut conn = self.lock()?;
        let tx = conn.transaction().map_err(store_err)?;
        let now = Utc::now().to_rfc3339();

        // Same triple again: only the timestamp moves.
        let touched = tx
            .execute(
                "UPDATE facts SET updated_at = ?4
                 WHERE subject = ?1 AND relation = ?2 AND object = ?3",
                rusqlite::params![triple.subject, triple.relation, triple.object, now],
            )
            .map_err(store_err)?;

        let written = if touched > 0 {
            touched
        } else {
            let updated = tx
                .execute(
                    "UPDATE facts SET object = ?3, updated_at = ?4
                     WHERE id = (SELECT id FROM facts WHERE subject = ?1 AND relation = ?2
                                 ORDER BY rowid LIMIT 1)",
                    rusqlite::params![triple.subject, triple.relation, triple.object, now],
                )
                .map_err(store_err)?;
            if updated > 0 {
                debug!(subject = %triple.subject, relation = %triple.relation, "Updated fact object");
                updated
            } else {
                tx.execute(
                    "INSERT INTO facts (id, subject, relation, object, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                     ON CONFLICT(subject, relation, object) DO UPDATE SET updated_at = ?5",
                    rusqlite::params![
                        Uuid::new_v4().to_string(),
                        triple.subject,
                        triple.relation,
                        triple.object,
                        now,
                    ],
                )
                .map_err(store_err)?
            }
        };

        tx.commit().map_err(store_err)?;
        Ok(written > 0)
    }

    fn all_relations(&self) -> FactbotResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT DISTINCT relation FROM facts ORDER BY relation")
            .map_err(store_err)?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(store_err)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(store_err)
    }
}

fn store_err(e: rusqlite::Error) -> FactbotError {
    FactbotError::Store(e.to_string())
}

/// Raw row from the facts table.
struct RawFactRow {
    id: String,
    subject: String,
    relation: String,
    object: String,
    created_at: String,
    updated_at: String,
}

impl RawFactRow {
    fn into_fact(self) -> FactbotResult<Fact> {
        Ok(Fact {
            id: self.id,
            subject: self.subject,
            relation: self.relation,
            object: self.object,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

fn read_fact_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawFactRow> {
    Ok(RawFactRow {
        id: row.get(0)?,
        subject: row.get(1)?,
        relation: row.get(2)?,
        object: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn collect_facts(
    rows: impl Iterator<Item = rusqlite::Result<RawFactRow>>,
) -> FactbotResult<Vec<Fact>> {
    let mut facts = Vec::new();
    for row in rows {
        facts.push(row.map_err(store_err)?.into_fact()?);
    }
    Ok(facts)
}

fn parse_timestamp(s: &str) -> FactbotResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| FactbotError::Store(format!("Invalid timestamp '{s}': {e}")))
}
