//! Question/answer history persisted in a local SQLite file.
//!
//! - One fresh `rusqlite::Connection` per operation, opened inside
//!   `spawn_blocking`; no pooling and no shared connection state.
//! - Ids come from `AUTOINCREMENT`, timestamps from the table default
//!   (UTC, millisecond precision).
//! - Every storage failure is returned to the caller.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, info, instrument};

pub mod errors;
pub mod record;

use errors::{HistoryError, Result};
pub use record::HistoryRecord;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS history (
        id        INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
        question  TEXT NOT NULL,
        answer    TEXT NOT NULL
    );
";

/// Accepts both the millisecond default and plain `CURRENT_TIMESTAMP` rows.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

const SELECT_COLUMNS: &str = "SELECT id, timestamp, question, answer FROM history";

/// Handle to the history database file. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    db_path: PathBuf,
}

impl HistoryStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Creates the `history` table if it does not exist. Idempotent.
    #[instrument(skip(self), fields(db = %self.db_path.display()))]
    pub async fn initialize(&self) -> Result<()> {
        let path = self.db_path.clone();
        task::spawn_blocking(move || -> Result<()> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            let conn = Connection::open(&path)?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await??;

        info!("history table ready");
        Ok(())
    }

    /// Appends a record with a fresh id and the current timestamp.
    #[instrument(skip_all, fields(question_len = question.len()))]
    pub async fn insert(&self, question: String, answer: String) -> Result<HistoryRecord> {
        let record = self
            .run(move |conn| {
                let sql = "INSERT INTO history (question, answer) VALUES (?1, ?2) \
                           RETURNING id, timestamp, question, answer";
                let raw = conn.query_row(sql, params![question, answer], RawRow::from_row)?;
                raw.into_record()
            })
            .await?;

        info!(id = record.id, "history record saved");
        Ok(record)
    }

    /// All records, most recent first. Equal timestamps keep reverse insertion order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<HistoryRecord>> {
        let records: Vec<HistoryRecord> = self
            .run(|conn| {
                let sql = format!("{SELECT_COLUMNS} ORDER BY timestamp DESC, id DESC");
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map([], RawRow::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows.into_iter().map(RawRow::into_record).collect()
            })
            .await?;

        debug!(count = records.len(), "history listed");
        Ok(records)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<HistoryRecord> {
        self.run(move |conn| select_one(conn, id)).await
    }

    /// Replaces question and answer; id and timestamp are preserved.
    ///
    /// Returns the refreshed record, or [`HistoryError::NotFound`] without
    /// touching any row.
    #[instrument(skip(self, question, answer))]
    pub async fn update(&self, id: i64, question: String, answer: String) -> Result<HistoryRecord> {
        let record = self
            .run(move |conn| {
                let changed = conn.execute(
                    "UPDATE history SET question = ?1, answer = ?2 WHERE id = ?3",
                    params![question, answer, id],
                )?;
                if changed == 0 {
                    return Err(HistoryError::NotFound(id));
                }
                select_one(conn, id)
            })
            .await?;

        info!(id, "history record updated");
        Ok(record)
    }

    /// Runs `op` on a fresh connection in the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = self.db_path.clone();
        task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            op(&conn)
        })
        .await?
    }
}

fn select_one(conn: &Connection, id: i64) -> Result<HistoryRecord> {
    let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
    conn.query_row(&sql, params![id], RawRow::from_row)
        .optional()?
        .ok_or(HistoryError::NotFound(id))?
        .into_record()
}

/// Row as stored; the timestamp is still text.
struct RawRow {
    id: i64,
    timestamp: String,
    question: String,
    answer: String,
}

impl RawRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            timestamp: row.get(1)?,
            question: row.get(2)?,
            answer: row.get(3)?,
        })
    }

    fn into_record(self) -> Result<HistoryRecord> {
        let timestamp = NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
            .map_err(|_| HistoryError::Timestamp {
                id: self.id,
                value: self.timestamp.clone(),
            })?;
        Ok(HistoryRecord {
            id: self.id,
            timestamp,
            question: self.question,
            answer: self.answer,
        })
    }
}
