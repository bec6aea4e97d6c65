//! SQLite-based diary storage.
//!
//! Stores assembled [`SleepRecord`]s, raw answers and computed percentages
//! side by side. Percentages are kept as REAL and read back exactly as they
//! were written.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

use crate::diary::{ComputedMetrics, RawEntry, SleepRecord};
use crate::error::{CoreError, DatabaseError};

use super::{migrations, Config};

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "sleepdiary.db";

const ENTRY_COLUMNS: &str = "id, entry_date, bedtime, wake_time_target, wake_time_actual,
    nap_minutes, sleep_quality_score, total_sleep_minutes, awake_minutes,
    sleep_latency_minutes, wake_count, notes,
    efficiency_actual_pct, efficiency_vs_target_pct";

/// SQLite database for diary entries.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database file named by `config`, by default
    /// `~/.config/sleepdiary/sleepdiary.db`.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open(config: &Config) -> Result<Self, CoreError> {
        Ok(Self::open_at(config.database_path()?)?)
    }

    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("opened diary database at {}", path.display());
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests and previews).
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        migrations::migrate(&self.conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Insert an assembled record and return it with its new id.
    ///
    /// Ids come from SQLite `AUTOINCREMENT` and only ever increase.
    ///
    /// # Errors
    /// Returns [`DatabaseError::AlreadySaved`] if the record already has an id,
    /// or an error if the insert fails.
    pub fn save(&self, record: &SleepRecord) -> Result<SleepRecord, DatabaseError> {
        if let Some(id) = record.id() {
            return Err(DatabaseError::AlreadySaved(id));
        }

        let raw = record.raw();
        let metrics = record.metrics();
        self.conn.execute(
            "INSERT INTO entries (
                entry_date, bedtime, wake_time_target, wake_time_actual,
                nap_minutes, sleep_quality_score, total_sleep_minutes,
                awake_minutes, sleep_latency_minutes, wake_count, notes,
                efficiency_actual_pct, efficiency_vs_target_pct
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                raw.entry_date,
                raw.bedtime,
                raw.wake_time_target,
                raw.wake_time_actual,
                raw.nap_minutes,
                raw.sleep_quality_score,
                raw.total_sleep_minutes,
                raw.awake_minutes,
                raw.sleep_latency_minutes,
                raw.wake_count,
                raw.notes,
                metrics.efficiency_actual_pct,
                metrics.efficiency_vs_target_pct,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        log::debug!("saved diary entry {id} for {}", raw.entry_date);
        Ok(record.clone().with_id(id))
    }

    /// Fetch one record by id.
    pub fn get(&self, id: i64) -> Result<Option<SleepRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"))?;
        let result = stmt.query_row(params![id], record_from_row);
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Most recently saved records first, at most `limit` of them.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<SleepRecord>, DatabaseError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY id DESC LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![limit], record_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Records dated on or after `cutoff`, newest date first.
    ///
    /// Entry dates are stored as `YYYY-MM-DD` text, so comparing them as
    /// strings orders them chronologically.
    pub fn list_since(&self, cutoff: NaiveDate) -> Result<Vec<SleepRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries
             WHERE entry_date >= ?1
             ORDER BY entry_date DESC, id DESC"
        ))?;
        let rows = stmt.query_map(
            params![cutoff.format("%Y-%m-%d").to_string()],
            record_from_row,
        )?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<u64, DatabaseError> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(n.max(0) as u64)
    }
}

fn record_from_row(row: &Row<'_>) -> Result<SleepRecord, rusqlite::Error> {
    let raw = RawEntry {
        entry_date: row.get(1)?,
        bedtime: row.get(2)?,
        wake_time_target: row.get(3)?,
        wake_time_actual: row.get(4)?,
        nap_minutes: row.get(5)?,
        sleep_quality_score: row.get(6)?,
        total_sleep_minutes: row.get(7)?,
        awake_minutes: row.get(8)?,
        sleep_latency_minutes: row.get(9)?,
        wake_count: row.get(10)?,
        notes: row.get(11)?,
    };
    let metrics = ComputedMetrics {
        efficiency_actual_pct: row.get(12)?,
        efficiency_vs_target_pct: row.get(13)?,
    };
    Ok(SleepRecord::new(raw, metrics).with_id(row.get(0)?))
}
