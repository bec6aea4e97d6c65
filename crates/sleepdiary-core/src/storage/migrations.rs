//! Database schema migrations for sleepdiary.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            log::warn!("failed to read schema_version: {e}");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: diary entries with the raw answers only.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS entries (
            id                    INTEGER PRIMARY KEY AUTOINCREMENT,
            entry_date            TEXT NOT NULL,
            bedtime               TEXT NOT NULL,
            wake_time_target      TEXT NOT NULL,
            wake_time_actual      TEXT NOT NULL,
            nap_minutes           INTEGER NOT NULL DEFAULT 0,
            sleep_quality_score   INTEGER NOT NULL DEFAULT 0,
            total_sleep_minutes   INTEGER NOT NULL DEFAULT 0,
            awake_minutes         INTEGER NOT NULL DEFAULT 0,
            sleep_latency_minutes INTEGER NOT NULL DEFAULT 0,
            wake_count            INTEGER NOT NULL DEFAULT 0,
            notes                 TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_entries_entry_date ON entries(entry_date);",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: store the computed efficiency percentages.
///
/// Rows written before v2 get 0.0 for both columns.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "ALTER TABLE entries ADD COLUMN efficiency_actual_pct REAL NOT NULL DEFAULT 0.0;
         ALTER TABLE entries ADD COLUMN efficiency_vs_target_pct REAL NOT NULL DEFAULT 0.0;",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()
}
