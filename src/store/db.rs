//! SQLite database connection and schema management
//!
//! Manages `<data_dir>/lifequest.db`. The schema is created on open and
//! its version recorded in `schema_version`.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;
use tracing::debug;

/// File name of the database inside the data directory
pub const DB_FILE_NAME: &str = "lifequest.db";

/// Version written by `SCHEMA_SQL`
const SCHEMA_VERSION: i32 = 1;

/// Shared database handle
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    /// Open or create the database inside `data_dir`
    pub fn open_in_dir(data_dir: &Path) -> Result<Self> {
        Self::open(&data_dir.join(DB_FILE_NAME))
    }

    /// Open or create the database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        debug!(path = %path.display(), "opened database");
        Self::from_connection(conn)
    }

    /// Throwaway database, used by tests
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Lock the connection
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database lock poisoned"))
    }

    /// Run read-only queries
    pub fn read<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.conn()?;
        f(&conn)
    }

    /// Run `f` inside one transaction. Nothing is written unless `f` succeeds.
    pub fn write<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let value = f(&tx)?;
        tx.commit().context("Failed to commit transaction")?;
        Ok(value)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        debug!(version = SCHEMA_VERSION, "schema ready");
        Ok(())
    }

    /// Current schema version
    pub fn schema_version(&self) -> Result<i32> {
        let conn = self.conn()?;
        let version = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )?;
        Ok(version)
    }
}

/// SQL schema for the database
const SCHEMA_SQL: &str = r#"
-- Tasks, in display order
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    position INTEGER NOT NULL,
    title TEXT NOT NULL,
    category TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    repeat_mode TEXT,
    start_date TEXT,
    end_date TEXT,
    specific_date TEXT,
    completed INTEGER NOT NULL DEFAULT 0,
    last_completed_date TEXT,
    created_at TEXT NOT NULL
);

-- Spendable points (singleton)
CREATE TABLE IF NOT EXISTS wallet (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    points INTEGER NOT NULL DEFAULT 0
);
INSERT OR IGNORE INTO wallet (id) VALUES (1);

-- Lottery results
CREATE TABLE IF NOT EXISTS lottery_history (
    id TEXT PRIMARY KEY,
    prize TEXT NOT NULL,
    kind TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT 'points',
    drawn_at INTEGER NOT NULL,
    used INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_lottery_drawn_at ON lottery_history(drawn_at);

-- Wish list
CREATE TABLE IF NOT EXISTS wishes (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Bingo board of the current month (singleton) and its cells
CREATE TABLE IF NOT EXISTS bingo_board (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    month TEXT NOT NULL,
    lines_completed INTEGER NOT NULL DEFAULT 0,
    max_lines_reached INTEGER NOT NULL DEFAULT 0,
    extra_draws INTEGER NOT NULL DEFAULT 0
);
CREATE TABLE IF NOT EXISTS bingo_cells (
    idx INTEGER PRIMARY KEY CHECK (idx >= 0 AND idx < 25),
    label TEXT NOT NULL,
    completed INTEGER NOT NULL DEFAULT 0
);

-- One row per task completion
CREATE TABLE IF NOT EXISTS completions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id TEXT NOT NULL,
    category TEXT NOT NULL,
    exp INTEGER NOT NULL,
    day TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_completion_day ON completions(day);
CREATE INDEX IF NOT EXISTS idx_completion_task ON completions(task_id);

-- Unlocked achievements
CREATE TABLE IF NOT EXISTS achievements (
    id TEXT PRIMARY KEY,
    unlocked_at INTEGER NOT NULL
);

-- Key/value bookkeeping (last observed day)
CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;
