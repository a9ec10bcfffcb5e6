//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database. The engine and the runner
//! call store methods — they never execute SQL directly.

use crate::{error::GameResult, event::EventLogEntry};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub struct SaveStore {
    conn: Connection,
}

impl SaveStore {
    /// Open (or create) the save database at `path`.
    pub fn open(path: &str) -> GameResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> GameResult<Self> {
        let store = Self { conn: Connection::open_in_memory()? };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> GameResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Saves ──────────────────────────────────────────────────

    /// Insert or replace the snapshot for `save_id`.
    pub fn write_save(&self, save_id: &str, saved_at: &str, state_json: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO save (save_id, created_at, saved_at, state_json)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (save_id) DO UPDATE SET saved_at = ?3, state_json = ?4",
            params![save_id, saved_at, saved_at, state_json],
        )?;
        Ok(())
    }

    pub fn read_save(&self, save_id: &str) -> GameResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM save WHERE save_id = ?1",
                params![save_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(json)
    }

    /// The most recently written save, if any.
    pub fn latest_save(&self) -> GameResult<Option<(String, String)>> {
        let row = self
            .conn
            .query_row(
                "SELECT save_id, state_json FROM save ORDER BY saved_at DESC LIMIT 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;
        Ok(row)
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, save_id: &str, event_type: &str, payload: &str) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (save_id, event_type, payload, recorded_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![save_id, event_type, payload, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn event_count(&self, save_id: &str) -> GameResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE save_id = ?1",
            params![save_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn events(&self, save_id: &str) -> GameResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, save_id, event_type, payload, recorded_at
             FROM event_log WHERE save_id = ?1 ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![save_id], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    save_id: row.get(1)?,
                    event_type: row.get(2)?,
                    payload: row.get(3)?,
                    recorded_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}
