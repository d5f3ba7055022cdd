use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database schema. Every statement is idempotent so init can
/// run on an existing file without touching data.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id        TEXT PRIMARY KEY,
            name      TEXT NOT NULL,
            pin_hash  TEXT,
            active    INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS days (
            date        TEXT NOT NULL,
            employee_id TEXT NOT NULL,
            locked      INTEGER NOT NULL DEFAULT 0,
            PRIMARY KEY (date, employee_id)
        );

        CREATE TABLE IF NOT EXISTS events (
            id            TEXT PRIMARY KEY,
            date          TEXT NOT NULL,
            employee_id   TEXT NOT NULL,
            kind          TEXT NOT NULL,
            timestamp     TEXT NOT NULL,
            device_id     TEXT,
            location      TEXT,
            metadata      TEXT,
            version       INTEGER NOT NULL DEFAULT 1,
            integrity_tag TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_events_day ON events (date, employee_id);

        CREATE TABLE IF NOT EXISTS corrections (
            id                TEXT PRIMARY KEY,
            date              TEXT NOT NULL,
            employee_id       TEXT NOT NULL,
            original_event_id TEXT NOT NULL,
            proposed_timestamp TEXT NOT NULL,
            justification     TEXT NOT NULL,
            requested_by_id   TEXT NOT NULL,
            requested_by_name TEXT NOT NULL,
            requested_at      TEXT NOT NULL,
            approver_id       TEXT,
            approver_name     TEXT,
            status            TEXT NOT NULL,
            integrity_tag     TEXT NOT NULL,
            evidence          TEXT NOT NULL DEFAULT '[]'
        );
        CREATE INDEX IF NOT EXISTS idx_corrections_day ON corrections (date, employee_id);

        CREATE TABLE IF NOT EXISTS inconsistencies (
            id                 TEXT PRIMARY KEY,
            date               TEXT NOT NULL,
            employee_id        TEXT NOT NULL,
            kind               TEXT NOT NULL,
            description        TEXT NOT NULL,
            involved_event_ids TEXT NOT NULL,
            detected_at        TEXT NOT NULL,
            severity           TEXT NOT NULL,
            resolved           INTEGER NOT NULL DEFAULT 0,
            resolution         TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_inconsistencies_day
            ON inconsistencies (date, employee_id);

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS audit_log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT NOT NULL,
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}
