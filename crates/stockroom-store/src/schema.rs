//! Schema migrations for the items database.
//!
//! Migrations are plain SQL batches applied in order, tracked with
//! `PRAGMA user_version`. A database at version N has had migrations
//! `0..N` applied.

use rusqlite::Connection;

use crate::error::StoreResult;

/// Ordered migration batches. Append only; never edit an applied entry.
const MIGRATIONS: &[&str] = &[
    // 1: items table + uniqueness on name
    "CREATE TABLE items (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        category    TEXT NOT NULL,
        status      TEXT NOT NULL,
        priority    INTEGER NOT NULL DEFAULT 0,
        quantity    INTEGER NOT NULL DEFAULT 0,
        price       TEXT NOT NULL DEFAULT '0',
        rate        REAL NOT NULL DEFAULT 0,
        active      INTEGER NOT NULL DEFAULT 1,
        due_date    TEXT,
        memo        TEXT,
        created_at  TEXT NOT NULL,
        updated_at  TEXT NOT NULL
    );
    CREATE UNIQUE INDEX idx_items_name ON items(name);
    CREATE INDEX idx_items_category ON items(category);",
];

/// Applies any migrations the database has not seen yet.
///
/// Safe to call on every startup; already-applied migrations are skipped.
///
/// # Errors
///
/// Returns [`crate::StoreError`] if a migration batch fails to execute.
pub fn apply_migrations(conn: &Connection) -> StoreResult<()> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    for (index, migration) in MIGRATIONS.iter().enumerate().skip(version as usize) {
        conn.execute_batch(migration)?;
        conn.pragma_update(None, "user_version", index as i64 + 1)?;
        tracing::debug!(version = index + 1, "applied schema migration");
    }

    Ok(())
}
