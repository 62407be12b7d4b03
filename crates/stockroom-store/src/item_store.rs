//! Parameterized queries over the `items` table.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use rust_decimal::Decimal;

use stockroom_core::Item;

use crate::error::StoreResult;
use crate::schema;

/// Column list shared by every SELECT. Order must match [`map_item`].
const ITEM_COLUMNS: &str = "id, name, description, category, status, priority, quantity, \
                            price, rate, active, due_date, memo, created_at, updated_at";

/// Optional search criteria, combined with AND semantics.
///
/// `name` is a substring match (SQL `LIKE`, case-insensitive for ASCII under
/// SQLite); the remaining filters are exact matches.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Substring to match against `name`.
    pub name: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// Exact status.
    pub status: Option<String>,
    /// Exact active flag.
    pub active: Option<bool>,
}

/// SQLite-backed store for items.
///
/// Cheap to clone; clones share one connection behind a mutex.
#[derive(Debug, Clone)]
pub struct ItemStore {
    conn: Arc<Mutex<Connection>>,
}

impl ItemStore {
    /// Opens (or creates) a database at `path` and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError`] if the database cannot be opened or a
    /// migration fails.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens an in-memory database with migrations applied. Used by tests
    /// and ephemeral deployments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError`] if a migration fails.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        // journal_mode returns the resulting mode as a row.
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;

        schema::apply_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Inserts a new item and returns the storage-assigned id.
    ///
    /// The item's own `id` field is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::UniqueViolation`] on a duplicate name.
    pub fn insert(&self, item: &Item) -> StoreResult<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO items (name, description, category, status, priority, quantity, \
             price, rate, active, due_date, memo, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                item.name,
                item.description,
                item.category,
                item.status,
                item.priority,
                item.quantity,
                item.price.to_string(),
                item.rate,
                item.active,
                item.due_date,
                item.memo,
                item.created_at,
                item.updated_at,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Fetches an item by id.
    pub fn find_by_id(&self, id: i64) -> StoreResult<Option<Item>> {
        let conn = self.conn.lock();
        let item = conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
                params![id],
                map_item,
            )
            .optional()?;
        Ok(item)
    }

    /// Rewrites every mutable column of the row matching `item.id`.
    ///
    /// Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::UniqueViolation`] when renaming onto an
    /// existing name.
    pub fn update(&self, item: &Item) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "UPDATE items SET name = ?1, description = ?2, category = ?3, status = ?4, \
             priority = ?5, quantity = ?6, price = ?7, rate = ?8, active = ?9, \
             due_date = ?10, memo = ?11, updated_at = ?12 \
             WHERE id = ?13",
            params![
                item.name,
                item.description,
                item.category,
                item.status,
                item.priority,
                item.quantity,
                item.price.to_string(),
                item.rate,
                item.active,
                item.due_date,
                item.memo,
                item.updated_at,
                item.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Deletes the item with `id`. Returns `false` if no row matched.
    pub fn delete(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Counts items with exactly this name.
    pub fn count_by_name(&self, name: &str) -> StoreResult<i64> {
        let conn = self.conn.lock();
        let count = conn.query_row(
            "SELECT COUNT(*) FROM items WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Runs a filtered search, composing the WHERE clause from the present
    /// criteria. Rows come back in id order.
    pub fn search(&self, filter: &ItemFilter) -> StoreResult<Vec<Item>> {
        let mut sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE 1=1");
        let mut binds: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = &filter.name {
            sql.push_str(" AND name LIKE ?");
            binds.push(Box::new(format!("%{name}%")));
        }
        if let Some(category) = &filter.category {
            sql.push_str(" AND category = ?");
            binds.push(Box::new(category.clone()));
        }
        if let Some(status) = &filter.status {
            sql.push_str(" AND status = ?");
            binds.push(Box::new(status.clone()));
        }
        if let Some(active) = filter.active {
            sql.push_str(" AND active = ?");
            binds.push(Box::new(active));
        }
        sql.push_str(" ORDER BY id ASC");

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(binds.iter()), map_item)?;

        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }

    /// Fetches one page of items in id order.
    pub fn page(&self, limit: u64, offset: u64) -> StoreResult<Vec<Item>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY id ASC LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt.query_map(params![limit, offset], map_item)?;

        let mut items = Vec::new();
        for item in rows {
            items.push(item?);
        }
        Ok(items)
    }

    /// Counts all items.
    pub fn count_all(&self) -> StoreResult<u64> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM items", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Cheap connectivity probe for readiness checks.
    #[must_use]
    pub fn ping(&self) -> bool {
        let conn = self.conn.lock();
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .is_ok()
    }
}

/// Maps a result row to an [`Item`]. Column order must match
/// [`ITEM_COLUMNS`].
fn map_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let price_text: String = row.get(7)?;
    let price = Decimal::from_str(&price_text).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(err))
    })?;

    Ok(Item {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        status: row.get(4)?,
        priority: row.get(5)?,
        quantity: row.get(6)?,
        price,
        rate: row.get(8)?,
        active: row.get(9)?,
        due_date: row.get(10)?,
        memo: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}
