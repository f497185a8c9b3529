//! Inventory schema bootstrap.
//!
//! There is exactly one schema version. A fresh (or unstamped) database gets
//! the `authors`/`books` DDL and is stamped in the same transaction; a
//! database stamped by a newer build is refused untouched.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const INVENTORY_DDL: &str = include_str!("inventory.sql");

/// Returns the schema version written by this binary.
pub fn latest_version() -> u32 {
    SCHEMA_VERSION
}

/// Makes sure the inventory tables exist.
///
/// Returns `true` when the DDL ran on this call.
pub(crate) fn ensure_schema(conn: &mut Connection) -> DbResult<bool> {
    let found = stamped_version(conn)?;
    match found.cmp(&SCHEMA_VERSION) {
        Ordering::Greater => Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        }),
        Ordering::Equal => Ok(false),
        Ordering::Less => {
            let tx = conn.transaction()?;
            tx.execute_batch(INVENTORY_DDL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(true)
        }
    }
}

/// Reads `PRAGMA user_version`.
pub fn stamped_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
