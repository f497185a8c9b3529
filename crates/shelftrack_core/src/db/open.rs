//! Opening inventory databases.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections are stamped with `schema::SCHEMA_VERSION`.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) an inventory database file.
///
/// # Side effects
/// - Creates the file and the `authors`/`books` tables when missing.
/// - Emits one `db_open` log event with duration and outcome.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a throwaway in-memory inventory database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened = connect().map_err(DbError::from).and_then(|mut conn| {
        let created = prepare_connection(&mut conn)?;
        Ok((conn, created))
    });
    let duration_ms = started_at.elapsed().as_millis();

    match opened {
        Ok((conn, created)) => {
            let schema = if created { "created" } else { "current" };
            info!("event=db_open module=db status=ok mode={mode} schema={schema} duration_ms={duration_ms}");
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={duration_ms} error_code={} error={err}",
                err.code()
            );
            Err(err)
        }
    }
}

/// Applies connection pragmas, then the schema. Returns whether tables were created.
fn prepare_connection(conn: &mut Connection) -> DbResult<bool> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    ensure_schema(conn)
}
