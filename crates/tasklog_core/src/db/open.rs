//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Release connections with close errors surfaced to the caller.
//!
//! # Invariants
//! - With default options returned connections have `foreign_keys=ON`.
//! - No busy timeout is configured; a locked store fails fast instead of
//!   retrying.

use super::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Connection-level settings applied right after opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Enforce `tasks.project_id -> projects.id` in the store.
    pub foreign_keys: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self { foreign_keys: true }
    }
}

/// Opens (creating if absent) a SQLite database file with default options.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with(path, OpenOptions::default())
}

/// Opens a SQLite database file with explicit options.
///
/// # Errors
/// - Returns `DbError::Sqlite` when the file cannot be opened or created
///   (missing parent directory, permission denied, not a database).
pub fn open_db_with(path: impl AsRef<Path>, options: OpenOptions) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=file duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, options, "file", started_at)
}

/// Opens an in-memory SQLite database with default options.
///
/// Mostly useful for tests; the data disappears with the handle.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode=memory duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, OpenOptions::default(), "memory", started_at)
}

/// Releases the connection handle.
///
/// Dropping a `Connection` also closes it; this variant reports failures
/// instead of swallowing them.
pub fn close_db(conn: Connection) -> DbResult<()> {
    match conn.close() {
        Ok(()) => {
            info!("event=db_close module=db status=ok");
            Ok(())
        }
        Err((_conn, err)) => {
            warn!(
                "event=db_close module=db status=error error_code=db_close_failed error={}",
                err
            );
            Err(DbError::Close(err))
        }
    }
}

fn finish_open(
    conn: Connection,
    options: OpenOptions,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    match configure_connection(&conn, options) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} foreign_keys={} duration_ms={}",
                mode,
                options.foreign_keys,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_configure_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn configure_connection(conn: &Connection, options: OpenOptions) -> DbResult<()> {
    let flag = if options.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {flag};"))?;
    Ok(())
}
