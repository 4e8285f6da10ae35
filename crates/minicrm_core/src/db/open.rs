//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas, run migrations, seed defaults.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have migrations fully applied.
//! - Connections from `open_db`/`open_db_in_memory` hold at least one
//!   template; `open_db_unseeded` never inserts one.

use super::migrations::apply_migrations;
use super::seed::seed_default_template;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Opens (or creates) a SQLite database file and prepares it for use.
///
/// Missing parent directories are created first. An empty `templates`
/// table gets the default template.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_file(path.as_ref(), Seeding::Seed)
}

/// Same as [`open_db`] but leaves an empty `templates` table empty.
///
/// For long-lived front-ends that seed on their first open only.
pub fn open_db_unseeded(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_file(path.as_ref(), Seeding::Skip)
}

fn open_file(path: &Path, seeding: Seeding) -> DbResult<Connection> {
    open_with("file", seeding, || {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Connection::open(path)?)
    })
}

/// Opens an in-memory SQLite database and prepares it for use.
///
/// Used by tests and throwaway sessions.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", Seeding::Seed, || {
        Ok(Connection::open_in_memory()?)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Seeding {
    Seed,
    Skip,
}

fn open_with(
    mode: &'static str,
    seeding: Seeding,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_connection(&mut conn, seeding) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection, seeding: Seeding) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    if seeding == Seeding::Seed {
        seed_default_template(conn)?;
    }
    Ok(())
}
