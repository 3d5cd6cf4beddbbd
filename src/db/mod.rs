pub mod schema;

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::Duration;

use crate::error::ResetError;

const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Open an existing diagnostics database for reading and writing.
///
/// Never creates the file: a missing database is a [`ResetError::Connection`].
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection, ResetError> {
    open_with(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_WRITE)
}

/// Open an existing diagnostics database without write access.
pub fn open_database_read_only(path: impl AsRef<Path>) -> Result<Connection, ResetError> {
    open_with(path.as_ref(), OpenFlags::SQLITE_OPEN_READ_ONLY)
}

fn open_with(path: &Path, mode: OpenFlags) -> Result<Connection, ResetError> {
    let flags = mode | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags)
        .map_err(|e| ResetError::Connection(format!("{}: {e}", path.display())))?;

    conn.busy_timeout(BUSY_TIMEOUT)?;
    // Enforce FKs so out-of-order deletes fail instead of orphaning rows
    conn.pragma_update(None, "foreign_keys", "ON")?;

    // Touch the schema so a file that is not a database fails here, not mid-reset
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))?;

    tracing::info!(path = %path.display(), "database opened");
    Ok(conn)
}
