//! The reset sequence: empty every diagnostics table, restart identity counters,
//! and report what is left.
//!
//! Dependents are always deleted before [`PARENT_TABLE`] so the foreign keys from
//! the seven child tables never see an orphaned row. Deletes and counter resets
//! share one savepoint; any failure rolls the whole sequence back. The savepoint
//! nests inside a transaction the caller may already hold.

pub mod counts;
pub mod sequences;

use rusqlite::Connection;
use serde::Serialize;

use crate::db::schema::{self, DEPENDENT_TABLES, PARENT_TABLE};
use crate::error::ResetError;

pub use counts::{row_counts, TableCount};
pub use sequences::{reset_sequences, Missing, SequenceOutcome, SequenceStatus};

/// Printed after a successful reset.
pub const SUCCESS_MESSAGE: &str = "Database cleared successfully! All tables are now empty.";

/// Rows removed from one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDeletion {
    pub table: String,
    pub rows_deleted: usize,
}

/// Everything a completed reset did, in order.
#[derive(Debug, Clone, Serialize)]
pub struct ResetReport {
    pub deleted: Vec<TableDeletion>,
    pub sequences: Vec<SequenceOutcome>,
    pub counts: Vec<TableCount>,
    pub message: String,
    pub completed_at: String,
}

impl ResetReport {
    pub fn all_empty(&self) -> bool {
        self.counts.iter().all(|c| c.row_count == 0)
    }

    pub fn total_deleted(&self) -> usize {
        self.deleted.iter().map(|d| d.rows_deleted).sum()
    }
}

/// Delete all rows from every diagnostics table and restart identity counters.
///
/// Fails with [`ResetError::MissingTables`] before touching anything if any of
/// the eight tables is absent.
pub fn clear_database(conn: &mut Connection) -> Result<ResetReport, ResetError> {
    let missing = schema::missing_tables(conn)?;
    if !missing.is_empty() {
        return Err(ResetError::MissingTables(missing));
    }

    let sp = conn.savepoint()?;

    let mut deleted = delete_dependents(&sp)?;
    deleted.push(delete_parent(&sp)?);
    let sequences = reset_sequences(&sp)?;

    sp.commit()?;

    let counts = row_counts(conn)?;
    let report = ResetReport {
        deleted,
        sequences,
        counts,
        message: SUCCESS_MESSAGE.to_string(),
        completed_at: chrono::Utc::now().to_rfc3339(),
    };

    if !report.all_empty() {
        tracing::warn!("rows remain after reset; another writer may be active");
    }
    tracing::info!(rows_deleted = report.total_deleted(), "database cleared");
    Ok(report)
}

/// Delete all rows from the seven tables referencing [`PARENT_TABLE`].
pub fn delete_dependents(conn: &Connection) -> Result<Vec<TableDeletion>, ResetError> {
    DEPENDENT_TABLES
        .iter()
        .map(|table| delete_all(conn, table))
        .collect()
}

/// Delete all rows from [`PARENT_TABLE`].
///
/// Fails with [`ResetError::ReferentialIntegrity`] if dependent rows still exist.
pub fn delete_parent(conn: &Connection) -> Result<TableDeletion, ResetError> {
    delete_all(conn, PARENT_TABLE)
}

fn delete_all(conn: &Connection, table: &str) -> Result<TableDeletion, ResetError> {
    let rows_deleted = conn.execute(&format!("DELETE FROM {table}"), [])?;
    tracing::info!(table, rows_deleted, "deleted rows");
    Ok(TableDeletion {
        table: table.to_string(),
        rows_deleted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::init_schema;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn report_lists_parent_last() {
        let mut conn = test_db();
        let report = clear_database(&mut conn).unwrap();

        assert_eq!(report.deleted.len(), 8);
        assert_eq!(report.deleted.last().unwrap().table, PARENT_TABLE);
        assert_eq!(report.message, SUCCESS_MESSAGE);
        assert!(report.all_empty());
    }

    #[test]
    fn total_deleted_sums_tables() {
        let mut conn = test_db();
        conn.execute_batch(
            "INSERT INTO system_info (serial_number) VALUES ('PF1ABCDE');
             INSERT INTO cpu (system_id, model) VALUES (1, 'i7-1165G7');
             INSERT INTO display (system_id, name) VALUES (1, 'LEN40BA');",
        )
        .unwrap();

        let report = clear_database(&mut conn).unwrap();
        assert_eq!(report.total_deleted(), 3);
    }

    #[test]
    fn missing_tables_abort_before_deleting() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE system_info (id INTEGER PRIMARY KEY, serial_number TEXT);
             INSERT INTO system_info (serial_number) VALUES ('PF1ABCDE');",
        )
        .unwrap();

        let err = clear_database(&mut conn).unwrap_err();
        assert!(matches!(err, ResetError::MissingTables(ref t) if t.len() == 7));

        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM system_info", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[test]
    fn report_serializes_counts_with_table_name_and_row_count() {
        let mut conn = test_db();
        let report = clear_database(&mut conn).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"][0]["table_name"], "system_info");
        assert_eq!(json["counts"][0]["row_count"], 0);
        assert_eq!(json["message"], SUCCESS_MESSAGE);
    }
}
