//! Post-condition row counts for operator verification.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::schema::ALL_TABLES;
use crate::error::ResetError;

/// Row count of one diagnostics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table_name: String,
    pub row_count: u64,
}

/// Count rows in every diagnostics table, in report order.
pub fn row_counts(conn: &Connection) -> Result<Vec<TableCount>, ResetError> {
    ALL_TABLES
        .iter()
        .map(|table| {
            Ok::<_, ResetError>(TableCount {
                table_name: table.to_string(),
                row_count: table_row_count(conn, table)?,
            })
        })
        .collect()
}

/// Count rows in a single table. `table` must be one of the known diagnostics tables.
pub fn table_row_count(conn: &Connection, table: &str) -> Result<u64, ResetError> {
    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })?;
    Ok(count as u64)
}
