//! Best-effort identity counter reset.
//!
//! SQLite keeps the high-water mark of every AUTOINCREMENT table in
//! `sqlite_sequence`. Removing a table's entry makes its next insert start at 1
//! once the table is empty. Tables without an entry (never inserted into, or not
//! declared AUTOINCREMENT) are skipped rather than treated as failures.

use rusqlite::Connection;
use serde::Serialize;

use crate::db::schema::{self, ALL_TABLES};
use crate::error::ResetError;

/// Why a table's identity object could not be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Missing {
    /// The database has no `sqlite_sequence` table at all.
    NoSequenceTable,
    /// `sqlite_sequence` exists but holds no entry for this table.
    NoSequenceEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SequenceStatus {
    Reset,
    Skipped(Missing),
    Failed(String),
}

/// Outcome of resetting one table's identity counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceOutcome {
    pub table: String,
    /// Display name of the identity object, `<table>_id_seq`.
    pub sequence: String,
    pub status: SequenceStatus,
}

pub fn sequence_name(table: &str) -> String {
    format!("{table}_id_seq")
}

/// Reset the identity counter of every diagnostics table.
///
/// Per-table problems are recorded in the returned outcomes. Errors after which
/// SQLite has already rolled back the enclosing transaction are returned instead,
/// so later resets never run outside it.
pub fn reset_sequences(conn: &Connection) -> Result<Vec<SequenceOutcome>, ResetError> {
    let has_sequence_table = schema::has_sequence_table(conn)?;

    let mut outcomes = Vec::with_capacity(ALL_TABLES.len());
    for table in ALL_TABLES {
        let status = if !has_sequence_table {
            SequenceStatus::Skipped(Missing::NoSequenceTable)
        } else {
            match reset_sequence(conn, table) {
                Ok(()) => SequenceStatus::Reset,
                Err(ResetError::ObjectNotFound(_)) => {
                    SequenceStatus::Skipped(Missing::NoSequenceEntry)
                }
                Err(e) if e.aborts_transaction() => return Err(e),
                Err(e) => {
                    tracing::warn!(table, error = %e, "could not reset sequence");
                    SequenceStatus::Failed(e.to_string())
                }
            }
        };
        tracing::debug!(table, status = ?status, "sequence reset");

        outcomes.push(SequenceOutcome {
            table: table.to_string(),
            sequence: sequence_name(table),
            status,
        });
    }

    Ok(outcomes)
}

/// Remove one table's `sqlite_sequence` entry.
///
/// Returns [`ResetError::ObjectNotFound`] if there was no entry to remove.
pub fn reset_sequence(conn: &Connection, table: &str) -> Result<(), ResetError> {
    let removed = conn.execute("DELETE FROM sqlite_sequence WHERE name = ?1", [table])?;
    if removed == 0 {
        return Err(ResetError::ObjectNotFound(sequence_name(table)));
    }
    Ok(())
}
