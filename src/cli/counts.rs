use anyhow::{Context, Result};

use diagreset::config::DiagResetConfig;
use diagreset::db;
use diagreset::reset::row_counts;

/// Display row counts of every diagnostics table.
pub fn counts(config: &DiagResetConfig, json: bool) -> Result<()> {
    let db_path = config.resolved_db_path();
    let conn = db::open_database_read_only(&db_path)?;

    let counts = row_counts(&conn).context("failed to count rows")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Database: {}", db_path.display());
    println!();
    super::print_counts(&counts);
    Ok(())
}
