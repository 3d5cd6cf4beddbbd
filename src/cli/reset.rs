//! CLI `reset` command: wipe every diagnostics table after user confirmation.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use diagreset::config::DiagResetConfig;
use diagreset::reset::{ResetReport, SequenceStatus};

/// Delete all diagnostics data after user confirmation.
pub fn reset(config: &DiagResetConfig, assume_yes: bool, json: bool) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !assume_yes {
        eprintln!("WARNING: This will permanently delete ALL rows from system_info, battery,");
        eprintln!("display, cpu, memory, storage, motherboard and test_results.");
        eprintln!("Database: {}", db_path.display());

        let stdin = std::io::stdin();
        if !confirm(&mut stdin.lock(), &mut std::io::stderr())? {
            bail!("reset cancelled");
        }
    }

    let mut conn = diagreset::db::open_database(&db_path)?;
    let report = diagreset::clear_database(&mut conn)
        .with_context(|| format!("failed to clear {}", db_path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// Ask for `YES` on `output`, read one line from `input`.
fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "\nType YES to confirm: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim() == "YES")
}

fn print_report(report: &ResetReport) {
    super::print_counts(&report.counts);
    println!();

    println!("Sequences:");
    for s in &report.sequences {
        let status = match &s.status {
            SequenceStatus::Reset => "reset".to_string(),
            SequenceStatus::Skipped(_) => "skipped (not found)".to_string(),
            SequenceStatus::Failed(e) => format!("FAILED ({e})"),
        };
        println!("  {:<22} {}", s.sequence, status);
    }
    println!();

    println!("{}", report.message);
}
