pub mod counts;
pub mod reset;

use diagreset::reset::TableCount;

/// Print row counts as a two-column `table_name | row_count` table.
fn print_counts(counts: &[TableCount]) {
    println!("{:<14} | {}", "table_name", "row_count");
    println!("{}", "-".repeat(28));
    for c in counts {
        println!("{:<14} | {}", c.table_name, c.row_count);
    }
}
