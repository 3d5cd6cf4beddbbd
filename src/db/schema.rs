//! Table layout of the diagnostics database.
//!
//! The ingestion process owns this schema; the DDL here mirrors what it
//! creates so fixtures can be built and the reset can verify its targets exist.

use rusqlite::Connection;

/// Parent table referenced by every other diagnostics table.
pub const PARENT_TABLE: &str = "system_info";

/// Tables holding a `system_id` foreign key to [`PARENT_TABLE`], in deletion order.
pub const DEPENDENT_TABLES: [&str; 7] = [
    "test_results",
    "motherboard",
    "storage",
    "memory",
    "cpu",
    "display",
    "battery",
];

/// All eight tables in report order.
pub const ALL_TABLES: [&str; 8] = [
    "system_info",
    "battery",
    "display",
    "cpu",
    "memory",
    "storage",
    "motherboard",
    "test_results",
];

/// DDL for the eight diagnostics tables. Identity columns use AUTOINCREMENT so
/// each table gets a `sqlite_sequence` entry.
pub const DIAGNOSTICS_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS system_info (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    serial_number TEXT NOT NULL,
    machine_model TEXT,
    machine_type_model TEXT,
    bios_version TEXT,
    app_version TEXT,
    execution_type TEXT,
    start_time TEXT,
    finish_time TEXT
);

CREATE TABLE IF NOT EXISTS battery (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    serial_number TEXT,
    manufacturer TEXT,
    design_capacity TEXT,
    full_charge_capacity TEXT,
    cycles INTEGER,
    health_percentage REAL,
    validation_status TEXT,
    validation_message TEXT
);

CREATE TABLE IF NOT EXISTS display (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    name TEXT,
    manufacturer_id TEXT,
    width INTEGER,
    height INTEGER,
    edid_version TEXT
);

CREATE TABLE IF NOT EXISTS cpu (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    model TEXT,
    manufacturer TEXT,
    cores INTEGER,
    threads INTEGER,
    current_speed TEXT,
    cache_l1 TEXT,
    cache_l2 TEXT,
    cache_l3 TEXT
);

CREATE TABLE IF NOT EXISTS memory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    total_memory TEXT,
    module_count INTEGER,
    module_type TEXT,
    module_manufacturer TEXT,
    module_size TEXT,
    module_speed TEXT,
    module_part_number TEXT
);

CREATE TABLE IF NOT EXISTS storage (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    model TEXT,
    serial_number TEXT,
    size TEXT,
    protocol TEXT,
    firmware TEXT,
    temperature TEXT
);

CREATE TABLE IF NOT EXISTS motherboard (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    usb_controllers INTEGER,
    pci_devices INTEGER,
    rtc_present INTEGER
);

CREATE TABLE IF NOT EXISTS test_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    system_id INTEGER NOT NULL REFERENCES system_info(id),
    test_name TEXT NOT NULL,
    result TEXT,
    passed INTEGER
);
"#;

/// Create the diagnostics tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(DIAGNOSTICS_SCHEMA_SQL)
}

/// Names from [`ALL_TABLES`] that do not exist in the database.
pub fn missing_tables(conn: &Connection) -> rusqlite::Result<Vec<String>> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

    let mut missing = Vec::new();
    for table in ALL_TABLES {
        let exists: bool = stmt.query_row([table], |row| row.get(0))?;
        if !exists {
            missing.push(table.to_string());
        }
    }
    Ok(missing)
}

/// Whether the engine's identity bookkeeping table (`sqlite_sequence`) exists.
pub fn has_sequence_table(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
        [],
        |row| row.get(0),
    )
}
