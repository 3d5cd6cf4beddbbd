#![allow(dead_code)]

use diagreset::db::schema;
use rusqlite::{params, Connection};

/// Open a fresh in-memory database with foreign keys enforced and the diagnostics schema.
pub fn test_db() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.pragma_update(None, "foreign_keys", "ON").unwrap();
    schema::init_schema(&conn).unwrap();
    conn
}

/// Insert a `system_info` row and return its id.
pub fn insert_system(conn: &Connection, serial: &str) -> i64 {
    conn.execute(
        "INSERT INTO system_info (serial_number, machine_model, bios_version)
         VALUES (?1, 'ThinkPad T14 Gen 2', 'N34ET58W')",
        params![serial],
    )
    .unwrap();
    conn.last_insert_rowid()
}

pub fn insert_battery(conn: &Connection, system_id: i64, cycles: i64) {
    conn.execute(
        "INSERT INTO battery (system_id, manufacturer, design_capacity, full_charge_capacity, cycles, validation_status)
         VALUES (?1, 'SMP', '57000 mWh', '50270 mWh', ?2, 'GOOD')",
        params![system_id, cycles],
    )
    .unwrap();
}

pub fn insert_test_result(conn: &Connection, system_id: i64, test_name: &str, passed: bool) {
    conn.execute(
        "INSERT INTO test_results (system_id, test_name, result, passed) VALUES (?1, ?2, ?3, ?4)",
        params![system_id, test_name, if passed { "PASS" } else { "FAIL" }, passed],
    )
    .unwrap();
}

/// One row in each of the eight tables for the given system.
pub fn insert_full_record(conn: &Connection, serial: &str) -> i64 {
    let id = insert_system(conn, serial);
    insert_battery(conn, id, 120);
    insert_test_result(conn, id, "Memory Test", true);
    conn.execute_batch(&format!(
        "INSERT INTO display (system_id, name, width, height) VALUES ({id}, 'LEN40BA', 1920, 1080);
         INSERT INTO cpu (system_id, model, cores, threads) VALUES ({id}, 'i5-1135G7', 4, 8);
         INSERT INTO memory (system_id, total_memory, module_count) VALUES ({id}, '16 GB', 2);
         INSERT INTO storage (system_id, model, protocol) VALUES ({id}, 'SAMSUNG MZVLB512', 'NVMe');
         INSERT INTO motherboard (system_id, usb_controllers, pci_devices, rtc_present) VALUES ({id}, 3, 24, 1);"
    ))
    .unwrap();
    id
}

pub fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
