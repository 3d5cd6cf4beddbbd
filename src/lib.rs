//! Operator utility for wiping the diagnostics database.
//!
//! The diagnostics database holds one `system_info` row per uploaded machine log
//! and seven component tables that reference it by `system_id`:
//!
//! | Table | Holds |
//! |-------|-------|
//! | **system_info** | Serial number, model, BIOS and app versions, run timestamps |
//! | **battery** | Capacities, cycle count, health and validation status |
//! | **display** | Panel name, manufacturer, resolution, EDID version |
//! | **cpu** / **memory** / **storage** | Component inventory |
//! | **motherboard** | USB controllers, PCI devices, RTC presence |
//! | **test_results** | One row per diagnostic test outcome |
//!
//! A reset deletes every row (children before the parent), restarts each
//! table's identity counter at 1, and reports the remaining row counts.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and environment variables
//! - [`db`] - Opening the database and the diagnostics table layout
//! - [`error`] - Error taxonomy classified from SQLite result codes
//! - [`reset`] - The reset sequence, identity counter reset, and row counts

pub mod config;
pub mod db;
pub mod error;
pub mod reset;

pub use error::ResetError;
pub use reset::{clear_database, ResetReport};
