//! Traffic violation records kept in a flat CSV file, with search, trend
//! reporting and CSV / PDF export.
//!
//! # Examples
//!
//! In-memory usage with [`persist::memory::MemoryStorage`]:
//! ```
//! use time::macros::date;
//! use trafficlog::{
//!     core::store::RecordStore,
//!     persist::memory::MemoryStorage,
//!     query,
//!     types::ViolationType,
//!     violation::ViolationDraft,
//! };
//!
//! let mut store = RecordStore::with_storage(MemoryStorage::new());
//! store.initialize().expect("init");
//! let rec = store.log(ViolationDraft {
//!     license_plate: "MH12AB1234".to_string(),
//!     violation_type: ViolationType::Speeding,
//!     date: date!(2024 - 03 - 01),
//! }).expect("log");
//! assert_eq!((rec.id, rec.fine), (1, 500));
//!
//! let table = store.load_all().expect("load");
//! assert_eq!(query::find_by_plate(&table, "MH12AB1234").len(), 1);
//! ```
//!
//! File-backed usage and export:
//! ```no_run
//! use trafficlog::{core::store::RecordStore, export::Artifact};
//!
//! let mut store = RecordStore::open("Violations.csv").expect("open");
//! store.update_fine(2, 2500).expect("update");
//! let table = store.load_all().expect("load");
//! Artifact::pdf(&table, "Report.pdf", "Traffic Violation Report")
//!     .write_to(".")
//!     .expect("export");
//! ```
#![warn(missing_docs)]

/// Settings and defaults.
pub mod config;
/// In-memory table and the record store.
pub mod core;
/// Error taxonomy.
pub mod error;
/// CSV and PDF report exports.
pub mod export;
/// Storage backends.
pub mod persist;
/// Read-only queries and aggregates.
pub mod query;
/// Shared primitive types and the fine schedule.
pub mod types;
/// Violation records and drafts.
pub mod violation;
