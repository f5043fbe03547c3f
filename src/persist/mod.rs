//! Persistence seam for the record store.

/// Comma-separated file backend.
pub mod csv;
/// Process-local backend for tests and embedding.
pub mod memory;

use crate::{core::table::ViolationTable, error::Result, violation::ViolationRecord};

/// Backing storage for a [`crate::core::store::RecordStore`].
///
/// Implementations persist the whole table; `append_record` is the cheap path
/// and must not rewrite existing rows, `rewrite` replaces everything.
pub trait TableStorage {
    /// Creates empty storage (header only) when none exists. Idempotent.
    fn ensure_initialized(&mut self) -> Result<()>;
    /// Reads the full table in stored order.
    fn load(&self) -> Result<ViolationTable>;
    /// Adds one record after the existing ones.
    fn append_record(&mut self, record: &ViolationRecord) -> Result<()>;
    /// Replaces the stored table with `table`.
    fn rewrite(&mut self, table: &ViolationTable) -> Result<()>;
}
