//! In-memory table and the record store built on top of it.

/// Record store: id assignment, append, update and delete.
pub mod store;
/// Ordered violation table.
pub mod table;
