//! Delimited-text export; same shape as the storage file.

use crate::{core::table::ViolationTable, error::Result, persist::csv::write_table};

/// Header row plus one row per record, canonical column order.
pub fn to_delimited_text(table: &ViolationTable) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    write_table(&mut out, table)?;
    Ok(out)
}
