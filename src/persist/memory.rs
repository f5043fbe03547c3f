use crate::{
    core::table::ViolationTable,
    error::{Error, ErrorKind, Result},
    violation::ViolationRecord,
};

use super::TableStorage;

/// Keeps the table in process memory. `None` means "not created yet".
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    rows: Option<Vec<ViolationRecord>>,
}

impl MemoryStorage {
    /// Storage that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `rows`, taken as already persisted.
    pub fn with_rows(rows: Vec<ViolationRecord>) -> Self {
        Self { rows: Some(rows) }
    }
}

impl TableStorage for MemoryStorage {
    fn ensure_initialized(&mut self) -> Result<()> {
        self.rows.get_or_insert_with(Vec::new);
        Ok(())
    }

    fn load(&self) -> Result<ViolationTable> {
        let rows = self.rows.clone().ok_or_else(|| {
            Error::new(ErrorKind::Storage).with_message("storage has not been initialized")
        })?;
        ViolationTable::from_records(rows).map_err(|err| {
            Error::new(ErrorKind::Storage).with_message(format!("corrupt table: {err:?}"))
        })
    }

    fn append_record(&mut self, record: &ViolationRecord) -> Result<()> {
        self.rows.get_or_insert_with(Vec::new).push(record.clone());
        Ok(())
    }

    fn rewrite(&mut self, table: &ViolationTable) -> Result<()> {
        self.rows = Some(table.records().to_vec());
        Ok(())
    }
}
