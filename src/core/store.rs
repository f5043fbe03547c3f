use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    core::table::ViolationTable,
    error::{Error, ErrorKind, Result},
    persist::{TableStorage, csv::CsvStorage},
    types::{Fine, ViolationId},
    violation::{ViolationDraft, ViolationRecord},
};

/// Record store: owns the backing storage and hands out ids.
///
/// Every read loads the whole table from storage. Appends write a single row;
/// fine updates and deletions rewrite the full table before returning.
///
/// Ids are never handed out twice by one store value. The high-water mark
/// lives in memory only: a store opened later (e.g. the next CLI invocation)
/// starts from the largest id in the file, so the id of a deleted newest
/// record can be assigned again.
#[derive(Debug)]
pub struct RecordStore<S: TableStorage = CsvStorage> {
    storage: S,
    high_water: ViolationId,
}

impl RecordStore<CsvStorage> {
    /// Opens the CSV file at `path`, creating it (header only) if absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let mut store = Self::with_storage(CsvStorage::new(path));
        store.initialize()?;
        Ok(store)
    }
}

impl<S: TableStorage> RecordStore<S> {
    /// Wraps `storage` without touching it.
    pub fn with_storage(storage: S) -> Self {
        Self {
            storage,
            high_water: 0,
        }
    }

    /// Backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Ensures storage exists with the canonical header. Idempotent.
    pub fn initialize(&mut self) -> Result<()> {
        self.storage.ensure_initialized()
    }

    /// Next id to assign: one past the largest id ever seen, `1` when there is none.
    ///
    /// An unreadable table counts as empty here. Saturates at `u64::MAX`,
    /// which [`Self::log`] refuses to assign.
    pub fn next_id(&mut self) -> ViolationId {
        self.highest_seen().saturating_add(1)
    }

    fn highest_seen(&mut self) -> ViolationId {
        let max_stored = match self.storage.load() {
            Ok(table) => table.max_id().unwrap_or(0),
            Err(err) => {
                warn!(error = %err, "cannot read violations for id assignment");
                0
            }
        };
        self.high_water = self.high_water.max(max_stored);
        self.high_water
    }

    /// Appends one record without rewriting existing rows.
    ///
    /// Storage that cannot be read is never appended to.
    pub fn append(&mut self, record: &ViolationRecord) -> Result<()> {
        record.validate()?;
        self.storage.ensure_initialized()?;
        let table = self.storage.load()?;
        if table.contains(record.id) {
            return Err(Error::new(ErrorKind::Validation)
                .with_message("violation id already exists")
                .with_id(record.id));
        }
        self.storage.append_record(record)?;
        self.high_water = self.high_water.max(record.id);
        info!(
            id = record.id,
            plate = %record.license_plate,
            violation = %record.violation_type,
            fine = record.fine,
            "violation appended"
        );
        Ok(())
    }

    /// Assigns an id and the default fine to `draft`, then appends it.
    pub fn log(&mut self, draft: ViolationDraft) -> Result<ViolationRecord> {
        let highest = self.highest_seen();
        let id = highest.checked_add(1).ok_or_else(|| {
            Error::new(ErrorKind::Storage)
                .with_message("violation ids exhausted")
                .with_id(highest)
        })?;
        let record = draft.into_record(id);
        self.append(&record)?;
        Ok(record)
    }

    /// Loads the full table in stored order.
    pub fn load_all(&self) -> Result<ViolationTable> {
        self.storage.load()
    }

    /// Replaces the fine of `id` and rewrites storage. Returns the previous fine.
    pub fn update_fine(&mut self, id: ViolationId, fine: Fine) -> Result<Fine> {
        if fine < 0 {
            return Err(Error::new(ErrorKind::Validation)
                .with_message(format!("fine must not be negative, got {fine}"))
                .with_id(id));
        }
        let mut table = self.storage.load()?;
        let prev = table.set_fine(id, fine)?;
        self.storage.rewrite(&table)?;
        info!(id, prev, fine, "violation fine updated");
        Ok(prev)
    }

    /// Removes `id` and rewrites storage with the remaining records.
    pub fn delete_by_id(&mut self, id: ViolationId) -> Result<ViolationRecord> {
        let mut table = self.storage.load()?;
        self.high_water = self.high_water.max(table.max_id().unwrap_or(0));
        let removed = table.remove(id)?;
        self.storage.rewrite(&table)?;
        info!(id, remaining = table.len(), "violation deleted");
        Ok(removed)
    }
}
