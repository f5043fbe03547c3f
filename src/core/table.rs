use hashbrown::HashMap;

use crate::{
    error::{Error, ErrorKind},
    types::{Fine, ViolationId},
    violation::ViolationRecord,
};

/// Failures of in-memory table mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// No record carries this id.
    MissingViolation(ViolationId),
    /// A record with this id is already present.
    AlreadyExists(ViolationId),
}

impl From<TableError> for Error {
    fn from(value: TableError) -> Self {
        match value {
            TableError::MissingViolation(id) => Error::new(ErrorKind::NotFound)
                .with_message("violation id not found")
                .with_id(id),
            TableError::AlreadyExists(id) => Error::new(ErrorKind::Validation)
                .with_message("violation id already exists")
                .with_id(id),
        }
    }
}

/// Ordered violation table with an id → position index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationTable {
    records: Vec<ViolationRecord>,
    pos: HashMap<ViolationId, usize>,
}

impl ViolationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table, rejecting duplicate ids.
    pub fn from_records(records: Vec<ViolationRecord>) -> Result<Self, TableError> {
        let mut table = Self::new();
        for rec in records {
            table.push(rec)?;
        }
        Ok(table)
    }

    pub fn push(&mut self, rec: ViolationRecord) -> Result<(), TableError> {
        if self.pos.contains_key(&rec.id) {
            return Err(TableError::AlreadyExists(rec.id));
        }
        self.pos.insert(rec.id, self.records.len());
        self.records.push(rec);
        Ok(())
    }

    pub fn get(&self, id: ViolationId) -> Option<&ViolationRecord> {
        self.pos.get(&id).map(|idx| &self.records[*idx])
    }

    pub fn contains(&self, id: ViolationId) -> bool {
        self.pos.contains_key(&id)
    }

    pub fn records(&self) -> &[ViolationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViolationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest id present, `None` when empty.
    pub fn max_id(&self) -> Option<ViolationId> {
        self.records.iter().map(|rec| rec.id).max()
    }

    /// Sets the fine of `id`, returning the previous amount.
    pub fn set_fine(&mut self, id: ViolationId, fine: Fine) -> Result<Fine, TableError> {
        let idx = *self.pos.get(&id).ok_or(TableError::MissingViolation(id))?;
        let rec = &mut self.records[idx];
        Ok(std::mem::replace(&mut rec.fine, fine))
    }

    /// Removes `id`, keeping the remaining records in order.
    pub fn remove(&mut self, id: ViolationId) -> Result<ViolationRecord, TableError> {
        let idx = self.pos.remove(&id).ok_or(TableError::MissingViolation(id))?;
        let removed = self.records.remove(idx);
        for rec in &self.records[idx..] {
            if let Some(p) = self.pos.get_mut(&rec.id) {
                *p -= 1;
            }
        }
        Ok(removed)
    }

    pub fn into_records(self) -> Vec<ViolationRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a ViolationTable {
    type Item = &'a ViolationRecord;
    type IntoIter = std::slice::Iter<'a, ViolationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
