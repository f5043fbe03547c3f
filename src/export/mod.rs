//! Report exports: delimited text and a paginated PDF document.

/// Delimited-text export.
pub mod delimited;
/// Paginated table layout.
pub mod document;
/// Low level PDF writer.
pub mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::{
    core::table::ViolationTable,
    error::{Error, Result},
    types::COLUMNS,
};

/// MIME type of the delimited-text export.
pub const CSV_MIME: &str = "text/csv";
/// MIME type of the document export.
pub const PDF_MIME: &str = "application/pdf";

/// Renders `table` as a paginated, bordered PDF document titled `title`.
pub fn to_paginated_document(table: &ViolationTable, title: &str) -> Vec<u8> {
    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|rec| {
            vec![
                rec.id.to_string(),
                rec.license_plate.clone(),
                rec.violation_type.to_string(),
                rec.fine.to_string(),
                rec.timestamp.to_string(),
            ]
        })
        .collect();
    document::render(title, &COLUMNS, &rows)
}

/// Export payload ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Caller chosen file name.
    pub file_name: String,
    /// Fixed MIME designation for the format.
    pub mime: &'static str,
    /// Serialized content.
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Delimited-text export of `table`.
    pub fn csv(table: &ViolationTable, file_name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            file_name: file_name.into(),
            mime: CSV_MIME,
            bytes: delimited::to_delimited_text(table)?,
        })
    }

    /// Document export of `table`.
    pub fn pdf(table: &ViolationTable, file_name: impl Into<String>, title: &str) -> Self {
        Self {
            file_name: file_name.into(),
            mime: PDF_MIME,
            bytes: to_paginated_document(table, title),
        }
    }

    /// Writes the payload as `dir/file_name` and returns the path.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, &self.bytes).map_err(|err| Error::from(err).with_path(&path))?;
        info!(path = %path.display(), mime = self.mime, bytes = self.bytes.len(), "report exported");
        Ok(path)
    }
}
