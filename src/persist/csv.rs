//! CSV file backend: header row plus one row per violation.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    core::table::{TableError, ViolationTable},
    error::{Error, ErrorKind, Result},
    types::COLUMNS,
    violation::ViolationRecord,
};

use super::TableStorage;

/// Table persisted as a UTF-8, comma separated file.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    /// Targets `path`; nothing is touched until first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn storage_err(&self, err: Error) -> Error {
        err.with_path(&self.path)
    }
}

impl TableStorage for CsvStorage {
    fn ensure_initialized(&mut self) -> Result<()> {
        let has_content = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() > 0,
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => return Err(self.storage_err(err.into())),
        };
        if has_content {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.storage_err(err.into()))?;
        }
        let file = File::create(&self.path).map_err(|err| self.storage_err(err.into()))?;
        write_table(&file, &ViolationTable::new()).map_err(|err| self.storage_err(err))?;
        file.sync_all().map_err(|err| self.storage_err(err.into()))?;
        debug!(path = %self.path.display(), "created violation file");
        Ok(())
    }

    fn load(&self) -> Result<ViolationTable> {
        let file = File::open(&self.path).map_err(|err| {
            self.storage_err(
                Error::new(ErrorKind::Storage)
                    .with_message(format!("cannot open violation file: {err}"))
                    .with_source(err),
            )
        })?;
        let table = read_table(BufReader::new(file)).map_err(|err| self.storage_err(err))?;
        debug!(path = %self.path.display(), rows = table.len(), "loaded violation file");
        Ok(table)
    }

    fn append_record(&mut self, record: &ViolationRecord) -> Result<()> {
        self.ensure_initialized()?;
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.storage_err(err.into()))?;

        if needs_newline(&mut file).map_err(|err| self.storage_err(err.into()))? {
            file.write_all(b"\n")
                .map_err(|err| self.storage_err(err.into()))?;
        }

        let mut wtr = writer_builder().from_writer(&file);
        wtr.serialize(record)
            .map_err(|err| self.storage_err(err.into()))?;
        wtr.flush().map_err(|err| self.storage_err(err.into()))?;
        drop(wtr);
        file.sync_data().map_err(|err| self.storage_err(err.into()))?;
        Ok(())
    }

    fn rewrite(&mut self, table: &ViolationTable) -> Result<()> {
        let tmp = self.tmp_path();
        let file = File::create(&tmp).map_err(|err| self.storage_err(err.into()))?;
        let mut out = BufWriter::new(file);
        write_table(&mut out, table).map_err(|err| self.storage_err(err))?;
        let file = out
            .into_inner()
            .map_err(|err| self.storage_err(err.into_error().into()))?;
        file.sync_all().map_err(|err| self.storage_err(err.into()))?;
        fs::rename(&tmp, &self.path).map_err(|err| self.storage_err(err.into()))?;
        debug!(path = %self.path.display(), rows = table.len(), "rewrote violation file");
        Ok(())
    }
}

/// Parses a header row plus violation rows.
///
/// The header must match [`COLUMNS`] exactly. Any unparseable field, unknown
/// violation type, negative fine or duplicate id is reported as a storage
/// error carrying the offending line.
pub fn read_table<R: Read>(reader: R) -> Result<ViolationTable> {
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(Error::new(ErrorKind::Storage).with_message("missing header row"));
    }
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(Error::new(ErrorKind::Storage)
            .with_message(format!(
                "unexpected header {:?}, expected {:?}",
                headers.iter().collect::<Vec<_>>(),
                COLUMNS
            ))
            .with_line(1));
    }

    let mut table = ViolationTable::new();
    let mut row = ::csv::StringRecord::new();
    while rdr.read_record(&mut row)? {
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let rec: ViolationRecord = row
            .deserialize(Some(&headers))
            .map_err(|err| Error::from(err).with_line(line))?;
        rec.validate().map_err(|err| {
            Error::new(ErrorKind::Storage)
                .with_message(err.message().unwrap_or("invalid row").to_string())
                .with_id(rec.id)
                .with_line(line)
        })?;
        if let Err(TableError::AlreadyExists(id) | TableError::MissingViolation(id)) = table.push(rec) {
            return Err(Error::new(ErrorKind::Storage)
                .with_message("duplicate violation id")
                .with_id(id)
                .with_line(line));
        }
    }
    Ok(table)
}

/// Writes the header row followed by every record, in table order.
pub fn write_table<W: Write>(writer: W, table: &ViolationTable) -> Result<()> {
    let mut wtr = writer_builder().from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for rec in table {
        wtr.serialize(rec)?;
    }
    wtr.flush()?;
    Ok(())
}

fn writer_builder() -> ::csv::WriterBuilder {
    let mut builder = ::csv::WriterBuilder::new();
    builder
        .has_headers(false)
        .terminator(::csv::Terminator::Any(b'\n'));
    builder
}

fn needs_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}
