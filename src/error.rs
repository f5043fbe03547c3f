//! Error taxonomy shared by the store, query and export layers.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::types::ViolationId;

/// Broad failure category; drives the process exit code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Input has the wrong shape (negative fine, duplicate id).
    Validation,
    /// A referenced violation id is absent.
    NotFound,
    /// The backing file is missing, corrupt or unwritable.
    Storage,
    /// A date, number or label supplied by the caller failed to parse.
    Parse,
}

/// Error value with optional context attached through builder methods.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    path: Option<PathBuf>,
    id: Option<ViolationId>,
    line: Option<u64>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Creates an error of `kind` with no context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            path: None,
            id: None,
            line: None,
            source: None,
        }
    }

    /// Returns the failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the human readable message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the violation id involved, if any.
    pub fn id(&self) -> Option<ViolationId> {
        self.id
    }

    /// Attaches a message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the file path involved.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attaches the violation id involved.
    pub fn with_id(mut self, id: ViolationId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attaches a 1-based line number within the backing file.
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches the underlying cause.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(id) = self.id {
            write!(f, " (id: {id})")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {line})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::Storage)
            .with_message(value.to_string())
            .with_source(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        let line = value.position().map(|pos| pos.line());
        let err = Self::new(ErrorKind::Storage).with_message(value.to_string());
        let err = match line {
            Some(line) => err.with_line(line),
            None => err,
        };
        err.with_source(value)
    }
}

/// Maps an error kind to a stable process exit code.
pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Validation => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::Storage => 4,
        ErrorKind::Parse => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, to_exit_code};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Validation, 2),
            (ErrorKind::NotFound, 3),
            (ErrorKind::Storage, 4),
            (ErrorKind::Parse, 5),
        ];

        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_context() {
        let err = Error::new(ErrorKind::NotFound)
            .with_message("violation not found")
            .with_id(7)
            .with_path("Violations.csv");
        assert_eq!(
            err.to_string(),
            "NotFound: violation not found (id: 7) (path: Violations.csv)"
        );
    }
}
