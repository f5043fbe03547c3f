//! Violation record, draft, and timestamp types.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::{
    error::{Error, ErrorKind, Result},
    types::{Fine, ViolationId, ViolationType},
};

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message(format!("invalid date {value:?}, expected YYYY-MM-DD"))
            .with_source(err)
    })
}

/// Date a violation happened, kept exactly as stored.
///
/// Records created by this crate always hold `YYYY-MM-DD`. Values loaded from
/// a file are preserved verbatim and parsed lazily, so a malformed value only
/// affects the aggregations that need it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Formats `date` as `YYYY-MM-DD`.
    pub fn from_date(date: Date) -> Self {
        let text = date
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| date.to_string());
        Self(text)
    }

    /// Parses a caller-supplied `YYYY-MM-DD` string.
    pub fn parse_date(value: &str) -> Result<Self> {
        parse_date(value).map(Self::from_date)
    }

    /// Raw stored text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar date, when the text parses as one.
    pub fn date(&self) -> Option<Date> {
        self.date_time().map(|dt| dt.date())
    }

    /// Hour of day. Date-only values read as midnight.
    pub fn hour(&self) -> Option<u8> {
        self.date_time().map(|dt| dt.hour())
    }

    fn date_time(&self) -> Option<PrimitiveDateTime> {
        let text = self.0.trim();
        if let Ok(dt) = PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        ) {
            return Some(dt);
        }
        if let Ok(dt) = PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
        ) {
            return Some(dt);
        }
        if let Ok(dt) = PrimitiveDateTime::parse(
            text,
            format_description!("[year]-[month]-[day] [hour]:[minute]"),
        ) {
            return Some(dt);
        }
        if let Ok(dt) = OffsetDateTime::parse(text, &time::format_description::well_known::Rfc3339) {
            return Some(PrimitiveDateTime::new(dt.date(), dt.time()));
        }
        Date::parse(text, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.midnight())
    }
}

impl From<Date> for Timestamp {
    fn from(date: Date) -> Self {
        Self::from_date(date)
    }
}

impl From<&str> for Timestamp {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One logged violation. Field order is the canonical column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    /// Unique, never reused identifier.
    pub id: ViolationId,
    /// Plate as entered; not validated against any format.
    pub license_plate: String,
    /// Infraction category.
    pub violation_type: ViolationType,
    /// Amount owed. Defaults from the type but may be edited later.
    pub fine: Fine,
    /// Date of the violation.
    pub timestamp: Timestamp,
}

impl ViolationRecord {
    /// Rejects values no stored record may hold.
    pub fn validate(&self) -> Result<()> {
        if self.fine < 0 {
            return Err(Error::new(ErrorKind::Validation)
                .with_message(format!("fine must not be negative, got {}", self.fine))
                .with_id(self.id));
        }
        Ok(())
    }
}

/// Input of the log action; the store fills in id and fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViolationDraft {
    /// Plate as entered.
    pub license_plate: String,
    /// Infraction category.
    pub violation_type: ViolationType,
    /// Date of the violation.
    pub date: Date,
}

impl ViolationDraft {
    /// Materializes the draft with `id` and the type's default fine.
    pub fn into_record(self, id: ViolationId) -> ViolationRecord {
        ViolationRecord {
            id,
            license_plate: self.license_plate,
            fine: self.violation_type.default_fine(),
            violation_type: self.violation_type,
            timestamp: Timestamp::from_date(self.date),
        }
    }
}
