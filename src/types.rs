//! Shared primitive IDs, the closed violation catalogue, and column order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind};

/// Monotonic violation identifier.
pub type ViolationId = u64;
/// Fine amount in whole currency units.
pub type Fine = i64;

/// Canonical column order used for storage and every export.
pub const COLUMNS: [&str; 5] = ["id", "license_plate", "violation_type", "fine", "timestamp"];

/// Infraction category; each maps to a fixed default fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationType {
    /// Running a red light.
    #[serde(rename = "Red Light Violation")]
    RedLight,
    /// Driving without a fastened seatbelt.
    #[serde(rename = "No Seatbelt")]
    NoSeatbelt,
    /// Parking where it is not allowed.
    #[serde(rename = "Illegal Parking")]
    IllegalParking,
    /// Driving without a valid licence.
    #[serde(rename = "Driving Without Licence")]
    NoLicence,
    /// Exceeding the speed limit.
    #[serde(rename = "Speeding")]
    Speeding,
    /// Riding without a helmet.
    #[serde(rename = "Driving Without Helmet")]
    NoHelmet,
}

impl ViolationType {
    /// Every violation type, in fine-schedule order.
    pub const ALL: [ViolationType; 6] = [
        ViolationType::RedLight,
        ViolationType::NoSeatbelt,
        ViolationType::IllegalParking,
        ViolationType::NoLicence,
        ViolationType::Speeding,
        ViolationType::NoHelmet,
    ];

    /// Label as written to storage and shown to users.
    pub fn label(self) -> &'static str {
        match self {
            Self::RedLight => "Red Light Violation",
            Self::NoSeatbelt => "No Seatbelt",
            Self::IllegalParking => "Illegal Parking",
            Self::NoLicence => "Driving Without Licence",
            Self::Speeding => "Speeding",
            Self::NoHelmet => "Driving Without Helmet",
        }
    }

    /// Fine assigned when a violation of this type is logged.
    pub fn default_fine(self) -> Fine {
        match self {
            Self::RedLight => 500,
            Self::NoSeatbelt => 1000,
            Self::IllegalParking => 2000,
            Self::NoLicence => 5000,
            Self::Speeding => 500,
            Self::NoHelmet => 1000,
        }
    }

    /// Kebab-case form accepted on the command line.
    pub fn slug(self) -> String {
        self.label().to_ascii_lowercase().replace(' ', "-")
    }
}

impl fmt::Display for ViolationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViolationType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(wanted) || kind.slug() == wanted)
            .ok_or_else(|| {
                Error::new(ErrorKind::Parse)
                    .with_message(format!("unknown violation type: {wanted:?}"))
            })
    }
}
