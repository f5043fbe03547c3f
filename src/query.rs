//! Read-only filters and aggregations over a loaded table.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::Serialize;
use tracing::debug;

use crate::{
    core::table::ViolationTable,
    types::{Fine, ViolationType},
    violation::ViolationRecord,
};

/// All records whose plate equals `plate` exactly, in table order.
pub fn find_by_plate<'a>(table: &'a ViolationTable, plate: &str) -> Vec<&'a ViolationRecord> {
    table
        .iter()
        .filter(|rec| rec.license_plate == plate)
        .collect()
}

/// Occurrences per violation type, most frequent first.
///
/// Ties keep the order in which each type first appears in the table.
pub fn count_by_violation_type(table: &ViolationTable) -> Vec<(ViolationType, usize)> {
    let mut counts: HashMap<ViolationType, usize> = HashMap::new();
    let mut first_seen: Vec<ViolationType> = Vec::new();
    for rec in table {
        let count = counts.entry(rec.violation_type).or_insert(0);
        if *count == 0 {
            first_seen.push(rec.violation_type);
        }
        *count += 1;
    }

    let mut out: Vec<(ViolationType, usize)> = first_seen
        .into_iter()
        .map(|kind| (kind, counts[&kind]))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Record counts keyed by the hour parsed from each timestamp, ascending.
///
/// Stored timestamps are dates, so everything normally lands in hour `0`.
/// Records whose timestamp does not parse are left out.
pub fn count_by_hour_bucket(table: &ViolationTable) -> BTreeMap<u8, usize> {
    let mut buckets = BTreeMap::new();
    let mut dropped = 0usize;
    for rec in table {
        match rec.timestamp.hour() {
            Some(hour) => *buckets.entry(hour).or_insert(0) += 1,
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        debug!(dropped, "timestamps without a parseable hour skipped");
    }
    buckets
}

/// Sum of every fine; `0` for an empty table.
pub fn total_fines(table: &ViolationTable) -> Fine {
    table.iter().map(|rec| rec.fine).sum()
}

/// One row of [`TrendReport::most_common`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    /// Violation type.
    pub violation_type: ViolationType,
    /// Number of records of that type.
    pub count: usize,
}

/// One row of [`TrendReport::by_hour`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourCount {
    /// Hour of day, 0-23.
    pub hour: u8,
    /// Number of records in that hour.
    pub count: usize,
}

/// Aggregates shown by the analyze action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendReport {
    /// Records in the table.
    pub records: usize,
    /// Types ordered by descending frequency.
    pub most_common: Vec<TypeCount>,
    /// Hour buckets, ascending.
    pub by_hour: Vec<HourCount>,
    /// Sum of all fines.
    pub total_fines: Fine,
}

impl TrendReport {
    /// Computes every aggregate over `table`.
    pub fn from_table(table: &ViolationTable) -> Self {
        Self {
            records: table.len(),
            most_common: count_by_violation_type(table)
                .into_iter()
                .map(|(violation_type, count)| TypeCount {
                    violation_type,
                    count,
                })
                .collect(),
            by_hour: count_by_hour_bucket(table)
                .into_iter()
                .map(|(hour, count)| HourCount { hour, count })
                .collect(),
            total_fines: total_fines(table),
        }
    }
}
