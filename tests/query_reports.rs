use trafficlog::{
    core::table::ViolationTable,
    query::{self, HourCount, TrendReport, TypeCount},
    types::ViolationType,
    violation::ViolationRecord,
};

fn rec(id: u64, plate: &str, kind: ViolationType, fine: i64, ts: &str) -> ViolationRecord {
    ViolationRecord {
        id,
        license_plate: plate.to_string(),
        violation_type: kind,
        fine,
        timestamp: ts.into(),
    }
}

fn table(records: Vec<ViolationRecord>) -> ViolationTable {
    ViolationTable::from_records(records).expect("table")
}

#[test]
fn find_by_plate_is_exact_and_ordered() {
    let t = table(vec![
        rec(1, "MH12AB1234", ViolationType::Speeding, 500, "2024-03-01"),
        rec(2, "mh12ab1234", ViolationType::Speeding, 500, "2024-03-01"),
        rec(3, "MH12AB1234", ViolationType::IllegalParking, 2000, "2024-03-02"),
        rec(4, "MH12AB12345", ViolationType::NoHelmet, 1000, "2024-03-02"),
    ]);

    let ids: Vec<_> = query::find_by_plate(&t, "MH12AB1234")
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![1, 3]);
    assert!(query::find_by_plate(&t, "NOPE").is_empty());
}

#[test]
fn type_counts_sort_by_frequency_then_first_seen() {
    let t = table(vec![
        rec(1, "A", ViolationType::Speeding, 500, "2024-01-01"),
        rec(2, "B", ViolationType::Speeding, 500, "2024-01-01"),
        rec(3, "C", ViolationType::IllegalParking, 2000, "2024-01-01"),
    ]);
    assert_eq!(
        query::count_by_violation_type(&t),
        vec![(ViolationType::Speeding, 2), (ViolationType::IllegalParking, 1)]
    );

    let tied = table(vec![
        rec(1, "A", ViolationType::NoHelmet, 1000, "2024-01-01"),
        rec(2, "B", ViolationType::RedLight, 500, "2024-01-01"),
        rec(3, "C", ViolationType::RedLight, 500, "2024-01-01"),
        rec(4, "D", ViolationType::NoHelmet, 1000, "2024-01-01"),
        rec(5, "E", ViolationType::NoSeatbelt, 1000, "2024-01-01"),
    ]);
    assert_eq!(
        query::count_by_violation_type(&tied),
        vec![
            (ViolationType::NoHelmet, 2),
            (ViolationType::RedLight, 2),
            (ViolationType::NoSeatbelt, 1),
        ]
    );
}

#[test]
fn date_only_timestamps_all_land_in_hour_zero() {
    let t = table(vec![
        rec(1, "A", ViolationType::Speeding, 500, "2024-01-01"),
        rec(2, "B", ViolationType::Speeding, 500, "2024-06-30"),
        rec(3, "C", ViolationType::Speeding, 500, "31/12/2024"),
    ]);
    let buckets = query::count_by_hour_bucket(&t);
    assert_eq!(buckets.into_iter().collect::<Vec<_>>(), vec![(0, 2)]);
}

#[test]
fn hour_buckets_honor_times_and_sort_ascending() {
    let t = table(vec![
        rec(1, "A", ViolationType::Speeding, 500, "2024-01-01 18:30:00"),
        rec(2, "B", ViolationType::Speeding, 500, "2024-01-01 07:10:00"),
        rec(3, "C", ViolationType::Speeding, 500, "2024-01-02 18:05:00"),
    ]);
    let buckets: Vec<_> = query::count_by_hour_bucket(&t).into_iter().collect();
    assert_eq!(buckets, vec![(7, 1), (18, 2)]);
}

#[test]
fn total_fines_sums_every_record() {
    assert_eq!(query::total_fines(&ViolationTable::new()), 0);
    let t = table(vec![
        rec(1, "A", ViolationType::Speeding, 500, "2024-01-01"),
        rec(2, "B", ViolationType::NoLicence, 5000, "2024-01-01"),
        rec(3, "C", ViolationType::RedLight, 0, "2024-01-01"),
    ]);
    assert_eq!(query::total_fines(&t), 5500);
}

#[test]
fn trend_report_collects_every_aggregate() {
    let t = table(vec![
        rec(1, "A", ViolationType::Speeding, 500, "2024-01-01"),
        rec(2, "B", ViolationType::Speeding, 700, "2024-01-02"),
        rec(3, "C", ViolationType::IllegalParking, 2000, "garbage"),
    ]);
    let report = TrendReport::from_table(&t);
    assert_eq!(report.records, 3);
    assert_eq!(
        report.most_common,
        vec![
            TypeCount {
                violation_type: ViolationType::Speeding,
                count: 2
            },
            TypeCount {
                violation_type: ViolationType::IllegalParking,
                count: 1
            },
        ]
    );
    assert_eq!(report.by_hour, vec![HourCount { hour: 0, count: 2 }]);
    assert_eq!(report.total_fines, 3200);

    let json = serde_json::to_value(&report).expect("json");
    assert_eq!(json["most_common"][0]["violation_type"], "Speeding");
    assert_eq!(json["total_fines"], 3200);
}
