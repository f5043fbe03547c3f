use tempfile::TempDir;

use trafficlog::{
    core::table::ViolationTable,
    export::{
        Artifact, CSV_MIME, PDF_MIME, delimited::to_delimited_text, document,
        to_paginated_document,
    },
    types::ViolationType,
    violation::ViolationRecord,
};

fn sample(n: u64) -> ViolationTable {
    let records = (1..=n)
        .map(|id| ViolationRecord {
            id,
            license_plate: format!("MH12AB{id:04}"),
            violation_type: ViolationType::ALL[(id as usize) % ViolationType::ALL.len()],
            fine: 500,
            timestamp: "2024-01-15".into(),
        })
        .collect();
    ViolationTable::from_records(records).expect("table")
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn delimited_text_matches_storage_layout() {
    let text = String::from_utf8(to_delimited_text(&sample(2)).expect("csv")).expect("utf8");
    assert_eq!(
        text,
        "id,license_plate,violation_type,fine,timestamp\n\
         1,MH12AB0001,No Seatbelt,500,2024-01-15\n\
         2,MH12AB0002,Illegal Parking,500,2024-01-15\n"
    );
}

#[test]
fn empty_table_exports_header_only() {
    let bytes = to_delimited_text(&ViolationTable::new()).expect("csv");
    assert_eq!(bytes, b"id,license_plate,violation_type,fine,timestamp\n");
}

#[test]
fn document_is_a_well_formed_pdf_with_one_page_per_slice() {
    let table = sample(100);
    let pdf = to_paginated_document(&table, "Traffic Violation Report");

    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));
    let pages = document::paginate(table.len()).len();
    assert_eq!(pages, 4);
    assert_eq!(count(&pdf, b"/Type /Page /Parent"), pages);
    assert!(pdf.windows(14).any(|w| w == b"/Count 4 /Medi"));
    for n in 1..=pages {
        assert_eq!(count(&pdf, format!("(Page {n}) Tj").as_bytes()), 1);
    }
    assert_eq!(count(&pdf, b"(Traffic Violation Report) Tj"), pages);
    assert_eq!(count(&pdf, b"(license_plate) Tj"), 1);
    assert_eq!(count(&pdf, b"(MH12AB0100) Tj"), 1);
}

#[test]
fn long_values_are_drawn_in_full() {
    let mut records = sample(1).into_records();
    records[0].license_plate = "AN-EXTREMELY-LONG-PLATE-VALUE-THAT-OVERFLOWS".to_string();
    let table = ViolationTable::from_records(records).expect("table");
    let pdf = to_paginated_document(&table, "t");
    assert_eq!(count(&pdf, b"(AN-EXTREMELY-LONG-PLATE-VALUE-THAT-OVERFLOWS) Tj"), 1);
}

#[test]
fn non_latin_text_is_replaced() {
    let mut records = sample(1).into_records();
    records[0].license_plate = "दिल्ली(1)".to_string();
    let table = ViolationTable::from_records(records).expect("table");
    let pdf = to_paginated_document(&table, "t");
    assert_eq!(count(&pdf, b"(??????\\(1\\)) Tj"), 1);
}

#[test]
fn artifacts_carry_name_and_mime_and_write_to_disk() {
    let tmp = TempDir::new().expect("tmp");
    let table = sample(3);

    let csv = Artifact::csv(&table, "Report.csv").expect("csv");
    assert_eq!(csv.mime, CSV_MIME);
    let path = csv.write_to(tmp.path()).expect("write csv");
    assert_eq!(std::fs::read(&path).expect("read"), csv.bytes);

    let pdf = Artifact::pdf(&table, "Report.pdf", "Traffic Violation Report");
    assert_eq!(pdf.mime, PDF_MIME);
    let path = pdf.write_to(tmp.path()).expect("write pdf");
    assert!(path.ends_with("Report.pdf"));
    assert!(std::fs::read(&path).expect("read").starts_with(b"%PDF"));
}
