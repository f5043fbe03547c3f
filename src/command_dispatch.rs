//! Purpose: Run one CLI action against the record store, query layer and exporters.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every action loads a fresh table; nothing is cached between actions.

use std::path::Path;

use time::OffsetDateTime;
use trafficlog::{
    core::store::RecordStore,
    export::Artifact,
    query::{self, TrendReport},
    types::{COLUMNS, ViolationType},
    violation::{ViolationDraft, ViolationRecord},
};

use super::*;

pub(super) fn dispatch_command(command: Command, config: &Config, json: bool) -> Result<(), Error> {
    match command {
        Command::Fines => {
            if json {
                let fines: Vec<Value> = ViolationType::ALL
                    .iter()
                    .map(|kind| json!({ "violation_type": kind, "fine": kind.default_fine() }))
                    .collect();
                emit_json(json!({ "fines": fines }));
            } else {
                for kind in ViolationType::ALL {
                    println!("{:<26}{:>6}", kind.label(), kind.default_fine());
                }
            }
            Ok(())
        }
        Command::Log {
            plate,
            violation_type,
            date,
        } => {
            let mut store = RecordStore::open(&config.data_file)?;
            let date = date.unwrap_or_else(|| OffsetDateTime::now_utc().date());
            let rec = store.log(ViolationDraft {
                license_plate: plate,
                violation_type,
                date,
            })?;
            if json {
                emit_json(json!({ "logged": rec }));
            } else {
                println!(
                    "Violation logged successfully! id {}, fine amount: Rs.{}",
                    rec.id, rec.fine
                );
            }
            Ok(())
        }
        Command::View => {
            let store = RecordStore::open(&config.data_file)?;
            let table = store.load_all()?;
            let records: Vec<&ViolationRecord> = table.iter().collect();
            emit_records(&records, json, "No violations recorded.");
            Ok(())
        }
        Command::Search { plate } => {
            let store = RecordStore::open(&config.data_file)?;
            let table = store.load_all()?;
            let found = query::find_by_plate(&table, &plate);
            emit_records(&found, json, "No records found for the given license plate.");
            Ok(())
        }
        Command::Analyze => {
            let store = RecordStore::open(&config.data_file)?;
            let table = store.load_all()?;
            let report = TrendReport::from_table(&table);
            if json {
                emit_json(json!({ "trends": report }));
            } else {
                emit_trends_human(&report);
            }
            Ok(())
        }
        Command::Update { id, fine } => {
            let mut store = RecordStore::open(&config.data_file)?;
            let prev = store.update_fine(id, fine)?;
            if json {
                emit_json(json!({ "updated": { "id": id, "previous_fine": prev, "fine": fine } }));
            } else {
                println!("Violation {id} updated successfully! Fine {prev} -> {fine}");
            }
            Ok(())
        }
        Command::Delete { id } => {
            let mut store = RecordStore::open(&config.data_file)?;
            let removed = store.delete_by_id(id)?;
            if json {
                emit_json(json!({ "deleted": removed }));
            } else {
                println!("Violation {id} deleted successfully!");
            }
            Ok(())
        }
        Command::Export { format } => {
            let store = RecordStore::open(&config.data_file)?;
            let table = store.load_all()?;
            let (artifact, output) = match format {
                ExportFormat::Csv { output } => {
                    let output = output.unwrap_or_else(|| PathBuf::from(&config.csv_report_name));
                    (Artifact::csv(&table, file_name_of(&output))?, output)
                }
                ExportFormat::Pdf { output, title } => {
                    let output = output.unwrap_or_else(|| PathBuf::from(&config.pdf_report_name));
                    let title = title.as_deref().unwrap_or(&config.report_title);
                    (Artifact::pdf(&table, file_name_of(&output), title), output)
                }
            };
            let dir = output.parent().unwrap_or_else(|| Path::new(""));
            let path = artifact.write_to(dir)?;
            if json {
                emit_json(json!({
                    "exported": {
                        "path": path.display().to_string(),
                        "mime": artifact.mime,
                        "bytes": artifact.bytes.len(),
                        "records": table.len(),
                    }
                }));
            } else {
                println!(
                    "Report exported successfully to {} ({}, {} bytes)",
                    path.display(),
                    artifact.mime,
                    artifact.bytes.len()
                );
            }
            Ok(())
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn emit_records(records: &[&ViolationRecord], json: bool, empty_message: &str) {
    if json {
        emit_json(json!({ "violations": records }));
        return;
    }
    if records.is_empty() {
        println!("{empty_message}");
        return;
    }
    print!("{}", render_text_table(records));
}

fn render_text_table(records: &[&ViolationRecord]) -> String {
    let rows: Vec<[String; 5]> = records
        .iter()
        .map(|rec| {
            [
                rec.id.to_string(),
                rec.license_plate.clone(),
                rec.violation_type.to_string(),
                rec.fine.to_string(),
                rec.timestamp.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };
    push_line(&COLUMNS);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_line(&cells);
    }
    out
}

fn emit_trends_human(report: &TrendReport) {
    if report.records == 0 {
        println!("No violations recorded.");
        return;
    }
    println!("Most Common Violations:");
    for row in &report.most_common {
        println!("  {:<26}{:>6}", row.violation_type.label(), row.count);
    }
    println!();
    println!("Peak Violation Hours:");
    for row in &report.by_hour {
        println!("  {:02}:00{:>8}", row.hour, row.count);
    }
    println!();
    println!("Total Fine Collected:");
    println!("  Rs. {}", report.total_fines);
}
