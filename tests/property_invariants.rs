use proptest::prelude::*;
use time::macros::date;

use trafficlog::{
    core::{store::RecordStore, table::ViolationTable},
    export::delimited::to_delimited_text,
    persist::{csv::read_table, memory::MemoryStorage},
    query,
    types::{ViolationId, ViolationType},
    violation::{ViolationDraft, ViolationRecord},
};

#[derive(Debug, Clone)]
enum Action {
    Log { plate_idx: u8, kind_idx: u8 },
    Delete { target: u8 },
    UpdateFine { target: u8, fine: u32 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (0u8..8, 0u8..6).prop_map(|(plate_idx, kind_idx)| Action::Log { plate_idx, kind_idx }),
        1 => (0u8..32).prop_map(|target| Action::Delete { target }),
        1 => (0u8..32, 0u32..100_000).prop_map(|(target, fine)| Action::UpdateFine { target, fine }),
    ]
}

fn draft_from(plate_idx: u8, kind_idx: u8) -> ViolationDraft {
    ViolationDraft {
        license_plate: format!("KA{plate_idx:02}"),
        violation_type: ViolationType::ALL[usize::from(kind_idx) % ViolationType::ALL.len()],
        date: date!(2024 - 05 - 20),
    }
}

fn ids(table: &ViolationTable) -> Vec<ViolationId> {
    table.iter().map(|rec| rec.id).collect()
}

fn pick(table: &ViolationTable, target: u8) -> Option<ViolationId> {
    let ids = ids(table);
    (!ids.is_empty()).then(|| ids[usize::from(target) % ids.len()])
}

proptest! {
    #[test]
    fn random_sequences_keep_ids_unique_and_mutations_local(actions in prop::collection::vec(action_strategy(), 1..120)) {
        let mut store = RecordStore::with_storage(MemoryStorage::new());
        store.initialize().expect("init");
        let mut last_assigned: ViolationId = 0;

        for action in actions {
            let before = store.load_all().expect("load");
            match action {
                Action::Log { plate_idx, kind_idx } => {
                    let rec = store.log(draft_from(plate_idx, kind_idx)).expect("log");
                    prop_assert!(rec.id > last_assigned);
                    prop_assert_eq!(rec.fine, rec.violation_type.default_fine());
                    last_assigned = rec.id;
                }
                Action::Delete { target } => {
                    let Some(id) = pick(&before, target) else { continue };
                    store.delete_by_id(id).expect("delete");
                    let after = store.load_all().expect("load");
                    prop_assert_eq!(after.len(), before.len() - 1);
                    prop_assert!(after.get(id).is_none());
                    let expected: Vec<_> = before.iter().filter(|r| r.id != id).cloned().collect();
                    prop_assert_eq!(after.records(), expected.as_slice());
                }
                Action::UpdateFine { target, fine } => {
                    let Some(id) = pick(&before, target) else { continue };
                    store.update_fine(id, i64::from(fine)).expect("update");
                    let after = store.load_all().expect("load");
                    prop_assert_eq!(after.len(), before.len());
                    for (old, new) in before.iter().zip(after.iter()) {
                        if old.id == id {
                            let mut expected = old.clone();
                            expected.fine = i64::from(fine);
                            prop_assert_eq!(new, &expected);
                        } else {
                            prop_assert_eq!(new, old);
                        }
                    }
                }
            }

            let table = store.load_all().expect("load");
            let mut seen = ids(&table);
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), table.len());
            prop_assert_eq!(query::total_fines(&table), table.iter().map(|r| r.fine).sum::<i64>());
        }
    }

    #[test]
    fn delimited_export_parses_back_to_the_same_table(
        rows in prop::collection::vec(("[ -~]{0,12}", 0u8..6, 0i64..1_000_000), 0..40)
    ) {
        let records: Vec<ViolationRecord> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (plate, kind_idx, fine))| ViolationRecord {
                id: i as ViolationId + 1,
                license_plate: plate,
                violation_type: ViolationType::ALL[usize::from(kind_idx)],
                fine,
                timestamp: "2024-01-15".into(),
            })
            .collect();
        let table = ViolationTable::from_records(records).expect("table");

        let bytes = to_delimited_text(&table).expect("export");
        let parsed = read_table(bytes.as_slice()).expect("parse");
        prop_assert_eq!(parsed, table);
    }
}
