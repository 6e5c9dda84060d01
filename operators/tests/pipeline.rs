//! End-to-end data flow (spec.md §2):
//! `GetTable(name) -> Table -> TableScan(col, op, value) -> Table(of ReferenceColumns)`,
//! wired through a real `StorageManager` rather than a bare `Table`.

use column_types::{AllTypeVariant, ChunkId, ColumnDataType, ColumnId, ScanType};
use operators::{GetTable, TableScan};
use storage::{ReferenceColumn, Table};
use storage_manager::StorageManager;

#[test]
fn get_table_then_scan_scenario_s1_layout() {
    let sm = StorageManager::new();

    let t = std::sync::Arc::new(Table::new(2));
    t.add_column("pk", ColumnDataType::Int).unwrap();
    t.add_column("name", ColumnDataType::String).unwrap();
    for (pk, name) in [
        (1, "foo"),
        (2, "bar"),
        (3, "spam"),
        (4, "eggs"),
        (5, "elephant"),
    ] {
        t.append(&[AllTypeVariant::Int(pk), AllTypeVariant::String(name.into())])
            .unwrap();
    }
    sm.add_table("foobar", t).unwrap();

    let resolved = GetTable::new("foobar").execute(&sm).unwrap();
    assert_eq!(resolved.row_count(), 5);

    let scanned = TableScan::new(ColumnId(0), ScanType::GreaterThan, AllTypeVariant::Int(2))
        .execute(&resolved)
        .unwrap();

    assert_eq!(scanned.row_count(), 3);
    assert_eq!(scanned.col_count(), 2);
    let chunk = scanned.get_chunk(ChunkId(0));
    assert_eq!(
        chunk.get_column(ColumnId(1)).get(0),
        AllTypeVariant::String("spam".into())
    );

    let reference = chunk
        .get_column(ColumnId(0))
        .as_any()
        .downcast_ref::<ReferenceColumn>()
        .unwrap();
    assert!(std::sync::Arc::ptr_eq(reference.referenced_table(), &resolved));
}

#[test]
fn get_table_unknown_name_fails() {
    let sm = StorageManager::new();
    assert!(GetTable::new("does_not_exist").execute(&sm).is_err());
}
