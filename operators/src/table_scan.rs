//! Encoding-dispatched predicate scan (spec.md §4.9): the one
//! non-leaf operator in this workspace. Three scan strategies share a
//! single entry point, chosen per chunk by downcasting the column at
//! `column_id` the same way `DictionaryColumn::build` downcasts its
//! source column — via [`std::any::Any`], once the element type `Tₑ`
//! is known from the table's declared schema.

use std::sync::Arc;

use column_types::{
    type_cast, with_column_data_type, AllTypeVariant, ChunkId, ColumnElement, ColumnId,
    PositionList, RowId, ScanType, ValueId,
};
use observability_deps::tracing::debug;
use storage::{BaseColumn, Chunk, DictionaryColumn, ReferenceColumn, Table, ValueColumn};

use crate::error::{Result, UnsupportedColumnEncodingSnafu};

/// `column_id <scan_type> search_value`, evaluated against an input
/// table supplied at `execute` time.
#[derive(Debug)]
pub struct TableScan {
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: AllTypeVariant,
}

impl TableScan {
    pub fn new(column_id: ColumnId, scan_type: ScanType, search_value: AllTypeVariant) -> Self {
        Self {
            column_id,
            scan_type,
            search_value,
        }
    }

    pub fn column_id(&self) -> ColumnId {
        self.column_id
    }

    pub fn scan_type(&self) -> ScanType {
        self.scan_type
    }

    pub fn search_value(&self) -> &AllTypeVariant {
        &self.search_value
    }

    /// Scans `in_table` and produces a new table whose schema matches
    /// `in_table`'s and whose single chunk holds one `ReferenceColumn`
    /// per input column, all sharing the produced position list
    /// (spec.md §4.9 step 5).
    pub fn execute(&self, in_table: &Arc<Table>) -> Result<Arc<Table>> {
        let data_type = in_table.column_type(self.column_id)?;
        let pos_list: PositionList = with_column_data_type!(
            data_type,
            scan_column,
            in_table,
            self.column_id,
            self.scan_type,
            &self.search_value
        )?;
        debug!(
            column_id = %self.column_id,
            rows_matched = pos_list.len(),
            "table scan complete"
        );

        let (referenced_table, referenced_column_ids) = Self::resolve_reference_targets(in_table);

        let mut chunk = Chunk::new();
        for referenced_column_id in referenced_column_ids {
            chunk.add_column(Box::new(ReferenceColumn::new(
                Arc::clone(&referenced_table),
                referenced_column_id,
                pos_list.clone(),
            )));
        }

        let column_names = in_table.column_names();
        let mut column_types = Vec::with_capacity(column_names.len());
        for i in 0..in_table.col_count() {
            column_types.push(in_table.column_type(ColumnId(i as u32))?);
        }

        Ok(Arc::new(Table::from_chunk(column_names, column_types, chunk)))
    }

    /// Determines the table every output `ReferenceColumn` should
    /// point at, and the referenced column id for each output column
    /// in schema order. Only chunk 0 of `in_table` is inspected
    /// (spec.md §9 Open Question 2): every chunk of a reference table
    /// is required to reference the same underlying table, so this is
    /// enough to establish the non-cascading invariant for the whole
    /// output.
    fn resolve_reference_targets(in_table: &Arc<Table>) -> (Arc<Table>, Vec<ColumnId>) {
        let col_count = in_table.col_count();
        let identity_ids = || (0..col_count).map(|i| ColumnId(i as u32)).collect();

        if col_count == 0 || in_table.chunk_count() == 0 {
            return (Arc::clone(in_table), identity_ids());
        }

        let chunk0 = in_table.get_chunk(ChunkId(0));
        let Some(first) = chunk0
            .get_column(ColumnId(0))
            .as_any()
            .downcast_ref::<ReferenceColumn>()
        else {
            return (Arc::clone(in_table), identity_ids());
        };
        let referenced_table = Arc::clone(first.referenced_table());

        let referenced_column_ids = (0..col_count)
            .map(|i| {
                chunk0
                    .get_column(ColumnId(i as u32))
                    .as_any()
                    .downcast_ref::<ReferenceColumn>()
                    .expect("a reference table holds only ReferenceColumns in every column")
                    .referenced_column_id()
            })
            .collect();

        (referenced_table, referenced_column_ids)
    }
}

/// Instantiated once per scan, for the element type `Tₑ` of the
/// scanned column (spec.md §4.9 step 2).
fn scan_column<T: ColumnElement>(
    in_table: &Table,
    column_id: ColumnId,
    scan_type: ScanType,
    search_value: &AllTypeVariant,
) -> Result<PositionList> {
    let search: T = type_cast(search_value)?;

    let mut rows = Vec::new();
    for chunk_idx in 0..in_table.chunk_count() {
        let chunk_id = ChunkId(chunk_idx as u32);
        let chunk = in_table.get_chunk(chunk_id);
        let column = chunk.get_column(column_id);

        if let Some(value_column) = column.as_any().downcast_ref::<ValueColumn<T>>() {
            scan_value_column(value_column, chunk_id, scan_type, &search, &mut rows);
        } else if let Some(dictionary_column) = column.as_any().downcast_ref::<DictionaryColumn<T>>() {
            scan_dictionary_column(dictionary_column, chunk_id, scan_type, &search, &mut rows);
        } else if let Some(reference_column) = column.as_any().downcast_ref::<ReferenceColumn>() {
            scan_reference_column::<T>(reference_column, scan_type, &search, &mut rows)?;
        } else {
            return UnsupportedColumnEncodingSnafu.fail();
        }
    }
    Ok(PositionList::new(rows))
}

/// spec.md §4.9.1: a linear scan over the raw values.
fn scan_value_column<T: ColumnElement>(
    column: &ValueColumn<T>,
    chunk_id: ChunkId,
    scan_type: ScanType,
    search: &T,
    rows: &mut Vec<RowId>,
) {
    for (offset, value) in column.values().iter().enumerate() {
        if scan_type.evaluate(value, search) {
            rows.push(RowId::new(chunk_id, offset as u32));
        }
    }
}

/// Which dictionary codes satisfy the scan, computed once per chunk
/// from `k = lower_bound(search)` rather than per row (spec.md
/// §4.9.2).
#[derive(Clone, Copy)]
enum CodeSelector {
    None,
    All,
    Compare(ScanType, ValueId),
}

/// Implements the §4.9.2 predicate table. The "not exact" arms rewrite
/// `>`/`≤` into `≥`/`<` against the same boundary `k`, so the
/// per-row comparison below never needs to know whether the search
/// value was present in the dictionary.
fn resolve_dictionary_scan(scan_type: ScanType, k: ValueId, exact: bool) -> CodeSelector {
    if !k.is_valid() {
        return match scan_type {
            ScanType::Equals | ScanType::GreaterThan | ScanType::GreaterThanEquals => CodeSelector::None,
            ScanType::NotEquals | ScanType::LessThan | ScanType::LessThanEquals => CodeSelector::All,
        };
    }
    if exact {
        return CodeSelector::Compare(scan_type, k);
    }
    match scan_type {
        ScanType::Equals => CodeSelector::None,
        ScanType::NotEquals => CodeSelector::All,
        ScanType::LessThan | ScanType::LessThanEquals => CodeSelector::Compare(ScanType::LessThan, k),
        ScanType::GreaterThan | ScanType::GreaterThanEquals => {
            CodeSelector::Compare(ScanType::GreaterThanEquals, k)
        }
    }
}

fn scan_dictionary_column<T: ColumnElement>(
    column: &DictionaryColumn<T>,
    chunk_id: ChunkId,
    scan_type: ScanType,
    search: &T,
    rows: &mut Vec<RowId>,
) {
    let k = column.lower_bound_value(search);
    let exact = k.is_valid() && column.value_by_value_id(k) == search;
    let selector = resolve_dictionary_scan(scan_type, k, exact);

    let attribute_vector = column.attribute_vector();
    for offset in 0..attribute_vector.len() {
        let matches = match selector {
            CodeSelector::None => false,
            CodeSelector::All => true,
            CodeSelector::Compare(op, k) => op.evaluate(&attribute_vector.get(offset), &k),
        };
        if matches {
            rows.push(RowId::new(chunk_id, offset as u32));
        }
    }
}

/// spec.md §4.9.3: walk the reference's position list, resolving each
/// entry through the referenced table. Any encoding other than
/// `ValueColumn<T>`/`DictionaryColumn<T>` at the far end is a fatal
/// type error — references never cascade.
fn scan_reference_column<T: ColumnElement>(
    column: &ReferenceColumn,
    scan_type: ScanType,
    search: &T,
    rows: &mut Vec<RowId>,
) -> Result<()> {
    let referenced_table = column.referenced_table();
    let referenced_column_id = column.referenced_column_id();

    for entry in column.pos_list() {
        let chunk = referenced_table.get_chunk(entry.chunk_id);
        let referenced_column = chunk.get_column(referenced_column_id);
        let value = resolve_typed_value::<T>(referenced_column, entry.chunk_offset.0 as usize)?;
        if scan_type.evaluate(&value, search) {
            rows.push(*entry);
        }
    }
    Ok(())
}

fn resolve_typed_value<T: ColumnElement>(column: &dyn BaseColumn, offset: usize) -> Result<T> {
    if let Some(value_column) = column.as_any().downcast_ref::<ValueColumn<T>>() {
        Ok(value_column.values()[offset].clone())
    } else if let Some(dictionary_column) = column.as_any().downcast_ref::<DictionaryColumn<T>>() {
        Ok(dictionary_column.get(offset))
    } else {
        UnsupportedColumnEncodingSnafu.fail()
    }
}


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use column_types::ColumnDataType;

    fn scan_types() -> impl Strategy<Value = ScanType> {
        prop_oneof![
            Just(ScanType::Equals),
            Just(ScanType::NotEquals),
            Just(ScanType::LessThan),
            Just(ScanType::LessThanEquals),
            Just(ScanType::GreaterThan),
            Just(ScanType::GreaterThanEquals),
        ]
    }

    proptest! {
        // Invariant 8: scanning a chunk returns the same multiset of
        // RowIds whether the chunk is raw or dictionary-compressed.
        #[test]
        fn encoding_agnostic_scan(
            values in proptest::collection::vec(any::<i32>(), 1..100),
            search in any::<i32>(),
            scan_type in scan_types(),
        ) {
            let uncompressed = Arc::new(Table::new(0));
            uncompressed.add_column("value", ColumnDataType::Int).unwrap();
            for v in &values {
                uncompressed.append(&[AllTypeVariant::Int(*v)]).unwrap();
            }

            let compressed = Arc::new(Table::new(0));
            compressed.add_column("value", ColumnDataType::Int).unwrap();
            for v in &values {
                compressed.append(&[AllTypeVariant::Int(*v)]).unwrap();
            }
            compressed.compress_chunk(ChunkId(0)).unwrap();

            let scan = TableScan::new(ColumnId(0), scan_type, AllTypeVariant::Int(search));
            let before = scan.execute(&uncompressed).unwrap();
            let after = scan.execute(&compressed).unwrap();

            let mut before_offsets: Vec<u32> = before
                .get_chunk(ChunkId(0))
                .get_column(ColumnId(0))
                .as_any()
                .downcast_ref::<ReferenceColumn>()
                .unwrap()
                .pos_list()
                .iter()
                .map(|row| row.chunk_offset.0)
                .collect();
            let mut after_offsets: Vec<u32> = after
                .get_chunk(ChunkId(0))
                .get_column(ColumnId(0))
                .as_any()
                .downcast_ref::<ReferenceColumn>()
                .unwrap()
                .pos_list()
                .iter()
                .map(|row| row.chunk_offset.0)
                .collect();

            before_offsets.sort();
            after_offsets.sort();
            prop_assert_eq!(before_offsets, after_offsets);
        }
    }
}
