//! A view over positions in another table; carries no data of its
//! own (spec.md §4.5).

use std::any::Any;
use std::sync::Arc;

use column_types::{AllTypeVariant, ColumnDataType, ColumnId, PositionList};

use crate::column::BaseColumn;
use crate::error::{AppendToReferenceColumnSnafu, Result};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct ReferenceColumn {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    pos_list: PositionList,
}

impl ReferenceColumn {
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        pos_list: PositionList,
    ) -> Self {
        Self {
            referenced_table,
            referenced_column_id,
            pos_list,
        }
    }

    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    pub fn pos_list(&self) -> &PositionList {
        &self.pos_list
    }
}

impl BaseColumn for ReferenceColumn {
    fn len(&self) -> usize {
        self.pos_list.len()
    }

    /// Resolves by indirection: look up `pos_list[i]` in the
    /// referenced table and read its column at `referenced_column_id`.
    fn get(&self, i: usize) -> AllTypeVariant {
        let row = self.pos_list[i];
        let chunk = self.referenced_table.get_chunk(row.chunk_id);
        let column = chunk.get_column(self.referenced_column_id);
        column.get(row.chunk_offset.0 as usize)
    }

    fn append(&mut self, _value: &AllTypeVariant) -> Result<()> {
        AppendToReferenceColumnSnafu.fail()
    }

    fn data_type(&self) -> ColumnDataType {
        self.referenced_table
            .column_type(self.referenced_column_id)
            .expect("reference column must point at a valid column id")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
