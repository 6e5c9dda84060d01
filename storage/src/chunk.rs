//! A horizontal slab of a table: an ordered, equal-length tuple of
//! columns (spec.md §4.6).

use column_types::{AllTypeVariant, ColumnId};

use crate::column::BaseColumn;
use crate::error::{AppendArityMismatchSnafu, Result};

#[derive(Debug, Default)]
pub struct Chunk {
    columns: Vec<Box<dyn BaseColumn>>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Box<dyn BaseColumn>) {
        self.columns.push(column);
    }

    /// Appends one value per column, in schema order. The arity of
    /// `values` must match `col_count()`.
    pub fn append(&mut self, values: &[AllTypeVariant]) -> Result<()> {
        if values.len() != self.columns.len() {
            return AppendArityMismatchSnafu {
                expected: self.columns.len(),
                got: values.len(),
            }
            .fail();
        }
        for (column, value) in self.columns.iter_mut().zip(values) {
            column.append(value)?;
        }
        Ok(())
    }

    pub fn get_column(&self, column_id: ColumnId) -> &dyn BaseColumn {
        self.columns
            .get(column_id.0 as usize)
            .unwrap_or_else(|| panic!("column id {column_id} out of range"))
            .as_ref()
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    /// `0` if the chunk has no columns, else the size of its first
    /// column (all columns in a chunk are required to have equal
    /// length).
    pub fn size(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_column::new_value_column;

    #[test]
    fn append_forwards_to_each_column() {
        let mut chunk = Chunk::new();
        chunk.add_column(new_value_column::<i32>());
        chunk.add_column(new_value_column::<String>());

        chunk
            .append(&[AllTypeVariant::Int(1), AllTypeVariant::String("a".into())])
            .unwrap();
        assert_eq!(chunk.size(), 1);
        assert_eq!(chunk.col_count(), 2);
    }

    #[test]
    fn append_arity_mismatch_fails() {
        let mut chunk = Chunk::new();
        chunk.add_column(new_value_column::<i32>());
        assert!(chunk.append(&[]).is_err());
    }

    #[test]
    fn size_is_zero_for_empty_chunk() {
        let chunk = Chunk::new();
        assert_eq!(chunk.size(), 0);
    }
}
