//! Append-only typed sequence of raw values: the column encoding used
//! for ingest, before a chunk is compressed.

use std::any::Any;

use column_types::{type_cast, AllTypeVariant, ColumnDataType, ColumnElement};

use crate::column::BaseColumn;
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct ValueColumn<T: ColumnElement> {
    content: Vec<T>,
}

impl<T: ColumnElement> ValueColumn<T> {
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
        }
    }

    /// Pushes a raw, already-typed value. The fast path used by
    /// `Table::append` once the target column's `T` is known, and by
    /// `DictionaryColumn::build` when copying from a `ValueColumn<T>`
    /// of the same type (spec.md §4.4 step 1).
    pub fn push(&mut self, value: T) {
        self.content.push(value);
    }

    /// The raw backing sequence, letting callers (dictionary build,
    /// the value-column scan strategy) avoid going through
    /// `AllTypeVariant` boxing for every row.
    pub fn values(&self) -> &[T] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl<T: ColumnElement> BaseColumn for ValueColumn<T> {
    fn len(&self) -> usize {
        self.content.len()
    }

    fn get(&self, i: usize) -> AllTypeVariant {
        self.content[i].clone().into_variant()
    }

    fn append(&mut self, value: &AllTypeVariant) -> Result<()> {
        let value: T = type_cast(value)?;
        self.content.push(value);
        Ok(())
    }

    fn data_type(&self) -> ColumnDataType {
        T::DATA_TYPE
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Instantiated by [`column_types::with_column_data_type`] when a
/// table materializes an empty, typed column for a declared schema
/// position.
pub fn new_value_column<T: ColumnElement>() -> Box<dyn BaseColumn> {
    Box::new(ValueColumn::<T>::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_read_back() {
        let mut col: ValueColumn<i32> = ValueColumn::new();
        col.append(&AllTypeVariant::Int(1)).unwrap();
        col.append(&AllTypeVariant::Int(2)).unwrap();
        assert_eq!(col.len(), 2);
        assert_eq!(col.get(0), AllTypeVariant::Int(1));
        assert_eq!(col.values(), &[1, 2]);
    }

    #[test]
    fn append_wrong_type_fails() {
        let mut col: ValueColumn<i32> = ValueColumn::new();
        assert!(col.append(&AllTypeVariant::String("nope".into())).is_err());
    }
}
