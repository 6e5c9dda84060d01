//! `BaseColumn`: the uniform interface shared by value, dictionary,
//! and reference columns, dispatched dynamically since a `Chunk`
//! holds columns of heterogeneous element types side by side.

use std::any::Any;
use std::fmt;

use column_types::{AllTypeVariant, ColumnDataType};

use crate::error::Result;

/// Closed set of column encodings (spec.md §3): value, dictionary, or
/// reference. Hot paths (the scan strategies in `operators`) downcast
/// via [`BaseColumn::as_any`] to the concrete `ValueColumn<T>` /
/// `DictionaryColumn<T>` / `ReferenceColumn` once they know the
/// element type, instead of going through `operator[]` for every row.
pub trait BaseColumn: fmt::Debug + Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads the value at offset `i`, boxed into an `AllTypeVariant`.
    /// Out-of-range access panics, like indexing a `Vec`.
    fn get(&self, i: usize) -> AllTypeVariant;

    /// Appends a value coerced to this column's element type. Value
    /// columns support this; dictionary and reference columns are
    /// immutable and return `Err`.
    fn append(&mut self, value: &AllTypeVariant) -> Result<()>;

    fn data_type(&self) -> ColumnDataType;

    fn as_any(&self) -> &dyn Any;
}
