//! Schema, chunk list, and the operations that grow a table
//! (spec.md §4.7).

use column_types::{with_column_data_type, ColumnDataType, ColumnId};
use observability_deps::tracing::debug;
use parking_lot::{RwLock, RwLockReadGuard};

use crate::chunk::Chunk;
use crate::column::BaseColumn;
use crate::dictionary_column::compress_column;
use crate::error::{
    ChunkIdOutOfRangeSnafu, MixedSchemaCreationSnafu, Result, TableNotEmptySnafu,
    UnknownColumnNameSnafu,
};
use crate::value_column::new_value_column;
use column_types::AllTypeVariant;

/// Tracks which of the two mutually-exclusive schema-creation paths
/// (spec.md §3) a table has committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnCreation {
    Undecided,
    /// `add_column` was used: physical columns are materialized
    /// immediately.
    Eager,
    /// `add_column_definition` was used: physical columns are
    /// materialized lazily, on the first `append`.
    Lazy,
}

struct TableInner {
    column_names: Vec<String>,
    column_types: Vec<ColumnDataType>,
    max_chunk_size: u32,
    schema_creation: ColumnCreation,
    physical_columns_materialized: bool,
    chunks: Vec<Chunk>,
}

/// A chunked columnar table. Mutating operations take `&self`: the
/// chunk list and schema live behind an internal lock (mirroring the
/// teacher's `Catalog`, whose `tables` map is a
/// `parking_lot::RwLock`), so a table can be mutated through the same
/// handle that other components hold shared references to.
pub struct Table {
    inner: RwLock<TableInner>,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Table")
            .field("column_names", &inner.column_names)
            .field("column_types", &inner.column_types)
            .field("max_chunk_size", &inner.max_chunk_size)
            .field("chunk_count", &inner.chunks.len())
            .finish()
    }
}

impl Table {
    /// Creates an empty table with one empty chunk. `max_chunk_size
    /// == 0` means chunk size is unbounded.
    pub fn new(max_chunk_size: u32) -> Self {
        Self {
            inner: RwLock::new(TableInner {
                column_names: Vec::new(),
                column_types: Vec::new(),
                max_chunk_size,
                schema_creation: ColumnCreation::Undecided,
                physical_columns_materialized: false,
                chunks: vec![Chunk::new()],
            }),
        }
    }

    /// Records schema only; physical columns are created lazily on
    /// the first `append`. Fails if `add_column` was called first, or
    /// the table isn't empty.
    pub fn add_column_definition(&self, name: impl Into<String>, data_type: ColumnDataType) -> Result<()> {
        let mut inner = self.inner.write();
        Self::check_schema_mutable(&inner, ColumnCreation::Lazy)?;
        inner.schema_creation = ColumnCreation::Lazy;
        inner.column_names.push(name.into());
        inner.column_types.push(data_type);
        Ok(())
    }

    /// Records schema and materializes an empty `ValueColumn<T>` in
    /// chunk 0. Fails if `add_column_definition` was called first, or
    /// the table isn't empty.
    pub fn add_column(&self, name: impl Into<String>, data_type: ColumnDataType) -> Result<()> {
        let mut inner = self.inner.write();
        Self::check_schema_mutable(&inner, ColumnCreation::Eager)?;
        inner.schema_creation = ColumnCreation::Eager;
        inner.column_names.push(name.into());
        inner.column_types.push(data_type);
        inner.physical_columns_materialized = true;
        let column = with_column_data_type!(data_type, new_value_column);
        inner.chunks[0].add_column(column);
        Ok(())
    }

    fn check_schema_mutable(inner: &TableInner, wanted: ColumnCreation) -> Result<()> {
        match inner.schema_creation {
            ColumnCreation::Undecided => {}
            other if other == wanted => {}
            ColumnCreation::Eager => {
                return MixedSchemaCreationSnafu { used: "add_column" }.fail()
            }
            ColumnCreation::Lazy => {
                return MixedSchemaCreationSnafu {
                    used: "add_column_definition",
                }
                .fail()
            }
        }
        let row_count: usize = inner.chunks.iter().map(Chunk::size).sum();
        if row_count != 0 || inner.chunks.len() != 1 {
            return TableNotEmptySnafu.fail();
        }
        Ok(())
    }

    /// Appends one value per declared column to the table, rolling
    /// over to a new chunk first if the last chunk is full.
    pub fn append(&self, values: &[AllTypeVariant]) -> Result<()> {
        let mut inner = self.inner.write();

        if !inner.physical_columns_materialized {
            let column_types = inner.column_types.clone();
            for data_type in column_types {
                let column = with_column_data_type!(data_type, new_value_column);
                inner.chunks[0].add_column(column);
            }
            inner.physical_columns_materialized = true;
        }

        if inner.max_chunk_size > 0 {
            let last_is_full = inner
                .chunks
                .last()
                .map(|c| c.size() as u32 >= inner.max_chunk_size)
                .unwrap_or(false);
            if last_is_full {
                Self::push_new_chunk(&mut inner);
            }
        }

        inner
            .chunks
            .last_mut()
            .expect("a table always has at least one chunk")
            .append(values)
    }

    /// Allocates a new chunk, pre-populated with one empty
    /// `ValueColumn<T>` per declared column, and appends it to the
    /// table.
    pub fn create_new_chunk(&self) {
        let mut inner = self.inner.write();
        Self::push_new_chunk(&mut inner);
    }

    fn push_new_chunk(inner: &mut TableInner) {
        debug!(chunk_count = inner.chunks.len() + 1, "creating new chunk");
        let mut chunk = Chunk::new();
        for data_type in inner.column_types.clone() {
            let column = with_column_data_type!(data_type, new_value_column);
            chunk.add_column(column);
        }
        inner.chunks.push(chunk);
    }

    /// Replaces the chunk at `chunk_id` with one whose columns are
    /// dictionary-encoded versions of the originals. Lossless:
    /// row order and all values are preserved.
    pub fn compress_chunk(&self, chunk_id: column_types::ChunkId) -> Result<()> {
        let mut inner = self.inner.write();
        let chunk_count = inner.chunks.len();
        let idx = chunk_id.0 as usize;
        if idx >= chunk_count {
            return ChunkIdOutOfRangeSnafu {
                chunk_id: chunk_id.0,
                chunk_count,
            }
            .fail();
        }

        debug!(%chunk_id, "compressing chunk");
        let column_types = inner.column_types.clone();
        let mut compressed = Chunk::new();
        for (i, data_type) in column_types.into_iter().enumerate() {
            let source = inner.chunks[idx].get_column(ColumnId(i as u32));
            let column = with_column_data_type!(data_type, compress_column, source);
            compressed.add_column(column);
        }
        Self::emplace_chunk_locked(&mut inner, chunk_id, compressed)
    }

    /// Replaces the chunk at `chunk_id` with `chunk` wholesale
    /// (spec.md §4.6). The operation `compress_chunk` builds on: it
    /// assembles the compressed replacement chunk, then installs it
    /// through this one shared path.
    pub fn emplace_chunk(&self, chunk_id: column_types::ChunkId, chunk: Chunk) -> Result<()> {
        let mut inner = self.inner.write();
        Self::emplace_chunk_locked(&mut inner, chunk_id, chunk)
    }

    fn emplace_chunk_locked(
        inner: &mut TableInner,
        chunk_id: column_types::ChunkId,
        chunk: Chunk,
    ) -> Result<()> {
        let chunk_count = inner.chunks.len();
        let idx = chunk_id.0 as usize;
        if idx >= chunk_count {
            return ChunkIdOutOfRangeSnafu {
                chunk_id: chunk_id.0,
                chunk_count,
            }
            .fail();
        }
        inner.chunks[idx] = chunk;
        Ok(())
    }

    pub fn col_count(&self) -> usize {
        self.inner.read().column_names.len()
    }

    pub fn row_count(&self) -> usize {
        self.inner.read().chunks.iter().map(Chunk::size).sum()
    }

    pub fn chunk_count(&self) -> usize {
        self.inner.read().chunks.len()
    }

    pub fn chunk_size(&self) -> u32 {
        self.inner.read().max_chunk_size
    }

    pub fn column_names(&self) -> Vec<String> {
        self.inner.read().column_names.clone()
    }

    pub fn column_name(&self, column_id: ColumnId) -> Result<String> {
        self.inner
            .read()
            .column_names
            .get(column_id.0 as usize)
            .cloned()
            .ok_or_else(|| {
                crate::error::ColumnIdOutOfRangeSnafu {
                    column_id,
                    col_count: self.col_count(),
                }
                .build()
            })
    }

    pub fn column_type(&self, column_id: ColumnId) -> Result<ColumnDataType> {
        self.inner
            .read()
            .column_types
            .get(column_id.0 as usize)
            .copied()
            .ok_or_else(|| {
                crate::error::ColumnIdOutOfRangeSnafu {
                    column_id,
                    col_count: self.col_count(),
                }
                .build()
            })
    }

    /// Linear search by name (spec.md §4.7); fatal if absent.
    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId> {
        self.inner
            .read()
            .column_names
            .iter()
            .position(|n| n == name)
            .map(|i| ColumnId(i as u32))
            .ok_or_else(|| UnknownColumnNameSnafu { name }.build())
    }

    /// Assembles a table from a single pre-built chunk: used by query
    /// operators to wrap a scan's output `ReferenceColumn`s in a table
    /// with the same schema as its input (spec.md §4.9 step 5). Not
    /// part of the ingest path — the chunk's columns are taken as-is,
    /// and the resulting table's schema is immediately considered
    /// materialized.
    pub fn from_chunk(column_names: Vec<String>, column_types: Vec<ColumnDataType>, chunk: Chunk) -> Self {
        Self {
            inner: RwLock::new(TableInner {
                column_names,
                column_types,
                max_chunk_size: 0,
                schema_creation: ColumnCreation::Eager,
                physical_columns_materialized: true,
                chunks: vec![chunk],
            }),
        }
    }

    /// Panics if `chunk_id` is out of range, matching the invariant
    /// that well-formed query plans never construct an out-of-range
    /// `RowID`.
    pub fn get_chunk(&self, chunk_id: column_types::ChunkId) -> parking_lot::MappedRwLockReadGuard<'_, Chunk> {
        RwLockReadGuard::map(self.inner.read(), |inner| {
            inner
                .chunks
                .get(chunk_id.0 as usize)
                .unwrap_or_else(|| panic!("chunk id {chunk_id} out of range"))
        })
    }
}
