//! Identifiers used to address rows, columns, and chunks.

use std::fmt;
use std::sync::Arc;

/// Indexes a table's chunk list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkId(pub u32);

impl From<u32> for ChunkId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indexes a row within a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkOffset(pub u32);

impl From<u32> for ChunkOffset {
    fn from(offset: u32) -> Self {
        Self(offset)
    }
}

impl fmt::Display for ChunkOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Indexes a column in a table's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColumnId(pub u32);

impl From<u32> for ColumnId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `(ChunkId, ChunkOffset)`: the address of a single row in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    pub fn new(chunk_id: impl Into<ChunkId>, chunk_offset: impl Into<ChunkOffset>) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            chunk_offset: chunk_offset.into(),
        }
    }
}

/// An ordered, immutable, cheaply-cloneable sequence of [`RowId`]s.
///
/// Reference columns share ownership of a single position list rather
/// than copying it, matching the "no data copy" contract of reference
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionList(Arc<Vec<RowId>>);

impl PositionList {
    pub fn new(rows: Vec<RowId>) -> Self {
        Self(Arc::new(rows))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.0.iter()
    }

    pub fn get(&self, i: usize) -> Option<&RowId> {
        self.0.get(i)
    }
}

impl std::ops::Index<usize> for PositionList {
    type Output = RowId;

    fn index(&self, i: usize) -> &RowId {
        &self.0[i]
    }
}

impl FromIterator<RowId> for PositionList {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PositionList {
    type Item = &'a RowId;
    type IntoIter = std::slice::Iter<'a, RowId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
