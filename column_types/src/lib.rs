//! Identifiers, the `AllTypeVariant` union, and the closed type
//! registry shared by every crate in the columnar storage workspace.

mod error;
mod ids;
mod scan_type;
mod value_id;
mod variant;

pub use error::{Error, Result};
pub use ids::{ChunkId, ChunkOffset, ColumnId, PositionList, RowId};
pub use scan_type::ScanType;
pub use value_id::{AttributeVectorWidth, ValueId, INVALID_VALUE_ID};
pub use variant::{type_cast, AllTypeVariant, ColumnDataType, ColumnElement};
