use column_types::ColumnId;
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("dictionary columns are immutable; cannot append"))]
    AppendToDictionaryColumn,

    #[snafu(display("cannot append to a reference column"))]
    AppendToReferenceColumn,

    #[snafu(display(
        "append expects {} values (one per column), got {}",
        expected,
        got
    ))]
    AppendArityMismatch { expected: usize, got: usize },

    #[snafu(display("column id {} out of range (table has {} columns)", column_id, col_count))]
    ColumnIdOutOfRange {
        column_id: ColumnId,
        col_count: usize,
    },

    #[snafu(display("chunk id {} out of range (table has {} chunks)", chunk_id, chunk_count))]
    ChunkIdOutOfRange { chunk_id: u32, chunk_count: usize },

    #[snafu(display("no column named '{}'", name))]
    UnknownColumnName { name: String },

    #[snafu(display(
        "add_column_definition and add_column are mutually exclusive; \
         this table already used {}",
        used
    ))]
    MixedSchemaCreation { used: &'static str },

    #[snafu(display(
        "schema can only be changed while the table is empty (row_count=0, chunk_count=1)"
    ))]
    TableNotEmpty,

    #[snafu(display("{}", source))]
    Type { source: column_types::Error },
}

impl From<column_types::Error> for Error {
    fn from(source: column_types::Error) -> Self {
        Self::Type { source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
