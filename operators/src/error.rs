use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{}", source))]
    Storage { source: storage::Error },

    #[snafu(display("{}", source))]
    StorageManager { source: storage_manager::Error },

    #[snafu(display("{}", source))]
    Type { source: column_types::Error },

    #[snafu(display(
        "table scan expects a ValueColumn, DictionaryColumn, or non-cascading \
         ReferenceColumn of the scanned element type"
    ))]
    UnsupportedColumnEncoding,
}

impl From<storage::Error> for Error {
    fn from(source: storage::Error) -> Self {
        Self::Storage { source }
    }
}

impl From<storage_manager::Error> for Error {
    fn from(source: storage_manager::Error) -> Self {
        Self::StorageManager { source }
    }
}

impl From<column_types::Error> for Error {
    fn from(source: column_types::Error) -> Self {
        Self::Type { source }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
