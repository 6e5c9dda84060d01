use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("a table named '{}' already exists", name))]
    TableAlreadyExists { name: String },

    #[snafu(display("no table named '{}'", name))]
    TableNotFound { name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
