use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unknown type name '{}'", name))]
    UnknownTypeName { name: String },

    #[snafu(display(
        "cannot coerce value of type '{}' to requested type '{}'",
        found,
        expected
    ))]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
