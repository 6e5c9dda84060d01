//! `AllTypeVariant`: a tagged union over the supported element types,
//! and the closed type registry used to dispatch on a textual type
//! name.

use std::fmt;

use crate::error::{Result, TypeMismatchSnafu, UnknownTypeNameSnafu};

/// A value of one of the column element types, boxed behind a single
/// tag. Used wherever a column's element type is not known at compile
/// time, e.g. `Chunk::append`'s argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum AllTypeVariant {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl AllTypeVariant {
    /// The textual type name used by the type registry.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Double(_) => "double",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for AllTypeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

/// The closed set of element types the storage core supports, keyed
/// by the textual names accepted everywhere a type name is required:
/// `{"int", "long", "float", "double", "string"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDataType {
    Int,
    Long,
    Float,
    Double,
    String,
}

impl ColumnDataType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Maps a type name to a concrete [`ColumnDataType`]. Unknown
    /// names are a fatal error (spec.md §4.1).
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(Self::Int),
            "long" => Ok(Self::Long),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "string" => Ok(Self::String),
            _ => UnknownTypeNameSnafu { name }.fail(),
        }
    }
}

impl fmt::Display for ColumnDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Implemented by each of the five concrete element types so that
/// generic code (`ValueColumn<T>`, `DictionaryColumn<T>`, the scan
/// strategies) can convert to and from [`AllTypeVariant`] without a
/// match on every call site.
pub trait ColumnElement:
    Clone + fmt::Debug + fmt::Display + PartialEq + PartialOrd + Send + Sync + 'static
{
    const DATA_TYPE: ColumnDataType;

    fn into_variant(self) -> AllTypeVariant;

    fn try_from_variant(value: &AllTypeVariant) -> Result<Self>;
}

macro_rules! impl_column_element {
    ($t:ty, $data_type:expr, $variant:ident) => {
        impl ColumnElement for $t {
            const DATA_TYPE: ColumnDataType = $data_type;

            fn into_variant(self) -> AllTypeVariant {
                AllTypeVariant::$variant(self)
            }

            fn try_from_variant(value: &AllTypeVariant) -> Result<Self> {
                match value {
                    AllTypeVariant::$variant(v) => Ok(v.clone()),
                    other => TypeMismatchSnafu {
                        expected: $data_type.name(),
                        found: other.type_name(),
                    }
                    .fail(),
                }
            }
        }
    };
}

impl_column_element!(i32, ColumnDataType::Int, Int);
impl_column_element!(i64, ColumnDataType::Long, Long);
impl_column_element!(f32, ColumnDataType::Float, Float);
impl_column_element!(f64, ColumnDataType::Double, Double);
impl_column_element!(String, ColumnDataType::String, String);

/// Coerces an `AllTypeVariant` to `T`, failing if the tag doesn't
/// match. Equivalent to the original `type_cast<T>(AllTypeVariant)`.
pub fn type_cast<T: ColumnElement>(value: &AllTypeVariant) -> Result<T> {
    T::try_from_variant(value)
}

/// Instantiates a generic function once per concrete element type,
/// selected at runtime by a [`ColumnDataType`]. This is the Rust
/// analogue of the original `make_shared_by_column_type<Base,
/// Template>(type_name)` helper: a closed match where every arm calls
/// the same generic function with a different `T`.
#[macro_export]
macro_rules! with_column_data_type {
    ($data_type:expr, $fn:ident $(, $arg:expr )* $(,)?) => {
        match $data_type {
            $crate::ColumnDataType::Int => $fn::<i32>($($arg),*),
            $crate::ColumnDataType::Long => $fn::<i64>($($arg),*),
            $crate::ColumnDataType::Float => $fn::<f32>($($arg),*),
            $crate::ColumnDataType::Double => $fn::<f64>($($arg),*),
            $crate::ColumnDataType::String => $fn::<String>($($arg),*),
        }
    };
}
