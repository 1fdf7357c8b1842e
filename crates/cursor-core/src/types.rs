//! Column types understood by every data source.
//!
//! `ColumnType` is the closed type universe shared by record metadata,
//! function signatures and constant arguments. Each type has:
//!
//! - a serialized name (`"long"`, `"string"`, ...) used in YAML/JSON output
//! - a single-character signature code (`'l'`, `'s'`, ...) used in
//!   function signatures such as `long_sequence(l)`

use serde::{Serialize, Serializer};
use std::fmt;

/// Type of a single column or scalar function result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Boolean value
    Boolean,

    /// 32-bit signed integer
    Int,

    /// 64-bit signed integer
    Long,

    /// 64-bit IEEE 754 floating point
    Double,

    /// UTF-8 string
    String,

    /// Microseconds since the Unix epoch
    Timestamp,
}

impl ColumnType {
    /// All column types, in signature-code order.
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Boolean,
        ColumnType::Int,
        ColumnType::Long,
        ColumnType::Double,
        ColumnType::String,
        ColumnType::Timestamp,
    ];

    /// Lowercase name used for serialization.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::Timestamp => "timestamp",
        }
    }

    /// Signature code character for this type.
    pub fn type_code(&self) -> char {
        match self {
            Self::Boolean => 'b',
            Self::Int => 'i',
            Self::Long => 'l',
            Self::Double => 'd',
            Self::String => 's',
            Self::Timestamp => 't',
        }
    }

    /// Look up a type by its signature code character (case-insensitive).
    pub fn from_type_code(code: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.type_code() == code.to_ascii_lowercase())
    }

    /// Whether a value of type `from` may be passed where `self` is expected.
    ///
    /// Integers widen to longs, and both widen to doubles. Everything else
    /// must match exactly.
    pub fn accepts(&self, from: ColumnType) -> bool {
        match (self, from) {
            (a, b) if *a == b => true,
            (Self::Long, Self::Int) => true,
            (Self::Double, Self::Int | Self::Long) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}
