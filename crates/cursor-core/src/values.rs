//! Field values read from records and produced by scalar functions.

use crate::types::ColumnType;
use serde::Serialize;
use std::fmt;

/// Sentinel returned by `get_long` accessors for a null value.
pub const LONG_NULL: i64 = i64::MIN;

/// A single field value.
///
/// `Value` is what the generic [`Record::value`](crate::Record::value) and
/// [`Function::eval`](crate::Function::eval) accessors return. Typed fast
/// paths such as `get_long` avoid building a `Value` on hot loops.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean value
    Boolean(bool),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    Long(i64),

    /// 64-bit floating point
    Double(f64),

    /// String value
    String(String),

    /// Microseconds since the Unix epoch
    Timestamp(i64),

    /// Null value
    Null,
}

impl Value {
    /// Type of this value, or `None` for null.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Self::Boolean(_) => Some(ColumnType::Boolean),
            Self::Int(_) => Some(ColumnType::Int),
            Self::Long(_) => Some(ColumnType::Long),
            Self::Double(_) => Some(ColumnType::Double),
            Self::String(_) => Some(ColumnType::String),
            Self::Timestamp(_) => Some(ColumnType::Timestamp),
            Self::Null => None,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an i64. Integers widen.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(l) => Some(*l),
            Self::Int(i) => Some(i64::from(*i)),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers and longs widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            Self::Int(i) => Some(f64::from(*i)),
            Self::Long(l) => Some(*l as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a timestamp in microseconds.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Self::Timestamp(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::String(s) => f.write_str(s),
            Self::Timestamp(ts) => write!(f, "{ts}"),
            Self::Null => f.write_str("null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_i32(), Some(42));
        assert_eq!(Value::Long(100).as_i64(), Some(100));
        assert_eq!(Value::Double(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::String("test".to_string()).as_str(), Some("test"));
        assert_eq!(Value::Timestamp(7).as_timestamp(), Some(7));

        // Widening
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Long(2).as_f64(), Some(2.0));
        assert_eq!(Value::Boolean(true).as_i64(), None);
        assert_eq!(Value::Null.as_i64(), None);
    }

    #[test]
    fn test_value_column_type() {
        assert_eq!(Value::Long(1).column_type(), Some(ColumnType::Long));
        assert_eq!(Value::Null.column_type(), None);
        assert!(Value::Null.is_null());
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&vec![Value::Long(3), Value::Null]).unwrap();
        assert_eq!(json, "[3,null]");
    }
}
