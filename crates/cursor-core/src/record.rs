//! Record and cursor contracts.
//!
//! Every data source, generated or stored, is consumed through these two
//! traits so that planners and operators never depend on where rows come
//! from.
//!
//! ```text
//!   RecordCursor ──owns──▶ primary Record   (mutated in place by has_next)
//!        │
//!        ├── new_record()     ──▶ Box<dyn Record>  (independent handle)
//!        ├── record_at(id)    ──▶ Box<dyn Record>  (fresh handle at id)
//!        └── record_at_into(&mut handle, id)       (reposition, no alloc)
//! ```

use crate::values::{Value, LONG_NULL};
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Address of a row for direct (non-sequential) access.
///
/// Row ids are opaque to callers: they are obtained from
/// [`Record::row_id`] and handed back to [`RecordCursor::record_at`].
/// Some sources derive them from the payload, others from storage
/// positions, so they are never interchangeable with field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RowId(i64);

impl RowId {
    /// Wrap a raw row id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw row id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RowId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for cursor operations.
#[derive(Debug, thiserror::Error)]
pub enum CursorError {
    /// A record handle from a different cursor type was passed in
    #[error("Record handle is not a {expected}")]
    ForeignRecord {
        /// Type name of the record the cursor expected
        expected: &'static str,
    },
}

/// A repositionable view of one row.
///
/// Column indexes are trusted: callers only ask for columns present in the
/// cursor's metadata, and implementations are not required to check them.
pub trait Record: Any + Send + fmt::Debug {
    /// Value of column `col`.
    fn value(&self, col: usize) -> Value;

    /// Value of column `col` as a long; null reads as [`LONG_NULL`].
    fn get_long(&self, col: usize) -> i64 {
        self.value(col).as_i64().unwrap_or(LONG_NULL)
    }

    /// Address of the row this handle currently shows.
    fn row_id(&self) -> RowId;

    /// Downcast hook used by cursors to reposition their own handles.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Cursor over the rows of a table or virtual table.
///
/// A cursor is single-pass per [`to_top`](RecordCursor::to_top): callers
/// pull rows with [`has_next`](RecordCursor::has_next) and read them
/// through [`record`](RecordCursor::record), whose contents change on the
/// next call. Handles that must outlive that are obtained with
/// [`new_record`](RecordCursor::new_record) or
/// [`record_at`](RecordCursor::record_at).
pub trait RecordCursor: Send {
    /// Advance to the next row. Returns `false` once exhausted, without
    /// changing state.
    fn has_next(&mut self) -> bool;

    /// The primary record handle, positioned by the last `has_next`.
    fn record(&self) -> &dyn Record;

    /// A new handle, independent of the primary one.
    fn new_record(&self) -> Box<dyn Record>;

    /// Reposition `record` at `row_id` in place.
    fn record_at_into(&self, record: &mut dyn Record, row_id: RowId) -> Result<(), CursorError>;

    /// A fresh handle positioned at `row_id`. The primary handle is left
    /// untouched.
    fn record_at(&self, row_id: RowId) -> Result<Box<dyn Record>, CursorError> {
        let mut record = self.new_record();
        self.record_at_into(record.as_mut(), row_id)?;
        Ok(record)
    }

    /// Reposition the primary handle at `row_id`.
    fn position_at(&mut self, row_id: RowId);

    /// Return to the state of a freshly opened cursor.
    fn to_top(&mut self);

    /// Number of rows a full pass yields, when known without iterating.
    fn size(&self) -> Option<u64> {
        None
    }

    /// Release any resources held by the cursor.
    fn close(&mut self) {}
}

/// Downcast a record handle to the concrete type a cursor works with.
pub fn downcast_record<R: Record>(record: &mut dyn Record) -> Result<&mut R, CursorError> {
    record
        .as_any_mut()
        .downcast_mut::<R>()
        .ok_or(CursorError::ForeignRecord {
            expected: std::any::type_name::<R>(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct NullRecord;

    impl Record for NullRecord {
        fn value(&self, _col: usize) -> Value {
            Value::Null
        }

        fn row_id(&self) -> RowId {
            RowId::new(-1)
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[derive(Debug, Default)]
    struct OtherRecord;

    impl Record for OtherRecord {
        fn value(&self, _col: usize) -> Value {
            Value::Long(1)
        }

        fn row_id(&self) -> RowId {
            RowId::new(1)
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_get_long_defaults_to_null_sentinel() {
        assert_eq!(NullRecord.get_long(0), LONG_NULL);
        assert_eq!(OtherRecord.get_long(0), 1);
    }

    #[test]
    fn test_downcast_record() {
        let mut record: Box<dyn Record> = Box::new(NullRecord);
        assert!(downcast_record::<NullRecord>(record.as_mut()).is_ok());

        let err = downcast_record::<OtherRecord>(record.as_mut()).unwrap_err();
        assert!(err.to_string().contains("OtherRecord"));
    }

    #[test]
    fn test_row_id_conversions() {
        let id = RowId::from(42);
        assert_eq!(id.get(), 42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
    }
}
