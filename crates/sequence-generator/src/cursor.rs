//! Cursor over the generated sequence.

use crate::record::LongSequenceRecord;
use cursor_core::{downcast_record, CursorError, Record, RecordCursor, RowId};

/// Cursor producing `record_count` rows with values `1..=record_count`.
///
/// Values are produced advance-then-confirm: the primary record starts at
/// 0 and each successful [`has_next`](RecordCursor::has_next) increments
/// it, so the value visible after the first `true` is 1. Direct lookups
/// are not bounds-checked; any row id positions a handle at that value.
#[derive(Debug, Clone)]
pub struct LongSequenceRecordCursor {
    record_count: i64,
    record: LongSequenceRecord,
}

impl LongSequenceRecordCursor {
    /// Create a cursor over `record_count` rows. Negative counts yield no
    /// rows.
    pub fn new(record_count: i64) -> Self {
        Self {
            record_count: record_count.max(0),
            record: LongSequenceRecord::new(0),
        }
    }

    /// Number of rows a full pass yields.
    pub fn record_count(&self) -> i64 {
        self.record_count
    }

    /// The primary record with its concrete type.
    pub fn current(&self) -> &LongSequenceRecord {
        &self.record
    }
}

impl RecordCursor for LongSequenceRecordCursor {
    fn has_next(&mut self) -> bool {
        if self.record.current() < self.record_count {
            self.record.advance();
            return true;
        }
        false
    }

    fn record(&self) -> &dyn Record {
        &self.record
    }

    fn new_record(&self) -> Box<dyn Record> {
        Box::new(LongSequenceRecord::default())
    }

    fn record_at_into(&self, record: &mut dyn Record, row_id: RowId) -> Result<(), CursorError> {
        downcast_record::<LongSequenceRecord>(record)?.of(row_id.get());
        Ok(())
    }

    fn position_at(&mut self, row_id: RowId) {
        self.record.of(row_id.get());
    }

    fn to_top(&mut self) {
        self.record.of(0);
    }

    fn size(&self) -> Option<u64> {
        u64::try_from(self.record_count).ok()
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_core::Value;

    fn drain(cursor: &mut dyn RecordCursor) -> Vec<i64> {
        let mut values = Vec::new();
        while cursor.has_next() {
            values.push(cursor.record().get_long(0));
        }
        values
    }

    #[test]
    fn test_sequence_of_three() {
        let mut cursor = LongSequenceRecordCursor::new(3);
        assert_eq!(drain(&mut cursor), vec![1, 2, 3]);

        // Exhausted cursor stays put
        assert!(!cursor.has_next());
        assert!(!cursor.has_next());
        assert_eq!(cursor.record().get_long(0), 3);
    }

    #[test]
    fn test_counts_zero_to_fifty() {
        for n in 0..=50 {
            let mut cursor = LongSequenceRecordCursor::new(n);
            let expected: Vec<i64> = (1..=n).collect();
            assert_eq!(drain(&mut cursor), expected, "record_count = {n}");
            assert_eq!(cursor.size(), Some(n as u64));
        }
    }

    #[test]
    fn test_negative_count_yields_nothing() {
        for n in [-1, -5, i64::MIN] {
            let mut cursor = LongSequenceRecordCursor::new(n);
            assert_eq!(cursor.record_count(), 0);
            assert_eq!(cursor.size(), Some(0));
            assert!(!cursor.has_next());
            assert_eq!(cursor.record().get_long(0), 0);
        }
    }

    #[test]
    fn test_to_top_restores_fresh_state() {
        let mut cursor = LongSequenceRecordCursor::new(4);
        assert!(cursor.has_next());
        assert!(cursor.has_next());

        cursor.to_top();
        cursor.to_top();
        assert_eq!(cursor.current().current(), 0);
        assert_eq!(drain(&mut cursor), vec![1, 2, 3, 4]);

        cursor.to_top();
        assert_eq!(drain(&mut cursor), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_record_at_does_not_disturb_iteration() {
        let mut cursor = LongSequenceRecordCursor::new(3);
        assert!(cursor.has_next());

        for id in 0..=3 {
            let record = cursor.record_at(RowId::new(id)).unwrap();
            assert_eq!(record.get_long(0), id);
            assert_eq!(record.row_id(), RowId::new(id));
        }

        assert_eq!(cursor.record().get_long(0), 1);
        assert_eq!(drain(&mut cursor), vec![2, 3]);
    }

    #[test]
    fn test_record_at_is_not_bounds_checked() {
        let cursor = LongSequenceRecordCursor::new(3);
        let record = cursor.record_at(RowId::new(1_000)).unwrap();
        assert_eq!(record.value(0), Value::Long(1_000));
        let record = cursor.record_at(RowId::new(-7)).unwrap();
        assert_eq!(record.row_id(), RowId::new(-7));
    }

    #[test]
    fn test_new_records_do_not_alias() {
        let cursor = LongSequenceRecordCursor::new(10);
        let mut left = cursor.new_record();
        let mut right = cursor.new_record();

        cursor.record_at_into(left.as_mut(), RowId::new(2)).unwrap();
        cursor.record_at_into(right.as_mut(), RowId::new(7)).unwrap();
        assert_eq!(left.get_long(0), 2);
        assert_eq!(right.get_long(0), 7);

        cursor.record_at_into(left.as_mut(), RowId::new(5)).unwrap();
        assert_eq!(left.get_long(0), 5);
        assert_eq!(right.get_long(0), 7);
        assert_eq!(cursor.record().get_long(0), 0);
    }

    #[test]
    fn test_position_at_moves_primary_record() {
        let mut cursor = LongSequenceRecordCursor::new(5);
        cursor.position_at(RowId::new(3));
        assert_eq!(cursor.record().get_long(0), 3);
        assert_eq!(drain(&mut cursor), vec![4, 5]);
    }

    #[test]
    fn test_foreign_record_rejected() {
        #[derive(Debug)]
        struct Foreign;

        impl Record for Foreign {
            fn value(&self, _col: usize) -> Value {
                Value::Null
            }

            fn row_id(&self) -> RowId {
                RowId::new(0)
            }

            fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
                self
            }
        }

        let cursor = LongSequenceRecordCursor::new(1);
        let mut foreign = Foreign;
        let result = cursor.record_at_into(&mut foreign, RowId::new(0));
        assert!(matches!(result, Err(CursorError::ForeignRecord { .. })));
    }
}
