//! Row handle for the generated sequence.

use cursor_core::{Record, RowId, Value};
use std::any::Any;

/// One row of `long_sequence`: a single long that is also the row id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongSequenceRecord {
    value: i64,
}

impl LongSequenceRecord {
    /// Create a handle showing `value`.
    pub fn new(value: i64) -> Self {
        Self { value }
    }

    /// Current value.
    pub fn current(&self) -> i64 {
        self.value
    }

    /// Step to the next value. The cursor enforces the upper bound.
    pub fn advance(&mut self) {
        self.value += 1;
    }

    /// Reposition at `value`.
    pub fn of(&mut self, value: i64) {
        self.value = value;
    }
}

impl Record for LongSequenceRecord {
    fn value(&self, _col: usize) -> Value {
        Value::Long(self.value)
    }

    fn get_long(&self, _col: usize) -> i64 {
        self.value
    }

    fn row_id(&self) -> RowId {
        RowId::new(self.value)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_id_matches_value() {
        let mut record = LongSequenceRecord::new(5);
        assert_eq!(record.get_long(0), 5);
        assert_eq!(record.row_id(), RowId::new(5));

        record.advance();
        assert_eq!(record.current(), 6);
        assert_eq!(record.row_id().get(), record.get_long(0));
    }

    #[test]
    fn test_any_column_reads_the_value() {
        let record = LongSequenceRecord::new(9);
        assert_eq!(record.get_long(3), 9);
        assert_eq!(record.value(1), Value::Long(9));
    }

    #[test]
    fn test_of_repositions() {
        let mut record = LongSequenceRecord::default();
        record.of(-3);
        assert_eq!(record.current(), -3);
        record.of(i64::MAX - 1);
        record.advance();
        assert_eq!(record.current(), i64::MAX);
    }
}
