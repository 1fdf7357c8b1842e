//! `long_sequence(l)` function factory.

use crate::cursor::LongSequenceRecordCursor;
use cursor_core::{
    constant_arg, BoundFunction, ColumnMetadata, ColumnType, CursorFunction, EngineConfig,
    Function, FunctionError, FunctionFactory, GenericRecordCursorFactory, RecordCursor,
    RecordMetadata,
};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Function name as written in queries.
pub const FUNCTION_NAME: &str = "long_sequence";

/// Name of the single output column.
pub const COLUMN_NAME: &str = "x";

static METADATA: LazyLock<Arc<RecordMetadata>> = LazyLock::new(|| {
    Arc::new(RecordMetadata::from(ColumnMetadata::new(
        COLUMN_NAME,
        ColumnType::Long,
    )))
});

/// Shared output layout of every `long_sequence` cursor: one `LONG` column `x`.
pub fn metadata() -> Arc<RecordMetadata> {
    Arc::clone(&METADATA)
}

/// Builds `long_sequence(n)` table functions.
///
/// A negative `n` is treated as zero rows rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongSequenceFunctionFactory;

impl FunctionFactory for LongSequenceFunctionFactory {
    fn signature(&self) -> &str {
        "long_sequence(l)"
    }

    fn new_instance(
        &self,
        args: Vec<Box<dyn Function>>,
        position: usize,
        _config: &EngineConfig,
    ) -> Result<BoundFunction, FunctionError> {
        let requested = constant_arg(FUNCTION_NAME, &args, 0, 1)?.get_long(None);
        let record_count = requested.max(0);

        debug!(
            "Building {} cursor factory at position {} with {} rows",
            FUNCTION_NAME, position, record_count
        );

        let factory = GenericRecordCursorFactory::new(
            metadata(),
            move || -> Box<dyn RecordCursor> {
                Box::new(LongSequenceRecordCursor::new(record_count))
            },
            true,
        );

        Ok(BoundFunction::Cursor(CursorFunction::new(
            position,
            Box::new(factory),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_core::{Constant, RowId, Signature};

    fn build_at(count: Box<dyn Function>, position: usize) -> BoundFunction {
        LongSequenceFunctionFactory
            .new_instance(vec![count], position, &EngineConfig::default())
            .unwrap()
    }

    fn build(count: Box<dyn Function>) -> CursorFunction {
        build_at(count, 0).into_cursor().unwrap()
    }

    fn drain(cursor: &mut dyn RecordCursor) -> Vec<i64> {
        let mut values = Vec::new();
        while cursor.has_next() {
            values.push(cursor.record().get_long(0));
        }
        values
    }

    #[test]
    fn test_signature_parses() {
        let sig = Signature::parse(LongSequenceFunctionFactory.signature()).unwrap();
        assert_eq!(sig.name(), FUNCTION_NAME);
        assert_eq!(sig.arg_types(), &[ColumnType::Long]);
    }

    #[test]
    fn test_metadata_is_single_long_column() {
        let function = build(Box::new(Constant::long(3, 0)));
        let metadata = function.metadata();
        assert_eq!(metadata.column_count(), 1);
        assert_eq!(metadata.column_name(0), Some(COLUMN_NAME));
        assert_eq!(metadata.column_type(0), Some(ColumnType::Long));
        assert!(Arc::ptr_eq(metadata, &super::metadata()));
        assert!(function.factory().supports_random_access());
    }

    #[test]
    fn test_generates_requested_rows() {
        let function = build(Box::new(Constant::long(3, 0)));
        let mut cursor = function.cursor();
        assert_eq!(drain(cursor.as_mut()), vec![1, 2, 3]);
        assert_eq!(cursor.record_at(RowId::new(0)).unwrap().get_long(0), 0);
        assert_eq!(cursor.record_at(RowId::new(3)).unwrap().get_long(0), 3);
    }

    #[test]
    fn test_negative_and_zero_counts_yield_nothing() {
        for count in [0, -1, -5, i64::MIN] {
            let function = build(Box::new(Constant::long(count, 0)));
            let mut cursor = function.cursor();
            assert!(!cursor.has_next(), "count = {count}");
            assert_eq!(cursor.size(), Some(0));
        }
    }

    #[test]
    fn test_int_argument_widens() {
        let function = build(Box::new(Constant::int(4, 0)));
        assert_eq!(drain(function.cursor().as_mut()), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_each_cursor_is_independent() {
        let function = build(Box::new(Constant::long(3, 0)));
        let mut first = function.cursor();
        let mut second = function.cursor();

        assert!(first.has_next());
        assert!(first.has_next());
        assert_eq!(drain(second.as_mut()), vec![1, 2, 3]);
        assert_eq!(drain(first.as_mut()), vec![3]);
    }

    #[test]
    fn test_position_is_kept() {
        let function = build_at(Box::new(Constant::long(1, 21)), 7);
        assert!(function.is_cursor());
        assert_eq!(function.into_cursor().unwrap().position(), 7);
    }

    #[test]
    fn test_missing_argument_rejected() {
        let result =
            LongSequenceFunctionFactory.new_instance(Vec::new(), 0, &EngineConfig::default());
        assert!(matches!(result, Err(FunctionError::ArgumentCount { .. })));
    }
}
