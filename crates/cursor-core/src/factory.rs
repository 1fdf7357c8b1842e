//! Pluggable data sources: metadata plus a way to open cursors.

use crate::metadata::RecordMetadata;
use crate::record::RecordCursor;
use std::fmt;
use std::sync::Arc;

/// A data source the engine can open for each query execution.
pub trait RecordCursorFactory: Send + Sync {
    /// Column layout of every cursor this factory opens.
    fn metadata(&self) -> &Arc<RecordMetadata>;

    /// Open a new cursor, positioned before the first row.
    fn cursor(&self) -> Box<dyn RecordCursor>;

    /// Whether cursors support `record_at` lookups.
    fn supports_random_access(&self) -> bool;
}

type CursorBuilder = dyn Fn() -> Box<dyn RecordCursor> + Send + Sync;

/// Factory built from shared metadata and a cursor constructor.
///
/// Each call to [`cursor`](RecordCursorFactory::cursor) runs the
/// constructor again, so concurrent executions never share position state.
pub struct GenericRecordCursorFactory {
    metadata: Arc<RecordMetadata>,
    builder: Box<CursorBuilder>,
    random_access: bool,
}

impl GenericRecordCursorFactory {
    /// Create a factory.
    ///
    /// # Arguments
    ///
    /// * `metadata` - Column layout shared by every opened cursor
    /// * `builder` - Constructs a fresh cursor for each execution
    /// * `random_access` - Whether the cursors honor `record_at`
    pub fn new<F>(metadata: Arc<RecordMetadata>, builder: F, random_access: bool) -> Self
    where
        F: Fn() -> Box<dyn RecordCursor> + Send + Sync + 'static,
    {
        Self {
            metadata,
            builder: Box::new(builder),
            random_access,
        }
    }
}

impl RecordCursorFactory for GenericRecordCursorFactory {
    fn metadata(&self) -> &Arc<RecordMetadata> {
        &self.metadata
    }

    fn cursor(&self) -> Box<dyn RecordCursor> {
        (self.builder)()
    }

    fn supports_random_access(&self) -> bool {
        self.random_access
    }
}

impl fmt::Debug for GenericRecordCursorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericRecordCursorFactory")
            .field("metadata", &self.metadata)
            .field("random_access", &self.random_access)
            .finish_non_exhaustive()
    }
}
