//! `long_sequence`: a virtual data source producing the integers `1..=n`.
//!
//! The sequence is never materialized. A [`LongSequenceRecordCursor`] keeps
//! only its bound and the current value, and hands rows out through a
//! single reusable [`LongSequenceRecord`]. Because the row id and the value
//! coincide, direct lookups are O(1) repositionings.
//!
//! # Architecture
//!
//! ```text
//! long_sequence(n)
//!        │  (plan time, once)
//!        ▼
//! ┌──────────────────────────────┐
//! │ LongSequenceFunctionFactory  │  clamps n to >= 0
//! └──────────────┬───────────────┘
//!                ▼
//!   CursorFunction ─▶ GenericRecordCursorFactory { metadata: x LONG }
//!                │  (per execution)
//!                ▼
//!   LongSequenceRecordCursor { record_count, record }
//! ```
//!
//! # Example
//!
//! ```rust
//! use cursor_core::{Constant, EngineConfig, Function, FunctionFactory};
//! use sequence_generator::LongSequenceFunctionFactory;
//!
//! let args: Vec<Box<dyn Function>> = vec![Box::new(Constant::long(3, 14))];
//! let function = LongSequenceFunctionFactory
//!     .new_instance(args, 0, &EngineConfig::default())
//!     .unwrap()
//!     .into_cursor()
//!     .unwrap();
//!
//! let mut cursor = function.cursor();
//! let mut values = Vec::new();
//! while cursor.has_next() {
//!     values.push(cursor.record().get_long(0));
//! }
//! assert_eq!(values, vec![1, 2, 3]);
//! ```

pub mod cursor;
pub mod factory;
pub mod record;

// Re-exports for convenience
pub use cursor::LongSequenceRecordCursor;
pub use factory::{metadata, LongSequenceFunctionFactory, COLUMN_NAME, FUNCTION_NAME};
pub use record::LongSequenceRecord;
