//! Core contracts for row-source data sources.
//!
//! This crate defines what every data source, generated or stored, must
//! provide so that planners and operators can treat them uniformly:
//!
//! - [`ColumnType`] and [`Value`] - the type universe and field values
//! - [`RecordMetadata`] - the column layout a cursor produces
//! - [`Record`] and [`RecordCursor`] - row handles and the cursor that moves them
//! - [`RecordCursorFactory`] - a data source that opens cursors per execution
//! - [`Function`], [`FunctionFactory`], [`Signature`] - plan-time function construction
//! - [`EngineConfig`] - settings passed to factories and operators
//!
//! # Architecture
//!
//! ```text
//! cursor-core (this crate)
//!    │
//!    ├─── sequence-generator  (long_sequence: a virtual data source)
//!    │
//!    └─── row-source          (registry, planner, operators, CLI)
//! ```

pub mod config;
pub mod factory;
pub mod function;
pub mod metadata;
pub mod record;
pub mod signature;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use config::EngineConfig;
pub use factory::{GenericRecordCursorFactory, RecordCursorFactory};
pub use function::{
    constant_arg, BoundFunction, Constant, CursorFunction, Function, FunctionError,
    FunctionFactory,
};
pub use metadata::{ColumnMetadata, MetadataError, RecordMetadata};
pub use record::{downcast_record, CursorError, Record, RecordCursor, RowId};
pub use signature::Signature;
pub use types::ColumnType;
pub use values::{Value, LONG_NULL};
