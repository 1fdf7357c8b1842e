//! row-source library
//!
//! Plans and runs table functions such as `long_sequence(n)` on top of the
//! contracts in `cursor_core`.
//!
//! # Pipeline
//!
//! ```text
//! "long_sequence(10)"
//!        │ call::FunctionCall::parse
//!        ▼
//! FunctionCall { name, args: [Constant] }
//!        │ registry::FunctionRegistry::resolve  (name + argument types)
//!        ▼
//! FunctionFactory::new_instance ─▶ CursorFunction ─▶ RecordCursorFactory
//!        │ cursor() per execution
//!        ▼
//! RecordCursor ─▶ operators (filter, row ids, sample) ─▶ output::render
//! ```
//!
//! # Example
//!
//! ```rust
//! use cursor_core::EngineConfig;
//! use row_source::{collect_longs, FunctionRegistry, Planner};
//!
//! let registry = FunctionRegistry::builtin().unwrap();
//! let config = EngineConfig::default();
//! let function = Planner::new(&registry, &config)
//!     .plan_cursor("long_sequence(3)")
//!     .unwrap();
//!
//! let mut cursor = function.cursor();
//! assert_eq!(collect_longs(cursor.as_mut(), 0), vec![1, 2, 3]);
//! ```

pub mod call;
pub mod cli;
pub mod config;
pub mod operators;
pub mod output;
pub mod planner;
pub mod registry;

// Re-exports for convenience
pub use call::{CallError, FunctionCall};
pub use config::{AppConfig, ConfigError};
pub use operators::{
    collect_longs, FilterCursor, OperatorError, Predicate, RandomSampler, RowIdCursor,
};
pub use output::{render, OutputError, OutputFormat, DEFAULT_TABLE_ROWS};
pub use planner::{PlanError, Planner};
pub use registry::{FunctionRegistry, FunctionRegistryBuilder};
