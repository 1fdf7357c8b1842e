//! Functions and function factories.
//!
//! A [`FunctionFactory`] is registered under a [`Signature`](crate::Signature)
//! and invoked once at plan time with already-built argument functions. It
//! returns a [`BoundFunction`]: either a scalar [`Function`] or, for table
//! functions like `long_sequence`, a [`CursorFunction`] wrapping a
//! [`RecordCursorFactory`].

use crate::config::EngineConfig;
use crate::factory::RecordCursorFactory;
use crate::metadata::RecordMetadata;
use crate::record::{Record, RecordCursor};
use crate::types::ColumnType;
use crate::values::{Value, LONG_NULL};
use std::fmt;
use std::sync::Arc;

/// Error type for function resolution and construction.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// Signature string could not be parsed
    #[error("Invalid signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    /// The same signature was registered twice
    #[error("Duplicate function signature: {0}")]
    DuplicateSignature(String),

    /// No function with this name is registered
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Functions with this name exist, but none takes these argument types
    #[error("No overload of '{name}' accepts ({arg_types}); candidates: {candidates}")]
    NoMatchingSignature {
        name: String,
        arg_types: String,
        candidates: String,
    },

    /// Wrong number of arguments reached a factory
    #[error("'{function}' expects {expected} argument(s), got {actual}")]
    ArgumentCount {
        function: String,
        expected: usize,
        actual: usize,
    },

    /// A factory requiring a constant argument received an expression
    #[error("'{function}' argument at position {position} must be a constant")]
    NonConstantArgument { function: String, position: usize },
}

/// A scalar function: constants, column references, expressions.
pub trait Function: Send + Sync + fmt::Debug {
    /// Type of the values this function returns.
    fn return_type(&self) -> ColumnType;

    /// Evaluate against `record`; constants accept `None`.
    fn eval(&self, record: Option<&dyn Record>) -> Value;

    /// Evaluate as a long. Integers widen; null reads as [`LONG_NULL`].
    fn get_long(&self, record: Option<&dyn Record>) -> i64 {
        self.eval(record).as_i64().unwrap_or(LONG_NULL)
    }

    /// Whether the result is independent of the record.
    fn is_constant(&self) -> bool {
        false
    }

    /// Character offset of this function in the query text.
    fn position(&self) -> usize;
}

/// Constant function produced from a literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: Value,
    column_type: ColumnType,
    position: usize,
}

impl Constant {
    /// Constant of an explicit type.
    pub fn typed(column_type: ColumnType, value: Value, position: usize) -> Self {
        Self {
            value,
            column_type,
            position,
        }
    }

    /// Boolean constant.
    pub fn boolean(value: bool, position: usize) -> Self {
        Self::typed(ColumnType::Boolean, Value::Boolean(value), position)
    }

    /// Int constant.
    pub fn int(value: i32, position: usize) -> Self {
        Self::typed(ColumnType::Int, Value::Int(value), position)
    }

    /// Long constant.
    pub fn long(value: i64, position: usize) -> Self {
        Self::typed(ColumnType::Long, Value::Long(value), position)
    }

    /// Double constant.
    pub fn double(value: f64, position: usize) -> Self {
        Self::typed(ColumnType::Double, Value::Double(value), position)
    }

    /// String constant.
    pub fn string(value: impl Into<String>, position: usize) -> Self {
        Self::typed(ColumnType::String, Value::String(value.into()), position)
    }

    /// The constant's value.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl Function for Constant {
    fn return_type(&self) -> ColumnType {
        self.column_type
    }

    fn eval(&self, _record: Option<&dyn Record>) -> Value {
        self.value.clone()
    }

    fn get_long(&self, _record: Option<&dyn Record>) -> i64 {
        self.value.as_i64().unwrap_or(LONG_NULL)
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn position(&self) -> usize {
        self.position
    }
}

/// Cursor-valued function: the result of a table function call.
pub struct CursorFunction {
    position: usize,
    factory: Box<dyn RecordCursorFactory>,
}

impl CursorFunction {
    /// Wrap a cursor factory produced at `position`.
    pub fn new(position: usize, factory: Box<dyn RecordCursorFactory>) -> Self {
        Self { position, factory }
    }

    /// Character offset of the call in the query text.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The wrapped data source.
    pub fn factory(&self) -> &dyn RecordCursorFactory {
        self.factory.as_ref()
    }

    /// Output column layout.
    pub fn metadata(&self) -> &Arc<RecordMetadata> {
        self.factory.metadata()
    }

    /// Open a new cursor over the data source.
    pub fn cursor(&self) -> Box<dyn RecordCursor> {
        self.factory.cursor()
    }

    /// Take the wrapped data source.
    pub fn into_factory(self) -> Box<dyn RecordCursorFactory> {
        self.factory
    }
}

impl fmt::Debug for CursorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorFunction")
            .field("position", &self.position)
            .field("metadata", self.metadata())
            .finish_non_exhaustive()
    }
}

/// What a factory builds.
#[derive(Debug)]
pub enum BoundFunction {
    /// A scalar function
    Scalar(Box<dyn Function>),

    /// A table function
    Cursor(CursorFunction),
}

impl BoundFunction {
    /// Whether this is a table function.
    pub fn is_cursor(&self) -> bool {
        matches!(self, Self::Cursor(_))
    }

    /// The cursor function, if this is one.
    pub fn into_cursor(self) -> Option<CursorFunction> {
        match self {
            Self::Cursor(function) => Some(function),
            Self::Scalar(_) => None,
        }
    }
}

/// Builder invoked once per call site at plan time.
///
/// Factories are stateless; the same instance builds functions for any
/// number of unrelated queries.
pub trait FunctionFactory: Send + Sync {
    /// Signature string, e.g. `"long_sequence(l)"`.
    fn signature(&self) -> &str;

    /// Build the function for one call site.
    ///
    /// # Arguments
    ///
    /// * `args` - Argument functions, already type-checked against the signature
    /// * `position` - Character offset of the call in the query text
    /// * `config` - Engine configuration
    fn new_instance(
        &self,
        args: Vec<Box<dyn Function>>,
        position: usize,
        config: &EngineConfig,
    ) -> Result<BoundFunction, FunctionError>;
}

/// Fetch argument `index` of `function`, requiring it to be a constant.
pub fn constant_arg<'a>(
    function: &str,
    args: &'a [Box<dyn Function>],
    index: usize,
    expected: usize,
) -> Result<&'a dyn Function, FunctionError> {
    if args.len() != expected {
        return Err(FunctionError::ArgumentCount {
            function: function.to_string(),
            expected,
            actual: args.len(),
        });
    }

    let arg = args
        .get(index)
        .ok_or_else(|| FunctionError::ArgumentCount {
            function: function.to_string(),
            expected: index + 1,
            actual: args.len(),
        })?
        .as_ref();
    if !arg.is_constant() {
        return Err(FunctionError::NonConstantArgument {
            function: function.to_string(),
            position: arg.position(),
        });
    }
    Ok(arg)
}
