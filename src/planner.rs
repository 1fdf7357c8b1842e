//! Turns a textual call into a bound function.

use crate::call::{CallError, FunctionCall};
use crate::registry::FunctionRegistry;
use cursor_core::{BoundFunction, CursorFunction, EngineConfig, Function, FunctionError};
use tracing::debug;

/// Error type for planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Parse error: {0}")]
    Call(#[from] CallError),

    #[error("Function error: {0}")]
    Function(#[from] FunctionError),

    /// The call resolved to a scalar where rows were expected
    #[error("'{name}' does not return rows")]
    NotACursor { name: String },
}

/// Plans constant calls against a registry.
pub struct Planner<'a> {
    registry: &'a FunctionRegistry,
    config: &'a EngineConfig,
}

impl<'a> Planner<'a> {
    pub fn new(registry: &'a FunctionRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Parse `sql`, resolve the function and construct it.
    pub fn plan(&self, sql: &str) -> Result<BoundFunction, PlanError> {
        let call = FunctionCall::parse(sql)?;
        let arg_types = call.arg_types();
        let (signature, factory) = self.registry.resolve(&call.name, &arg_types)?;

        debug!(
            "Resolved '{}' with {} argument(s) to {}",
            call.name,
            arg_types.len(),
            signature
        );

        let args: Vec<Box<dyn Function>> = call
            .args
            .into_iter()
            .map(|arg| Box::new(arg) as Box<dyn Function>)
            .collect();

        Ok(factory.new_instance(args, call.position, self.config)?)
    }

    /// Like [`plan`](Self::plan), but the result must produce rows.
    pub fn plan_cursor(&self, sql: &str) -> Result<CursorFunction, PlanError> {
        match self.plan(sql)? {
            BoundFunction::Cursor(function) => Ok(function),
            BoundFunction::Scalar(_) => Err(PlanError::NotACursor {
                name: FunctionCall::parse(sql)?.name,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_core::{ColumnType, Constant, FunctionFactory};

    #[derive(Debug)]
    struct PiFactory;

    impl FunctionFactory for PiFactory {
        fn signature(&self) -> &str {
            "pi()"
        }

        fn new_instance(
            &self,
            _args: Vec<Box<dyn Function>>,
            position: usize,
            _config: &EngineConfig,
        ) -> Result<BoundFunction, FunctionError> {
            Ok(BoundFunction::Scalar(Box::new(Constant::double(
                std::f64::consts::PI,
                position,
            ))))
        }
    }

    #[test]
    fn test_plan_long_sequence() {
        let registry = FunctionRegistry::builtin().unwrap();
        let config = EngineConfig::default();
        let planner = Planner::new(&registry, &config);

        let function = planner.plan_cursor("long_sequence(2)").unwrap();
        assert_eq!(function.position(), 0);
        assert_eq!(function.metadata().column_type(0), Some(ColumnType::Long));

        let mut cursor = function.cursor();
        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert!(!cursor.has_next());
    }

    #[test]
    fn test_plan_reports_errors() {
        let registry = FunctionRegistry::builtin().unwrap();
        let config = EngineConfig::default();
        let planner = Planner::new(&registry, &config);

        assert!(matches!(
            planner.plan("long_sequence("),
            Err(PlanError::Call(_))
        ));
        assert!(matches!(
            planner.plan("nope(1)"),
            Err(PlanError::Function(FunctionError::UnknownFunction(_)))
        ));
        assert!(matches!(
            planner.plan("long_sequence('a')"),
            Err(PlanError::Function(FunctionError::NoMatchingSignature { .. }))
        ));
    }

    #[test]
    fn test_scalar_is_not_a_cursor() {
        let registry = FunctionRegistry::builder()
            .register(PiFactory)
            .unwrap()
            .build();
        let config = EngineConfig::default();
        let planner = Planner::new(&registry, &config);

        assert!(!planner.plan("pi()").unwrap().is_cursor());
        let err = planner.plan_cursor("pi()").err().unwrap();
        assert!(matches!(err, PlanError::NotACursor { ref name } if name == "pi"));
    }
}
