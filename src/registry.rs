//! Function registry: resolves calls to factories by name and argument types.
//!
//! The registry is built once at startup and is read-only afterwards, so
//! resolution happens at plan time without locking.

use cursor_core::{ColumnType, FunctionError, FunctionFactory, Signature};
use sequence_generator::LongSequenceFunctionFactory;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One registered overload.
#[derive(Clone)]
struct Overload {
    signature: Signature,
    factory: Arc<dyn FunctionFactory>,
}

/// Builder collecting factories before the registry is frozen.
#[derive(Default)]
pub struct FunctionRegistryBuilder {
    functions: BTreeMap<String, Vec<Overload>>,
}

impl FunctionRegistryBuilder {
    /// Register a factory under its own signature.
    pub fn register<F>(self, factory: F) -> Result<Self, FunctionError>
    where
        F: FunctionFactory + 'static,
    {
        self.register_shared(Arc::new(factory))
    }

    /// Register a shared factory under its own signature.
    ///
    /// Fails if the signature does not parse or is already registered.
    pub fn register_shared(
        mut self,
        factory: Arc<dyn FunctionFactory>,
    ) -> Result<Self, FunctionError> {
        let signature = Signature::parse(factory.signature())?;
        let overloads = self
            .functions
            .entry(signature.name().to_string())
            .or_default();

        if overloads.iter().any(|o| o.signature == signature) {
            return Err(FunctionError::DuplicateSignature(signature.to_string()));
        }

        overloads.push(Overload { signature, factory });
        Ok(self)
    }

    /// Freeze the registry.
    pub fn build(self) -> FunctionRegistry {
        FunctionRegistry {
            functions: self.functions,
        }
    }
}

/// Immutable mapping from function name to its overloads.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: BTreeMap<String, Vec<Overload>>,
}

impl FunctionRegistry {
    /// Start building a registry.
    pub fn builder() -> FunctionRegistryBuilder {
        FunctionRegistryBuilder::default()
    }

    /// Registry with every built-in function.
    pub fn builtin() -> Result<Self, FunctionError> {
        Ok(Self::builder()
            .register(LongSequenceFunctionFactory)?
            .build())
    }

    /// Find the factory for `name` called with arguments of `arg_types`.
    ///
    /// Names are case-insensitive. When several overloads accept the
    /// arguments, the one needing the fewest widening conversions wins;
    /// ties go to the earliest registered.
    pub fn resolve(
        &self,
        name: &str,
        arg_types: &[ColumnType],
    ) -> Result<(&Signature, &dyn FunctionFactory), FunctionError> {
        let overloads = self
            .functions
            .get(&name.to_lowercase())
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))?;

        overloads
            .iter()
            .filter(|o| o.signature.accepts(arg_types))
            .min_by_key(|o| widening_count(&o.signature, arg_types))
            .map(|o| (&o.signature, o.factory.as_ref()))
            .ok_or_else(|| FunctionError::NoMatchingSignature {
                name: name.to_string(),
                arg_types: arg_types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                candidates: overloads
                    .iter()
                    .map(|o| o.signature.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Whether any overload of `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_lowercase())
    }

    /// All registered signatures, sorted by name.
    pub fn signatures(&self) -> Vec<String> {
        self.functions
            .values()
            .flatten()
            .map(|o| o.signature.to_string())
            .collect()
    }

    /// Number of registered overloads.
    pub fn len(&self) -> usize {
        self.functions.values().map(Vec::len).sum()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

fn widening_count(signature: &Signature, arg_types: &[ColumnType]) -> usize {
    signature
        .arg_types()
        .iter()
        .zip(arg_types)
        .filter(|(expected, actual)| expected != actual)
        .count()
}
