//! Engine configuration passed to function factories and operators.

use serde::{Deserialize, Serialize};

/// Settings visible to function factories at plan time and to the
/// operators that consume their cursors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for sampling operators; `None` draws one from entropy
    pub random_seed: Option<u64>,

    /// Maximum number of rows emitted by result printers; `None` for all
    pub row_limit: Option<u64>,
}

impl EngineConfig {
    /// Set the sampling seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set the row limit.
    pub fn with_row_limit(mut self, limit: u64) -> Self {
        self.row_limit = Some(limit);
        self
    }
}
