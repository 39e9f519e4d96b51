//! `EvaluatorBuilder` for creating `Evaluator` instances.

use zinc_ir::Model;

use super::Evaluator;
use crate::registry::BuiltinRegistry;
use crate::resolution::ResolutionStack;

/// Evaluation limits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    /// Maximum number of declarations resolved at once (chain length plus
    /// nesting). `None` for unlimited.
    pub max_depth: Option<usize>,
}

impl EvalConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 64;
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: Some(Self::DEFAULT_MAX_DEPTH),
        }
    }
}

/// Builder for `Evaluator`.
pub struct EvaluatorBuilder<'a> {
    model: &'a Model,
    registry: &'a BuiltinRegistry,
    config: EvalConfig,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(model: &'a Model, registry: &'a BuiltinRegistry) -> Self {
        Self {
            model,
            registry,
            config: EvalConfig::default(),
        }
    }

    #[must_use]
    pub fn config(mut self, config: EvalConfig) -> Self {
        self.config = config;
        self
    }

    /// Limit resolution depth; `None` removes the limit.
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Evaluator<'a> {
        Evaluator {
            model: self.model,
            registry: self.registry,
            config: self.config,
            resolving: ResolutionStack::new(self.config.max_depth),
            scratch: Vec::new(),
            open_scopes: 0,
        }
    }
}
