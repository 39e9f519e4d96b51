//! The compilation session.

use zinc_diagnostic::{Diagnostic, ErrorCode};
use zinc_eval::{register_builtins, BuiltinRegistry, Evaluator, Value};
use zinc_ir::{stdlib, ExprId, Model};

use crate::SessionConfig;

/// One compilation: the model, its builtin registry and the settings.
pub struct Session {
    model: Model,
    registry: Option<BuiltinRegistry>,
    config: SessionConfig,
}

impl Session {
    /// A session whose model already holds the standard-library declarations.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn new(config: SessionConfig) -> Self {
        let mut model = Model::new();
        stdlib::declare(&mut model);
        tracing::debug!(functions = model.functions().count(), "standard library declared");
        Session {
            model,
            registry: None,
            config,
        }
    }

    #[inline]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Mutable access for adding declarations.
    #[inline]
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The registry, once [`Session::register_builtins`] has succeeded.
    #[inline]
    pub fn registry(&self) -> Option<&BuiltinRegistry> {
        self.registry.as_ref()
    }

    /// Bind every builtin to its declaration. Later calls reuse the first
    /// registry.
    ///
    /// A failure means the declared standard library and the native
    /// implementations disagree; it is reported as an internal error.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn register_builtins(&mut self) -> Result<&BuiltinRegistry, Diagnostic> {
        let registry = match self.registry.take() {
            Some(registry) => registry,
            None => register_builtins(&self.model).map_err(|err| {
                tracing::error!(error = %err, "builtin registration failed");
                err.to_diagnostic()
            })?,
        };
        tracing::debug!(bound = registry.len(), "builtins registered");
        Ok(self.registry.insert(registry))
    }

    /// A fresh evaluator configured from this session.
    pub fn evaluator(&self) -> Result<Evaluator<'_>, Diagnostic> {
        let Some(registry) = &self.registry else {
            return Err(not_registered());
        };
        Ok(Evaluator::builder(&self.model, registry)
            .config(self.config.eval)
            .build())
    }

    /// Evaluate `e` to a constant.
    pub fn eval(&self, e: ExprId) -> Result<Value, Diagnostic> {
        let mut evaluator = self.evaluator()?;
        evaluator.eval(e).map_err(|err| {
            tracing::debug!(error = %err, "constant evaluation failed");
            err.to_diagnostic()
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(SessionConfig::default())
    }
}

#[cold]
fn not_registered() -> Diagnostic {
    Diagnostic::error(ErrorCode::E9001)
        .with_message("builtins have not been registered for this session")
        .with_note("call `Session::register_builtins` before evaluating")
}
