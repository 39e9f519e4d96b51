#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use zinc_ir::{stdlib, Model};

use crate::{register_builtins, Evaluator};

/// A model with the standard library declared.
pub(crate) fn stdlib_model() -> Model {
    let mut model = Model::new();
    stdlib::declare(&mut model);
    model
}

/// Register every builtin for `model` and run `f` on a fresh evaluator.
pub(crate) fn with_evaluator<R>(model: &Model, f: impl FnOnce(&mut Evaluator<'_>) -> R) -> R {
    let registry = register_builtins(model).unwrap();
    let mut ev = Evaluator::new(model, &registry);
    f(&mut ev)
}
