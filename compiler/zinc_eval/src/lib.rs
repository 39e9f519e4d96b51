//! Zinc Eval - builtin registry and constant evaluator.
//!
//! This crate binds native implementations to the standard-library
//! declarations of a `Model` and evaluates expressions to compile-time
//! values.
//!
//! # Architecture
//!
//! - `IntSetVal`: canonical interval sets, sized without enumeration
//! - `RegistryBuilder` / `BuiltinRegistry`: one-shot binding of builtins to
//!   declarations by signature, then immutable
//! - `Evaluator`: generic and typed evaluation, identifier-chain resolution
//!   with cycle detection, scoped retention of intermediate values
//! - `compute_int_bounds`, `dom`, `dom_array`, `index_set_of`: bound and
//!   domain analysis for expressions involving solver variables
//! - `SolverView`: the queries a solver adapter needs
//!
//! Registration errors are fatal; evaluation errors are `EvalError`s with a
//! typed kind, a span and the chain of declarations being resolved.

mod bounds;
mod builtins;
pub mod errors;
mod evaluator;
mod int_val;
mod intset;
mod registry;
mod resolution;
mod solver_view;
mod stack;
#[cfg(test)]
mod test_support;
mod value;

pub use bounds::IntBounds;
pub use builtins::{all_builtins, register_builtins, Builtin};
pub use errors::{EvalError, EvalErrorKind, EvalResult, RegistrationError, RegistrationErrorKind};
pub use evaluator::{EvalConfig, EvalScope, Evaluator, EvaluatorBuilder};
pub use int_val::IntVal;
pub use intset::{IntRange, IntSetVal};
pub use registry::{
    ArrayBuiltin, BoolBuiltin, BuiltinFn, BuiltinRegistry, IntBuiltin, RegistryBuilder, SetBuiltin,
};
pub use resolution::{ResolutionFrame, ResolutionStack};
pub use solver_view::{ArrayShape, SolverView};
pub use value::{ArrayValue, Dims, Value};
