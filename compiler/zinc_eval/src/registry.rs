//! Builtin registry: native implementations bound to declared functions.
//!
//! Binding is a single pass. A [`RegistryBuilder`] takes one
//! `(name, signature, implementation)` triple per [`RegistryBuilder::bind`]
//! call, resolves the signature against the model's declarations with
//! [`Model::match_fn`], and records the implementation under the matched
//! [`FnId`]. [`RegistryBuilder::finish`] produces an immutable
//! [`BuiltinRegistry`]; declarations themselves are never mutated.
//!
//! Every failure (no match, ambiguity, a second bind of one declaration) is
//! a [`RegistrationError`] and aborts the pass.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use zinc_ir::{ExprId, FnId, FnMatch, Model, Type};

use crate::errors::{EvalResult, RegistrationError, RegistrationErrorKind};
use crate::{ArrayValue, Evaluator, IntSetVal, IntVal};

pub type IntBuiltin = fn(&mut Evaluator<'_>, &[ExprId]) -> EvalResult<IntVal>;
pub type BoolBuiltin = fn(&mut Evaluator<'_>, &[ExprId]) -> EvalResult<bool>;
pub type SetBuiltin = fn(&mut Evaluator<'_>, &[ExprId]) -> EvalResult<Rc<IntSetVal>>;
pub type ArrayBuiltin = fn(&mut Evaluator<'_>, &[ExprId]) -> EvalResult<ArrayValue>;

/// A native implementation, tagged by the kind of value it returns.
#[derive(Clone, Copy)]
pub enum BuiltinFn {
    Int(IntBuiltin),
    Bool(BoolBuiltin),
    Set(SetBuiltin),
    Array(ArrayBuiltin),
}

impl BuiltinFn {
    /// Name of the result kind.
    pub fn shape(self) -> &'static str {
        match self {
            BuiltinFn::Int(_) => "int",
            BuiltinFn::Bool(_) => "bool",
            BuiltinFn::Set(_) => "set of int",
            BuiltinFn::Array(_) => "array",
        }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.shape())
    }
}

/// Immutable map from declaration to native implementation.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    impls: FxHashMap<FnId, BuiltinFn>,
}

impl BuiltinRegistry {
    #[inline]
    pub fn get(&self, decl: FnId) -> Option<BuiltinFn> {
        self.impls.get(&decl).copied()
    }

    #[inline]
    pub fn is_bound(&self, decl: FnId) -> bool {
        self.impls.contains_key(&decl)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.impls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.impls.is_empty()
    }
}

/// Single-pass binder producing a [`BuiltinRegistry`].
pub struct RegistryBuilder<'m> {
    model: &'m Model,
    impls: FxHashMap<FnId, BuiltinFn>,
}

impl<'m> RegistryBuilder<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            impls: FxHashMap::default(),
        }
    }

    /// Bind `f` to the declaration of `name` that best matches `params`.
    pub fn bind(&mut self, name: &str, params: &[Type], f: BuiltinFn) -> Result<FnId, RegistrationError> {
        let fail = |kind| RegistrationError::new(kind, name, render_signature(params));
        let Some(interned) = self.model.interner().get(name) else {
            return Err(fail(RegistrationErrorKind::NoMatchingDeclaration));
        };
        let decl = match self.model.match_fn(interned, params) {
            FnMatch::Unique(decl) => decl,
            FnMatch::NoMatch => return Err(fail(RegistrationErrorKind::NoMatchingDeclaration)),
            FnMatch::Ambiguous(candidates) => {
                return Err(fail(RegistrationErrorKind::AmbiguousDeclaration {
                    candidates: candidates.len(),
                }))
            }
        };
        if self.impls.contains_key(&decl) {
            return Err(fail(RegistrationErrorKind::AlreadyBound));
        }
        self.impls.insert(decl, f);
        tracing::debug!(name, signature = %render_signature(params), shape = f.shape(), "bound builtin");
        Ok(decl)
    }

    pub fn finish(self) -> BuiltinRegistry {
        BuiltinRegistry { impls: self.impls }
    }
}

/// `(int, array[$_] of int)`.
fn render_signature(params: &[Type]) -> String {
    let params: Vec<String> = params.iter().map(ToString::to_string).collect();
    format!("({})", params.join(", "))
}
