//! Constant expression evaluator.
//!
//! The `Evaluator` reduces expressions of a `Model` to [`Value`]s. Typed
//! entry points (`eval_int`, `eval_bool`, `eval_intset`, `eval_array`) wrap
//! the generic [`Evaluator::eval`] and check the value kind.
//!
//! # Identifier chains
//!
//! An identifier whose declaration has an initializer evaluates to that
//! initializer. Chains of identifiers (`a = b; b = c; c = 3`) are followed
//! in a loop, not by recursion; each step pushes a frame on the resolution
//! stack so that a declaration reached again while it is still being
//! evaluated is reported as a cyclic definition.
//!
//! # Scratch retention
//!
//! Sets and arrays produced by nested evaluations are retained by the
//! innermost open [`EvalScope`] and released when it closes.

mod builder;
mod operators;
mod scope_guard;

use std::rc::Rc;

use smallvec::SmallVec;
use zinc_ir::{ExprId, ExprKind, FnId, Model, Name, Span, VarId};

use crate::errors::{undefined_identifier, unsupported_shape, EvalError, EvalResult};
use crate::registry::{BuiltinFn, BuiltinRegistry};
use crate::resolution::{ResolutionFrame, ResolutionStack};
use crate::stack::ensure_sufficient_stack;
use crate::{errors, ArrayValue, IntSetVal, IntVal, Value};

pub use builder::{EvalConfig, EvaluatorBuilder};
pub use scope_guard::EvalScope;

/// End point of an identifier chain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Resolved {
    /// A non-identifier expression.
    Expr(ExprId),
    /// A declaration without initializer.
    Uninit(VarId),
}

/// Evaluates expressions of one `Model` against one `BuiltinRegistry`.
pub struct Evaluator<'a> {
    model: &'a Model,
    registry: &'a BuiltinRegistry,
    config: EvalConfig,
    resolving: ResolutionStack,
    scratch: Vec<Value>,
    open_scopes: usize,
}

impl<'a> Evaluator<'a> {
    /// Evaluator with the default configuration.
    pub fn new(model: &'a Model, registry: &'a BuiltinRegistry) -> Self {
        EvaluatorBuilder::new(model, registry).build()
    }

    pub fn builder(model: &'a Model, registry: &'a BuiltinRegistry) -> EvaluatorBuilder<'a> {
        EvaluatorBuilder::new(model, registry)
    }

    #[inline]
    pub fn model(&self) -> &'a Model {
        self.model
    }

    #[inline]
    pub fn registry(&self) -> &'a BuiltinRegistry {
        self.registry
    }

    #[inline]
    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Number of declarations currently being resolved.
    #[inline]
    pub fn depth(&self) -> usize {
        self.resolving.depth()
    }

    /// Number of intermediate values retained by open scopes.
    #[inline]
    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }

    /// Evaluate `e` to a value of any kind.
    pub fn eval(&mut self, e: ExprId) -> EvalResult<Value> {
        let value = ensure_sufficient_stack(|| {
            let mut scope = self.scoped();
            let result = match scope.resolve_chain(e) {
                Ok(Resolved::Expr(x)) => scope.eval_node(x),
                Ok(Resolved::Uninit(var)) => Err(scope.no_value(var)),
                Err(err) => Err(err),
            };
            result.map_err(|err| scope.annotate(err, e))
        })?;
        self.retain(&value);
        Ok(value)
    }

    pub fn eval_int(&mut self, e: ExprId) -> EvalResult<IntVal> {
        self.eval(e)?.into_int().map_err(|err| self.annotate(err, e))
    }

    pub fn eval_bool(&mut self, e: ExprId) -> EvalResult<bool> {
        self.eval(e)?.into_bool().map_err(|err| self.annotate(err, e))
    }

    pub fn eval_intset(&mut self, e: ExprId) -> EvalResult<Rc<IntSetVal>> {
        self.eval(e)?.into_set().map_err(|err| self.annotate(err, e))
    }

    pub fn eval_array(&mut self, e: ExprId) -> EvalResult<ArrayValue> {
        self.eval(e)?.into_array().map_err(|err| self.annotate(err, e))
    }

    /// Follow the identifier chain starting at `e`.
    ///
    /// Pushes one resolution frame per declaration visited; callers must
    /// hold an [`EvalScope`] so the frames are popped again. Only the first
    /// step counts against the depth limit.
    pub(crate) fn resolve_chain(&mut self, mut e: ExprId) -> EvalResult<Resolved> {
        let model = self.model;
        let mut tail = false;
        loop {
            let ExprKind::Ident { name, decl } = model.arena().kind(e) else {
                return Ok(Resolved::Expr(e));
            };
            let Some(var) = decl else {
                return Err(undefined_identifier(model.name_str(name)));
            };
            let span = model.arena().span(e);
            if tail {
                self.enter_tail_decl(var, span)?;
            } else {
                self.enter_decl(var, span)?;
                tail = true;
            }
            match model.var(var).init {
                Some(init) => e = init,
                None => return Ok(Resolved::Uninit(var)),
            }
        }
    }

    /// Push a resolution frame for `var`, reached from `span`.
    ///
    /// Fails if `var` is already being resolved or the depth limit is hit.
    /// Callers must hold an [`EvalScope`] so the frame is popped again.
    pub(crate) fn enter_decl(&mut self, var: VarId, span: Span) -> EvalResult<()> {
        let model = self.model;
        let name = model.var(var).name;
        self.resolving
            .push(ResolutionFrame { var, name, span }, model.interner())?;
        tracing::trace!(
            name = model.name_str(name),
            depth = self.resolving.depth(),
            "entering declaration"
        );
        Ok(())
    }

    /// Like [`Evaluator::enter_decl`] for a chain step that is walked in a
    /// loop rather than by recursion; exempt from the depth limit.
    fn enter_tail_decl(&mut self, var: VarId, span: Span) -> EvalResult<()> {
        let model = self.model;
        let name = model.var(var).name;
        self.resolving
            .push_tail(ResolutionFrame { var, name, span }, model.interner())?;
        tracing::trace!(
            name = model.name_str(name),
            depth = self.resolving.depth(),
            "following identifier chain"
        );
        Ok(())
    }

    /// `NoConstantValue` for a declaration without initializer.
    pub(crate) fn no_value(&self, var: VarId) -> EvalError {
        let decl = self.model.var(var);
        errors::no_constant_value(self.model.name_str(decl.name)).or_span(decl.span)
    }

    /// Attach the location of `e` and the current resolution backtrace.
    pub(crate) fn annotate(&self, err: EvalError, e: ExprId) -> EvalError {
        let span = self.model.arena().span(e);
        let err = if span.is_dummy() { err } else { err.or_span(span) };
        self.resolving.attach_backtrace(err, self.model.interner())
    }

    /// Keep a heap value alive until the innermost open scope closes.
    fn retain(&mut self, value: &Value) {
        if self.open_scopes > 0 && value.is_heap() {
            self.scratch.push(value.clone());
        }
    }

    fn eval_node(&mut self, x: ExprId) -> EvalResult<Value> {
        let model = self.model;
        let arena = model.arena();
        match arena.kind(x) {
            ExprKind::IntLit(v) => Ok(Value::Int(IntVal::new(v))),
            ExprKind::BoolLit(b) => Ok(Value::Bool(b)),
            ExprKind::SetLit(elems) => {
                let values = arena
                    .list(elems)
                    .iter()
                    .map(|&el| self.eval_int(el))
                    .collect::<EvalResult<SmallVec<[IntVal; 8]>>>()?;
                Ok(Value::Set(Rc::new(IntSetVal::from_values(values))))
            }
            ExprKind::Range { lo, hi } => {
                let lo = self.eval_int(lo)?;
                let hi = self.eval_int(hi)?;
                Ok(Value::Set(Rc::new(IntSetVal::range(lo, hi))))
            }
            // `resolve_chain` never stops on an identifier.
            ExprKind::Ident { .. } => self.eval(x),
            ExprKind::ArrayLit(id) => {
                ArrayValue::from_literal(arena.array_lit(id), arena.ty(x)).map(Value::Array)
            }
            ExprKind::ArrayAccess { array, indices } => {
                self.eval_access(array, arena.list(indices))
            }
            ExprKind::Call { name, decl, args } => self.eval_call(name, decl, arena.list(args)),
            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right),
            ExprKind::Unary { op, operand } => self.eval_unary(op, operand),
            ExprKind::IfThenElse {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_bool(cond)? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
        }
    }

    fn eval_access(&mut self, array: ExprId, indices: &[ExprId]) -> EvalResult<Value> {
        let arr = self.eval_array(array)?;
        let indices = indices
            .iter()
            .map(|&i| self.eval_int(i))
            .collect::<EvalResult<SmallVec<[IntVal; 2]>>>()?;
        let pos = arr.position(&indices)?;
        self.eval(arr.elems()[pos])
    }

    /// Dispatch a call through the registry by its resolved declaration.
    fn eval_call(&mut self, name: Name, decl: Option<FnId>, args: &[ExprId]) -> EvalResult<Value> {
        let name = self.model.name_str(name);
        let Some(id) = decl else {
            return Err(undefined_identifier(name));
        };
        let Some(builtin) = self.registry.get(id) else {
            return Err(unsupported_shape(
                "evaluation",
                &format!("`{name}` has no builtin implementation"),
            ));
        };
        let mut scope = self.scoped();
        match builtin {
            BuiltinFn::Int(f) => f(&mut *scope, args).map(Value::Int),
            BuiltinFn::Bool(f) => f(&mut *scope, args).map(Value::Bool),
            BuiltinFn::Set(f) => f(&mut *scope, args).map(Value::Set),
            BuiltinFn::Array(f) => f(&mut *scope, args).map(Value::Array),
        }
    }
}

#[cfg(test)]
mod tests;
