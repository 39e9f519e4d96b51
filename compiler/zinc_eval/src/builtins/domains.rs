//! Domain queries: `dom`, `dom_array`, `card` and `ub` on set variables.
//!
//! `dom` and `ub` walk identifier chains until they reach a form they can
//! read directly. A declaration without initializer contributes its declared
//! domain; anything else the walk reaches is rejected.

use std::rc::Rc;

use zinc_ir::{ExprId, ExprKind, VarId};

use super::expect_args;
use crate::errors::{bounds_undetermined, integer_overflow, unsupported_shape, EvalResult};
use crate::evaluator::Resolved;
use crate::{Evaluator, IntSetVal, IntVal};

impl Evaluator<'_> {
    /// Domain of an integer expression: a literal, or the declared domain
    /// at the end of an identifier chain.
    pub fn dom(&mut self, e: ExprId) -> EvalResult<Rc<IntSetVal>> {
        let mut scope = self.scoped();
        let result = match scope.resolve_chain(e) {
            Ok(Resolved::Uninit(var)) => scope.declared_domain(var, "dom"),
            Ok(Resolved::Expr(x)) => match scope.model().arena().kind(x) {
                ExprKind::IntLit(v) => Ok(Rc::new(IntSetVal::singleton(IntVal::new(v)))),
                kind => Err(scope.annotate(unsupported_shape("dom", kind.describe()), x)),
            },
            Err(err) => Err(err),
        };
        result.map_err(|err| scope.annotate(err, e))
    }

    /// Union of the element domains of an array; empty for an empty array.
    pub fn dom_array(&mut self, e: ExprId) -> EvalResult<Rc<IntSetVal>> {
        let mut scope = self.scoped();
        let result = scope.dom_array_in_scope(e);
        result.map_err(|err| scope.annotate(err, e))
    }

    /// Cardinality of a par set, from interval widths.
    pub fn card(&mut self, e: ExprId) -> EvalResult<IntVal> {
        let set = self.eval_intset(e)?;
        set.size()
            .ok_or_else(|| self.annotate(integer_overflow("card"), e))
    }

    /// Upper bound of a set variable: the set literal at the end of its
    /// identifier chain, or its declared domain.
    pub fn ub_set(&mut self, e: ExprId) -> EvalResult<Rc<IntSetVal>> {
        let mut scope = self.scoped();
        let result = match scope.resolve_chain(e) {
            Ok(Resolved::Uninit(var)) => scope.declared_domain(var, "ub"),
            Ok(Resolved::Expr(x)) => match scope.model().arena().kind(x) {
                ExprKind::SetLit(_) | ExprKind::Range { .. } => scope.eval_intset(x),
                kind => Err(scope.annotate(unsupported_shape("ub", kind.describe()), x)),
            },
            Err(err) => Err(err),
        };
        result.map_err(|err| scope.annotate(err, e))
    }

    fn dom_array_in_scope(&mut self, e: ExprId) -> EvalResult<Rc<IntSetVal>> {
        let x = match self.resolve_chain(e)? {
            Resolved::Uninit(var) => return Err(self.no_value(var)),
            Resolved::Expr(x) => x,
        };
        match self.model().arena().kind(x) {
            ExprKind::ArrayLit(_) | ExprKind::Call { .. } => {}
            kind => return Err(self.annotate(unsupported_shape("dom_array", kind.describe()), x)),
        }
        let arr = self.eval_array(x)?;
        let mut acc = IntSetVal::empty();
        for &el in arr.elems() {
            let dom = self.dom(el)?;
            acc = acc.union(&dom);
        }
        Ok(Rc::new(acc))
    }

    fn declared_domain(&mut self, var: VarId, operation: &str) -> EvalResult<Rc<IntSetVal>> {
        let decl = self.model().var(var);
        match decl.ti.domain {
            Some(domain) => self.eval_intset(domain),
            None => Err(bounds_undetermined(operation).or_span(decl.span)),
        }
    }
}

pub(super) fn dom(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<Rc<IntSetVal>> {
    let [arg] = expect_args::<1>("dom", args)?;
    ev.dom(arg)
}

pub(super) fn dom_array(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<Rc<IntSetVal>> {
    let [arg] = expect_args::<1>("dom_array", args)?;
    ev.dom_array(arg)
}

pub(super) fn card(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("card", args)?;
    ev.card(arg)
}

pub(super) fn ub_set(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<Rc<IntSetVal>> {
    let [arg] = expect_args::<1>("ub", args)?;
    ev.ub_set(arg)
}
