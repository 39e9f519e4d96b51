//! Read-only queries for a solver adapter.
//!
//! A native solver model needs three things from the front end: constant
//! values of parameters, a finite domain for every integer variable, and
//! the index sets of variable arrays. [`SolverView`] answers exactly those
//! on top of an [`Evaluator`] and exposes no solver configuration.

use std::rc::Rc;

use zinc_ir::{ExprId, ExprKind, VarId};

use crate::errors::{bounds_undetermined, integer_overflow, EvalResult};
use crate::{Evaluator, IntBounds, IntSetVal, Value};

/// Per-dimension index sets and total element count of an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayShape {
    pub index_sets: Vec<Rc<IntSetVal>>,
    pub len: usize,
}

pub struct SolverView<'e, 'a> {
    evaluator: &'e mut Evaluator<'a>,
}

impl<'e, 'a> SolverView<'e, 'a> {
    pub fn new(evaluator: &'e mut Evaluator<'a>) -> Self {
        Self { evaluator }
    }

    /// Constant value of a parameter expression.
    pub fn param_value(&mut self, e: ExprId) -> EvalResult<Value> {
        self.evaluator.eval(e)
    }

    pub fn var_bounds(&mut self, var: VarId) -> IntBounds {
        self.evaluator.var_bounds(var)
    }

    /// Declared domain of `var`, else the span of its bounds.
    pub fn var_domain(&mut self, var: VarId) -> EvalResult<Rc<IntSetVal>> {
        let decl = self.evaluator.model().var(var);
        if let Some(domain) = decl.ti.domain {
            return self.evaluator.eval_intset(domain);
        }
        let bounds = self.evaluator.var_bounds(var);
        if bounds.valid {
            Ok(Rc::new(IntSetVal::range(bounds.lower, bounds.upper)))
        } else {
            Err(bounds_undetermined("domain").or_span(decl.span))
        }
    }

    /// Index sets of an array expression.
    ///
    /// An identifier whose type-instantiation declares every range needs no
    /// initializer.
    pub fn array_shape(&mut self, e: ExprId) -> EvalResult<ArrayShape> {
        let model = self.evaluator.model();
        if let ExprKind::Ident {
            decl: Some(var), ..
        } = model.arena().kind(e)
        {
            let ranges = &model.var(var).ti.ranges;
            if !ranges.is_empty() && ranges.iter().all(Option::is_some) {
                let index_sets = (1..=ranges.len())
                    .map(|k| self.evaluator.index_set_of(e, k))
                    .collect::<EvalResult<Vec<_>>>()?;
                let len = index_sets
                    .iter()
                    .try_fold(1usize, |acc, set| {
                        let size = usize::try_from(set.size()?.raw()).ok()?;
                        acc.checked_mul(size)
                    })
                    .ok_or_else(|| integer_overflow("array shape"))?;
                return Ok(ArrayShape { index_sets, len });
            }
        }
        let arr = self.evaluator.eval_array(e)?;
        let index_sets = arr
            .dims()
            .iter()
            .map(|&(lo, hi)| Rc::new(IntSetVal::range(lo, hi)))
            .collect();
        Ok(ArrayShape {
            index_sets,
            len: arr.len(),
        })
    }
}
