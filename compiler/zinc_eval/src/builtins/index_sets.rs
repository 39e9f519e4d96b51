//! `index_set` and `index_set_<k>of<n>`.

use std::rc::Rc;

use zinc_ir::{ExprId, ExprKind};

use super::expect_args;
use crate::errors::{dimension_out_of_range, undefined_identifier, unsupported_shape, EvalResult};
use crate::{Evaluator, IntSetVal};

impl Evaluator<'_> {
    /// Index set of dimension `k` (1-based) of the array named by `e`.
    ///
    /// A range declared in the array's type-instantiation wins; otherwise
    /// the bound is read from the evaluated array.
    pub fn index_set_of(&mut self, e: ExprId, k: usize) -> EvalResult<Rc<IntSetVal>> {
        let model = self.model();
        let ExprKind::Ident { name, decl } = model.arena().kind(e) else {
            return Err(self.annotate(
                unsupported_shape("index_set", "only identifiers are supported"),
                e,
            ));
        };
        let Some(var) = decl else {
            return Err(self.annotate(undefined_identifier(model.name_str(name)), e));
        };
        let ranges = &model.var(var).ti.ranges;
        let Some(&declared) = k.checked_sub(1).and_then(|i| ranges.get(i)) else {
            return Err(self.annotate(dimension_out_of_range("index_set", k, ranges.len()), e));
        };
        if let Some(range) = declared {
            return self.eval_intset(range);
        }
        let arr = self.eval_array(e)?;
        match arr.dim(k) {
            Some((lo, hi)) => Ok(Rc::new(IntSetVal::range(lo, hi))),
            None => Err(self.annotate(dimension_out_of_range("index_set", k, arr.ndims()), e)),
        }
    }
}

/// `index_set_<K>of<n>`; `n` is fixed by the declaration's signature.
pub(super) fn index_set<const K: usize>(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<Rc<IntSetVal>> {
    let [arg] = expect_args::<1>("index_set", args)?;
    ev.index_set_of(arg, K)
}
