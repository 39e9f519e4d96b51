//! `lb`, `ub`, `lb_array`, `ub_array` and `has_bounds`.

use zinc_ir::ExprId;

use super::expect_args;
use crate::errors::{bounds_undetermined, empty_collection, EvalResult};
use crate::{Evaluator, IntBounds, IntVal};

fn exact_bounds(ev: &mut Evaluator<'_>, e: ExprId, operation: &str) -> EvalResult<IntBounds> {
    let bounds = ev.compute_int_bounds(e);
    if bounds.valid {
        Ok(bounds)
    } else {
        Err(ev.annotate(bounds_undetermined(operation), e))
    }
}

pub(super) fn lb(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("lb", args)?;
    Ok(exact_bounds(ev, arg, "lb")?.lower)
}

pub(super) fn ub(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("ub", args)?;
    Ok(exact_bounds(ev, arg, "ub")?.upper)
}

/// Smallest lower bound over the elements of a non-empty array.
pub(super) fn lb_array(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("lb_array", args)?;
    let arr = ev.eval_array(arg)?;
    let mut lowest: Option<IntVal> = None;
    for &el in arr.elems() {
        let lower = exact_bounds(ev, el, "lb_array")?.lower;
        lowest = Some(lowest.map_or(lower, |l| l.min(lower)));
    }
    lowest.ok_or_else(|| empty_collection("lb_array"))
}

/// Largest upper bound over the elements of a non-empty array.
pub(super) fn ub_array(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("ub_array", args)?;
    let arr = ev.eval_array(arg)?;
    let mut highest: Option<IntVal> = None;
    for &el in arr.elems() {
        let upper = exact_bounds(ev, el, "ub_array")?.upper;
        highest = Some(highest.map_or(upper, |h| h.max(upper)));
    }
    highest.ok_or_else(|| empty_collection("ub_array"))
}

pub(super) fn has_bounds(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<bool> {
    let [arg] = expect_args::<1>("has_bounds", args)?;
    Ok(ev.has_bounds(arg))
}
