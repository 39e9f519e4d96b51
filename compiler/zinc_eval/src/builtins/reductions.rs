//! Array reductions and scalar conversions: `min`, `max`, `sum`, `length`,
//! `bool2int`, `forall`, `exists`.

use zinc_ir::ExprId;

use super::expect_args;
use crate::errors::{empty_collection, integer_overflow, type_mismatch, unsupported_operand, EvalResult};
use crate::{Evaluator, IntVal};

#[derive(Copy, Clone)]
enum Extremum {
    Min,
    Max,
}

impl Extremum {
    fn name(self) -> &'static str {
        match self {
            Extremum::Min => "min",
            Extremum::Max => "max",
        }
    }

    fn pick(self, a: IntVal, b: IntVal) -> IntVal {
        match self {
            Extremum::Min => a.min(b),
            Extremum::Max => a.max(b),
        }
    }
}

/// Shared body of `min`/`max`: one array argument, or two integers.
fn extremum(ev: &mut Evaluator<'_>, args: &[ExprId], which: Extremum) -> EvalResult<IntVal> {
    match *args {
        [arg] => {
            if ev.model().arena().ty(arg).is_set() {
                return Err(unsupported_operand(which.name(), "sets"));
            }
            let arr = ev.eval_array(arg)?;
            let mut best: Option<IntVal> = None;
            for &el in arr.elems() {
                let v = ev.eval_int(el)?;
                best = Some(best.map_or(v, |b| which.pick(b, v)));
            }
            best.ok_or_else(|| empty_collection(which.name()))
        }
        [a, b] => {
            let a = ev.eval_int(a)?;
            let b = ev.eval_int(b)?;
            Ok(which.pick(a, b))
        }
        _ => Err(type_mismatch(
            which.name(),
            "1 or 2 arguments",
            &format!("{} arguments", args.len()),
        )),
    }
}

pub(super) fn min(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    extremum(ev, args, Extremum::Min)
}

pub(super) fn max(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    extremum(ev, args, Extremum::Max)
}

/// `min` of a par `set of int`: its first interval bound.
pub(super) fn min_set(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("min", args)?;
    ev.eval_intset(arg)?
        .min()
        .ok_or_else(|| empty_collection("min"))
}

pub(super) fn max_set(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("max", args)?;
    ev.eval_intset(arg)?
        .max()
        .ok_or_else(|| empty_collection("max"))
}

/// Left-to-right checked sum; 0 for the empty array.
pub(super) fn sum(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("sum", args)?;
    let arr = ev.eval_array(arg)?;
    let mut total = IntVal::ZERO;
    for &el in arr.elems() {
        let v = ev.eval_int(el)?;
        total = total
            .checked_add(v)
            .ok_or_else(|| integer_overflow("sum"))?;
    }
    Ok(total)
}

pub(super) fn length(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("length", args)?;
    let arr = ev.eval_array(arg)?;
    IntVal::from_len(arr.len()).ok_or_else(|| integer_overflow("length"))
}

pub(super) fn bool2int(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<IntVal> {
    let [arg] = expect_args::<1>("bool2int", args)?;
    Ok(if ev.eval_bool(arg)? {
        IntVal::ONE
    } else {
        IntVal::ZERO
    })
}

pub(super) fn forall(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<bool> {
    let [arg] = expect_args::<1>("forall", args)?;
    let arr = ev.eval_array(arg)?;
    for &el in arr.elems() {
        if !ev.eval_bool(el)? {
            return Ok(false);
        }
    }
    Ok(true)
}

pub(super) fn exists(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<bool> {
    let [arg] = expect_args::<1>("exists", args)?;
    let arr = ev.eval_array(arg)?;
    for &el in arr.elems() {
        if ev.eval_bool(el)? {
            return Ok(true);
        }
    }
    Ok(false)
}
