//! `array1d` .. `array6d`: reshape a flat array under explicit index sets.

use zinc_ir::ExprId;

use crate::errors::{arity_mismatch, non_range_set, shape_mismatch, EvalResult};
use crate::{ArrayValue, Dims, Evaluator, IntVal};

/// `arrayNd(s1, .., sN, a)`.
///
/// Every `si` must be exactly one interval, so empty sets (including
/// `1..0`) are rejected. The product of the widths must equal the length of
/// `a`. The result shares `a`'s elements.
pub(super) fn array_nd<const N: usize>(ev: &mut Evaluator<'_>, args: &[ExprId]) -> EvalResult<ArrayValue> {
    if args.len() != N + 1 {
        return Err(arity_mismatch(&format!("array{N}d"), N + 1, args.len()));
    }
    let (sets, flat) = args.split_at(N);
    let arr = ev.eval_array(flat[0])?;

    let mut dims = Dims::new();
    // Saturating, so an overflowing product still compares unequal.
    let mut product: i128 = 1;
    for &s in sets {
        let set = ev.eval_intset(s)?;
        let [only] = set.intervals() else {
            return Err(ev.annotate(non_range_set(&format!("array{N}d"), &set), s));
        };
        let (lo, hi) = (only.lo, only.hi);
        product = product.saturating_mul(hi.wide() - lo.wide() + 1);
        dims.push((lo, hi));
    }

    let found = arr.len();
    if i128::try_from(found).ok() != Some(product) {
        return Err(ev.annotate(shape_mismatch(IntVal::from_wide(product), found), flat[0]));
    }
    Ok(arr.reshape(dims))
}
