//! Integer bound analysis.
//!
//! [`Evaluator::compute_int_bounds`] derives a conservative `[lower, upper]`
//! span for an integer expression that may involve solver variables. It
//! never fails: anything it cannot reason about, including evaluation
//! errors, cycles and overflow, yields [`IntBounds::INVALID`].
//!
//! Par integer expressions are evaluated exactly first; the structural
//! rules below only apply when that is impossible.
//!
//! | Expression | Bounds |
//! |------------|--------|
//! | literal | exact |
//! | identifier | declared domain, else initializer bounds |
//! | `+ - *` | interval arithmetic |
//! | `div` | corner quotients, only if the divisor excludes 0 |
//! | `mod` | `±(max abs divisor - 1)`, clipped by the dividend |
//! | `-e` | negated span |
//! | if-then-else | hull of both branches |
//! | `a[i]` | element domain of `a`, else hull of all elements |
//! | `bool2int`, `min`, `max`, `sum`, `lb`, `ub` | derived from argument bounds, builtins only |

use zinc_ir::{BinaryOp, ExprId, ExprKind, Span, UnaryOp, VarId};

use crate::stack::ensure_sufficient_stack;
use crate::{Evaluator, IntVal};

/// Inclusive integer bounds; `valid` is false when none could be derived.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntBounds {
    pub valid: bool,
    pub lower: IntVal,
    pub upper: IntVal,
}

impl IntBounds {
    pub const INVALID: Self = Self {
        valid: false,
        lower: IntVal::ZERO,
        upper: IntVal::ZERO,
    };

    pub fn new(lower: IntVal, upper: IntVal) -> Self {
        Self {
            valid: true,
            lower,
            upper,
        }
    }

    pub fn exact(value: IntVal) -> Self {
        Self::new(value, value)
    }

    /// Smallest bounds containing both; invalid if either is.
    #[must_use]
    pub fn hull(self, other: IntBounds) -> Self {
        if self.valid && other.valid {
            Self::new(self.lower.min(other.lower), self.upper.max(other.upper))
        } else {
            Self::INVALID
        }
    }
}

type Interval = (IntVal, IntVal);

impl Evaluator<'_> {
    /// Bounds of an integer expression. Never fails.
    pub fn compute_int_bounds(&mut self, e: ExprId) -> IntBounds {
        match self.bounds_of(e) {
            Some((lower, upper)) => IntBounds::new(lower, upper),
            None => IntBounds::INVALID,
        }
    }

    /// Whether [`Evaluator::compute_int_bounds`] succeeds for `e`.
    pub fn has_bounds(&mut self, e: ExprId) -> bool {
        self.compute_int_bounds(e).valid
    }

    /// Bounds of a declaration: its domain, else its initializer's bounds.
    pub fn var_bounds(&mut self, var: VarId) -> IntBounds {
        let span = self.model().var(var).span;
        let mut scope = self.scoped();
        match scope.decl_bounds(var, span) {
            Some((lower, upper)) => IntBounds::new(lower, upper),
            None => IntBounds::INVALID,
        }
    }

    fn bounds_of(&mut self, e: ExprId) -> Option<Interval> {
        ensure_sufficient_stack(|| {
            let mut scope = self.scoped();
            scope.bounds_in_scope(e)
        })
    }

    fn bounds_in_scope(&mut self, e: ExprId) -> Option<Interval> {
        let model = self.model();
        let arena = model.arena();
        let kind = arena.kind(e);
        if let ExprKind::IntLit(v) = kind {
            let v = IntVal::new(v);
            return Some((v, v));
        }
        let ty = arena.ty(e);
        if ty.is_int() && !ty.is_var() {
            if let Ok(v) = self.eval_int(e) {
                return Some((v, v));
            }
        }
        match kind {
            ExprKind::Ident {
                decl: Some(var), ..
            } => self.decl_bounds(var, arena.span(e)),
            ExprKind::Binary { op, left, right } if op.is_arithmetic() => {
                let a = self.bounds_of(left)?;
                let b = self.bounds_of(right)?;
                arithmetic_bounds(op, a, b)
            }
            ExprKind::Unary {
                op: UnaryOp::Neg,
                operand,
            } => {
                let (lo, hi) = self.bounds_of(operand)?;
                Some((hi.checked_neg()?, lo.checked_neg()?))
            }
            ExprKind::IfThenElse {
                then_branch,
                else_branch,
                ..
            } => {
                let (tlo, thi) = self.bounds_of(then_branch)?;
                let (elo, ehi) = self.bounds_of(else_branch)?;
                Some((tlo.min(elo), thi.max(ehi)))
            }
            ExprKind::ArrayAccess { array, .. } => self.element_hull(array),
            // User functions that reuse a builtin's name get no call rule.
            ExprKind::Call {
                name,
                decl: Some(decl),
                args,
            } if self.registry().is_bound(decl) => {
                self.call_bounds(model.name_str(name), arena.list(args))
            }
            _ => None,
        }
    }

    /// Requires an open scope: the declaration stays entered until it closes.
    fn decl_bounds(&mut self, var: VarId, span: Span) -> Option<Interval> {
        self.enter_decl(var, span).ok()?;
        let decl = self.model().var(var);
        if let Some(domain) = decl.ti.domain {
            if let Some(bounds) = self.set_bounds(domain) {
                return Some(bounds);
            }
        }
        let init = decl.init?;
        self.bounds_of(init)
    }

    /// Min and max of a par set expression.
    fn set_bounds(&mut self, set: ExprId) -> Option<Interval> {
        let set = self.eval_intset(set).ok()?;
        Some((set.min()?, set.max()?))
    }

    fn element_hull(&mut self, array: ExprId) -> Option<Interval> {
        let model = self.model();
        if let ExprKind::Ident {
            decl: Some(var), ..
        } = model.arena().kind(array)
        {
            if let Some(bounds) = model.var(var).ti.domain.and_then(|d| self.set_bounds(d)) {
                return Some(bounds);
            }
        }
        let elems = self.element_bounds(array)?;
        let lo = elems.iter().map(|b| b.0).min()?;
        let hi = elems.iter().map(|b| b.1).max()?;
        Some((lo, hi))
    }

    /// Bounds of every element of an evaluable array.
    fn element_bounds(&mut self, array: ExprId) -> Option<Vec<Interval>> {
        let arr = self.eval_array(array).ok()?;
        arr.elems().iter().map(|&el| self.bounds_of(el)).collect()
    }

    fn call_bounds(&mut self, name: &str, args: &[ExprId]) -> Option<Interval> {
        match (name, args) {
            ("bool2int", _) => Some((IntVal::ZERO, IntVal::ONE)),
            ("min" | "max", &[a, b]) => {
                let (alo, ahi) = self.bounds_of(a)?;
                let (blo, bhi) = self.bounds_of(b)?;
                if name == "min" {
                    Some((alo.min(blo), ahi.min(bhi)))
                } else {
                    Some((alo.max(blo), ahi.max(bhi)))
                }
            }
            ("min" | "max", &[array]) => {
                let elems = self.element_bounds(array)?;
                let (los, his) = (elems.iter().map(|b| b.0), elems.iter().map(|b| b.1));
                if name == "min" {
                    Some((los.min()?, his.min()?))
                } else {
                    Some((los.max()?, his.max()?))
                }
            }
            ("lb" | "ub", &[a]) => {
                let (lo, hi) = self.bounds_of(a)?;
                let v = if name == "lb" { lo } else { hi };
                Some((v, v))
            }
            ("sum", &[array]) => {
                let elems = self.element_bounds(array)?;
                elems.iter().try_fold((IntVal::ZERO, IntVal::ZERO), |(lo, hi), b| {
                    Some((lo.checked_add(b.0)?, hi.checked_add(b.1)?))
                })
            }
            _ => None,
        }
    }
}

fn arithmetic_bounds(op: BinaryOp, (alo, ahi): Interval, (blo, bhi): Interval) -> Option<Interval> {
    match op {
        BinaryOp::Add => Some((alo.checked_add(blo)?, ahi.checked_add(bhi)?)),
        BinaryOp::Sub => Some((alo.checked_sub(bhi)?, ahi.checked_sub(blo)?)),
        BinaryOp::Mul => corners((alo, ahi), (blo, bhi), IntVal::checked_mul),
        BinaryOp::Div if blo > IntVal::ZERO || bhi < IntVal::ZERO => {
            corners((alo, ahi), (blo, bhi), IntVal::checked_div)
        }
        BinaryOp::Mod if !(blo.is_zero() && bhi.is_zero()) => {
            let m = blo
                .checked_abs()?
                .max(bhi.checked_abs()?)
                .checked_sub(IntVal::ONE)?;
            let lo = if alo >= IntVal::ZERO {
                IntVal::ZERO
            } else {
                alo.max(m.checked_neg()?)
            };
            let hi = if ahi <= IntVal::ZERO {
                IntVal::ZERO
            } else {
                ahi.min(m)
            };
            Some((lo, hi))
        }
        _ => None,
    }
}

/// Extremes of `f` over the four corners; exact for monotone `f`.
fn corners(a: Interval, b: Interval, f: fn(IntVal, IntVal) -> Option<IntVal>) -> Option<Interval> {
    let values = [f(a.0, b.0)?, f(a.0, b.1)?, f(a.1, b.0)?, f(a.1, b.1)?];
    let lo = values.iter().copied().min()?;
    let hi = values.iter().copied().max()?;
    Some((lo, hi))
}

#[cfg(test)]
mod tests;
