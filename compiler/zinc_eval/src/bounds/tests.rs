use pretty_assertions::assert_eq;
use zinc_ir::{BinaryOp, ExprId, ExprKind, Model, Type, TypeInst, UnaryOp};

use super::*;
use crate::test_support::{stdlib_model, with_evaluator};

fn bounds(lo: i64, hi: i64) -> IntBounds {
    IntBounds::new(IntVal::new(lo), IntVal::new(hi))
}

fn var_in(model: &mut Model, name: &str, lo: i64, hi: i64) -> ExprId {
    let domain = model.int_range(lo, hi);
    let var = model.declare_var(name, TypeInst::new(Type::var_int()).with_domain(domain), None);
    model.ident(var)
}

fn free_var(model: &mut Model, name: &str) -> ExprId {
    let var = model.declare_var(name, TypeInst::new(Type::var_int()), None);
    model.ident(var)
}

fn bounds_of(model: &Model, e: ExprId) -> IntBounds {
    with_evaluator(model, |ev| ev.compute_int_bounds(e))
}

#[test]
fn test_hull() {
    assert_eq!(bounds(1, 3).hull(bounds(-2, 0)), bounds(-2, 3));
    assert_eq!(bounds(1, 3).hull(IntBounds::INVALID), IntBounds::INVALID);
    assert_eq!(IntBounds::exact(IntVal::new(7)), bounds(7, 7));
}

#[test]
fn test_literal_and_par_expression() {
    let mut model = stdlib_model();
    let (three, four) = (model.int(3), model.int(4));
    let product = model.binary(BinaryOp::Mul, three, four);
    let n = model.declare_var("n", TypeInst::new(Type::par_int()), Some(product));
    let n = model.ident(n);
    assert_eq!(bounds_of(&model, three), bounds(3, 3));
    assert_eq!(bounds_of(&model, n), bounds(12, 12));
}

#[test]
fn test_identifier_uses_declared_domain() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", -1, 6);
    assert_eq!(bounds_of(&model, x), bounds(-1, 6));
}

#[test]
fn test_identifier_without_domain_uses_initializer() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", 0, 4);
    let one = model.int(1);
    let init = model.binary(BinaryOp::Add, x, one);
    let y = model.declare_var("y", TypeInst::new(Type::var_int()), Some(init));
    let y = model.ident(y);
    assert_eq!(bounds_of(&model, y), bounds(1, 5));
}

#[test]
fn test_interval_arithmetic() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", -2, 3);
    let y = var_in(&mut model, "y", 4, 5);
    let add = model.binary(BinaryOp::Add, x, y);
    let sub = model.binary(BinaryOp::Sub, x, y);
    let mul = model.binary(BinaryOp::Mul, x, y);
    let neg = model.unary(UnaryOp::Neg, x);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(add), bounds(2, 8));
        assert_eq!(ev.compute_int_bounds(sub), bounds(-7, -1));
        assert_eq!(ev.compute_int_bounds(mul), bounds(-10, 15));
        assert_eq!(ev.compute_int_bounds(neg), bounds(-3, 2));
    });
}

#[test]
fn test_division() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", 1, 10);
    let d = var_in(&mut model, "d", 2, 3);
    let z = var_in(&mut model, "z", -1, 1);
    let div = model.binary(BinaryOp::Div, x, d);
    let div_zero = model.binary(BinaryOp::Div, x, z);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(div), bounds(0, 5));
        assert!(!ev.compute_int_bounds(div_zero).valid);
    });
}

#[test]
fn test_modulo() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", -5, 7);
    let m = var_in(&mut model, "m", 3, 4);
    let pos = var_in(&mut model, "pos", 2, 9);
    let four = model.int(4);
    let zero = model.int(0);
    let signed = model.binary(BinaryOp::Mod, x, m);
    let positive = model.binary(BinaryOp::Mod, pos, four);
    let by_zero = model.binary(BinaryOp::Mod, pos, zero);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(signed), bounds(-3, 3));
        assert_eq!(ev.compute_int_bounds(positive), bounds(0, 3));
        assert!(!ev.has_bounds(by_zero));
    });
}

#[test]
fn test_overflow_is_invalid() {
    let mut model = stdlib_model();
    let x = var_in(&mut model, "x", 0, i64::MAX);
    let one = model.int(1);
    let next = model.binary(BinaryOp::Add, x, one);
    assert_eq!(bounds_of(&model, next), IntBounds::INVALID);
}

#[test]
fn test_if_then_else_hull() {
    let mut model = stdlib_model();
    let b = model.declare_var("b", TypeInst::new(Type::var_bool()), None);
    let b = model.ident(b);
    let x = var_in(&mut model, "x", 1, 3);
    let ten = model.int(10);
    let ite = model.if_then_else(b, x, ten);
    assert_eq!(bounds_of(&model, ite), bounds(1, 10));
}

#[test]
fn test_unbounded_variable() {
    let mut model = stdlib_model();
    let x = free_var(&mut model, "x");
    let one = model.int(1);
    let next = model.binary(BinaryOp::Add, x, one);
    with_evaluator(&model, |ev| {
        assert!(!ev.has_bounds(x));
        assert!(!ev.has_bounds(next));
    });
}

#[test]
fn test_cycle_is_invalid() {
    let mut model = stdlib_model();
    let x = model.declare_var("x", TypeInst::new(Type::var_int()), None);
    let xe = model.ident(x);
    let one = model.int(1);
    let y_init = model.binary(BinaryOp::Add, xe, one);
    let y = model.declare_var("y", TypeInst::new(Type::var_int()), Some(y_init));
    let ye = model.ident(y);
    model.set_init(x, ye);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(xe), IntBounds::INVALID);
        assert_eq!(ev.depth(), 0);
    });
}

#[test]
fn test_array_access() {
    let mut model = stdlib_model();
    let domain = model.int_range(0, 5);
    let r = model.int_range(1, 3);
    let xs = model.declare_var(
        "xs",
        TypeInst::new(Type::var_int().with_dim(1))
            .with_domain(domain)
            .with_ranges(&[Some(r)]),
        None,
    );
    let xs = model.ident(xs);
    let i = free_var(&mut model, "i");
    let declared = model.access(xs, &[i]);

    let a = var_in(&mut model, "a", 1, 3);
    let ten = model.int(10);
    let lit = model.array(&[a, ten]);
    let from_literal = model.access(lit, &[i]);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(declared), bounds(0, 5));
        assert_eq!(ev.compute_int_bounds(from_literal), bounds(1, 10));
    });
}

#[test]
fn test_call_bounds() {
    let mut model = stdlib_model();
    let a = var_in(&mut model, "a", 1, 3);
    let b = var_in(&mut model, "b", 2, 8);
    let min = model.call("min", &[a, b]);
    let max = model.call("max", &[a, b]);
    let arr = model.array(&[a, b]);
    let sum = model.call("sum", &[arr]);
    let min_arr = model.call("min", &[arr]);
    let flag = model.declare_var("flag", TypeInst::new(Type::var_bool()), None);
    let flag = model.ident(flag);
    let b2i = model.call("bool2int", &[flag]);
    let lb_b = model.call("lb", &[b]);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.compute_int_bounds(min), bounds(1, 3));
        assert_eq!(ev.compute_int_bounds(max), bounds(2, 8));
        assert_eq!(ev.compute_int_bounds(sum), bounds(3, 11));
        assert_eq!(ev.compute_int_bounds(min_arr), bounds(1, 3));
        assert_eq!(ev.compute_int_bounds(b2i), bounds(0, 1));
        assert_eq!(ev.compute_int_bounds(lb_b), bounds(2, 2));
    });
}

#[test]
fn test_user_function_sharing_a_builtin_name() {
    let mut model = stdlib_model();
    let user = model.declare_fn("bool2int", &[Type::var_int()], Type::var_int());
    let x = var_in(&mut model, "x", 5, 9);
    let call = model.call("bool2int", &[x]);
    let ExprKind::Call { decl, .. } = model.arena().kind(call) else {
        unreachable!()
    };
    assert_eq!(decl, Some(user));
    let flag = model.declare_var("flag", TypeInst::new(Type::var_bool()), None);
    let flag = model.ident(flag);
    let builtin = model.call("bool2int", &[flag]);
    with_evaluator(&model, |ev| {
        assert!(!ev.registry().is_bound(user));
        assert_eq!(ev.compute_int_bounds(call), IntBounds::INVALID);
        assert_eq!(ev.compute_int_bounds(builtin), bounds(0, 1));
    });
}

#[test]
fn test_var_bounds() {
    let mut model = stdlib_model();
    let domain = model.int_range(2, 4);
    let x = model.declare_var("x", TypeInst::new(Type::var_int()).with_domain(domain), None);
    let free = model.declare_var("free", TypeInst::new(Type::var_int()), None);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.var_bounds(x), bounds(2, 4));
        assert_eq!(ev.var_bounds(free), IntBounds::INVALID);
        assert_eq!(ev.scratch_len(), 0);
    });
}
