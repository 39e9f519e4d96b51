#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::rc::Rc;

use pretty_assertions::assert_eq;
use zinc_ir::{BinaryOp, ExprKind, Model, Span, Type, TypeInst, UnaryOp};

use super::*;
use crate::errors::EvalErrorKind;
use crate::test_support::{stdlib_model, with_evaluator};

fn par_int() -> TypeInst {
    TypeInst::new(Type::par_int())
}

fn eval_int(model: &Model, e: ExprId) -> EvalResult<IntVal> {
    with_evaluator(model, |ev| ev.eval_int(e))
}

// Literals and identifiers

#[test]
fn test_literals() {
    let mut model = stdlib_model();
    let seven = model.int(7);
    let yes = model.bool(true);
    let range = model.int_range(3, 5);
    let set = model.int_set(&[4, 1, 2]);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval_int(seven).unwrap(), IntVal::new(7));
        assert!(ev.eval_bool(yes).unwrap());
        assert_eq!(ev.eval_intset(range).unwrap().to_string(), "3..5");
        assert_eq!(ev.eval_intset(set).unwrap().to_string(), "{1..2, 4}");
    });
}

#[test]
fn test_identifier_chain() {
    let mut model = stdlib_model();
    let three = model.int(3);
    let c = model.declare_var("c", par_int(), Some(three));
    let ce = model.ident(c);
    let b = model.declare_var("b", par_int(), Some(ce));
    let be = model.ident(b);
    let a = model.declare_var("a", par_int(), Some(be));
    let ae = model.ident(a);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval_int(ae).unwrap(), IntVal::new(3));
        assert_eq!(ev.depth(), 0);
    });
}

#[test]
fn test_cyclic_chain() {
    let mut model = stdlib_model();
    let x = model.declare_var("x", par_int(), None);
    let y = model.declare_var("y", par_int(), None);
    let xe = model.ident(x);
    let ye = model.ident(y);
    model.set_init(x, ye);
    model.set_init(y, xe);
    with_evaluator(&model, |ev| {
        let err = ev.eval_int(xe).unwrap_err();
        assert_eq!(
            err.kind,
            EvalErrorKind::CyclicDefinition {
                name: "x".to_string()
            }
        );
        let chain: Vec<_> = err
            .backtrace
            .unwrap()
            .frames()
            .iter()
            .map(|f| f.name.clone())
            .collect();
        assert_eq!(chain, vec!["y".to_string(), "x".to_string()]);
        assert_eq!(ev.depth(), 0);
    });
}

#[test]
fn test_cycle_through_arithmetic() {
    let mut model = stdlib_model();
    let x = model.declare_var("x", par_int(), None);
    let xe = model.ident(x);
    let y = model.declare_var("y", par_int(), Some(xe));
    let ye = model.ident(y);
    let one = model.int(1);
    let sum = model.binary(BinaryOp::Add, ye, one);
    model.set_init(x, sum);
    let err = eval_int(&model, xe).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::CyclicDefinition {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_self_reference_in_both_operands_is_not_a_cycle() {
    let mut model = stdlib_model();
    let two = model.int(2);
    let n = model.declare_var("n", par_int(), Some(two));
    let (l, r) = (model.ident(n), model.ident(n));
    let square = model.binary(BinaryOp::Mul, l, r);
    assert_eq!(eval_int(&model, square).unwrap(), IntVal::new(4));
}

#[test]
fn test_uninitialised_declaration_has_no_value() {
    let mut model = stdlib_model();
    let z = model.declare_var("z", par_int(), None);
    let ze = model.ident(z);
    let err = eval_int(&model, ze).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NoConstantValue {
            name: "z".to_string()
        }
    );
}

#[test]
fn test_unresolved_identifier() {
    let mut model = stdlib_model();
    let ghost = model.unresolved_ident("ghost");
    let err = eval_int(&model, ghost).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedIdentifier {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn test_depth_limit() {
    let mut model = stdlib_model();
    let one = model.int(1);
    let mut e = one;
    for i in 0..5 {
        let v = model.declare_var(&format!("v{i}"), par_int(), Some(e));
        let r = model.ident(v);
        e = model.binary(BinaryOp::Add, r, one);
    }
    let registry = crate::register_builtins(&model).unwrap();

    let mut limited = Evaluator::builder(&model, &registry).max_depth(Some(3)).build();
    let err = limited.eval_int(e).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { depth: 3 });
    assert_eq!(limited.depth(), 0);

    let mut unlimited = Evaluator::builder(&model, &registry).max_depth(None).build();
    assert_eq!(unlimited.config().max_depth, None);
    assert_eq!(unlimited.eval_int(e).unwrap(), IntVal::new(6));
}

#[test]
fn test_long_alias_chain_is_within_default_limit() {
    let mut model = stdlib_model();
    let mut e = model.int(7);
    for i in 0..70 {
        let v = model.declare_var(&format!("v{i}"), par_int(), Some(e));
        e = model.ident(v);
    }
    with_evaluator(&model, |ev| {
        assert_eq!(ev.config().max_depth, Some(64));
        assert_eq!(ev.eval_int(e).unwrap(), IntVal::new(7));
        assert_eq!(ev.depth(), 0);
    });

    let registry = crate::register_builtins(&model).unwrap();
    let mut tight = Evaluator::builder(&model, &registry).max_depth(Some(1)).build();
    assert_eq!(tight.eval_int(e).unwrap(), IntVal::new(7));
}

#[test]
fn test_default_config() {
    let model = stdlib_model();
    with_evaluator(&model, |ev| {
        assert_eq!(ev.config(), EvalConfig::default());
        assert_eq!(ev.config().max_depth, Some(EvalConfig::DEFAULT_MAX_DEPTH));
    });
}

// Scratch retention

#[test]
fn test_scope_releases_intermediate_values() {
    let mut model = stdlib_model();
    let range = model.int_range(1, 4);
    with_evaluator(&model, |ev| {
        let set = {
            let mut scope = ev.scoped();
            let set = scope.eval_intset(range).unwrap();
            assert_eq!(scope.scratch_len(), 1);
            assert_eq!(Rc::strong_count(&set), 2);
            set
        };
        assert_eq!(ev.scratch_len(), 0);
        assert_eq!(Rc::strong_count(&set), 1);
        assert_eq!(set.size(), Some(IntVal::new(4)));
    });
}

#[test]
fn test_top_level_evaluation_retains_nothing() {
    let mut model = stdlib_model();
    let a = model.int_range(1, 3);
    let b = model.int_range(7, 9);
    let u = model.binary(BinaryOp::Union, a, b);
    with_evaluator(&model, |ev| {
        let set = ev.eval_intset(u).unwrap();
        assert_eq!(set.to_string(), "{1..3, 7..9}");
        assert_eq!(ev.scratch_len(), 0);
        assert_eq!(Rc::strong_count(&set), 1);
    });
}

// Operators

#[test]
fn test_integer_arithmetic() {
    let mut model = stdlib_model();
    let cases = [
        (BinaryOp::Add, 7, 2, 9),
        (BinaryOp::Sub, 7, 9, -2),
        (BinaryOp::Mul, -3, 4, -12),
        (BinaryOp::Div, 7, 2, 3),
        (BinaryOp::Div, -7, 2, -3),
        (BinaryOp::Mod, -7, 3, -1),
        (BinaryOp::Mod, 7, -3, 1),
    ];
    let exprs: Vec<_> = cases
        .iter()
        .map(|&(op, a, b, expected)| {
            let (a, b) = (model.int(a), model.int(b));
            (model.binary(op, a, b), expected)
        })
        .collect();
    with_evaluator(&model, |ev| {
        for (e, expected) in exprs {
            assert_eq!(ev.eval_int(e).unwrap(), IntVal::new(expected));
        }
    });
}

#[test]
fn test_division_by_zero() {
    let mut model = stdlib_model();
    let (a, zero) = (model.int(1), model.int(0));
    let div = model.binary(BinaryOp::Div, a, zero);
    let rem = model.binary(BinaryOp::Mod, a, zero);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval_int(div).unwrap_err().kind, EvalErrorKind::DivisionByZero);
        assert_eq!(ev.eval_int(rem).unwrap_err().kind, EvalErrorKind::DivisionByZero);
    });
}

#[test]
fn test_overflow_is_an_error() {
    let mut model = stdlib_model();
    let (max, one) = (model.int(i64::MAX), model.int(1));
    let add = model.binary(BinaryOp::Add, max, one);
    let min = model.int(i64::MIN);
    let neg = model.unary(UnaryOp::Neg, min);
    with_evaluator(&model, |ev| {
        assert_eq!(
            ev.eval_int(add).unwrap_err().kind,
            EvalErrorKind::IntegerOverflow {
                operation: "+".to_string()
            }
        );
        assert_eq!(
            ev.eval_int(neg).unwrap_err().kind,
            EvalErrorKind::IntegerOverflow {
                operation: "negation".to_string()
            }
        );
    });
}

#[test]
fn test_error_carries_innermost_span() {
    let mut model = stdlib_model();
    let (a, zero) = (model.int(1), model.int(0));
    let div = model.alloc(
        ExprKind::Binary {
            op: BinaryOp::Div,
            left: a,
            right: zero,
        },
        Span::new(10, 17),
        Type::par_int(),
    );
    let outer = model.alloc(
        ExprKind::Unary {
            op: UnaryOp::Neg,
            operand: div,
        },
        Span::new(9, 17),
        Type::par_int(),
    );
    let err = eval_int(&model, outer).unwrap_err();
    assert_eq!(err.span, Some(Span::new(10, 17)));
}

#[test]
fn test_comparisons_and_logic() {
    let mut model = stdlib_model();
    let (two, three) = (model.int(2), model.int(3));
    let lt = model.binary(BinaryOp::Lt, two, three);
    let ge = model.binary(BinaryOp::GtEq, two, three);
    let not_ge = model.unary(UnaryOp::Not, ge);
    let both = model.binary(BinaryOp::And, lt, not_ge);
    with_evaluator(&model, |ev| {
        assert!(ev.eval_bool(lt).unwrap());
        assert!(!ev.eval_bool(ge).unwrap());
        assert!(ev.eval_bool(both).unwrap());
    });
}

#[test]
fn test_logic_short_circuits() {
    let mut model = stdlib_model();
    let (one, zero) = (model.int(1), model.int(0));
    let boom = model.binary(BinaryOp::Div, one, zero);
    let zero2 = model.int(0);
    let boom_eq = model.binary(BinaryOp::Eq, boom, zero2);
    let no = model.bool(false);
    let yes = model.bool(true);
    let and = model.binary(BinaryOp::And, no, boom_eq);
    let or = model.binary(BinaryOp::Or, yes, boom_eq);
    let strict = model.binary(BinaryOp::And, yes, boom_eq);
    with_evaluator(&model, |ev| {
        assert!(!ev.eval_bool(and).unwrap());
        assert!(ev.eval_bool(or).unwrap());
        assert_eq!(ev.eval_bool(strict).unwrap_err().kind, EvalErrorKind::DivisionByZero);
    });
}

#[test]
fn test_set_operators() {
    let mut model = stdlib_model();
    let a = model.int_range(1, 10);
    let b = model.int_range(5, 20);
    let inter = model.binary(BinaryOp::Intersect, a, b);
    let diff = model.binary(BinaryOp::Diff, a, b);
    let seven = model.int(7);
    let member = model.binary(BinaryOp::In, seven, diff);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval_intset(inter).unwrap().to_string(), "5..10");
        assert_eq!(ev.eval_intset(diff).unwrap().to_string(), "1..4");
        assert!(!ev.eval_bool(member).unwrap());
    });
}

#[test]
fn test_operand_kind_mismatch() {
    let mut model = stdlib_model();
    let one = model.int(1);
    let yes = model.bool(true);
    let bad = model.alloc(
        ExprKind::Binary {
            op: BinaryOp::Add,
            left: one,
            right: yes,
        },
        Span::DUMMY,
        Type::par_int(),
    );
    let err = eval_int(&model, bad).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityOrTypeMismatch {
            name: "+".to_string(),
            expected: "int operands".to_string(),
            found: "int and bool".to_string(),
        }
    );
}

#[test]
fn test_typed_entry_point_rejects_other_kinds() {
    let mut model = stdlib_model();
    let yes = model.bool(true);
    let err = eval_int(&model, yes).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityOrTypeMismatch {
            name: "integer evaluation".to_string(),
            expected: "int".to_string(),
            found: "bool".to_string(),
        }
    );
}

#[test]
fn test_if_then_else() {
    let mut model = stdlib_model();
    let (one, two) = (model.int(1), model.int(2));
    let cond = model.binary(BinaryOp::Lt, two, one);
    let (zero, ten) = (model.int(0), model.int(10));
    let ite = model.if_then_else(cond, zero, ten);
    assert_eq!(eval_int(&model, ite).unwrap(), IntVal::new(10));
}

// Arrays

#[test]
fn test_array_access() {
    let mut model = stdlib_model();
    let elems: Vec<_> = (1..=6).map(|v| model.int(v * 10)).collect();
    let grid = model.array_nd(&elems, &[(1, 2), (0, 2)]);
    let (i, j) = (model.int(2), model.int(1));
    let hit = model.access(grid, &[i, j]);
    let three = model.int(3);
    let miss = model.access(grid, &[three, j]);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval_int(hit).unwrap(), IntVal::new(50));
        assert_eq!(
            ev.eval_int(miss).unwrap_err().kind,
            EvalErrorKind::IndexOutOfBounds {
                index: IntVal::new(3),
                dimension: 1,
                lo: IntVal::new(1),
                hi: IntVal::new(2),
            }
        );
    });
}

#[test]
fn test_literal_dims_must_match_element_count() {
    let mut model = stdlib_model();
    let elems: Vec<_> = (1..=3).map(|v| model.int(v)).collect();
    let short = model.array_nd(&elems, &[(1, 2), (1, 2)]);
    let (two, seven) = (model.int(2), model.int(7));
    let last = model.access(short, &[two, two]);
    let empty = model.array_nd(&[], &[(1, 0)]);
    let wrong_empty = model.array_nd(&[], &[(1, 2)]);
    let vec = model.array_nd(&[seven], &[(5, 5)]);
    with_evaluator(&model, |ev| {
        let mismatch = EvalErrorKind::ShapeMismatch {
            expected: "4".to_string(),
            found: 3,
        };
        assert_eq!(ev.eval_array(short).unwrap_err().kind, mismatch);
        assert_eq!(ev.eval_int(last).unwrap_err().kind, mismatch);
        assert!(ev.eval_array(empty).unwrap().is_empty());
        assert_eq!(
            ev.eval_array(wrong_empty).unwrap_err().kind,
            EvalErrorKind::ShapeMismatch {
                expected: "2".to_string(),
                found: 0
            }
        );
        assert_eq!(ev.eval_array(vec).unwrap().len(), 1);
    });
}

// Calls

#[test]
fn test_call_without_builtin() {
    let mut model = stdlib_model();
    model.declare_fn("user_fn", &[Type::par_int()], Type::par_int());
    let one = model.int(1);
    let call = model.call("user_fn", &[one]);
    let err = eval_int(&model, call).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnsupportedExpressionShape {
            operation: "evaluation".to_string(),
            shape: "`user_fn` has no builtin implementation".to_string(),
        }
    );
}

#[test]
fn test_unresolved_call() {
    let mut model = stdlib_model();
    let one = model.int(1);
    let call = model.call("nowhere", &[one]);
    let err = eval_int(&model, call).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedIdentifier {
            name: "nowhere".to_string()
        }
    );
}

#[test]
fn test_generic_eval_reports_kind() {
    let mut model = stdlib_model();
    let (a, b) = (model.int(1), model.int(2));
    let arr = model.array(&[a, b]);
    let len = model.call("length", &[arr]);
    with_evaluator(&model, |ev| {
        assert_eq!(ev.eval(len).unwrap(), Value::Int(IntVal::new(2)));
        let arr = ev.eval(arr).unwrap();
        assert_eq!(arr.kind_name(), "array");
        assert_eq!(arr.to_string(), "array1d(1..2, <2 elements>)");
    });
}
