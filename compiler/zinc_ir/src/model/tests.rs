use super::*;
use crate::ExprKind;
use pretty_assertions::assert_eq;

fn model_with_lb() -> (Model, FnId, FnId) {
    let mut model = Model::new();
    let opt = model.declare_fn("lb", &[Type::var_int().optional()], Type::par_int());
    let plain = model.declare_fn("lb", &[Type::var_int()], Type::par_int());
    (model, opt, plain)
}

#[test]
fn test_exact_match_is_preferred() {
    let (model, opt, plain) = model_with_lb();
    let lb = model.interner().intern("lb");
    assert_eq!(model.match_fn(lb, &[Type::var_int()]), FnMatch::Unique(plain));
    assert_eq!(
        model.match_fn(lb, &[Type::var_int().optional()]),
        FnMatch::Unique(opt)
    );
}

#[test]
fn test_par_argument_picks_most_specific() {
    let (model, _, plain) = model_with_lb();
    let lb = model.interner().intern("lb");
    assert_eq!(model.match_fn(lb, &[Type::par_int()]), FnMatch::Unique(plain));
}

#[test]
fn test_no_match() {
    let (model, _, _) = model_with_lb();
    let lb = model.interner().intern("lb");
    assert_eq!(model.match_fn(lb, &[Type::par_bool()]), FnMatch::NoMatch);
    let missing = model.interner().intern("missing");
    assert_eq!(model.match_fn(missing, &[]), FnMatch::NoMatch);
}

#[test]
fn test_identical_signatures_are_ambiguous() {
    let mut model = Model::new();
    let a = model.declare_fn("f", &[Type::par_int()], Type::par_int());
    let b = model.declare_fn("f", &[Type::par_int()], Type::par_int());
    let f = model.interner().intern("f");
    assert_eq!(
        model.match_fn(f, &[Type::par_int()]),
        FnMatch::Ambiguous(vec![a, b])
    );
}

#[test]
fn test_arity_distinguishes_overloads() {
    let mut model = Model::new();
    let pair = model.declare_fn("min", &[Type::par_int(), Type::par_int()], Type::par_int());
    let array = model.declare_fn("min", &[Type::par_int().with_dim(Type::ANY_DIM)], Type::par_int());
    let min = model.interner().intern("min");
    assert_eq!(
        model.match_fn(min, &[Type::par_int(), Type::par_int()]),
        FnMatch::Unique(pair)
    );
    assert_eq!(
        model.match_fn(min, &[Type::par_int().with_dim(1)]),
        FnMatch::Unique(array)
    );
}

#[test]
fn test_call_construction_resolves_overload() {
    let mut model = Model::new();
    let pair = model.declare_fn("max", &[Type::par_int(), Type::par_int()], Type::par_int());
    let (a, b) = (model.int(1), model.int(2));
    let call = model.call("max", &[a, b]);
    match model.arena().kind(call) {
        ExprKind::Call { decl, args, .. } => {
            assert_eq!(decl, Some(pair));
            assert_eq!(model.arena().list(args), &[a, b]);
        }
        other => panic!("expected call, got {other:?}"),
    }
    assert_eq!(model.arena().ty(call), Type::par_int());
}

#[test]
fn test_array_literal_type() {
    let mut model = Model::new();
    let x = model.declare_var("x", crate::TypeInst::new(Type::var_int()), None);
    let one = model.int(1);
    let xe = model.ident(x);
    let arr = model.array(&[one, xe]);
    assert_eq!(model.arena().ty(arr), Type::var_int().with_dim(1));
}

#[test]
fn test_lookup_var_shadows() {
    let mut model = Model::new();
    let ti = crate::TypeInst::new(Type::par_int());
    let _first = model.declare_var("n", ti.clone(), None);
    let second = model.declare_var("n", ti, None);
    let n = model.interner().intern("n");
    assert_eq!(model.lookup_var(n), Some(second));
}

#[test]
fn test_empty_array_takes_context_type() {
    let mut model = Model::new();
    model.declare_fn("sum", &[Type::par_int().with_dim(Type::ANY_DIM)], Type::par_int());
    let empty = model.empty_array(Type::par_int());
    assert_eq!(model.arena().ty(empty), Type::par_int().with_dim(1));
    let call = model.call("sum", &[empty]);
    assert!(matches!(
        model.arena().kind(call),
        crate::ExprKind::Call { decl: Some(_), .. }
    ));
}

#[test]
fn test_set_init_allows_forward_reference() {
    let mut model = Model::new();
    let ti = crate::TypeInst::new(Type::par_int());
    let x = model.declare_var("x", ti.clone(), None);
    let y = model.declare_var("y", ti, None);
    let ye = model.ident(y);
    model.set_init(x, ye);
    assert_eq!(model.var(x).init, Some(ye));
    assert_eq!(model.var(y).init, None);
}
