//! End-to-end tests: build a model through a session, register builtins
//! and evaluate, checking values and the diagnostics errors turn into.

#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use zinc_diagnostic::emitter::{DiagnosticEmitter, TextEmitter};
use zinc_diagnostic::ErrorCode;
use zinc_eval::{IntVal, SolverView, Value};
use zinc_ir::{stdlib, BinaryOp, Type, TypeInst};
use zincc::{init_tracing, Session, SessionConfig};

fn registered() -> Session {
    let mut session = Session::default();
    session.register_builtins().unwrap();
    session
}

#[test]
fn test_new_session_declares_stdlib() {
    let session = Session::default();
    assert_eq!(session.model().functions().count(), stdlib::declarations().count());
    assert!(session.registry().is_none());
}

#[test]
fn test_register_builtins_binds_every_declaration() {
    let mut session = Session::default();
    let bound = session.register_builtins().unwrap().len();
    assert_eq!(bound, stdlib::declarations().count());
    // A second call keeps the same registry.
    assert_eq!(session.register_builtins().unwrap().len(), bound);
}

#[test]
fn test_evaluate_before_registration() {
    let mut session = Session::default();
    let one = session.model_mut().int(1);
    let diag = session.eval(one).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E9001);
}

#[test]
fn test_parameter_chain() {
    let mut session = registered();
    let model = session.model_mut();
    let (four, five) = (model.int(4), model.int(5));
    let product = model.binary(BinaryOp::Mul, four, five);
    let n = model.declare_var("n", TypeInst::new(Type::par_int()), Some(product));
    let n = model.ident(n);
    let m = model.declare_var("m", TypeInst::new(Type::par_int()), Some(n));
    let m = model.ident(m);
    assert_eq!(session.eval(m).unwrap(), Value::Int(IntVal::new(20)));
}

#[test]
fn test_reshape_and_index_set() {
    let mut session = registered();
    let model = session.model_mut();
    let elems: Vec<_> = (1..=6).map(|v| model.int(v)).collect();
    let flat = model.array(&elems);
    let (rows, cols) = (model.int_range(1, 2), model.int_range(1, 3));
    let reshaped = model.call("array2d", &[rows, cols, flat]);
    let grid = model.declare_var("grid", TypeInst::new(Type::par_int().with_dim(2)), Some(reshaped));
    let grid = model.ident(grid);
    let cols_of = model.call("index_set_2of2", &[grid]);
    let card = model.call("card", &[cols_of]);
    assert_eq!(session.eval(cols_of).unwrap().to_string(), "1..3");
    assert_eq!(session.eval(card).unwrap(), Value::Int(IntVal::new(3)));
}

#[test]
fn test_cycle_becomes_diagnostic() {
    let mut session = registered();
    let model = session.model_mut();
    let x = model.declare_var("x", TypeInst::new(Type::par_int()), None);
    let xe = model.ident(x);
    let one = model.int(1);
    let init = model.binary(BinaryOp::Add, xe, one);
    model.set_init(x, init);

    let diag = session.eval(xe).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E4010);
    assert_eq!(diag.message, "cyclic definition of `x`");
    assert!(diag.notes.iter().any(|n| n.starts_with("while resolving:")));
}

#[test]
fn test_shape_mismatch_renders() {
    let mut session = registered();
    let model = session.model_mut();
    let elems: Vec<_> = (1..=5).map(|v| model.int(v)).collect();
    let flat = model.array(&elems);
    let (rows, cols) = (model.int_range(1, 2), model.int_range(1, 3));
    let reshaped = model.call("array2d", &[rows, cols, flat]);

    let diag = session.eval(reshaped).unwrap_err();
    assert_eq!(diag.code, ErrorCode::E4008);
    let mut emitter = TextEmitter::new(Vec::new());
    emitter.emit(&diag);
    emitter.emit_summary(1);
    let text = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(text.starts_with("error[E4008]: mismatch in array dimensions"));
    assert!(text.ends_with("error: aborting due to previous error\n"));
}

#[test]
fn test_depth_limit_from_config() {
    let mut session = Session::new(SessionConfig::default().with_max_depth(Some(2)));
    session.register_builtins().unwrap();
    let model = session.model_mut();
    let (seven, one) = (model.int(7), model.int(1));
    let a = model.declare_var("a", TypeInst::new(Type::par_int()), Some(seven));
    let mut alias = model.ident(a);
    let mut nested = alias;
    for name in ["b", "c"] {
        let step = model.binary(BinaryOp::Add, nested, one);
        let v = model.declare_var(name, TypeInst::new(Type::par_int()), Some(step));
        nested = model.ident(v);
        let w = model.declare_var(&format!("{name}_alias"), TypeInst::new(Type::par_int()), Some(alias));
        alias = model.ident(w);
    }
    assert_eq!(session.eval(nested).unwrap_err().code, ErrorCode::E4015);
    assert_eq!(session.eval(alias).unwrap(), Value::Int(IntVal::new(7)));

    let unlimited = {
        let mut s = Session::new(SessionConfig::default().with_max_depth(None));
        s.register_builtins().unwrap();
        s
    };
    assert_eq!(unlimited.config().eval.max_depth, None);
}

#[test]
fn test_solver_view_over_session() {
    let mut session = registered();
    let model = session.model_mut();
    let domain = model.int_range(0, 9);
    let x = model.declare_var("x", TypeInst::new(Type::var_int()).with_domain(domain), None);
    let xe = model.ident(x);
    let three = model.int(3);
    let init = model.binary(BinaryOp::Sub, xe, three);
    let y = model.declare_var("y", TypeInst::new(Type::var_int()), Some(init));

    let mut evaluator = session.evaluator().unwrap();
    let mut view = SolverView::new(&mut evaluator);
    assert_eq!(view.var_domain(x).unwrap().to_string(), "0..9");
    assert_eq!(view.var_domain(y).unwrap().to_string(), "-3..6");
}

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing(Some("off"));
    init_tracing(None);
    let _session = registered();
}
