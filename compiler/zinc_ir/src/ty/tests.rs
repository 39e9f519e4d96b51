use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_par_is_subtype_of_var() {
    assert!(Type::par_int().is_subtype_of(Type::var_int()));
    assert!(!Type::var_int().is_subtype_of(Type::par_int()));
}

#[test]
fn test_present_is_subtype_of_optional() {
    assert!(Type::var_int().is_subtype_of(Type::var_int().optional()));
    assert!(!Type::var_int().optional().is_subtype_of(Type::var_int()));
}

#[test]
fn test_any_dim_matches_every_array() {
    let formal = Type::opt_var_top(Type::ANY_DIM);
    assert!(Type::par_int().with_dim(1).is_subtype_of(formal));
    assert!(Type::var_bool().with_dim(3).is_subtype_of(formal));
    assert!(!Type::par_int().is_subtype_of(formal));
}

#[test]
fn test_fixed_dim_is_exact() {
    let formal = Type::opt_var_top(2);
    assert!(Type::var_int().with_dim(2).is_subtype_of(formal));
    assert!(!Type::var_int().with_dim(1).is_subtype_of(formal));
}

#[test]
fn test_base_kind_is_exact_unless_top() {
    assert!(!Type::par_bool().is_subtype_of(Type::par_int()));
    assert!(Type::par_bool().is_subtype_of(Type::top(0)));
}

#[test]
fn test_set_flag_is_exact() {
    assert!(!Type::par_set_int().is_subtype_of(Type::par_int()));
    assert!(Type::par_set_int().is_subtype_of(Type::var_set_int()));
}

#[test]
fn test_signature_subsumes_requires_equal_arity() {
    let formal = [Type::par_int(), Type::par_int()];
    assert!(Type::signature_subsumes(&formal, &formal));
    assert!(!Type::signature_subsumes(&formal[..1], &formal));
}

#[test]
fn test_flags() {
    let flags = Type::opt_var_top(Type::ANY_DIM).flags();
    assert!(flags.contains(TypeFlags::IS_VAR | TypeFlags::IS_OPT | TypeFlags::IS_ANY_DIM));
    assert!(!Type::par_int().flags().intersects(TypeFlags::WIDENING));
}

#[test]
fn test_display() {
    assert_eq!(Type::par_int().to_string(), "int");
    assert_eq!(Type::var_set_int().to_string(), "var set of int");
    assert_eq!(
        Type::opt_var_top(Type::ANY_DIM).to_string(),
        "array[$_] of var opt $T"
    );
    assert_eq!(Type::par_bool().with_dim(2).to_string(), "array[int,int] of bool");
}
