//! Standard-library function declarations.
//!
//! Single source of truth for the signatures of every function that has a
//! native implementation in the evaluator. Declaring them into a `Model` is
//! what parsing the standard-library prelude would produce; the evaluator's
//! registrar then binds an implementation to each one.

use crate::{Model, Type};

/// One declared standard-library function.
#[derive(Clone, Copy, Debug)]
pub struct StdlibFn {
    pub name: &'static str,
    pub params: &'static [Type],
    pub ret: Type,
}

impl StdlibFn {
    const fn new(name: &'static str, params: &'static [Type], ret: Type) -> Self {
        Self { name, params, ret }
    }
}

const INT: Type = Type::par_int();
const VAR_INT: Type = Type::var_int();
const BOOL: Type = Type::par_bool();
const VAR_BOOL: Type = Type::var_bool();
const SET: Type = Type::par_set_int();
const ANY: i8 = Type::ANY_DIM;
const INT_ARRAY: Type = INT.with_dim(ANY);
const BOOL_ARRAY: Type = BOOL.with_dim(ANY);
const VAR_INT_ARRAY: Type = VAR_INT.with_dim(ANY);
const OPT_INT: Type = VAR_INT.optional();
const OPT_INT_ARRAY: Type = OPT_INT.with_dim(ANY);
const VAR_SET: Type = Type::var_set_int();
const TOP_ARRAY: Type = Type::top(ANY);
const VAR_TOP_ARRAY: Type = Type::var_top(ANY);
const ANY_ARRAY: Type = Type::opt_var_top(ANY);
const ANY_1D: Type = Type::opt_var_top(1);
const ANY_2D: Type = Type::opt_var_top(2);
const ANY_3D: Type = Type::opt_var_top(3);
const ANY_4D: Type = Type::opt_var_top(4);
const ANY_5D: Type = Type::opt_var_top(5);
const ANY_6D: Type = Type::opt_var_top(6);

/// `index_set_<k>of<n>` declarations for `n` in 1..=6 (`index_set` for 1 of 1).
const INDEX_SETS: &[StdlibFn] = &[
    StdlibFn::new("index_set", &[ANY_1D], SET),
    StdlibFn::new("index_set_1of2", &[ANY_2D], SET),
    StdlibFn::new("index_set_2of2", &[ANY_2D], SET),
    StdlibFn::new("index_set_1of3", &[ANY_3D], SET),
    StdlibFn::new("index_set_2of3", &[ANY_3D], SET),
    StdlibFn::new("index_set_3of3", &[ANY_3D], SET),
    StdlibFn::new("index_set_1of4", &[ANY_4D], SET),
    StdlibFn::new("index_set_2of4", &[ANY_4D], SET),
    StdlibFn::new("index_set_3of4", &[ANY_4D], SET),
    StdlibFn::new("index_set_4of4", &[ANY_4D], SET),
    StdlibFn::new("index_set_1of5", &[ANY_5D], SET),
    StdlibFn::new("index_set_2of5", &[ANY_5D], SET),
    StdlibFn::new("index_set_3of5", &[ANY_5D], SET),
    StdlibFn::new("index_set_4of5", &[ANY_5D], SET),
    StdlibFn::new("index_set_5of5", &[ANY_5D], SET),
    StdlibFn::new("index_set_1of6", &[ANY_6D], SET),
    StdlibFn::new("index_set_2of6", &[ANY_6D], SET),
    StdlibFn::new("index_set_3of6", &[ANY_6D], SET),
    StdlibFn::new("index_set_4of6", &[ANY_6D], SET),
    StdlibFn::new("index_set_5of6", &[ANY_6D], SET),
    StdlibFn::new("index_set_6of6", &[ANY_6D], SET),
];

/// Declares `arrayNd` in its three element flavours: par, var and var opt.
macro_rules! array_nd {
    ($name:literal, $dim:literal, [$($set:ident),*]) => {
        [
            StdlibFn::new($name, &[$($set,)* TOP_ARRAY], Type::top($dim)),
            StdlibFn::new($name, &[$($set,)* VAR_TOP_ARRAY], Type::var_top($dim)),
            StdlibFn::new($name, &[$($set,)* ANY_ARRAY], Type::opt_var_top($dim)),
        ]
    };
}

static ARRAY1D: [StdlibFn; 3] = array_nd!("array1d", 1, [SET]);
static ARRAY2D: [StdlibFn; 3] = array_nd!("array2d", 2, [SET, SET]);
static ARRAY3D: [StdlibFn; 3] = array_nd!("array3d", 3, [SET, SET, SET]);
static ARRAY4D: [StdlibFn; 3] = array_nd!("array4d", 4, [SET, SET, SET, SET]);
static ARRAY5D: [StdlibFn; 3] = array_nd!("array5d", 5, [SET, SET, SET, SET, SET]);
static ARRAY6D: [StdlibFn; 3] = array_nd!("array6d", 6, [SET, SET, SET, SET, SET, SET]);

/// Scalar, set and array-reduction builtins.
const CORE: &[StdlibFn] = &[
    StdlibFn::new("min", &[INT, INT], INT),
    StdlibFn::new("min", &[INT_ARRAY], INT),
    StdlibFn::new("min", &[SET], INT),
    StdlibFn::new("max", &[INT, INT], INT),
    StdlibFn::new("max", &[INT_ARRAY], INT),
    StdlibFn::new("max", &[SET], INT),
    StdlibFn::new("min", &[VAR_INT, VAR_INT], VAR_INT),
    StdlibFn::new("min", &[VAR_INT_ARRAY], VAR_INT),
    StdlibFn::new("max", &[VAR_INT, VAR_INT], VAR_INT),
    StdlibFn::new("max", &[VAR_INT_ARRAY], VAR_INT),
    StdlibFn::new("sum", &[INT_ARRAY], INT),
    StdlibFn::new("sum", &[VAR_INT_ARRAY], VAR_INT),
    StdlibFn::new("length", &[ANY_ARRAY], INT),
    StdlibFn::new("bool2int", &[BOOL], INT),
    StdlibFn::new("bool2int", &[VAR_BOOL], VAR_INT),
    StdlibFn::new("forall", &[BOOL_ARRAY], BOOL),
    StdlibFn::new("exists", &[BOOL_ARRAY], BOOL),
    StdlibFn::new("card", &[SET], INT),
    StdlibFn::new("has_bounds", &[VAR_INT], BOOL),
    StdlibFn::new("lb", &[OPT_INT], INT),
    StdlibFn::new("ub", &[OPT_INT], INT),
    StdlibFn::new("lb", &[VAR_INT], INT),
    StdlibFn::new("ub", &[VAR_INT], INT),
    StdlibFn::new("lb_array", &[OPT_INT_ARRAY], INT),
    StdlibFn::new("ub_array", &[OPT_INT_ARRAY], INT),
    StdlibFn::new("ub", &[VAR_SET], SET),
    StdlibFn::new("dom", &[VAR_INT], SET),
    StdlibFn::new("dom_array", &[VAR_INT_ARRAY], SET),
];

/// Iterate every standard-library declaration, in declaration order.
pub fn declarations() -> impl Iterator<Item = &'static StdlibFn> {
    CORE.iter()
        .chain(INDEX_SETS)
        .chain(&ARRAY1D)
        .chain(&ARRAY2D)
        .chain(&ARRAY3D)
        .chain(&ARRAY4D)
        .chain(&ARRAY5D)
        .chain(&ARRAY6D)
}

/// Declare the whole standard library into `model`.
pub fn declare(model: &mut Model) {
    for decl in declarations() {
        model.declare_fn(decl.name, decl.params, decl.ret);
    }
}

#[cfg(test)]
mod tests;
