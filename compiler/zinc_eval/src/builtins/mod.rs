//! Native implementations of the standard-library functions.
//!
//! [`all_builtins`] yields one `(name, signature, implementation)` triple per
//! declared overload. [`register_builtins`] feeds the whole table through a
//! [`RegistryBuilder`]; any triple that does not bind to exactly one
//! declaration aborts registration.
//!
//! The per-dimension families (`index_set_KofN`, `arrayNd`) are single
//! const-generic functions instantiated once per arity.

mod arrays;
mod bounds;
mod domains;
mod index_sets;
mod reductions;

use zinc_ir::{ExprId, Model, Type};

use crate::errors::{arity_mismatch, EvalResult, RegistrationError};
use crate::registry::{BuiltinFn, BuiltinRegistry, RegistryBuilder};

/// One native implementation and the signature it expects to bind to.
#[derive(Clone, Copy, Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub params: &'static [Type],
    pub imp: BuiltinFn,
}

impl Builtin {
    const fn new(name: &'static str, params: &'static [Type], imp: BuiltinFn) -> Self {
        Self { name, params, imp }
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

/// `index_set_<k>of<n>` bound to `index_set::<k>`.
macro_rules! index_set {
    ($name:literal, $k:literal, $arr:ident) => {
        Builtin::new(
            $name,
            &[$arr],
            BuiltinFn::Set(index_sets::index_set::<$k>),
        )
    };
}

/// `arrayNd` in its three element flavours, all bound to `array_nd::<N>`.
macro_rules! array_nd {
    ($name:literal, $n:literal, [$($set:ident),*]) => {
        [
            Builtin::new($name, &[$($set,)* TOP_ARRAY], BuiltinFn::Array(arrays::array_nd::<$n>)),
            Builtin::new($name, &[$($set,)* VAR_TOP_ARRAY], BuiltinFn::Array(arrays::array_nd::<$n>)),
            Builtin::new($name, &[$($set,)* ANY_ARRAY], BuiltinFn::Array(arrays::array_nd::<$n>)),
        ]
    };
}

const CORE: &[Builtin] = &[
    Builtin::new("min", &[INT, INT], BuiltinFn::Int(reductions::min)),
    Builtin::new("min", &[INT_ARRAY], BuiltinFn::Int(reductions::min)),
    Builtin::new("min", &[SET], BuiltinFn::Int(reductions::min_set)),
    Builtin::new("max", &[INT, INT], BuiltinFn::Int(reductions::max)),
    Builtin::new("max", &[INT_ARRAY], BuiltinFn::Int(reductions::max)),
    Builtin::new("max", &[SET], BuiltinFn::Int(reductions::max_set)),
    Builtin::new("min", &[VAR_INT, VAR_INT], BuiltinFn::Int(reductions::min)),
    Builtin::new("min", &[VAR_INT_ARRAY], BuiltinFn::Int(reductions::min)),
    Builtin::new("max", &[VAR_INT, VAR_INT], BuiltinFn::Int(reductions::max)),
    Builtin::new("max", &[VAR_INT_ARRAY], BuiltinFn::Int(reductions::max)),
    Builtin::new("sum", &[INT_ARRAY], BuiltinFn::Int(reductions::sum)),
    Builtin::new("sum", &[VAR_INT_ARRAY], BuiltinFn::Int(reductions::sum)),
    Builtin::new("length", &[ANY_ARRAY], BuiltinFn::Int(reductions::length)),
    Builtin::new("bool2int", &[BOOL], BuiltinFn::Int(reductions::bool2int)),
    Builtin::new("bool2int", &[VAR_BOOL], BuiltinFn::Int(reductions::bool2int)),
    Builtin::new("forall", &[BOOL_ARRAY], BuiltinFn::Bool(reductions::forall)),
    Builtin::new("exists", &[BOOL_ARRAY], BuiltinFn::Bool(reductions::exists)),
    Builtin::new("card", &[SET], BuiltinFn::Int(domains::card)),
    Builtin::new("has_bounds", &[VAR_INT], BuiltinFn::Bool(bounds::has_bounds)),
    Builtin::new("lb", &[OPT_INT], BuiltinFn::Int(bounds::lb)),
    Builtin::new("ub", &[OPT_INT], BuiltinFn::Int(bounds::ub)),
    Builtin::new("lb", &[VAR_INT], BuiltinFn::Int(bounds::lb)),
    Builtin::new("ub", &[VAR_INT], BuiltinFn::Int(bounds::ub)),
    Builtin::new("lb_array", &[OPT_INT_ARRAY], BuiltinFn::Int(bounds::lb_array)),
    Builtin::new("ub_array", &[OPT_INT_ARRAY], BuiltinFn::Int(bounds::ub_array)),
    Builtin::new("ub", &[VAR_SET], BuiltinFn::Set(domains::ub_set)),
    Builtin::new("dom", &[VAR_INT], BuiltinFn::Set(domains::dom)),
    Builtin::new("dom_array", &[VAR_INT_ARRAY], BuiltinFn::Set(domains::dom_array)),
];

const INDEX_SETS: &[Builtin] = &[
    index_set!("index_set", 1, ANY_1D),
    index_set!("index_set_1of2", 1, ANY_2D),
    index_set!("index_set_2of2", 2, ANY_2D),
    index_set!("index_set_1of3", 1, ANY_3D),
    index_set!("index_set_2of3", 2, ANY_3D),
    index_set!("index_set_3of3", 3, ANY_3D),
    index_set!("index_set_1of4", 1, ANY_4D),
    index_set!("index_set_2of4", 2, ANY_4D),
    index_set!("index_set_3of4", 3, ANY_4D),
    index_set!("index_set_4of4", 4, ANY_4D),
    index_set!("index_set_1of5", 1, ANY_5D),
    index_set!("index_set_2of5", 2, ANY_5D),
    index_set!("index_set_3of5", 3, ANY_5D),
    index_set!("index_set_4of5", 4, ANY_5D),
    index_set!("index_set_5of5", 5, ANY_5D),
    index_set!("index_set_1of6", 1, ANY_6D),
    index_set!("index_set_2of6", 2, ANY_6D),
    index_set!("index_set_3of6", 3, ANY_6D),
    index_set!("index_set_4of6", 4, ANY_6D),
    index_set!("index_set_5of6", 5, ANY_6D),
    index_set!("index_set_6of6", 6, ANY_6D),
];

static ARRAY1D: [Builtin; 3] = array_nd!("array1d", 1, [SET]);
static ARRAY2D: [Builtin; 3] = array_nd!("array2d", 2, [SET, SET]);
static ARRAY3D: [Builtin; 3] = array_nd!("array3d", 3, [SET, SET, SET]);
static ARRAY4D: [Builtin; 3] = array_nd!("array4d", 4, [SET, SET, SET, SET]);
static ARRAY5D: [Builtin; 3] = array_nd!("array5d", 5, [SET, SET, SET, SET, SET]);
static ARRAY6D: [Builtin; 3] = array_nd!("array6d", 6, [SET, SET, SET, SET, SET, SET]);

/// Every native implementation, in registration order.
pub fn all_builtins() -> impl Iterator<Item = &'static Builtin> {
    CORE.iter()
        .chain(INDEX_SETS)
        .chain(&ARRAY1D)
        .chain(&ARRAY2D)
        .chain(&ARRAY3D)
        .chain(&ARRAY4D)
        .chain(&ARRAY5D)
        .chain(&ARRAY6D)
}

/// Bind every builtin to its declaration in `model`.
///
/// The first triple that fails to bind aborts the pass.
#[tracing::instrument(level = "debug", skip_all)]
pub fn register_builtins(model: &Model) -> Result<BuiltinRegistry, RegistrationError> {
    let mut builder = RegistryBuilder::new(model);
    for builtin in all_builtins() {
        builder.bind(builtin.name, builtin.params, builtin.imp)?;
    }
    let registry = builder.finish();
    tracing::debug!(bound = registry.len(), "builtin registration complete");
    Ok(registry)
}

/// Destructure `args` into exactly `N` arguments.
fn expect_args<const N: usize>(name: &str, args: &[ExprId]) -> EvalResult<[ExprId; N]> {
    <[ExprId; N]>::try_from(args).map_err(|_| arity_mismatch(name, N, args.len()))
}
