//! Values produced by constant evaluation.
//!
//! Arrays are not materialised: an [`ArrayValue`] keeps the element
//! *expressions* of the literal it came from and evaluates them on demand.
//! Reshaping (`array2d` and friends) shares the element list through `Rc`
//! and only replaces the per-dimension bounds.

use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;
use zinc_ir::{ArrayLit, ExprId, Type};

use crate::errors::{
    arity_mismatch, index_out_of_bounds, shape_mismatch, type_mismatch, EvalResult,
};
use crate::{IntSetVal, IntVal};

/// Per-dimension `(min, max)` index bounds.
pub type Dims = SmallVec<[(IntVal, IntVal); 2]>;

/// An array value: shared flat elements plus per-dimension bounds.
///
/// The product of the dimension sizes always equals the element count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayValue {
    elems: Rc<[ExprId]>,
    dims: Dims,
    elem_ty: Type,
}

impl ArrayValue {
    pub fn new(elems: Rc<[ExprId]>, dims: Dims, elem_ty: Type) -> Self {
        debug_assert_eq!(
            dims.iter()
                .map(|(lo, hi)| (hi.wide() - lo.wide() + 1).max(0))
                .product::<i128>(),
            i128::try_from(elems.len()).unwrap_or(i128::MAX),
            "array dimensions do not match element count"
        );
        ArrayValue {
            elems,
            dims,
            elem_ty: elem_ty.element(),
        }
    }

    /// Wrap a literal; the element list is shared, not copied.
    ///
    /// Literals built with explicit index sets are checked here, since
    /// nothing upstream ties their dimensions to the element count.
    pub fn from_literal(lit: &ArrayLit, elem_ty: Type) -> EvalResult<Self> {
        let dims: Dims = lit
            .dims
            .iter()
            .map(|&(lo, hi)| (IntVal::new(lo), IntVal::new(hi)))
            .collect();
        let product = dims
            .iter()
            .map(|(lo, hi)| (hi.wide() - lo.wide() + 1).max(0))
            .fold(1i128, i128::saturating_mul);
        let found = lit.elems.len();
        if i128::try_from(found).ok() != Some(product) {
            return Err(shape_mismatch(IntVal::from_wide(product), found));
        }
        Ok(Self::new(Rc::clone(&lit.elems), dims, elem_ty))
    }

    /// Same elements, new bounds. The caller guarantees the sizes agree.
    pub fn reshape(&self, dims: Dims) -> Self {
        Self::new(Rc::clone(&self.elems), dims, self.elem_ty)
    }

    #[inline]
    pub fn elems(&self) -> &[ExprId] {
        &self.elems
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elems.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elems.is_empty()
    }

    #[inline]
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    #[inline]
    pub fn dims(&self) -> &[(IntVal, IntVal)] {
        &self.dims
    }

    /// Bounds of 1-based dimension `k`.
    pub fn dim(&self, k: usize) -> Option<(IntVal, IntVal)> {
        k.checked_sub(1).and_then(|i| self.dims.get(i).copied())
    }

    #[inline]
    pub fn elem_ty(&self) -> Type {
        self.elem_ty
    }

    /// Full array type, e.g. `array[int,int] of var int`.
    pub fn ty(&self) -> Type {
        self.elem_ty
            .with_dim(i8::try_from(self.ndims()).unwrap_or(i8::MAX))
    }

    /// Whether both values share one element list.
    pub fn shares_elements(&self, other: &ArrayValue) -> bool {
        Rc::ptr_eq(&self.elems, &other.elems)
    }

    /// Row-major position of the element at `indices`.
    pub fn position(&self, indices: &[IntVal]) -> EvalResult<usize> {
        if indices.len() != self.ndims() {
            return Err(arity_mismatch("array access", self.ndims(), indices.len()));
        }
        let mut pos: usize = 0;
        for (k, (&index, &(lo, hi))) in indices.iter().zip(&self.dims).enumerate() {
            if index < lo || index > hi {
                return Err(index_out_of_bounds(index, k + 1, (lo, hi)));
            }
            // In range, so both fit: the extent is bounded by the element count.
            let extent = usize::try_from(hi.wide() - lo.wide() + 1).unwrap_or(usize::MAX);
            let offset = usize::try_from(index.wide() - lo.wide()).unwrap_or(usize::MAX);
            pos = pos * extent + offset;
        }
        Ok(pos)
    }
}

/// Result of generic evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Int(IntVal),
    Bool(bool),
    Set(Rc<IntSetVal>),
    Array(ArrayValue),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Set(_) => "set of int",
            Value::Array(_) => "array",
        }
    }

    pub fn into_int(self) -> EvalResult<IntVal> {
        match self {
            Value::Int(v) => Ok(v),
            other => Err(type_mismatch("integer evaluation", "int", other.kind_name())),
        }
    }

    pub fn into_bool(self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(b),
            other => Err(type_mismatch("boolean evaluation", "bool", other.kind_name())),
        }
    }

    pub fn into_set(self) -> EvalResult<Rc<IntSetVal>> {
        match self {
            Value::Set(s) => Ok(s),
            other => Err(type_mismatch("set evaluation", "set of int", other.kind_name())),
        }
    }

    pub fn into_array(self) -> EvalResult<ArrayValue> {
        match self {
            Value::Array(a) => Ok(a),
            other => Err(type_mismatch("array evaluation", "array", other.kind_name())),
        }
    }

    /// Intermediate values worth keeping alive for the enclosing scope.
    pub(crate) fn is_heap(&self) -> bool {
        matches!(self, Value::Set(_) | Value::Array(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Set(s) => write!(f, "{s}"),
            Value::Array(a) => {
                write!(f, "array{}d(", a.ndims())?;
                for (lo, hi) in a.dims() {
                    write!(f, "{lo}..{hi}, ")?;
                }
                write!(f, "<{} elements>)", a.len())
            }
        }
    }
}
