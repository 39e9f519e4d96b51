//! Resolved types and their structural ordering.
//!
//! A `Type` is a small `Copy` value: base kind, instantiation (par/var),
//! optionality, set-ness and dimensionality. Overload resolution uses the
//! structural subtype ordering in [`Type::is_subtype_of`]:
//!
//! - `par` ≤ `var`
//! - present ≤ `opt`
//! - any base ≤ `$T` (the `Top` base)
//! - any array ≤ `array[$_]` (dimension [`Type::ANY_DIM`])

use std::fmt;

use bitflags::bitflags;

/// Base kind of a type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BaseType {
    Int,
    Bool,
    Float,
    /// Type variable `$T`, matches every base kind.
    Top,
}

/// Instantiation: known at compile time (`par`) or decided by the solver (`var`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Inst {
    Par,
    Var,
}

/// Optionality: whether a value may be absent.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum Opt {
    Present,
    Optional,
}

bitflags! {
    /// Summary of a type's lattice position.
    ///
    /// `WIDENING` bits may only grow from an actual type to a formal type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        const IS_VAR = 1 << 0;
        const IS_OPT = 1 << 1;
        const IS_SET = 1 << 2;
        const IS_ARRAY = 1 << 3;
        const IS_ANY_DIM = 1 << 4;
        const IS_TOP = 1 << 5;
    }
}

impl TypeFlags {
    /// Flags where the formal type may be wider than the actual type.
    pub const WIDENING: Self = Self::IS_VAR.union(Self::IS_OPT);
}

/// A resolved type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Type {
    pub base: BaseType,
    pub inst: Inst,
    pub opt: Opt,
    pub set: bool,
    /// 0 = scalar, N = N-dimensional array, [`Type::ANY_DIM`] = any array.
    pub dim: i8,
}

impl Type {
    /// Dimension wildcard: an array of any dimensionality.
    pub const ANY_DIM: i8 = -1;

    pub const fn new(base: BaseType, inst: Inst, opt: Opt, set: bool, dim: i8) -> Self {
        Type {
            base,
            inst,
            opt,
            set,
            dim,
        }
    }

    pub const fn par_int() -> Self {
        Self::new(BaseType::Int, Inst::Par, Opt::Present, false, 0)
    }

    pub const fn var_int() -> Self {
        Self::new(BaseType::Int, Inst::Var, Opt::Present, false, 0)
    }

    pub const fn par_bool() -> Self {
        Self::new(BaseType::Bool, Inst::Par, Opt::Present, false, 0)
    }

    pub const fn var_bool() -> Self {
        Self::new(BaseType::Bool, Inst::Var, Opt::Present, false, 0)
    }

    pub const fn par_set_int() -> Self {
        Self::new(BaseType::Int, Inst::Par, Opt::Present, true, 0)
    }

    pub const fn var_set_int() -> Self {
        Self::new(BaseType::Int, Inst::Var, Opt::Present, true, 0)
    }

    /// `array[..] of $T` (par).
    pub const fn top(dim: i8) -> Self {
        Self::new(BaseType::Top, Inst::Par, Opt::Present, false, dim)
    }

    /// `array[..] of var $T`.
    pub const fn var_top(dim: i8) -> Self {
        Self::new(BaseType::Top, Inst::Var, Opt::Present, false, dim)
    }

    /// `array[..] of var opt $T`.
    pub const fn opt_var_top(dim: i8) -> Self {
        Self::new(BaseType::Top, Inst::Var, Opt::Optional, false, dim)
    }

    /// Same type with a different dimensionality.
    #[must_use]
    pub const fn with_dim(self, dim: i8) -> Self {
        Self { dim, ..self }
    }

    /// Same type with a different instantiation.
    #[must_use]
    pub const fn with_inst(self, inst: Inst) -> Self {
        Self { inst, ..self }
    }

    /// Same type made optional.
    #[must_use]
    pub const fn optional(self) -> Self {
        Self {
            opt: Opt::Optional,
            ..self
        }
    }

    /// Scalar element type of an array type.
    #[must_use]
    pub const fn element(self) -> Self {
        Self { dim: 0, ..self }
    }

    #[inline]
    pub const fn is_set(self) -> bool {
        self.set
    }

    #[inline]
    pub const fn is_array(self) -> bool {
        self.dim != 0
    }

    #[inline]
    pub fn is_var(self) -> bool {
        self.inst == Inst::Var
    }

    #[inline]
    pub fn is_int(self) -> bool {
        self.base == BaseType::Int && !self.set && self.dim == 0
    }

    /// Lattice summary of this type.
    pub fn flags(self) -> TypeFlags {
        let mut flags = TypeFlags::empty();
        flags.set(TypeFlags::IS_VAR, self.inst == Inst::Var);
        flags.set(TypeFlags::IS_OPT, self.opt == Opt::Optional);
        flags.set(TypeFlags::IS_SET, self.set);
        flags.set(TypeFlags::IS_ARRAY, self.dim != 0);
        flags.set(TypeFlags::IS_ANY_DIM, self.dim == Self::ANY_DIM);
        flags.set(TypeFlags::IS_TOP, self.base == BaseType::Top);
        flags
    }

    /// Structural subtype check: can a value of type `self` be passed where
    /// `formal` is expected?
    pub fn is_subtype_of(self, formal: Type) -> bool {
        let (actual_flags, formal_flags) = (self.flags(), formal.flags());
        if !formal_flags.contains(actual_flags & TypeFlags::WIDENING) {
            return false;
        }
        if self.set != formal.set {
            return false;
        }
        if formal.base != BaseType::Top && self.base != formal.base {
            return false;
        }
        if formal.dim == Self::ANY_DIM {
            self.dim != 0
        } else {
            self.dim == formal.dim
        }
    }

    /// Pointwise subtype check over two signatures of equal length.
    pub fn signature_subsumes(actual: &[Type], formal: &[Type]) -> bool {
        actual.len() == formal.len()
            && actual
                .iter()
                .zip(formal)
                .all(|(a, f)| a.is_subtype_of(*f))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dim {
            0 => {}
            Self::ANY_DIM => write!(f, "array[$_] of ")?,
            n => {
                write!(f, "array[")?;
                for i in 0..n {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "int")?;
                }
                write!(f, "] of ")?;
            }
        }
        if self.inst == Inst::Var {
            write!(f, "var ")?;
        }
        if self.opt == Opt::Optional {
            write!(f, "opt ")?;
        }
        if self.set {
            write!(f, "set of ")?;
        }
        match self.base {
            BaseType::Int => write!(f, "int"),
            BaseType::Bool => write!(f, "bool"),
            BaseType::Float => write!(f, "float"),
            BaseType::Top => write!(f, "$T"),
        }
    }
}

#[cfg(test)]
mod tests;
