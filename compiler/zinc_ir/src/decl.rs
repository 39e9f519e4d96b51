//! Variable and function declarations.

use smallvec::SmallVec;

use crate::{ExprId, Name, Span, Type};

/// Type-instantiation of a declaration: `array[1..3, int] of var 0..9: x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInst {
    pub ty: Type,
    /// Declared domain (`0..9` above), a set-valued expression.
    pub domain: Option<ExprId>,
    /// One entry per array dimension; `None` means "inferred from the data".
    pub ranges: SmallVec<[Option<ExprId>; 2]>,
}

impl TypeInst {
    /// A type-instantiation without domain or explicit ranges.
    ///
    /// Arrays get one inferred range per dimension.
    pub fn new(ty: Type) -> Self {
        let dims = usize::try_from(ty.dim).unwrap_or(0);
        TypeInst {
            ty,
            domain: None,
            ranges: SmallVec::from_elem(None, dims),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: ExprId) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Replace the per-dimension ranges.
    #[must_use]
    pub fn with_ranges(mut self, ranges: &[Option<ExprId>]) -> Self {
        self.ranges = SmallVec::from_slice(ranges);
        self
    }
}

/// A variable or parameter declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarDecl {
    pub name: Name,
    pub span: Span,
    pub ti: TypeInst,
    /// Initializer (right-hand side), if any.
    pub init: Option<ExprId>,
}

/// A function declaration (signature only; native bodies are bound by the
/// evaluator's builtin registry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: Name,
    pub span: Span,
    pub params: Vec<Type>,
    pub ret: Type,
}
