//! Session expression arena.
//!
//! [`ExprArena`] uses struct-of-arrays layout: parallel `kinds`, `spans` and
//! `types` arrays indexed by [`ExprId`], plus flat side tables for argument
//! lists and array literals. Nodes are appended during construction and never
//! removed or mutated afterwards.

use std::rc::Rc;

use smallvec::SmallVec;

use crate::ids::to_u32;
use crate::{ArrayLitId, ExprId, ExprKind, ExprRange, Span, Type};

/// Array literal payload.
///
/// The element sequence is shared (`Rc`) so that reshaping an array never
/// copies its elements. Invariant: the product of the per-dimension sizes
/// equals `elems.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayLit {
    pub elems: Rc<[ExprId]>,
    /// Inclusive `(min, max)` index bounds, one pair per dimension.
    pub dims: SmallVec<[(i64, i64); 2]>,
}

impl ArrayLit {
    /// Number of dimensions.
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }
}

/// Arena for every expression of a compilation session.
#[derive(Clone, Debug, Default)]
pub struct ExprArena {
    /// Expression kinds (parallel with spans and types).
    kinds: Vec<ExprKind>,
    /// Source spans for diagnostics (parallel with kinds).
    spans: Vec<Span>,
    /// Resolved types (parallel with kinds).
    types: Vec<Type>,
    /// Flattened expression ID lists (call args, set elements, indices).
    expr_lists: Vec<ExprId>,
    /// Array literal payloads.
    array_lits: Vec<ArrayLit>,
}

impl ExprArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an expression, returning its ID.
    pub fn alloc(&mut self, kind: ExprKind, span: Span, ty: Type) -> ExprId {
        let id = ExprId::new(to_u32(self.kinds.len(), "expressions"));
        self.kinds.push(kind);
        self.spans.push(span);
        self.types.push(ty);
        id
    }

    /// Allocate a contiguous list of expression IDs.
    pub fn alloc_list(&mut self, ids: &[ExprId]) -> ExprRange {
        if ids.is_empty() {
            return ExprRange::EMPTY;
        }
        let start = to_u32(self.expr_lists.len(), "expression list entries");
        self.expr_lists.extend_from_slice(ids);
        ExprRange::new(start, to_u32(ids.len(), "list elements"))
    }

    /// Allocate an array literal payload.
    pub fn alloc_array_lit(&mut self, lit: ArrayLit) -> ArrayLitId {
        let id = ArrayLitId::new(to_u32(self.array_lits.len(), "array literals"));
        self.array_lits.push(lit);
        id
    }

    #[inline]
    pub fn kind(&self, id: ExprId) -> ExprKind {
        self.kinds[id.index()]
    }

    #[inline]
    pub fn span(&self, id: ExprId) -> Span {
        self.spans[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: ExprId) -> Type {
        self.types[id.index()]
    }

    /// Expression IDs of a list.
    #[inline]
    pub fn list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    #[inline]
    pub fn array_lit(&self, id: ArrayLitId) -> &ArrayLit {
        &self.array_lits[id.index()]
    }

    /// Number of allocated expressions.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
