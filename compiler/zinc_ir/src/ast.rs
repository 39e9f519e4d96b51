//! Expression node kinds.
//!
//! Nodes are flat: children are `ExprId`s, lists are `ExprRange`s into the
//! arena, and identifiers/calls carry optional declaration keys filled in by
//! name resolution.

use crate::{ArrayLitId, ExprId, ExprRange, FnId, Name, VarId};

/// Expression kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    /// Integer literal.
    IntLit(i64),
    /// Boolean literal.
    BoolLit(bool),
    /// Set literal `{e1, e2, ...}` over integer elements.
    SetLit(ExprRange),
    /// Integer range set `lo..hi`.
    Range { lo: ExprId, hi: ExprId },
    /// Identifier; `decl` is `None` when name resolution found nothing.
    Ident { name: Name, decl: Option<VarId> },
    /// Array literal (elements and per-dimension bounds live in the arena).
    ArrayLit(ArrayLitId),
    /// Array access `a[i, j, ...]`.
    ArrayAccess { array: ExprId, indices: ExprRange },
    /// Function call; `decl` is the overload chosen by type checking.
    Call {
        name: Name,
        decl: Option<FnId>,
        args: ExprRange,
    },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    /// Unary operation.
    Unary { op: UnaryOp, operand: ExprId },
    /// `if cond then a else b endif`.
    IfThenElse {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
}

impl ExprKind {
    /// Short description of the node form, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            ExprKind::IntLit(_) => "integer literal",
            ExprKind::BoolLit(_) => "boolean literal",
            ExprKind::SetLit(_) => "set literal",
            ExprKind::Range { .. } => "range",
            ExprKind::Ident { .. } => "identifier",
            ExprKind::ArrayLit(_) => "array literal",
            ExprKind::ArrayAccess { .. } => "array access",
            ExprKind::Call { .. } => "call",
            ExprKind::Binary { .. } => "binary operation",
            ExprKind::Unary { .. } => "unary operation",
            ExprKind::IfThenElse { .. } => "if-then-else",
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Integer arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    // Boolean
    And,
    Or,
    // Sets
    Union,
    Intersect,
    Diff,
    In,
}

impl BinaryOp {
    /// Source spelling of the operator.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "div",
            BinaryOp::Mod => "mod",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "/\\",
            BinaryOp::Or => "\\/",
            BinaryOp::Union => "union",
            BinaryOp::Intersect => "intersect",
            BinaryOp::Diff => "diff",
            BinaryOp::In => "in",
        }
    }

    /// Whether the operator produces an integer from integers.
    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }

    /// Whether the operator produces a set from sets.
    pub fn is_set_op(self) -> bool {
        matches!(self, BinaryOp::Union | BinaryOp::Intersect | BinaryOp::Diff)
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}
