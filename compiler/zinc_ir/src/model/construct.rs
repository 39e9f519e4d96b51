//! Typed node construction.
//!
//! These are the constructors earlier passes use to populate a `Model`. Each
//! one computes the node's resolved `Type` from its children so the arena's
//! type column is always filled in.

use std::rc::Rc;

use smallvec::SmallVec;

use super::{FnMatch, Model};
use crate::{
    ArrayLit, BaseType, BinaryOp, ExprId, ExprKind, FnId, FunctionDecl, Inst, Opt, Span, Type,
    TypeInst, UnaryOp, VarDecl, VarId,
};

impl Model {
    /// Allocate a node with an explicit span and type.
    pub fn alloc(&mut self, kind: ExprKind, span: Span, ty: Type) -> ExprId {
        self.arena.alloc(kind, span, ty)
    }

    /// Declare a variable or parameter.
    pub fn declare_var(&mut self, name: &str, ti: TypeInst, init: Option<ExprId>) -> VarId {
        let name = self.interner.intern(name);
        self.add_var(VarDecl {
            name,
            span: Span::DUMMY,
            ti,
            init,
        })
    }

    /// Attach an initializer to an already declared variable.
    ///
    /// Lets declarations refer to each other before all of them exist.
    pub fn set_init(&mut self, var: VarId, init: ExprId) {
        self.vars[var.index()].init = Some(init);
    }

    /// Declare a function signature.
    pub fn declare_fn(&mut self, name: &str, params: &[Type], ret: Type) -> FnId {
        let name = self.interner.intern(name);
        self.add_function(FunctionDecl {
            name,
            span: Span::DUMMY,
            params: params.to_vec(),
            ret,
        })
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.alloc(ExprKind::IntLit(value), Span::DUMMY, Type::par_int())
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.alloc(ExprKind::BoolLit(value), Span::DUMMY, Type::par_bool())
    }

    /// `lo..hi` from two expressions.
    pub fn range(&mut self, lo: ExprId, hi: ExprId) -> ExprId {
        let inst = self.join_inst(&[lo, hi]);
        self.alloc(
            ExprKind::Range { lo, hi },
            Span::DUMMY,
            Type::par_set_int().with_inst(inst),
        )
    }

    /// `lo..hi` from two integer literals.
    pub fn int_range(&mut self, lo: i64, hi: i64) -> ExprId {
        let (lo, hi) = (self.int(lo), self.int(hi));
        self.range(lo, hi)
    }

    /// `{e1, e2, ...}`.
    pub fn set(&mut self, elems: &[ExprId]) -> ExprId {
        let inst = self.join_inst(elems);
        let range = self.arena.alloc_list(elems);
        self.alloc(
            ExprKind::SetLit(range),
            Span::DUMMY,
            Type::par_set_int().with_inst(inst),
        )
    }

    /// `{v1, v2, ...}` from integer literals.
    pub fn int_set(&mut self, values: &[i64]) -> ExprId {
        let elems: Vec<ExprId> = values.iter().map(|&v| self.int(v)).collect();
        self.set(&elems)
    }

    /// One-dimensional array literal indexed from 1.
    pub fn array(&mut self, elems: &[ExprId]) -> ExprId {
        let len = i64::try_from(elems.len()).unwrap_or(i64::MAX);
        self.array_nd(elems, &[(1, len)])
    }

    /// Empty one-dimensional literal `[]` with element type `elem`.
    ///
    /// `[]` has no elements to infer from, so its type comes from context.
    pub fn empty_array(&mut self, elem: Type) -> ExprId {
        let lit = self.arena.alloc_array_lit(ArrayLit {
            elems: Rc::from(Vec::new()),
            dims: SmallVec::from_slice(&[(1, 0)]),
        });
        self.alloc(ExprKind::ArrayLit(lit), Span::DUMMY, elem.with_dim(1))
    }

    /// Array literal with explicit per-dimension bounds.
    pub fn array_nd(&mut self, elems: &[ExprId], dims: &[(i64, i64)]) -> ExprId {
        let elem_ty = self.join_elements(elems);
        let ndims = i8::try_from(dims.len()).unwrap_or(i8::MAX);
        let lit = self.arena.alloc_array_lit(ArrayLit {
            elems: Rc::from(elems),
            dims: SmallVec::from_slice(dims),
        });
        self.alloc(ExprKind::ArrayLit(lit), Span::DUMMY, elem_ty.with_dim(ndims))
    }

    /// Identifier resolved to `var`.
    pub fn ident(&mut self, var: VarId) -> ExprId {
        let decl = self.var(var);
        let (name, ty) = (decl.name, decl.ti.ty);
        self.alloc(
            ExprKind::Ident {
                name,
                decl: Some(var),
            },
            Span::DUMMY,
            ty,
        )
    }

    /// Identifier that name resolution could not bind.
    pub fn unresolved_ident(&mut self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.alloc(
            ExprKind::Ident { name, decl: None },
            Span::DUMMY,
            Type::top(0),
        )
    }

    /// Call resolved against the declared overloads of `name`.
    ///
    /// Unresolvable calls are still built, with `decl: None`.
    pub fn call(&mut self, name: &str, args: &[ExprId]) -> ExprId {
        let name = self.interner.intern(name);
        let arg_types: SmallVec<[Type; 4]> = args.iter().map(|&a| self.arena.ty(a)).collect();
        let (decl, ty) = match self.match_fn(name, &arg_types) {
            FnMatch::Unique(id) => (Some(id), self.function(id).ret),
            FnMatch::NoMatch | FnMatch::Ambiguous(_) => (None, Type::top(0)),
        };
        let args = self.arena.alloc_list(args);
        self.alloc(ExprKind::Call { name, decl, args }, Span::DUMMY, ty)
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let inst = self.join_inst(&[left, right]);
        let ty = if op.is_arithmetic() {
            Type::par_int()
        } else if op.is_set_op() {
            Type::par_set_int()
        } else {
            Type::par_bool()
        };
        self.alloc(
            ExprKind::Binary { op, left, right },
            Span::DUMMY,
            ty.with_inst(inst),
        )
    }

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        let ty = self.arena.ty(operand);
        self.alloc(ExprKind::Unary { op, operand }, Span::DUMMY, ty)
    }

    pub fn if_then_else(&mut self, cond: ExprId, then_branch: ExprId, else_branch: ExprId) -> ExprId {
        let inst = self.join_inst(&[cond, then_branch, else_branch]);
        let ty = self.arena.ty(then_branch).with_inst(inst);
        self.alloc(
            ExprKind::IfThenElse {
                cond,
                then_branch,
                else_branch,
            },
            Span::DUMMY,
            ty,
        )
    }

    /// `array[i, j, ...]`.
    pub fn access(&mut self, array: ExprId, indices: &[ExprId]) -> ExprId {
        let inst = self.join_inst(indices);
        let array_ty = self.arena.ty(array);
        let ty = if inst == Inst::Var {
            array_ty.element().with_inst(Inst::Var)
        } else {
            array_ty.element()
        };
        let indices = self.arena.alloc_list(indices);
        self.alloc(ExprKind::ArrayAccess { array, indices }, Span::DUMMY, ty)
    }

    /// `var` if any of the expressions is `var`.
    fn join_inst(&self, ids: &[ExprId]) -> Inst {
        ids.iter()
            .map(|&id| self.arena.ty(id).inst)
            .max()
            .unwrap_or(Inst::Par)
    }

    /// Scalar element type of an array literal.
    fn join_elements(&self, elems: &[ExprId]) -> Type {
        let Some(&first) = elems.first() else {
            return Type::top(0);
        };
        let base = self.arena.ty(first).base;
        let mut ty = Type::new(base, Inst::Par, Opt::Present, false, 0);
        for &e in elems {
            let elem = self.arena.ty(e);
            ty.inst = ty.inst.max(elem.inst);
            ty.opt = ty.opt.max(elem.opt);
            ty.set |= elem.set;
            if elem.base != ty.base {
                ty.base = BaseType::Top;
            }
        }
        ty
    }
}
