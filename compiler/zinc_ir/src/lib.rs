//! Zinc IR - the immutable session AST.
//!
//! This crate contains the data structures shared by every pass of the
//! Zinc compiler front end:
//! - Spans for source locations
//! - Names for interned identifiers
//! - `ExprArena` holding every expression of a compilation session
//! - `Type` and `TypeInst` describing declared and resolved types
//! - `VarDecl` / `FunctionDecl` and the `Model` that owns them
//! - The standard-library function declaration table
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers become `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, expressions are `ExprId(u32)` indices
//! - **Keys, not pointers**: an identifier refers to its declaration through an
//!   optional `VarId`, never through a reference

mod arena;
pub mod ast;
mod decl;
mod ids;
mod interner;
mod model;
mod name;
mod span;
pub mod stdlib;
mod ty;

pub use arena::{ArrayLit, ExprArena};
pub use ast::{BinaryOp, ExprKind, UnaryOp};
pub use decl::{FunctionDecl, TypeInst, VarDecl};
pub use ids::{ArrayLitId, ExprId, ExprRange, FnId, VarId};
pub use interner::StringInterner;
pub use model::{FnMatch, Model};
pub use name::Name;
pub use span::Span;
pub use ty::{BaseType, Inst, Opt, Type, TypeFlags};
