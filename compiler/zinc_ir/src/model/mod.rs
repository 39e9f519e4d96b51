//! The `Model`: every declaration and expression of one compilation session.
//!
//! Earlier passes (parsing, name resolution, type checking) populate the
//! model; the evaluator only reads it. Function overloads are indexed by name
//! so that [`Model::match_fn`] can resolve a signature in one lookup.

mod construct;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::ids::to_u32;
use crate::{ExprArena, FnId, FunctionDecl, Name, StringInterner, Type, VarDecl, VarId};

/// Outcome of an overload lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FnMatch {
    /// Exactly one most-specific declaration accepts the argument types.
    Unique(FnId),
    /// No declaration with this name accepts the argument types.
    NoMatch,
    /// Several declarations accept the argument types and none is more
    /// specific than all the others.
    Ambiguous(Vec<FnId>),
}

/// Session-wide declaration tables and expression arena.
pub struct Model {
    interner: StringInterner,
    arena: ExprArena,
    vars: Vec<VarDecl>,
    functions: Vec<FunctionDecl>,
    /// Overloads by name, in declaration order.
    fn_index: FxHashMap<Name, SmallVec<[FnId; 4]>>,
    var_index: FxHashMap<Name, VarId>,
}

impl Model {
    pub fn new() -> Self {
        Model {
            interner: StringInterner::new(),
            arena: ExprArena::new(),
            vars: Vec::new(),
            functions: Vec::new(),
            fn_index: FxHashMap::default(),
            var_index: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn arena_mut(&mut self) -> &mut ExprArena {
        &mut self.arena
    }

    /// Resolve a name to its string.
    #[inline]
    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    /// Add a variable declaration. A later declaration with the same name
    /// shadows the earlier one for [`Model::lookup_var`].
    pub fn add_var(&mut self, decl: VarDecl) -> VarId {
        let id = VarId::new(to_u32(self.vars.len(), "variable declarations"));
        self.var_index.insert(decl.name, id);
        self.vars.push(decl);
        id
    }

    /// Add a function declaration as a new overload of its name.
    pub fn add_function(&mut self, decl: FunctionDecl) -> FnId {
        let id = FnId::new(to_u32(self.functions.len(), "function declarations"));
        self.fn_index.entry(decl.name).or_default().push(id);
        self.functions.push(decl);
        id
    }

    #[inline]
    pub fn var(&self, id: VarId) -> &VarDecl {
        &self.vars[id.index()]
    }

    #[inline]
    pub fn function(&self, id: FnId) -> &FunctionDecl {
        &self.functions[id.index()]
    }

    pub fn lookup_var(&self, name: Name) -> Option<VarId> {
        self.var_index.get(&name).copied()
    }

    /// All function declarations with their IDs.
    pub fn functions(&self) -> impl Iterator<Item = (FnId, &FunctionDecl)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FnId::new(to_u32(i, "function declarations")), f))
    }

    /// Overloads declared under `name`.
    pub fn overloads(&self, name: Name) -> &[FnId] {
        self.fn_index
            .get(&name)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    /// Find the declaration of `name` that accepts `args`.
    ///
    /// Every overload whose formal parameters are supertypes of `args` is a
    /// candidate; the result is the candidate whose own signature is a
    /// subtype of every other candidate's. An exact match is therefore
    /// always preferred.
    pub fn match_fn(&self, name: Name, args: &[Type]) -> FnMatch {
        let candidates: SmallVec<[FnId; 4]> = self
            .overloads(name)
            .iter()
            .copied()
            .filter(|&id| Type::signature_subsumes(args, &self.function(id).params))
            .collect();

        if candidates.is_empty() {
            return FnMatch::NoMatch;
        }

        let most_specific: SmallVec<[FnId; 2]> = candidates
            .iter()
            .copied()
            .filter(|&c| {
                let params = &self.function(c).params;
                candidates
                    .iter()
                    .all(|&other| Type::signature_subsumes(params, &self.function(other).params))
            })
            .collect();

        match most_specific.as_slice() {
            [only] => FnMatch::Unique(*only),
            _ => FnMatch::Ambiguous(candidates.to_vec()),
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
