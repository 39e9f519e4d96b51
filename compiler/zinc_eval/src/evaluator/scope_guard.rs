//! RAII scope guard for nested evaluation.
//!
//! [`EvalScope`] records the scratch-list mark and the resolution-stack
//! depth when it is opened. On drop (including an early `?` return or a
//! panic unwinding through it) it truncates both back, releasing the values
//! retained during the scope and popping the declarations it resolved.
//! Values still referenced elsewhere survive through their `Rc`.
//!
//! ```text
//! let mut scope = evaluator.scoped();
//! let arr = scope.eval_array(arg)?;   // retained until `scope` drops
//! ```

use std::ops::{Deref, DerefMut};

use super::Evaluator;

/// Guard returned by [`Evaluator::scoped`]; derefs to the evaluator.
pub struct EvalScope<'guard, 'a> {
    evaluator: &'guard mut Evaluator<'a>,
    scratch_mark: usize,
    depth: usize,
}

impl Drop for EvalScope<'_, '_> {
    fn drop(&mut self) {
        self.evaluator.scratch.truncate(self.scratch_mark);
        self.evaluator.resolving.truncate(self.depth);
        self.evaluator.open_scopes -= 1;
    }
}

impl<'a> Deref for EvalScope<'_, 'a> {
    type Target = Evaluator<'a>;

    fn deref(&self) -> &Self::Target {
        self.evaluator
    }
}

impl DerefMut for EvalScope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.evaluator
    }
}

impl<'a> Evaluator<'a> {
    /// Open a scope that releases its intermediate values on drop.
    pub fn scoped(&mut self) -> EvalScope<'_, 'a> {
        self.open_scopes += 1;
        EvalScope {
            scratch_mark: self.scratch.len(),
            depth: self.resolving.depth(),
            evaluator: self,
        }
    }
}
