//! Tracking of declarations currently being resolved.
//!
//! Every identifier step pushes a `ResolutionFrame`; the frame stays on the
//! stack while the declaration's initializer is evaluated. Reaching a
//! declaration that is already on the stack means its value depends on
//! itself, which is reported as `CyclicDefinition` instead of recursing
//! forever.
//!
//! Only nested entries count against the depth limit. Tail steps of an
//! identifier chain (`a = b; b = c`) are walked in a loop and pushed with
//! [`ResolutionStack::push_tail`], so a long acyclic chain never hits it.
//!
//! Frames are popped by `EvalScope` on drop, so early returns through `?`
//! leave the stack balanced.

use rustc_hash::FxHashSet;
use zinc_ir::{Name, Span, StringInterner, VarId};

use crate::errors::{
    cyclic_definition, recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError,
    EvalNote,
};

#[derive(Clone, Debug)]
pub struct ResolutionFrame {
    pub var: VarId,
    pub name: Name,
    /// Location of the identifier that led here.
    pub span: Span,
}

#[derive(Clone, Debug)]
struct Entry {
    frame: ResolutionFrame,
    nested: bool,
}

#[derive(Clone, Debug)]
pub struct ResolutionStack {
    frames: Vec<Entry>,
    active: FxHashSet<VarId>,
    /// Entries pushed with [`ResolutionStack::push`].
    nested: usize,
    max_depth: Option<usize>,
}

impl ResolutionStack {
    /// `max_depth` of `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            active: FxHashSet::default(),
            nested: 0,
            max_depth,
        }
    }

    /// Push a nested frame, rejecting re-entry and excessive depth.
    ///
    /// The frame is NOT pushed on error.
    pub fn push(&mut self, frame: ResolutionFrame, interner: &StringInterner) -> Result<(), EvalError> {
        self.push_entry(frame, true, interner)
    }

    /// Push the next step of an identifier chain already being walked.
    ///
    /// Rejects re-entry like [`ResolutionStack::push`] but does not count
    /// against the depth limit.
    pub fn push_tail(&mut self, frame: ResolutionFrame, interner: &StringInterner) -> Result<(), EvalError> {
        self.push_entry(frame, false, interner)
    }

    fn push_entry(
        &mut self,
        frame: ResolutionFrame,
        nested: bool,
        interner: &StringInterner,
    ) -> Result<(), EvalError> {
        if self.active.contains(&frame.var) {
            let name = interner.lookup(frame.name);
            let err = cyclic_definition(name)
                .with_span(frame.span)
                .with_note(EvalNote::new(format!(
                    "`{name}` is needed to compute its own value"
                )));
            return Err(self.attach_backtrace(err, interner));
        }
        if let Some(max) = self.max_depth.filter(|_| nested) {
            if self.nested >= max {
                let err = recursion_limit_exceeded(max).with_span(frame.span);
                return Err(self.attach_backtrace(err, interner));
            }
        }
        self.active.insert(frame.var);
        self.nested += usize::from(nested);
        self.frames.push(Entry { frame, nested });
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "ResolutionStack::pop() called on empty stack"
        );
        if let Some(entry) = self.frames.pop() {
            self.active.remove(&entry.frame.var);
            self.nested -= usize::from(entry.nested);
        }
    }

    /// Pop frames until `depth` remain.
    pub fn truncate(&mut self, depth: usize) {
        while self.frames.len() > depth {
            self.pop();
        }
    }

    /// Frames on the stack, tail steps included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames counted against the depth limit.
    #[inline]
    pub fn nested_depth(&self) -> usize {
        self.nested
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn contains(&self, var: VarId) -> bool {
        self.active.contains(&var)
    }

    /// Snapshot the stack, innermost declaration first.
    pub fn capture(&self, interner: &StringInterner) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|e| BacktraceFrame {
                name: interner.lookup(e.frame.name).to_string(),
                span: Some(e.frame.span),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace unless the stack is empty or one is already set.
    pub fn attach_backtrace(&self, err: EvalError, interner: &StringInterner) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture(interner))
    }
}

impl Default for ResolutionStack {
    /// Unlimited depth.
    fn default() -> Self {
        Self::new(None)
    }
}
