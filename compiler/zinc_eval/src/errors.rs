//! Error types for constant evaluation and builtin registration.
//!
//! `EvalErrorKind` gives every failure a typed category; the factory
//! functions below (e.g. `empty_collection()`) are the public way to build
//! one and fill in both `kind` and `message`.
//!
//! `RegistrationError` is deliberately a separate type: it can only occur
//! while binding builtins at session start-up and is never recoverable.

mod diagnostics;

use std::fmt;

use zinc_ir::Span;

use crate::{IntSetVal, IntVal};

/// Result of evaluation.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    /// A builtin received an operand kind it refuses (e.g. a set in `min`).
    UnsupportedOperand { builtin: String, operand: String },
    /// Reduction over an empty array where at least one element is required.
    EmptyCollection { operation: String },
    /// Wrong argument count or value kind reaching a builtin or operator.
    ArityOrTypeMismatch {
        name: String,
        expected: String,
        found: String,
    },
    UndefinedIdentifier { name: String },
    /// A builtin reached an expression form it cannot interpret.
    UnsupportedExpressionShape { operation: String, shape: String },
    DimensionOutOfRange {
        operation: String,
        dimension: usize,
        available: usize,
    },
    NonRangeSet { operation: String, set: String },
    ShapeMismatch { expected: String, found: usize },
    BoundsUndetermined { operation: String },
    CyclicDefinition { name: String },
    /// Declaration without initializer used where a value is required.
    NoConstantValue { name: String },
    IntegerOverflow { operation: String },
    DivisionByZero,
    IndexOutOfBounds {
        index: IntVal,
        dimension: usize,
        lo: IntVal,
        hi: IntVal,
    },
    RecursionLimit { depth: usize },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOperand { builtin, operand } => {
                write!(f, "{builtin}: {operand} not supported")
            }
            Self::EmptyCollection { operation } => {
                write!(f, "{operation} on empty array undefined")
            }
            Self::ArityOrTypeMismatch {
                name,
                expected,
                found,
            } => write!(f, "`{name}` expects {expected}, found {found}"),
            Self::UndefinedIdentifier { name } => write!(f, "undefined identifier `{name}`"),
            Self::UnsupportedExpressionShape { operation, shape } => {
                write!(f, "invalid argument to {operation}: {shape}")
            }
            Self::DimensionOutOfRange {
                operation,
                dimension,
                available,
            } => write!(
                f,
                "{operation}: wrong dimension {dimension} (array has {available})"
            ),
            Self::NonRangeSet { operation, set } => {
                write!(f, "{operation} only defined for ranges, found {set}")
            }
            Self::ShapeMismatch { expected, found } => write!(
                f,
                "mismatch in array dimensions: index sets describe {expected} elements, array has {found}"
            ),
            Self::BoundsUndetermined { operation } => {
                write!(f, "{operation}: cannot determine bounds")
            }
            Self::CyclicDefinition { name } => write!(f, "cyclic definition of `{name}`"),
            Self::NoConstantValue { name } => {
                write!(f, "`{name}` has no initialiser and no constant value")
            }
            Self::IntegerOverflow { operation } => write!(f, "integer overflow in {operation}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfBounds {
                index,
                dimension,
                lo,
                hi,
            } => write!(
                f,
                "index {index} out of bounds {lo}..{hi} in dimension {dimension}"
            ),
            Self::RecursionLimit { depth } => {
                write!(f, "maximum evaluation depth exceeded (limit: {depth})")
            }
        }
    }
}

/// Additional context note attached to an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalNote {
    pub message: String,
    pub span: Option<Span>,
}

impl EvalNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span: Some(span),
        }
    }
}

/// One declaration in the chain being resolved when an error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub name: String,
    pub span: Option<Span>,
}

/// Snapshot of the resolution stack at an error site, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            write!(f, "  {i}: {}", frame.name)?;
            if let Some(span) = frame.span {
                write!(f, " at {span}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()`.
    pub message: String,
    /// Location of the originating expression.
    pub span: Option<Span>,
    /// Declaration chain being resolved at the error site.
    pub backtrace: Option<EvalBacktrace>,
    pub notes: Vec<EvalNote>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            span: None,
            backtrace: None,
            notes: Vec::new(),
        }
    }

    /// Attach a source span, replacing any existing one.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach a source span unless the error already has one.
    ///
    /// Errors bubble outward through nested evaluations; the innermost
    /// expression is the most precise location, so it wins.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: EvalNote) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for EvalError {}

// Operand errors

#[cold]
pub fn unsupported_operand(builtin: &str, operand: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperand {
        builtin: builtin.to_string(),
        operand: operand.to_string(),
    })
}

#[cold]
pub fn empty_collection(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyCollection {
        operation: operation.to_string(),
    })
}

/// Wrong number of arguments reaching `name`.
#[cold]
pub fn arity_mismatch(name: &str, expected: usize, found: usize) -> EvalError {
    let plural = |n: usize| {
        if n == 1 {
            format!("{n} argument")
        } else {
            format!("{n} arguments")
        }
    };
    EvalError::from_kind(EvalErrorKind::ArityOrTypeMismatch {
        name: name.to_string(),
        expected: plural(expected),
        found: plural(found),
    })
}

/// A value of the wrong kind reaching `name`.
#[cold]
pub fn type_mismatch(name: &str, expected: &str, found: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityOrTypeMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    })
}

// Resolution errors

#[cold]
pub fn undefined_identifier(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedIdentifier {
        name: name.to_string(),
    })
}

#[cold]
pub fn unsupported_shape(operation: &str, shape: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedExpressionShape {
        operation: operation.to_string(),
        shape: shape.to_string(),
    })
}

#[cold]
pub fn cyclic_definition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CyclicDefinition {
        name: name.to_string(),
    })
}

#[cold]
pub fn no_constant_value(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoConstantValue {
        name: name.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Shape errors

#[cold]
pub fn dimension_out_of_range(operation: &str, dimension: usize, available: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DimensionOutOfRange {
        operation: operation.to_string(),
        dimension,
        available,
    })
}

#[cold]
pub fn non_range_set(operation: &str, set: &IntSetVal) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NonRangeSet {
        operation: operation.to_string(),
        set: set.to_string(),
    })
}

/// `expected` is `None` when the product of the index-set sizes overflows.
#[cold]
pub fn shape_mismatch(expected: Option<IntVal>, found: usize) -> EvalError {
    let expected = match expected {
        Some(n) => n.to_string(),
        None => "more than 2^63".to_string(),
    };
    EvalError::from_kind(EvalErrorKind::ShapeMismatch { expected, found })
}

#[cold]
pub fn index_out_of_bounds(index: IntVal, dimension: usize, (lo, hi): (IntVal, IntVal)) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IndexOutOfBounds {
        index,
        dimension,
        lo,
        hi,
    })
}

// Bounds and arithmetic errors

#[cold]
pub fn bounds_undetermined(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BoundsUndetermined {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn integer_overflow(operation: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow {
        operation: operation.to_string(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

/// Why a builtin could not be bound to a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationErrorKind {
    /// No declaration accepts the builtin's signature.
    NoMatchingDeclaration,
    /// Several declarations are equally specific.
    AmbiguousDeclaration { candidates: usize },
    /// The matched declaration already has an implementation.
    AlreadyBound,
}

/// Fatal start-up failure: the declared standard library and the builtin
/// registrar disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationError {
    pub kind: RegistrationErrorKind,
    pub name: String,
    /// Rendered signature, e.g. `(array[$_] of int)`.
    pub signature: String,
}

impl RegistrationError {
    pub fn new(kind: RegistrationErrorKind, name: &str, signature: String) -> Self {
        Self {
            kind,
            name: name.to_string(),
            signature,
        }
    }
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            kind,
            name,
            signature,
        } = self;
        match kind {
            RegistrationErrorKind::NoMatchingDeclaration => {
                write!(f, "no declaration matches builtin `{name}{signature}`")
            }
            RegistrationErrorKind::AmbiguousDeclaration { candidates } => write!(
                f,
                "builtin `{name}{signature}` matches {candidates} declarations ambiguously"
            ),
            RegistrationErrorKind::AlreadyBound => {
                write!(f, "declaration `{name}{signature}` is already bound to a builtin")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}
