//! Conversion of evaluation and registration errors into diagnostics.
//!
//! # Error Code Ranges
//!
//! - E4001–E4015: constant evaluation, one code per `EvalErrorKind`
//! - E9001: builtin registration failure (internal compiler error)

use zinc_diagnostic::{Diagnostic, ErrorCode};

use super::{EvalError, EvalErrorKind, RegistrationError};

impl EvalErrorKind {
    /// Map this error kind to its corresponding `ErrorCode`.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedOperand { .. } => ErrorCode::E4001,
            Self::EmptyCollection { .. } => ErrorCode::E4002,
            Self::ArityOrTypeMismatch { .. } => ErrorCode::E4003,
            Self::UndefinedIdentifier { .. } => ErrorCode::E4004,
            Self::UnsupportedExpressionShape { .. } => ErrorCode::E4005,
            Self::DimensionOutOfRange { .. } => ErrorCode::E4006,
            Self::NonRangeSet { .. } => ErrorCode::E4007,
            Self::ShapeMismatch { .. } => ErrorCode::E4008,
            Self::BoundsUndetermined { .. } => ErrorCode::E4009,
            Self::CyclicDefinition { .. } => ErrorCode::E4010,
            Self::NoConstantValue { .. } => ErrorCode::E4011,
            Self::IntegerOverflow { .. } => ErrorCode::E4012,
            Self::DivisionByZero => ErrorCode::E4013,
            Self::IndexOutOfBounds { .. } => ErrorCode::E4014,
            Self::RecursionLimit { .. } => ErrorCode::E4015,
        }
    }

    /// Concise label for the primary span.
    pub fn primary_label(&self) -> &'static str {
        match self {
            Self::UnsupportedOperand { .. } => "operand not supported here",
            Self::EmptyCollection { .. } => "array is empty",
            Self::ArityOrTypeMismatch { .. } => "unexpected argument",
            Self::UndefinedIdentifier { .. } => "not declared",
            Self::UnsupportedExpressionShape { .. } => "cannot be interpreted here",
            Self::DimensionOutOfRange { .. } => "dimension out of range",
            Self::NonRangeSet { .. } => "not a contiguous range",
            Self::ShapeMismatch { .. } => "wrong number of elements",
            Self::BoundsUndetermined { .. } => "bounds unknown",
            Self::CyclicDefinition { .. } => "defined in terms of itself",
            Self::NoConstantValue { .. } => "no constant value",
            Self::IntegerOverflow { .. } => "overflow occurred here",
            Self::DivisionByZero => "division by zero here",
            Self::IndexOutOfBounds { .. } => "index out of bounds",
            Self::RecursionLimit { .. } => "evaluation nested too deeply",
        }
    }

    /// Actionable suggestion for the errors a modeller can fix directly.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NonRangeSet { .. } => {
                Some("use a contiguous range such as `1..n` as the index set".to_string())
            }
            Self::BoundsUndetermined { .. } => {
                Some("declare the variable with a finite domain, e.g. `var 0..9: x`".to_string())
            }
            Self::NoConstantValue { name } => {
                Some(format!("give `{name}` an initialiser or a data value"))
            }
            Self::DivisionByZero => Some("add a zero check before dividing".to_string()),
            _ => None,
        }
    }
}

impl EvalError {
    /// Convert into a `Diagnostic` with label, notes, backtrace and suggestion.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.kind.error_code()).with_message(&self.message);

        if let Some(span) = self.span {
            diag = diag.with_label(span, self.kind.primary_label());
        }

        for note in &self.notes {
            diag = match note.span {
                Some(span) => diag.with_secondary_label(span, &note.message),
                None => diag.with_note(&note.message),
            };
        }

        if let Some(ref bt) = self.backtrace {
            if !bt.is_empty() {
                diag = diag.with_note(format!("while resolving:\n{bt}"));
            }
        }

        if let Some(suggestion) = self.kind.suggestion() {
            diag = diag.with_suggestion(suggestion);
        }

        diag
    }
}

impl RegistrationError {
    /// Registration failures are internal compiler errors.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorCode::E9001)
            .with_message(self.to_string())
            .with_note("the standard-library declarations and the builtin registrar disagree")
            .with_note("this is a bug in the compiler, not in the model")
    }
}
