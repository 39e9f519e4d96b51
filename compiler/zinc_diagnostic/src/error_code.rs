//! Error codes for evaluator and registration diagnostics.

use std::fmt;

/// Error codes for all diagnostics produced by the evaluation core.
///
/// Format: E#### where the first digit indicates the phase:
/// - E4xxx: Constant evaluation errors
/// - E9xxx: Internal compiler errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Constant Evaluation Errors (E4xxx)
    /// Operand kind not supported by the builtin (e.g. a set passed to `min`)
    E4001,
    /// Reduction over an empty array
    E4002,
    /// Wrong argument count or type reaching a builtin
    E4003,
    /// Identifier without a declaration
    E4004,
    /// Expression form the builtin cannot interpret
    E4005,
    /// Index-set dimension beyond the array's dimensionality
    E4006,
    /// Set argument is not a contiguous range
    E4007,
    /// Element count does not match the requested dimensions
    E4008,
    /// Bounds cannot be determined
    E4009,
    /// Declaration depends on itself
    E4010,
    /// Declaration has no constant value
    E4011,
    /// Integer overflow
    E4012,
    /// Division or modulo by zero
    E4013,
    /// Array index out of bounds
    E4014,
    /// Evaluation nesting limit exceeded
    E4015,

    // Internal Errors (E9xxx)
    /// Builtin registration failed (standard library and registrar disagree)
    E9001,
}

impl ErrorCode {
    /// Every defined error code.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::E4003,
        ErrorCode::E4004,
        ErrorCode::E4005,
        ErrorCode::E4006,
        ErrorCode::E4007,
        ErrorCode::E4008,
        ErrorCode::E4009,
        ErrorCode::E4010,
        ErrorCode::E4011,
        ErrorCode::E4012,
        ErrorCode::E4013,
        ErrorCode::E4014,
        ErrorCode::E4015,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
            ErrorCode::E4008 => "E4008",
            ErrorCode::E4009 => "E4009",
            ErrorCode::E4010 => "E4010",
            ErrorCode::E4011 => "E4011",
            ErrorCode::E4012 => "E4012",
            ErrorCode::E4013 => "E4013",
            ErrorCode::E4014 => "E4014",
            ErrorCode::E4015 => "E4015",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// Check if this is a constant-evaluation error (E4xxx).
    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("E4")
    }

    /// Check if this is an internal compiler error (E9xxx).
    pub fn is_internal_error(&self) -> bool {
        self.as_str().starts_with("E9")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|code| code.as_str() == s)
            .ok_or(())
    }
}
