//! Integer newtype that prevents unchecked arithmetic.
//!
//! `IntVal` wraps `i64` and intentionally does NOT implement `Add`, `Sub`,
//! `Mul`, `Div`, `Rem`, or `Neg`. Every arithmetic step goes through a checked
//! method returning `Option<IntVal>`, so overflow can never wrap silently.

use std::fmt;

/// A 64-bit signed integer value produced by constant evaluation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct IntVal(i64);

impl IntVal {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    #[inline]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Convert a collection length. `None` if it does not fit in `i64`.
    #[inline]
    pub fn from_len(len: usize) -> Option<Self> {
        i64::try_from(len).ok().map(Self)
    }

    /// Narrow a wide intermediate result. `None` if it does not fit in `i64`.
    #[inline]
    pub fn from_wide(value: i128) -> Option<Self> {
        i64::try_from(value).ok().map(Self)
    }

    #[inline]
    pub fn wide(self) -> i128 {
        i128::from(self.0)
    }

    #[inline]
    pub const fn checked_add(self, rhs: Self) -> Option<Self> {
        match self.0.checked_add(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_sub(self, rhs: Self) -> Option<Self> {
        match self.0.checked_sub(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_mul(self, rhs: Self) -> Option<Self> {
        match self.0.checked_mul(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Truncating division. `None` on division by zero or `MIN / -1`.
    #[inline]
    pub const fn checked_div(self, rhs: Self) -> Option<Self> {
        match self.0.checked_div(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Remainder with the sign of the dividend. `None` on division by zero
    /// or `MIN % -1`.
    #[inline]
    pub const fn checked_rem(self, rhs: Self) -> Option<Self> {
        match self.0.checked_rem(rhs.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.0.checked_neg() {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    #[inline]
    pub const fn checked_abs(self) -> Option<Self> {
        match self.0.checked_abs() {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

impl From<i64> for IntVal {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Debug for IntVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for IntVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
