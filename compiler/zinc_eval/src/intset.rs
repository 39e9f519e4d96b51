//! Canonical finite integer sets.
//!
//! An [`IntSetVal`] is a sequence of closed intervals that is strictly
//! increasing, disjoint and non-adjacent: for consecutive intervals `a`, `b`
//! we always have `a.hi + 1 < b.lo`. Every constructor and every set
//! operation preserves this form, so two sets are equal exactly when their
//! interval lists are equal.
//!
//! Sizes are computed from interval bounds and never by enumerating
//! elements, so `1..1_000_000_000` costs the same as `1..3`.

use std::fmt;

use smallvec::SmallVec;

use crate::IntVal;

/// One closed interval `lo..hi` with `lo <= hi`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IntRange {
    pub lo: IntVal,
    pub hi: IntVal,
}

impl IntRange {
    #[inline]
    pub fn new(lo: IntVal, hi: IntVal) -> Self {
        debug_assert!(lo <= hi, "empty interval {lo}..{hi}");
        IntRange { lo, hi }
    }

    /// Number of elements, widened so `MIN..MAX` does not overflow.
    #[inline]
    pub fn width(self) -> i128 {
        self.hi.wide() - self.lo.wide() + 1
    }
}

/// An immutable canonical interval set.
#[derive(Clone, Eq, PartialEq, Hash, Default)]
pub struct IntSetVal {
    ranges: SmallVec<[IntRange; 2]>,
}

impl IntSetVal {
    /// The empty set.
    pub fn empty() -> Self {
        IntSetVal::default()
    }

    /// `lo..hi`, empty when `lo > hi`.
    pub fn range(lo: IntVal, hi: IntVal) -> Self {
        let mut ranges = SmallVec::new();
        if lo <= hi {
            ranges.push(IntRange::new(lo, hi));
        }
        IntSetVal { ranges }
    }

    pub fn singleton(value: IntVal) -> Self {
        Self::range(value, value)
    }

    /// Build from arbitrary values: sorted, deduplicated and coalesced.
    pub fn from_values(values: impl IntoIterator<Item = IntVal>) -> Self {
        let mut values: SmallVec<[IntVal; 8]> = values.into_iter().collect();
        values.sort_unstable();
        let mut ranges = SmallVec::new();
        for v in values {
            push_coalesced(&mut ranges, IntRange { lo: v, hi: v });
        }
        IntSetVal { ranges }
    }

    /// Build from arbitrary `(lo, hi)` pairs; pairs with `lo > hi` are empty.
    pub fn from_ranges(pairs: impl IntoIterator<Item = (IntVal, IntVal)>) -> Self {
        let mut pairs: SmallVec<[IntRange; 4]> = pairs
            .into_iter()
            .filter(|(lo, hi)| lo <= hi)
            .map(|(lo, hi)| IntRange { lo, hi })
            .collect();
        pairs.sort_unstable_by_key(|r| r.lo);
        let mut ranges = SmallVec::new();
        for r in pairs {
            push_coalesced(&mut ranges, r);
        }
        IntSetVal { ranges }
    }

    #[inline]
    pub fn intervals(&self) -> &[IntRange] {
        &self.ranges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Exactly one interval.
    #[inline]
    pub fn is_range(&self) -> bool {
        self.ranges.len() == 1
    }

    #[inline]
    pub fn min(&self) -> Option<IntVal> {
        self.ranges.first().map(|r| r.lo)
    }

    #[inline]
    pub fn max(&self) -> Option<IntVal> {
        self.ranges.last().map(|r| r.hi)
    }

    /// Element count; `None` if it exceeds `i64::MAX`.
    pub fn size(&self) -> Option<IntVal> {
        IntVal::from_wide(self.ranges.iter().map(|r| r.width()).sum())
    }

    pub fn contains(&self, value: IntVal) -> bool {
        let idx = self.ranges.partition_point(|r| r.hi < value);
        self.ranges.get(idx).is_some_and(|r| r.lo <= value)
    }

    /// Merge-step union with adjacency coalescing.
    pub fn union(&self, other: &IntSetVal) -> IntSetVal {
        let (a, b) = (&self.ranges, &other.ranges);
        let mut ranges = SmallVec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() || j < b.len() {
            let take_a = match (a.get(i), b.get(j)) {
                (Some(x), Some(y)) => x.lo <= y.lo,
                (Some(_), None) => true,
                _ => false,
            };
            let next = if take_a {
                i += 1;
                a[i - 1]
            } else {
                j += 1;
                b[j - 1]
            };
            push_coalesced(&mut ranges, next);
        }
        IntSetVal { ranges }
    }

    pub fn intersect(&self, other: &IntSetVal) -> IntSetVal {
        let (a, b) = (&self.ranges, &other.ranges);
        let mut ranges = SmallVec::new();
        let (mut i, mut j) = (0, 0);
        while let (Some(x), Some(y)) = (a.get(i), b.get(j)) {
            let lo = x.lo.max(y.lo);
            let hi = x.hi.min(y.hi);
            if lo <= hi {
                push_coalesced(&mut ranges, IntRange { lo, hi });
            }
            if x.hi < y.hi {
                i += 1;
            } else {
                j += 1;
            }
        }
        IntSetVal { ranges }
    }

    /// Elements of `self` not in `other`.
    pub fn difference(&self, other: &IntSetVal) -> IntSetVal {
        let cuts = &other.ranges;
        let mut ranges = SmallVec::new();
        let mut j = 0;
        for r in &self.ranges {
            // Start of the part of `r` not yet covered; `None` once past `MAX`.
            let mut lo = Some(r.lo);
            while let (Some(cur), Some(cut)) = (lo, cuts.get(j)) {
                if cut.hi < cur {
                    j += 1;
                    continue;
                }
                if cut.lo > r.hi {
                    break;
                }
                if cut.lo > cur {
                    ranges.push(IntRange::new(cur, IntVal::new(cut.lo.raw() - 1)));
                }
                lo = cut.hi.checked_add(IntVal::ONE);
                if cut.hi > r.hi {
                    break;
                }
                j += 1;
            }
            if let Some(cur) = lo.filter(|&cur| cur <= r.hi) {
                ranges.push(IntRange::new(cur, r.hi));
            }
        }
        IntSetVal { ranges }
    }
}

/// Append `next` (whose `lo` is not below the last interval's `lo`),
/// coalescing when it overlaps or touches the last interval.
fn push_coalesced(ranges: &mut SmallVec<[IntRange; 2]>, next: IntRange) {
    if let Some(last) = ranges.last_mut() {
        if next.lo.wide() <= last.hi.wide() + 1 {
            last.hi = last.hi.max(next.hi);
            return;
        }
    }
    ranges.push(next);
}

impl fmt::Display for IntSetVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [only] = self.ranges.as_slice() {
            if only.lo != only.hi {
                return write!(f, "{}..{}", only.lo, only.hi);
            }
        }
        write!(f, "{{")?;
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if r.lo == r.hi {
                write!(f, "{}", r.lo)?;
            } else {
                write!(f, "{}..{}", r.lo, r.hi)?;
            }
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for IntSetVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntSetVal(")?;
        for r in &self.ranges {
            write!(f, "[{},{}]", r.lo, r.hi)?;
        }
        write!(f, ")")
    }
}
