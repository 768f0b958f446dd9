//! Types for use as [crate::Read::Cfg].

use core::ops::{
    Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive,
};

/// Bounds the number of items accepted when decoding a length-prefixed value
/// (a sequence, dictionary, or string).
///
/// The default accepts any length. Callers decoding untrusted input should supply a bound.
///
/// # Examples
///
/// ```
/// use commonware_scale::RangeCfg;
///
/// let cfg = RangeCfg::from(..=1024);
/// assert!(cfg.contains(1024));
/// assert!(!cfg.contains(1025));
///
/// assert!(RangeCfg::default().contains(usize::MAX));
/// assert!(!RangeCfg::exact(3).contains(2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeCfg {
    start: Bound<usize>,
    end: Bound<usize>,
}

impl RangeCfg {
    /// Creates a new `RangeCfg` from any range of lengths.
    pub fn new(r: impl RangeBounds<usize>) -> Self {
        Self {
            start: r.start_bound().cloned(),
            end: r.end_bound().cloned(),
        }
    }

    /// Creates a `RangeCfg` that only accepts exactly `len`.
    pub fn exact(len: usize) -> Self {
        Self::new(len..=len)
    }

    /// Returns true if `len` is within this range.
    pub fn contains(&self, len: usize) -> bool {
        (self.start, self.end).contains(&len)
    }
}

impl Default for RangeCfg {
    fn default() -> Self {
        Self::new(..)
    }
}

impl RangeBounds<usize> for RangeCfg {
    fn start_bound(&self) -> Bound<&usize> {
        self.start.as_ref()
    }

    fn end_bound(&self) -> Bound<&usize> {
        self.end.as_ref()
    }
}

macro_rules! impl_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for RangeCfg {
                fn from(r: $range) -> Self {
                    Self::new(r)
                }
            }
        )*
    };
}
impl_from_range!(
    Range<usize>,
    RangeInclusive<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeFull
);
