use std::ops::RangeInclusive;

use crate::source::RunHeader;

/// A requested set of scans, before it is matched against any instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanRange {
    /// Every scan the instrument recorded
    #[default]
    Full,
    Single(i32),
    /// An inclusive range, clipped to the instrument's scans when resolved
    Between(i32, i32),
}

/// The first and last scan number an instrument recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentBounds {
    pub first: i32,
    pub last: i32,
}

impl InstrumentBounds {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }
}

impl From<&RunHeader> for InstrumentBounds {
    fn from(value: &RunHeader) -> Self {
        Self::new(value.first_spectrum, value.last_spectrum)
    }
}

/// The concrete, inclusive scan numbers to visit on one instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub lo: i32,
    pub hi: i32,
}

impl ResolvedRange {
    pub fn scans(&self) -> RangeInclusive<i32> {
        self.lo..=self.hi
    }

    /// A range clipped past the instrument's scans has `lo > hi`
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }
}

impl ScanRange {
    /// Match the request against one instrument's bounds.
    ///
    /// A single scan is taken as-is even if it falls outside `bounds`.
    pub fn resolve(&self, bounds: InstrumentBounds) -> ResolvedRange {
        match *self {
            Self::Full => ResolvedRange {
                lo: bounds.first,
                hi: bounds.last,
            },
            Self::Single(scan) => ResolvedRange { lo: scan, hi: scan },
            Self::Between(lo, hi) => ResolvedRange {
                lo: lo.max(bounds.first),
                hi: hi.min(bounds.last),
            },
        }
    }
}
