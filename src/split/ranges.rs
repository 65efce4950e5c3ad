// Half-open position ranges and the small algebra the split finders need.

/// A half-open `[start, end)` range over sequence positions (or signal
/// samples, depending on context).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosRange {
    pub start: usize,
    pub end: usize,
}

impl PosRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Retain the ranges satisfying `pred`, preserving input order.
pub fn filter_ranges(ranges: &[PosRange], mut pred: impl FnMut(PosRange) -> bool) -> Vec<PosRange> {
    ranges.iter().copied().filter(|&r| pred(r)).collect()
}

/// Merge consecutive ranges separated by at most `merge_dist`.
///
/// Input must be sorted by `start`; the result is sorted, non-overlapping,
/// and neighbors are more than `merge_dist` apart.
pub fn merge_ranges(ranges: &[PosRange], merge_dist: usize) -> Vec<PosRange> {
    let mut merged: Vec<PosRange> = Vec::with_capacity(ranges.len());
    for &r in ranges {
        debug_assert!(merged.last().map_or(true, |last| r.start >= last.start));
        match merged.last_mut() {
            Some(last) if r.start <= last.end + merge_dist => last.end = r.end,
            _ => merged.push(r),
        }
    }
    merged
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
