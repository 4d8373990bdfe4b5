use super::Histogram;

/// One slot of a [Histogram] dimension.
///
/// The innermost dimension holds `Leaf` counters, every other dimension holds
/// a `Nested` histogram over the remaining dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    Leaf(u64),
    Nested(Histogram),
}

impl Bucket {
    /// This function records the remaining `measurements` in this bucket.
    ///
    /// A leaf expects no measurements left; a nested bucket forwards them.
    /// The leaf counter saturates at `u64::MAX` instead of wrapping.
    pub(crate) fn record(&mut self, measurements: &[i64]) {
        match self {
            Bucket::Leaf(frequency) => {
                assert!(measurements.is_empty(), "{} measurements past the last dimension", measurements.len());
                *frequency = frequency.saturating_add(1);
            },
            Bucket::Nested(histogram) => histogram.record(measurements),
        }
    }
    pub(crate) fn read(&self, coordinate: &[usize]) -> u64 {
        match self {
            Bucket::Leaf(frequency) => {
                assert!(coordinate.is_empty(), "coordinate longer than the histogram dimensionality");
                *frequency
            },
            Bucket::Nested(histogram) => histogram.read(coordinate),
        }
    }
    /// Total samples held by this bucket, across every nested dimension.
    pub fn count(&self) -> u128 {
        match self {
            Bucket::Leaf(frequency) => *frequency as u128,
            Bucket::Nested(histogram) => histogram.count(),
        }
    }
    pub(crate) fn clear(&mut self) {
        match self {
            Bucket::Leaf(frequency) => *frequency = 0,
            Bucket::Nested(histogram) => histogram.clear(),
        }
    }
    /// Both buckets must already have the same shape.
    pub(crate) fn accumulate(&mut self, other: &Bucket) {
        match (self, other) {
            (Bucket::Leaf(mine), Bucket::Leaf(theirs)) => *mine = mine.saturating_add(*theirs),
            (Bucket::Nested(mine), Bucket::Nested(theirs)) => mine.accumulate_unchecked(theirs),
            _ => unreachable!("bucket shapes checked by Histogram::accumulate"),
        }
    }
}
