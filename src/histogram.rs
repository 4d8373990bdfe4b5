use super::bucket::Bucket;
use super::ticks::Ticks;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A frequency histogram over one or more integer dimensions.
///
/// The outermost dimension partitions the number line by its [Ticks]; each of
/// its buckets is either a leaf counter (one-dimensional histogram) or a
/// nested [Histogram] over the remaining dimensions.  The dimensionality and
/// every tick list are fixed at construction.
pub struct Histogram {
    ticks: Ticks,
    buckets: Vec<Bucket>,
}

impl Histogram {
    /// This function creates an empty histogram with one tick list per
    /// dimension, outermost dimension first.
    ///
    /// ```
    /// use react_histogram::Histogram;
    ///
    /// let mut h = Histogram::new(vec![vec![10, 20], vec![100]]).unwrap();
    /// h.update(&[15, 250]);
    /// assert_eq!(h.read(&[1, 1]), 1);
    /// ```
    pub fn new(dimensions: Vec<Vec<i64>>) -> Result<Histogram, super::Error> {
        let ticks = dimensions.into_iter()
            .map(Ticks::new)
            .collect::<Result<Vec<Ticks>, super::Error>>()?;
        Histogram::from_ticks(ticks)
    }
    /// This function creates an empty histogram from already validated
    /// [Ticks], outermost dimension first.
    pub fn from_ticks(mut dimensions: Vec<Ticks>) -> Result<Histogram, super::Error> {
        let mut inner: Option<Histogram> = None;
        while let Some(ticks) = dimensions.pop() {
            let prototype = match inner.take() {
                None => Bucket::Leaf(0),
                Some(histogram) => Bucket::Nested(histogram),
            };
            inner = Some(Histogram { buckets: vec![prototype; ticks.len()], ticks });
        }
        inner.ok_or(super::Error::NoDimensions)
    }
    /// The number of dimensions, i.e. measurements expected per update.
    pub fn dimensions(&self) -> usize {
        match &self.buckets[0] {
            Bucket::Leaf(_) => 1,
            Bucket::Nested(histogram) => 1 + histogram.dimensions(),
        }
    }
    /// The tick list of the outermost dimension.
    pub fn ticks(&self) -> &Ticks {
        &self.ticks
    }
    /// The tick lists of every dimension, outermost first.
    pub fn layout(&self) -> Vec<&Ticks> {
        let mut layout = vec![&self.ticks];
        let mut bucket = &self.buckets[0];
        while let Bucket::Nested(histogram) = bucket {
            layout.push(&histogram.ticks);
            bucket = &histogram.buckets[0];
        }
        layout
    }
    /// The buckets of the outermost dimension, in tick order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }
    /// This function records one sample, given one measurement per dimension.
    ///
    /// The sample lands in the bucket of the first boundary strictly greater
    /// than the measurement, in every dimension.
    ///
    /// # Panics
    ///
    /// Panics if `measurements.len()` differs from [Histogram::dimensions].
    pub fn update(&mut self, measurements: &[i64]) {
        assert_eq!(measurements.len(), self.dimensions(), "one measurement per dimension is required");
        self.record(measurements);
    }
    /// Length already checked by [Histogram::update].
    pub(crate) fn record(&mut self, measurements: &[i64]) {
        let position = self.ticks.bucket_of(measurements[0]);
        self.buckets[position].record(&measurements[1..]);
    }
    /// This function returns the sample count at a bucket coordinate, one
    /// bucket index per dimension.
    ///
    /// A coordinate shorter than the dimensionality reads as 0.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is longer than the dimensionality or an
    /// index is out of its dimension's bucket range.
    pub fn read(&self, coordinate: &[usize]) -> u64 {
        match coordinate.split_first() {
            None => 0,
            Some((index, rest)) => self.buckets[*index].read(rest),
        }
    }
    /// This function will return the total number of samples in all leaf
    /// buckets.
    pub fn count(&self) -> u128 {
        self.buckets.iter().map(Bucket::count).sum()
    }
    /// This function will empty the histogram of all recorded samples.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Bucket::clear);
    }
    /// This function will accumulate a [Histogram] onto the caller.
    ///
    /// Both histograms must share the same tick lists in every dimension.
    /// Counts saturate a `u64` instead of wrapping.
    pub fn accumulate(&mut self, other: &Self) -> Result<(), super::Error> {
        if self.layout() != other.layout() {
            return Err(super::Error::IncompatibleTicks);
        }
        self.accumulate_unchecked(other);
        Ok(())
    }
    pub(crate) fn accumulate_unchecked(&mut self, other: &Self) {
        self.buckets.iter_mut()
            .zip(other.buckets.iter())
            .for_each(|(mine, theirs)| mine.accumulate(theirs));
    }
}
