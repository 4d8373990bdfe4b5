use std::fmt;

/// `SENTINEL` is the implicit last boundary appended to every tick list, so
/// that an unbounded overflow bucket always exists.
///
/// Measurements are `i64`, so the overflow bucket is reported as
/// `"<9223372036854775807"`.
pub const SENTINEL: i64 = i64::MAX;

/// An ordered list of bucket boundaries for one histogram dimension.
///
/// Bucket `i` holds every measurement `m` with `ticks[i-1] <= m < ticks[i]`,
/// matching its `"<tick"` report label; the first bucket is unbounded below.
/// The final boundary is always [SENTINEL].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ticks {
    boundaries: Vec<i64>,
}

impl Ticks {
    /// This function builds a tick list from explicit boundaries and appends
    /// the [SENTINEL].
    ///
    /// The boundaries must be strictly ascending and must not contain the
    /// sentinel itself.
    ///
    /// ```
    /// use react_histogram::Ticks;
    ///
    /// let ticks = Ticks::new(vec![10, 20]).unwrap();
    /// assert_eq!(ticks.len(), 3);
    /// assert!(Ticks::new(vec![20, 10]).is_err());
    /// ```
    pub fn new(mut boundaries: Vec<i64>) -> Result<Ticks, super::Error> {
        boundaries.push(SENTINEL);
        if let Some(index) = boundaries.windows(2).position(|w| w[0] >= w[1]) {
            return Err(super::Error::TicksOutOfOrder { index: index + 1 });
        }
        Ok(Ticks { boundaries })
    }
    /// Number of buckets, sentinel bucket included.
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }
    /// A tick list always holds at least the sentinel.
    pub fn is_empty(&self) -> bool {
        false
    }
    /// All boundaries, explicit ones followed by the sentinel.
    pub fn boundaries(&self) -> &[i64] {
        &self.boundaries
    }
    /// This function returns the index of the first boundary strictly greater
    /// than `measurement`.
    ///
    /// `i64::MAX` has no strictly greater boundary and lands in the sentinel
    /// bucket.
    pub fn bucket_of(&self, measurement: i64) -> usize {
        let position = self.boundaries.partition_point(|&tick| tick <= measurement);
        position.min(self.boundaries.len() - 1)
    }
    /// The report label of bucket `index`, e.g. `"<10"`.
    pub fn label(&self, index: usize) -> String {
        format!("<{}", self.boundaries[index])
    }
}

impl fmt::Display for Ticks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, tick) in self.boundaries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tick)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn sentinel_appended() {
        let ticks = Ticks::new(vec![10, 20]).unwrap();
        assert_eq!(ticks.boundaries(), &[10, 20, SENTINEL]);
        assert_eq!(ticks.len(), 3);
        let ticks = Ticks::new(vec![]).unwrap();
        assert_eq!(ticks.boundaries(), &[SENTINEL]);
    }

    #[test]
    fn upper_bound() {
        let ticks = Ticks::new(vec![10, 20]).unwrap();
        assert_eq!(ticks.bucket_of(i64::MIN), 0);
        assert_eq!(ticks.bucket_of(5), 0);
        assert_eq!(ticks.bucket_of(9), 0);
        assert_eq!(ticks.bucket_of(15), 1);
        assert_eq!(ticks.bucket_of(25), 2);
        assert_eq!(ticks.bucket_of(i64::MAX - 1), 2);
        assert_eq!(ticks.bucket_of(i64::MAX), 2);
    }

    #[test]
    fn tie_goes_to_next_bucket() {
        // a measurement equal to a boundary is not strictly below it
        let ticks = Ticks::new(vec![10, 20]).unwrap();
        assert_eq!(ticks.bucket_of(10), 1);
        assert_eq!(ticks.bucket_of(20), 2);
    }

    #[test]
    fn out_of_order() {
        match Ticks::new(vec![10, 30, 20]) {
            Err(Error::TicksOutOfOrder { index }) => assert_eq!(index, 2),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Ticks::new(vec![10, 10]).is_err());
        assert!(Ticks::new(vec![SENTINEL]).is_err());
    }

    #[test]
    fn labels() {
        let ticks = Ticks::new(vec![-5, 10]).unwrap();
        assert_eq!(ticks.label(0), "<-5");
        assert_eq!(ticks.label(1), "<10");
        assert_eq!(ticks.label(2), "<9223372036854775807");
        assert_eq!(ticks.to_string(), "[-5, 10, 9223372036854775807]");
    }
}
