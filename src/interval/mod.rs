//! Half-open genomic interval algebra
//!
//! Intervals are `[start, end)` pairs on a single contig. The helpers here
//! keep background probes from overlapping events and from leaving gaps.

/// Half-open interval `[start, end)` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn new(start: i64, end: i64) -> Self {
        debug_assert!(start <= end, "interval start {start} > end {end}");
        Self { start, end }
    }

    /// Interval covering two coordinates given in either order.
    pub fn spanning(a: i64, b: i64) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, pos: i64) -> bool {
        self.start <= pos && pos < self.end
    }
}

impl From<(i64, i64)> for Interval {
    fn from((start, end): (i64, i64)) -> Self {
        Self::new(start, end)
    }
}

/// Sweep event kind. Starts sort before stops at the same position, so
/// touching intervals `[a, b)` and `[b, c)` merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Start,
    Stop,
}

/// Merge overlapping or touching intervals.
///
/// Returns the minimal sorted set of disjoint intervals covering the same
/// positions as the input.
pub fn merge_intervals<I>(intervals: I) -> Vec<Interval>
where
    I: IntoIterator<Item = Interval>,
{
    let mut events: Vec<(i64, Boundary)> = Vec::new();
    for interval in intervals {
        events.push((interval.start, Boundary::Start));
        events.push((interval.end, Boundary::Stop));
    }
    events.sort_unstable();

    let mut merged = Vec::new();
    let mut active = 0i64;
    let mut run_start = 0;
    for (pos, boundary) in events {
        match boundary {
            Boundary::Start => {
                if active == 0 {
                    run_start = pos;
                }
                active += 1;
            }
            Boundary::Stop => {
                active -= 1;
                if active == 0 {
                    merged.push(Interval::spanning(run_start, pos));
                }
            }
        }
    }
    merged
}

/// Gaps between `intervals` within `[0, total_length)`.
///
/// `intervals` must already be sorted and disjoint (e.g. the output of
/// [`merge_intervals`]). Parts of `intervals` beyond `total_length` leave no
/// gap.
pub fn complement_intervals(intervals: &[Interval], total_length: i64) -> Vec<Interval> {
    let mut gaps = Vec::with_capacity(intervals.len() + 1);
    let mut prev_end = 0;
    for interval in intervals {
        let start = interval.start.min(total_length);
        if prev_end < start {
            gaps.push(Interval::new(prev_end, start));
        }
        prev_end = prev_end.max(interval.end);
    }
    if prev_end < total_length {
        gaps.push(Interval::new(prev_end, total_length));
    }
    gaps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(pairs: &[(i64, i64)]) -> Vec<Interval> {
        pairs.iter().copied().map(Interval::from).collect()
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_intervals(Vec::new()).is_empty());
    }

    #[test]
    fn test_merge_overlapping() {
        let merged = merge_intervals(iv(&[(5, 10), (1, 3), (8, 12), (2, 4)]));
        assert_eq!(merged, iv(&[(1, 4), (5, 12)]));
    }

    #[test]
    fn test_merge_touching() {
        let merged = merge_intervals(iv(&[(0, 10), (10, 20)]));
        assert_eq!(merged, iv(&[(0, 20)]));
    }

    #[test]
    fn test_merge_nested() {
        let merged = merge_intervals(iv(&[(0, 100), (10, 20), (30, 40)]));
        assert_eq!(merged, iv(&[(0, 100)]));
    }

    #[test]
    fn test_merge_idempotent() {
        let input = iv(&[(50, 60), (0, 5), (3, 9), (20, 30), (30, 31), (55, 70)]);
        let once = merge_intervals(input);
        let twice = merge_intervals(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merge_identity_on_disjoint_sorted() {
        let input = iv(&[(0, 1), (3, 4), (18, 20)]);
        assert_eq!(merge_intervals(input.clone()), input);
    }

    #[test]
    fn test_complement() {
        let gaps = complement_intervals(&iv(&[(0, 1), (3, 4), (18, 20)]), 20);
        assert_eq!(gaps, iv(&[(1, 3), (4, 18)]));
    }

    #[test]
    fn test_complement_leading_and_trailing() {
        let gaps = complement_intervals(&iv(&[(5, 10)]), 20);
        assert_eq!(gaps, iv(&[(0, 5), (10, 20)]));
    }

    #[test]
    fn test_complement_of_nothing_is_everything() {
        assert_eq!(complement_intervals(&[], 100), iv(&[(0, 100)]));
    }

    #[test]
    fn test_complement_covers_exactly() {
        let input = iv(&[(70, 90), (10, 25), (20, 30), (95, 100)]);
        let merged = merge_intervals(input.clone());
        let gaps = complement_intervals(&merged, 100);

        // Gaps do not overlap the merged set
        for gap in &gaps {
            for m in &merged {
                assert!(gap.end <= m.start || m.end <= gap.start);
            }
        }

        // Together they cover [0, 100)
        let mut all = input;
        all.extend(gaps);
        assert_eq!(merge_intervals(all), iv(&[(0, 100)]));
    }

    #[test]
    fn test_complement_clips_to_total_length() {
        let gaps = complement_intervals(&iv(&[(40, 120)]), 100);
        assert_eq!(gaps, iv(&[(0, 40)]));

        let gaps = complement_intervals(&iv(&[(10, 20), (150, 200)]), 100);
        assert_eq!(gaps, iv(&[(0, 10), (20, 100)]));
    }

    #[test]
    fn test_merge_tolerates_reversed_interval() {
        let reversed = Interval { start: 30, end: 25 };
        let merged = merge_intervals(vec![Interval::new(0, 10), reversed, Interval::new(40, 50)]);
        assert_eq!(merged, iv(&[(0, 10), (40, 50)]));
    }
}
