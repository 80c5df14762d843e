#![forbid(unsafe_code)]

//! Position search over cumulative height sequences.
//!
//! The lookup primitive both range engines use to translate a scroll
//! offset into an item index. Its boundary behavior is load-bearing:
//! strictly greater than the target, clamped to the last index when the
//! target is at or past the end.

use vscroll_core::HeightRecord;

/// First index whose key is strictly greater than `target`.
///
/// Keys must be non-decreasing in index order. When no key exceeds
/// `target` the last valid index is returned; `None` only for an empty
/// slice. O(log n).
///
/// # Example
/// ```
/// use vscroll_engine::first_index_above;
///
/// let ends = [20.0, 50.0, 60.0, 100.0, 125.0];
/// assert_eq!(first_index_above(&ends, 20.0, |v| *v), Some(1));
/// assert_eq!(first_index_above(&ends, 1000.0, |v| *v), Some(4));
/// assert_eq!(first_index_above(&[] as &[f64], 0.0, |v| *v), None);
/// ```
pub fn first_index_above<T, K>(items: &[T], target: f64, key: K) -> Option<usize>
where
    K: Fn(&T) -> f64,
{
    if items.is_empty() {
        return None;
    }

    let mut left = 0usize;
    let mut right = items.len();
    while left < right {
        let mid = (left + right) / 2;
        if key(&items[mid]) <= target {
            left = mid + 1;
        } else {
            right = mid;
        }
    }

    Some(if left < items.len() { left } else { items.len() - 1 })
}

/// First record whose `cumulative_height` is strictly greater than
/// `target`, i.e. the item whose span covers a scroll offset.
pub fn first_cumulative_above(records: &[HeightRecord], target: f64) -> Option<usize> {
    first_index_above(records, target, |record| record.cumulative_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(ends: &[f64]) -> Vec<HeightRecord> {
        let mut previous = 0.0;
        ends.iter()
            .map(|&end| {
                let record = HeightRecord::new(end - previous, end);
                previous = end;
                record
            })
            .collect()
    }

    #[test]
    fn finds_first_strictly_greater() {
        let seq = records(&[20.0, 50.0, 60.0, 100.0, 125.0]);
        assert_eq!(first_cumulative_above(&seq, 20.0), Some(1));
        assert_eq!(first_cumulative_above(&seq, 19.9), Some(0));
        assert_eq!(first_cumulative_above(&seq, 60.0), Some(3));
        assert_eq!(first_cumulative_above(&seq, 99.0), Some(3));
    }

    #[test]
    fn clamps_to_last_index_when_target_is_past_the_end() {
        let seq = records(&[20.0, 50.0, 60.0, 100.0, 125.0]);
        assert_eq!(first_cumulative_above(&seq, 125.0), Some(4));
        assert_eq!(first_cumulative_above(&seq, 1000.0), Some(4));
    }

    #[test]
    fn targets_below_the_first_record_map_to_zero() {
        let seq = records(&[20.0, 50.0]);
        assert_eq!(first_cumulative_above(&seq, 0.0), Some(0));
        assert_eq!(first_cumulative_above(&seq, -5.0), Some(0));
    }

    #[test]
    fn empty_sequence_has_no_index() {
        assert_eq!(first_cumulative_above(&[], 0.0), None);
    }

    #[test]
    fn single_record() {
        let seq = records(&[40.0]);
        assert_eq!(first_cumulative_above(&seq, 0.0), Some(0));
        assert_eq!(first_cumulative_above(&seq, 39.9), Some(0));
        assert_eq!(first_cumulative_above(&seq, 40.0), Some(0));
    }

    #[test]
    fn repeated_keys_resolve_to_the_first_above() {
        // Zero-height items share a cumulative value; the search lands
        // past the whole run.
        let seq = records(&[20.0, 20.0, 20.0, 45.0]);
        assert_eq!(first_cumulative_above(&seq, 10.0), Some(0));
        assert_eq!(first_cumulative_above(&seq, 20.0), Some(3));
    }

    #[test]
    fn generic_over_the_key() {
        let values = [(0, 1.5), (1, 3.0), (2, 9.0)];
        assert_eq!(first_index_above(&values, 2.0, |v| v.1), Some(1));
    }
}
