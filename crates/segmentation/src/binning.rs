//! Score binning for RFM metrics.
//!
//! Two boundary sources feed one bracket-assignment routine: equal-frequency
//! quintiles when the distribution supports them, fixed p20/p40/p60/p80
//! percentiles otherwise. The choice is a pre-checked branch on distinct
//! values, not a catch-and-retry.

/// Linear-interpolated percentile, `p` in `[0, 100]`.
///
/// `sorted` must be ascending and non-empty.
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let weight = rank - lo as f64;
        sorted[lo] * (1.0 - weight) + sorted[hi] * weight
    }
}

/// Interior boundaries for five equal-frequency buckets.
///
/// `None` when the values cannot support five buckets: fewer than five
/// distinct values, or collapsed quintile edges. Callers then use
/// [`percentile_boundaries`] instead.
pub fn quintile_boundaries(values: &[f64]) -> Option<[f64; 4]> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite metric values"));

    let mut distinct = 0usize;
    for (i, v) in sorted.iter().enumerate() {
        if i == 0 || *v != sorted[i - 1] {
            distinct += 1;
        }
    }
    if distinct < 5 {
        return None;
    }

    let boundaries = [
        percentile(&sorted, 20.0),
        percentile(&sorted, 40.0),
        percentile(&sorted, 60.0),
        percentile(&sorted, 80.0),
    ];
    if boundaries.windows(2).all(|w| w[0] < w[1]) {
        Some(boundaries)
    } else {
        None
    }
}

/// Fixed p20/p40/p60/p80 boundaries.
///
/// Duplicated boundaries are allowed: they collapse buckets during bracket
/// assignment instead of raising. The top bracket is open-ended.
pub fn percentile_boundaries(values: &[f64]) -> [f64; 4] {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite metric values"));
    [
        percentile(&sorted, 20.0),
        percentile(&sorted, 40.0),
        percentile(&sorted, 60.0),
        percentile(&sorted, 80.0),
    ]
}

/// Assign a 1–5 score by bracket.
///
/// `labels[0]` is the score of the lowest bracket (`value <= boundaries[0]`,
/// inclusive lowest); `labels[4]` the open-ended top bracket. With repeated
/// boundaries the first matching bracket wins, so ties never panic and every
/// value gets a defined score.
pub fn score_by_brackets(value: f64, boundaries: &[f64; 4], labels: &[u8; 5]) -> u8 {
    for (boundary, label) in boundaries.iter().zip(labels.iter()) {
        if value <= *boundary {
            return *label;
        }
    }
    labels[4]
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASC: [u8; 5] = [1, 2, 3, 4, 5];
    const DESC: [u8; 5] = [5, 4, 3, 2, 1];

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 50.0), 30.0);
        assert_eq!(percentile(&sorted, 100.0), 50.0);
        assert!((percentile(&sorted, 25.0) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_quintiles_on_spread_data() {
        let values: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let boundaries = quintile_boundaries(&values).unwrap();
        assert!(boundaries[0] < boundaries[1]);
        assert!((boundaries[0] - 20.8).abs() < 0.01);
    }

    #[test]
    fn test_quintiles_reject_few_distinct_values() {
        assert!(quintile_boundaries(&[1.0, 1.0, 2.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn test_quintiles_reject_collapsed_edges() {
        // Five distinct values but mass concentrated at zero
        let mut values = vec![0.0; 96];
        values.extend([1.0, 2.0, 3.0, 4.0]);
        assert!(quintile_boundaries(&values).is_none());
    }

    #[test]
    fn test_brackets_ascending() {
        let boundaries = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(score_by_brackets(5.0, &boundaries, &ASC), 1);
        assert_eq!(score_by_brackets(10.0, &boundaries, &ASC), 1);
        assert_eq!(score_by_brackets(10.1, &boundaries, &ASC), 2);
        assert_eq!(score_by_brackets(40.1, &boundaries, &ASC), 5);
    }

    #[test]
    fn test_brackets_reversed_labels() {
        let boundaries = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(score_by_brackets(5.0, &boundaries, &DESC), 5);
        assert_eq!(score_by_brackets(50.0, &boundaries, &DESC), 1);
    }

    #[test]
    fn test_tied_boundaries_collapse_to_first_bracket() {
        let boundaries = [7.0, 7.0, 7.0, 7.0];
        assert_eq!(score_by_brackets(7.0, &boundaries, &DESC), 5);
        assert_eq!(score_by_brackets(8.0, &boundaries, &DESC), 1);
    }

    #[test]
    fn test_single_value_population() {
        let boundaries = percentile_boundaries(&[42.0]);
        assert_eq!(boundaries, [42.0, 42.0, 42.0, 42.0]);
        assert_eq!(score_by_brackets(42.0, &boundaries, &ASC), 1);
    }
}
