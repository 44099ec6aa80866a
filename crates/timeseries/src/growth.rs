//! Period-over-period growth rates.

/// Percent change from the immediately preceding value.
///
/// The first position is `None` (nothing to compare against). A zero
/// previous value is also `None`: the ratio is undefined and must not
/// surface as an arithmetic fault or an infinity.
pub fn growth_rates(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let previous = values[i - 1];
        if previous == 0.0 {
            out.push(None);
        } else {
            out.push(Some((value - previous) / previous * 100.0));
        }
    }
    out
}
