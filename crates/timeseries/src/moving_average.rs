//! Trailing moving averages.

/// Trailing mean over a fixed window, aligned to the input.
///
/// The first `window - 1` positions have no complete window and are `None`,
/// never zero. A zero would read as a real revenue level downstream.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, value) in values.iter().enumerate() {
        sum += value;
        if i + 1 > window {
            sum -= values[i - window];
        }
        if i + 1 >= window {
            out.push(Some(sum / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}
