/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Largest `usize` converted without rounding.
const MAX_SAFE_USIZE: usize = 9_007_199_254_740_991;

/// Converts a `usize` to `f64`, saturating at [`MAX_SAFE_INTEGER`].
///
/// Sample counts and indices are far below the limit in practice; the
/// saturation only keeps the conversion lossless in principle.
///
/// ## Example
/// ```
/// use graphite::util::num::usize_to_f64;
///
/// assert_eq!(usize_to_f64(1000), 1000.0);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn usize_to_f64(value: usize) -> f64 {
    if value > MAX_SAFE_USIZE { MAX_SAFE_INTEGER } else { value as f64 }
}

/// Returns `n` evenly spaced values from `low` to `high`, both included.
///
/// The last value is exactly `high`. With `n == 1` the single value is `low`;
/// with `n == 0` the grid is empty.
///
/// ## Example
/// ```
/// use graphite::util::num::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
/// ```
#[must_use]
pub fn linspace(low: f64, high: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let step = (high - low) / usize_to_f64(n - 1);
            (0..n).map(|i| {
                      if i == n - 1 { high } else { usize_to_f64(i).mul_add(step, low) }
                  })
                  .collect()
        },
    }
}

/// Midpoints between consecutive values of `grid`.
///
/// ## Example
/// ```
/// use graphite::util::num::midpoints;
///
/// assert_eq!(midpoints(&[0.0, 1.0, 3.0]), vec![0.5, 2.0]);
/// ```
#[must_use]
pub fn midpoints(grid: &[f64]) -> Vec<f64> {
    grid.windows(2)
        .map(|w| f64::midpoint(w[0], w[1]))
        .collect()
}
