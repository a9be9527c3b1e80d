use crate::plot::curve::Point;

/// Splits sampled points into connected segments.
///
/// A segment ends:
/// - at every point with a non-finite coordinate, which is dropped, and
/// - between two finite neighbours whose `values` have opposite signs when
///   the value sampled halfway between them is non-finite or lies outside
///   the interval the two span. That is the signature of a pole stepped over
///   by the grid, as in `1/x` or `tan(x)`.
///
/// # Parameters
/// - `points`: The sampled points, in order.
/// - `values`: The sampled function value behind each point (`y` for explicit
///   plots, `r` for polar ones).
/// - `halfway`: Function values at the midpoints of the sample grid, one
///   fewer than `points`. Pass an empty slice to skip pole detection.
///
/// # Example
/// ```
/// use graphite::plot::sampling::split_segments;
///
/// // 1/x sampled at -1, 1 with the midpoint 0 blowing up.
/// let points = [(-1.0, -1.0), (1.0, 1.0)];
/// let segments = split_segments(&points, &[-1.0, 1.0], &[f64::INFINITY]);
/// assert_eq!(segments.len(), 2);
///
/// // x sampled at the same points stays in one piece.
/// let segments = split_segments(&points, &[-1.0, 1.0], &[0.0]);
/// assert_eq!(segments.len(), 1);
/// ```
#[must_use]
pub fn split_segments(points: &[Point], values: &[f64], halfway: &[f64]) -> Vec<Vec<Point>> {
    let mut segments = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for (i, &(x, y)) in points.iter().enumerate() {
        if !x.is_finite() || !y.is_finite() {
            flush(&mut segments, &mut current);
            continue;
        }
        if i > 0 && !current.is_empty() && crosses_pole(values, halfway, i - 1) {
            flush(&mut segments, &mut current);
        }
        current.push((x, y));
    }
    flush(&mut segments, &mut current);

    segments
}

/// Decides whether a pole lies between sample `i` and sample `i + 1`.
fn crosses_pole(values: &[f64], halfway: &[f64], i: usize) -> bool {
    let (Some(&a), Some(&b), Some(&m)) = (values.get(i), values.get(i + 1), halfway.get(i)) else {
        return false;
    };
    if a * b >= 0.0 {
        return false;
    }
    !m.is_finite() || m < a.min(b) || m > a.max(b)
}

fn flush(segments: &mut Vec<Vec<Point>>, current: &mut Vec<Point>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_and_are_dropped() {
        let points = [(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0), (3.0, 4.0)];
        let segments = split_segments(&points, &[1.0, f64::NAN, 3.0, 4.0], &[]);
        assert_eq!(segments, vec![vec![(0.0, 1.0)], vec![(2.0, 3.0), (3.0, 4.0)]]);
    }

    #[test]
    fn all_gaps_yield_no_segments() {
        let points = [(0.0, f64::NAN), (1.0, f64::INFINITY)];
        assert!(split_segments(&points, &[f64::NAN, f64::INFINITY], &[]).is_empty());
    }

    #[test]
    fn pole_with_finite_overshooting_midpoint_splits() {
        // tan(x) around pi/2: large positive, then large negative, midpoint huge.
        let points = [(1.5, 14.1), (1.64, -14.5)];
        let segments = split_segments(&points, &[14.1, -14.5], &[-1.0e6]);
        assert_eq!(segments.len(), 2);
    }
}
