//! Breakpoint interval location for piecewise polynomials.
//!
//! For every query point the locator finds the index of the breakpoint
//! interval containing it. Intervals are half-open `[x[i], x[i+1])`,
//! except the last one which is closed on both ends. Breakpoints may be
//! sorted in either increasing or decreasing order; the direction is
//! detected once per batch and both directions share a single search
//! routine through the order-aware comparisons of [`BreakpointOrder`].

use rayon::prelude::*;

/// Sentinel index meaning "no valid interval": the query was NaN, or lay
/// outside the breakpoint span with extrapolation disabled.
pub const NO_INTERVAL: i64 = -1;

/// Sort direction of a breakpoint array, detected from its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointOrder {
    Ascending,
    Descending,
}

impl BreakpointOrder {
    /// Detect the direction from the first and last breakpoints.
    pub fn of(x: &[f64]) -> Self {
        if x[x.len() - 1] >= x[0] {
            BreakpointOrder::Ascending
        } else {
            BreakpointOrder::Descending
        }
    }

    /// `p` lies strictly before `q` along the sort direction.
    #[inline]
    pub fn before(self, p: f64, q: f64) -> bool {
        match self {
            BreakpointOrder::Ascending => p < q,
            BreakpointOrder::Descending => p > q,
        }
    }

    /// `p` lies at or after `q` along the sort direction.
    #[inline]
    pub fn at_or_after(self, p: f64, q: f64) -> bool {
        match self {
            BreakpointOrder::Ascending => p >= q,
            BreakpointOrder::Descending => p <= q,
        }
    }
}

/// Find the interval index for a single query point.
///
/// # Parameters
/// - `x`: breakpoints, shape (m+1,), monotonic in the direction of `order`
/// - `xp`: query point, NaN allowed
/// - `extrapolate`: whether out-of-span points clamp to the boundary
///   intervals instead of returning [`NO_INTERVAL`]
/// - `order`: sort direction, computed once per batch with
///   [`BreakpointOrder::of`]
///
/// # Returns
/// Index in `[0, m-1]`, or [`NO_INTERVAL`].
pub fn find_breakpoint_position(
    x: &[f64],
    xp: f64,
    extrapolate: bool,
    order: BreakpointOrder,
) -> i64 {
    let last = x.len() - 1;

    if xp.is_nan() {
        return NO_INTERVAL;
    }

    let a = x[0];
    let b = x[last];

    if order.before(xp, a) || order.before(b, xp) {
        if !extrapolate {
            return NO_INTERVAL;
        } else if order.before(xp, a) {
            return 0;
        } else {
            return (last - 1) as i64;
        }
    }
    // The generic half-open search below would put the final breakpoint one
    // interval short; the last interval is closed on the right.
    if xp == b {
        return (last - 1) as i64;
    }

    let mut left = 0;
    let mut right = last - 1;

    // Fast path for points in the first interval.
    if order.before(xp, x[left + 1]) {
        right = left;
    }

    while left < right {
        let mid = (left + right) / 2;
        if order.before(xp, x[mid]) {
            right = mid;
        } else if order.at_or_after(xp, x[mid + 1]) {
            left = mid + 1;
        } else {
            // x[mid] <= xp < x[mid+1] along the sort direction
            left = mid;
            break;
        }
    }

    left as i64
}

/// Find interval indices for a whole batch of query points.
///
/// Each point is independent of the others, so the search runs in parallel
/// over the batch. No error is raised: NaN and out-of-span points map to
/// [`NO_INTERVAL`] per the rules of [`find_breakpoint_position`].
pub fn locate_intervals(
    x: &[f64],
    xp: &[f64],
    extrapolate: bool,
    order: BreakpointOrder,
) -> Vec<i64> {
    xp.par_iter()
        .map(|&xval| find_breakpoint_position(x, xval, extrapolate, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_detection() {
        assert_eq!(BreakpointOrder::of(&[0.0, 1.0, 2.0]), BreakpointOrder::Ascending);
        assert_eq!(BreakpointOrder::of(&[2.0, 1.0, 0.0]), BreakpointOrder::Descending);
        // two equal endpoints count as ascending
        assert_eq!(BreakpointOrder::of(&[1.0, 1.0]), BreakpointOrder::Ascending);
    }

    #[test]
    fn test_ascending_interior_points() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, 0.5, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 1.5, true, order), 1);
        assert_eq!(find_breakpoint_position(&x, 2.5, true, order), 2);
    }

    #[test]
    fn test_ascending_left_closed_at_breakpoints() {
        // a query equal to an inner breakpoint belongs to the interval
        // starting there
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, 0.0, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 1.0, true, order), 1);
        assert_eq!(find_breakpoint_position(&x, 2.0, true, order), 2);
    }

    #[test]
    fn test_final_breakpoint_closes_last_interval() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, 3.0, true, order), 2);
        assert_eq!(find_breakpoint_position(&x, 3.0, false, order), 2);
    }

    #[test]
    fn test_ascending_out_of_span() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, -0.5, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 3.5, true, order), 2);
        assert_eq!(find_breakpoint_position(&x, -0.5, false, order), NO_INTERVAL);
        assert_eq!(find_breakpoint_position(&x, 3.5, false, order), NO_INTERVAL);
    }

    #[test]
    fn test_nan_always_sentinel() {
        let x = vec![0.0, 1.0, 2.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, f64::NAN, true, order), NO_INTERVAL);
        assert_eq!(find_breakpoint_position(&x, f64::NAN, false, order), NO_INTERVAL);
    }

    #[test]
    fn test_descending_interior_points() {
        let x = vec![3.0, 2.0, 1.0, 0.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(order, BreakpointOrder::Descending);
        assert_eq!(find_breakpoint_position(&x, 2.5, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 1.5, true, order), 1);
        assert_eq!(find_breakpoint_position(&x, 0.5, true, order), 2);
    }

    #[test]
    fn test_descending_boundaries_and_extrapolation() {
        let x = vec![3.0, 2.0, 1.0, 0.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, 3.0, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 0.0, true, order), 2);
        assert_eq!(find_breakpoint_position(&x, 3.5, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, -0.5, true, order), 2);
        assert_eq!(find_breakpoint_position(&x, 3.5, false, order), NO_INTERVAL);
        assert_eq!(find_breakpoint_position(&x, -0.5, false, order), NO_INTERVAL);
    }

    #[test]
    fn test_direction_symmetry() {
        // reversing the breakpoints maps interval i to m-1-i
        let asc = vec![0.0, 0.5, 1.25, 2.0, 4.0];
        let desc: Vec<f64> = asc.iter().rev().cloned().collect();
        let m = asc.len() - 1;
        let order_a = BreakpointOrder::of(&asc);
        let order_d = BreakpointOrder::of(&desc);
        for &q in &[0.1, 0.5, 0.7, 1.3, 3.0, 3.999] {
            let i_a = find_breakpoint_position(&asc, q, false, order_a);
            let i_d = find_breakpoint_position(&desc, q, false, order_d);
            assert_eq!(i_a, (m as i64 - 1) - i_d, "query {}", q);
        }
    }

    #[test]
    fn test_single_interval() {
        let x = vec![0.0, 1.0];
        let order = BreakpointOrder::of(&x);
        assert_eq!(find_breakpoint_position(&x, 0.0, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 0.5, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 1.0, true, order), 0);
        assert_eq!(find_breakpoint_position(&x, 1.5, false, order), NO_INTERVAL);
    }

    #[test]
    fn test_locate_intervals_batch() {
        let x = vec![0.0, 1.0, 2.0, 3.0];
        let order = BreakpointOrder::of(&x);
        let xp = vec![-1.0, 0.5, 1.0, f64::NAN, 2.9, 3.0, 4.2];
        let idx = locate_intervals(&x, &xp, false, order);
        assert_eq!(idx, vec![NO_INTERVAL, 0, 1, NO_INTERVAL, 2, 2, NO_INTERVAL]);
        let idx_ex = locate_intervals(&x, &xp, true, order);
        assert_eq!(idx_ex, vec![0, 0, 1, NO_INTERVAL, 2, 2, 2]);
    }

    #[test]
    fn test_many_intervals_against_linear_scan() {
        let x: Vec<f64> = (0..=257).map(|i| (i as f64).sqrt()).collect();
        let order = BreakpointOrder::of(&x);
        for &q in &[0.0, 0.3, 1.0, 5.5, 12.01, 16.0, 16.030] {
            let found = find_breakpoint_position(&x, q, true, order);
            // reference: last i with x[i] <= q, clamped to m-1
            let mut expected = 0;
            for i in 0..x.len() - 1 {
                if q >= x[i] {
                    expected = i as i64;
                }
            }
            assert_eq!(found, expected, "query {}", q);
        }
    }
}
