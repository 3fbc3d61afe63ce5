//! Local power-basis polynomial evaluation over located intervals.
//!
//! Coefficients are stored highest order first in a `(k, m, n)` tensor:
//! `k` coefficients per polynomial, `m` intervals, `n` independent
//! polynomials per interval. A single entry point [`evaluate`] locates the
//! interval of every query point, then evaluates the local polynomial (or
//! its derivative/antiderivative of order `dx`) for each of the `n`
//! columns, writing an `(r, n)` row-major output.
//!
//! Both real and complex coefficients are supported through the
//! [`PolyScalar`] abstraction; powers of the local coordinate always stay
//! real and are widened into the coefficient kind at the multiply.
//!
//! High-order polynomials in the power basis can be numerically unstable;
//! precision problems can start to appear for orders larger than 20-30.

use crate::numerical::interpolation::interval_search::{BreakpointOrder, locate_intervals};
use ndarray::ArrayView3;
use num_complex::Complex64;
use num_traits::{One, Zero};
use rayon::prelude::*;
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// Scalar kind a piecewise polynomial can produce: `f64` or `Complex64`.
///
/// The evaluation loops only need addition, multiplication, a NaN
/// representative and a widening conversion from real prefactors.
pub trait PolyScalar:
    Copy
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + AddAssign
    + Mul<Output = Self>
    + MulAssign
{
    /// Undefined-value marker written to output rows without a valid interval.
    fn nan() -> Self;
    /// Widen a real factor (power of the local coordinate, derivative
    /// prefactor) into this kind. Never narrows.
    fn from_real(v: f64) -> Self;
}

impl PolyScalar for f64 {
    fn nan() -> Self {
        f64::NAN
    }
    fn from_real(v: f64) -> Self {
        v
    }
}

impl PolyScalar for Complex64 {
    fn nan() -> Self {
        Complex64::new(f64::NAN, f64::NAN)
    }
    fn from_real(v: f64) -> Self {
        Complex64::new(v, 0.0)
    }
}

/// Evaluate one local polynomial, derivative, or antiderivative.
///
/// Antiderivatives are evaluated assuming zero integration constants.
///
/// # Parameters
/// - `s`: local coordinate (query point minus the interval's left breakpoint)
/// - `coef`: flat coefficient storage of the `(k, m, n)` tensor
/// - `k`: number of coefficients per polynomial, highest order first
/// - `ci`: interval index
/// - `cj`: polynomial (column) index
/// - `stride_0`, `stride_1`: element strides of the first two tensor axes
/// - `dx`: order of derivative (> 0) or antiderivative (< 0) to evaluate
pub fn eval_poly_segment<T: PolyScalar>(
    s: f64,
    coef: &[T],
    k: usize,
    ci: usize,
    cj: usize,
    stride_0: usize,
    stride_1: usize,
    dx: i32,
) -> T {
    let mut res = T::zero();
    let mut z = 1.0;

    // Antiderivatives start the power accumulation at s^(-dx)
    if dx < 0 {
        for _ in 0..(-dx) {
            z *= s;
        }
    }

    for kp in 0..k {
        let prefactor = if dx == 0 {
            1.0
        } else if dx > 0 {
            if kp < dx as usize {
                // term vanishes after differentiation
                continue;
            }
            let mut pref = 1.0;
            for j in (kp - dx as usize + 1)..=kp {
                pref *= j as f64;
            }
            pref
        } else {
            let mut pref = 1.0;
            for j in (kp + 1)..=(kp + (-dx) as usize) {
                pref /= j as f64;
            }
            pref
        };

        // coefficient of highest order term comes first
        let cur = coef[stride_0 * (k - kp - 1) + stride_1 * ci + cj];
        res += cur * T::from_real(z * prefactor);

        // z = s^max(kp+1-dx, 0) for the next term; one multiply per
        // surviving term, never recomputed from scratch
        if kp < k - 1 && kp as i32 >= dx {
            z *= s;
        }
    }

    res
}

/// Evaluate a piecewise polynomial over a batch of query points.
///
/// # Parameters
/// - `c`: coefficients of local polynomials of order `k-1` in `m`
///   intervals, `n` polynomials per interval. Coefficient of highest
///   order term comes first. Shape (k, m, n).
/// - `x`: breakpoints, shape (m+1,), increasing or decreasing
/// - `xp`: points to evaluate the piecewise polynomial at, shape (r,)
/// - `dx`: order of derivative (> 0) or antiderivative (< 0) to evaluate.
///   The derivative is evaluated piecewise and may have discontinuities.
/// - `extrapolate`: whether to evaluate out-of-span points with the first
///   and last intervals, or to write NaNs for them
/// - `out`: row-major output, shape (r, n), fully overwritten
///
/// Rows whose query point is NaN, or out of span with `extrapolate`
/// disabled, are set to NaN across all columns; this is normal output,
/// not an error. Breakpoint monotonicity and coefficient shape are the
/// caller's responsibility.
pub fn evaluate<T: PolyScalar>(
    c: ArrayView3<'_, T>,
    x: &[f64],
    xp: &[f64],
    dx: i32,
    extrapolate: bool,
    out: &mut [T],
) -> Result<(), String> {
    let (k, m, n) = c.dim();

    if out.len() != xp.len() * n {
        return Err("out and xp have incompatible shapes".to_string());
    }
    if x.len() != m + 1 {
        return Err("x and c have incompatible shapes".to_string());
    }
    let coef = c
        .as_slice()
        .ok_or_else(|| "c must be in standard (row-major) layout".to_string())?;
    if n == 0 || xp.is_empty() {
        return Ok(());
    }

    // element strides of the (k, m, n) tensor
    let stride_0 = m * n;
    let stride_1 = n;

    let order = BreakpointOrder::of(x);
    // interval location must finish for the whole batch before any
    // polynomial is evaluated
    let intervals = locate_intervals(x, xp, extrapolate, order);

    out.par_chunks_mut(n)
        .zip(xp.par_iter())
        .zip(intervals.par_iter())
        .for_each(|((row, &xval), &interval)| {
            if interval < 0 {
                for v in row.iter_mut() {
                    *v = T::nan();
                }
                return;
            }
            let ci = interval as usize;
            let s = xval - x[ci];
            for (cj, v) in row.iter_mut().enumerate() {
                *v = eval_poly_segment(s, coef, k, ci, cj, stride_0, stride_1, dx);
            }
        });

    Ok(())
}
