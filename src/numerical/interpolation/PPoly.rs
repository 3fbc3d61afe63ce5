//! Piecewise polynomial in the power basis.
//!
//! The polynomial between `x[i]` and `x[i+1]` is written in the local
//! power basis, with the coefficient of the highest order term first:
//!
//! `S(x) = sum(c[j, i] * (x - x[i]) ^ (k - 1 - j) for j in 0..k)`
//!
//! Breakpoints must be sorted in either increasing or decreasing order.
//! Evaluation of a batch of points is delegated to
//! [`evaluate`](crate::numerical::interpolation::ppoly_eval::evaluate):
//! interval location first, then local polynomial evaluation, both
//! parallel over the batch.

use crate::numerical::interpolation::ppoly_eval::{PolyScalar, evaluate};
use itertools::Itertools;
use log::warn;
use nalgebra::DMatrix;
use ndarray::{Array3, s};

/// Extrapolation mode for out-of-span query points.
#[derive(Debug, Clone, PartialEq)]
pub enum Extrapolate {
    /// `true`: evaluate with the first/last interval's polynomial;
    /// `false`: produce NaN rows.
    Bool(bool),
    /// Map queries back into the breakpoint span by periodicity.
    Periodic,
}

/// Piecewise polynomial in terms of coefficients and breakpoints.
///
/// - `c`: coefficients, shape (k, m, n): order `k-1` polynomials on `m`
///   intervals, `n` independent polynomials per interval
/// - `x`: breakpoints, shape (m+1,)
/// - `extrapolate`: default out-of-span policy, overridable per call
#[derive(Debug, Clone)]
pub struct PPoly<T: PolyScalar> {
    pub c: Array3<T>,
    pub x: Vec<f64>,
    pub extrapolate: Extrapolate,
}

impl<T: PolyScalar> PPoly<T> {
    /// Construct a piecewise polynomial, validating shapes and breakpoint
    /// ordering.
    pub fn new(c: Array3<T>, x: Vec<f64>, extrapolate: Extrapolate) -> Result<Self, String> {
        if x.len() < 2 {
            return Err("at least 2 breakpoints are needed".to_string());
        }
        let (k, m, _n) = c.dim();
        if k == 0 {
            return Err("polynomial must be at least of order 0".to_string());
        }
        if m != x.len() - 1 {
            return Err("number of coefficients != len(x)-1".to_string());
        }
        let increasing = x.iter().tuple_windows().all(|(a, b)| b >= a);
        let decreasing = x.iter().tuple_windows().all(|(a, b)| b <= a);
        if !increasing && !decreasing {
            return Err("`x` must be strictly increasing or decreasing.".to_string());
        }
        if k > 30 {
            warn!(
                "piecewise polynomial of order {} requested; the power basis is numerically unstable above order 20-30",
                k - 1
            );
        }
        Ok(PPoly { c, x, extrapolate })
    }

    /// Construct without validation. `c` and `x` must already have the
    /// correct shapes and ordering.
    pub fn construct_fast(c: Array3<T>, x: Vec<f64>, extrapolate: Extrapolate) -> Self {
        PPoly { c, x, extrapolate }
    }

    /// Number of coefficients per polynomial (order + 1).
    pub fn order_plus_one(&self) -> usize {
        self.c.dim().0
    }

    /// Number of independent polynomial columns.
    pub fn ncols(&self) -> usize {
        self.c.dim().2
    }

    /// Add additional breakpoints and coefficients to the polynomial.
    ///
    /// `x` holds `m` additional breakpoints sorted in the same order as
    /// `self.x`, lying entirely to the right or to the left of the current
    /// ones; `c` has shape (k, m, n). The first additional interval is
    /// formed using one of the `self.x` end points. When the polynomial
    /// orders differ, the lower-order block is zero-padded at the
    /// high-order end.
    pub fn extend(&mut self, c: Array3<T>, x: Vec<f64>) -> Result<(), String> {
        let (k_new, m_new, n_new) = c.dim();
        if x.len() != m_new {
            return Err(format!(
                "Shapes of x {:?} and c {:?} are incompatible",
                x.len(),
                c.shape()
            ));
        }
        if n_new != self.c.dim().2 {
            return Err(format!(
                "Shapes of c {:?} and self.c {:?} are incompatible",
                c.shape(),
                self.c.shape()
            ));
        }
        if c.len() == 0 {
            return Ok(());
        }

        let increasing = x.iter().tuple_windows().all(|(a, b)| b >= a);
        let decreasing = x.iter().tuple_windows().all(|(a, b)| b <= a);
        if !increasing && !decreasing {
            return Err("`x` is not sorted.".to_string());
        }

        let first = x[0];
        let last = x[x.len() - 1];
        let self_first = self.x[0];
        let self_last = self.x[self.x.len() - 1];

        // append/prepend decision is direction-aware
        let action = if self_last >= self_first {
            if last < first {
                return Err("`x` is in the different order than `self.x`.".to_string());
            }
            if first >= self_last {
                "append"
            } else if last <= self_first {
                "prepend"
            } else {
                return Err(
                    "`x` is neither on the left or on the right from `self.x`.".to_string(),
                );
            }
        } else {
            if last > first {
                return Err("`x` is in the different order than `self.x`.".to_string());
            }
            if first <= self_last {
                "append"
            } else if last >= self_first {
                "prepend"
            } else {
                return Err(
                    "`x` is neither on the left or on the right from `self.x`.".to_string(),
                );
            }
        };

        let (k_old, m_old, n) = self.c.dim();
        let k2 = k_new.max(k_old);
        let mut c2: Array3<T> = Array3::zeros((k2, m_old + m_new, n));

        if action == "append" {
            c2.slice_mut(s![k2 - k_old.., ..m_old, ..]).assign(&self.c);
            c2.slice_mut(s![k2 - k_new.., m_old.., ..]).assign(&c);
            self.x.extend_from_slice(&x);
        } else {
            c2.slice_mut(s![k2 - k_new.., ..m_new, ..]).assign(&c);
            c2.slice_mut(s![k2 - k_old.., m_new.., ..]).assign(&self.c);
            let mut x2 = x;
            x2.extend_from_slice(&self.x);
            self.x = x2;
        }
        self.c = c2;

        Ok(())
    }

    /// Evaluate the piecewise polynomial or its derivative.
    ///
    /// # Parameters
    /// - `xp`: points to evaluate the interpolant at
    /// - `nu`: order of derivative (> 0) or antiderivative (< 0) to
    ///   evaluate; `0` for the plain value
    /// - `extrapolate`: per-call override of `self.extrapolate`
    ///
    /// # Returns
    /// Matrix of shape (len(xp), n). Rows for NaN queries, or for
    /// out-of-span queries with extrapolation disabled, are NaN.
    ///
    /// Derivatives are evaluated piecewise for each polynomial segment,
    /// even if the polynomial is not differentiable at the breakpoints.
    /// The polynomial intervals are considered half-open `[a, b)`, except
    /// for the last interval which is closed `[a, b]`.
    pub fn call(
        &self,
        xp: &[f64],
        nu: i32,
        extrapolate: Option<Extrapolate>,
    ) -> Result<DMatrix<T>, String>
    where
        T: nalgebra::Scalar,
    {
        let extrapolate = extrapolate.unwrap_or_else(|| self.extrapolate.clone());
        let n = self.c.dim().2;

        let mut queries = xp.to_vec();
        let extrap_bool = match extrapolate {
            Extrapolate::Bool(b) => b,
            Extrapolate::Periodic => {
                let x0 = self.x[0];
                let x_end = self.x[self.x.len() - 1];
                let period = x_end - x0;
                for q in queries.iter_mut() {
                    *q = wrap_periodic(*q, x0, period);
                }
                false
            }
        };

        let mut out = vec![T::zero(); queries.len() * n];
        evaluate(self.c.view(), &self.x, &queries, nu, extrap_bool, &mut out)?;
        Ok(DMatrix::from_row_slice(queries.len(), n, &out))
    }
}

/// Map `q` into `[x0, x0 + period)` (span end side for negative periods).
/// The remainder takes the sign of the period, so descending breakpoint
/// spans wrap onto the correct side; NaN passes through.
fn wrap_periodic(q: f64, x0: f64, period: f64) -> f64 {
    let mut r = (q - x0) % period;
    if r != 0.0 && (r < 0.0) != (period < 0.0) {
        r += period;
    }
    x0 + r
}
