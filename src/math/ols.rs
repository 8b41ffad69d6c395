//! Closed-form simple linear regression.
//!
//! We only ever fit a straight line `y = intercept + slope · x`, so the
//! normal equations reduce to a handful of running sums:
//!
//! ```text
//! slope     = (nΣxy − ΣxΣy) / (nΣx² − (Σx)²)
//! intercept = (Σy − slope·Σx) / n
//! ```
//!
//! When the denominator vanishes (empty input, one point, or all `x` equal)
//! the slope is undetermined. Instead of failing we fall back to `slope = 0`
//! and take the mean of `y` as the intercept (`0` when there are no points),
//! so callers always get finite numbers back.

/// Relative size below which the normal-equation denominator counts as zero.
const DEGENERATE_RTOL: f64 = 1e-12;

/// Result of [`fit_line`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// `true` when the rank-deficient fallback was applied.
    pub degenerate: bool,
}

/// Ordinary least squares line through `(xs[i], ys[i])`.
///
/// Extra elements in the longer slice are ignored.
pub fn fit_line(xs: &[f64], ys: &[f64]) -> LineFit {
    let n = xs.len().min(ys.len());
    if n == 0 {
        return LineFit {
            slope: 0.0,
            intercept: 0.0,
            degenerate: true,
        };
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let nf = n as f64;
    let denominator = nf * sum_xx - sum_x * sum_x;

    // Identical x values can leave a rounding-sized denominator instead of an
    // exact zero; treat anything at that scale as zero.
    let degenerate = !denominator.is_finite() || denominator.abs() <= DEGENERATE_RTOL * nf * sum_xx;
    let slope = if degenerate {
        0.0
    } else {
        (nf * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / nf;

    LineFit {
        slope,
        intercept,
        degenerate,
    }
}
