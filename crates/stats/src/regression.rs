//! Ordinary least-squares trend fitting with a two-sided significance test.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Result of a simple linear regression `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Slope of the fitted line.
    pub slope: f64,
    /// Intercept at `x = 0`.
    pub intercept: f64,
    /// Pearson correlation between `x` and `y`.
    pub r_value: f64,
    /// Two-sided p-value for the null hypothesis `slope == 0`.
    pub p_value: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    /// Number of finite `(x, y)` pairs used.
    pub n: usize,
}

/// Fits `y` against `x` by ordinary least squares.
///
/// Pairs with a non-finite component are ignored. The p-value comes from
/// Student's t distribution with `n - 2` degrees of freedom. A constant `y`
/// yields a flat fit with `r = 0` and `p = 1`.
///
/// Returns `None` if fewer than 3 usable pairs remain or `x` is constant.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Option<LinearFit> {
    let pairs = finite_pairs(x, y);
    let n = pairs.len();
    if n < 3 {
        return None;
    }

    let nf = n as f64;
    let mx = pairs.iter().map(|(xi, _)| xi).sum::<f64>() / nf;
    let my = pairs.iter().map(|(_, yi)| yi).sum::<f64>() / nf;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for &(xi, yi) in &pairs {
        let dx = xi - mx;
        let dy = yi - my;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = my - slope * mx;
    let df = nf - 2.0;

    let first_y = pairs[0].1;
    if syy == 0.0 || pairs.iter().all(|&(_, yi)| yi == first_y) {
        return Some(LinearFit {
            slope: 0.0,
            intercept: first_y,
            r_value: 0.0,
            p_value: 1.0,
            std_err: 0.0,
            n,
        });
    }

    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    let one_minus_r2 = (1.0 - r) * (1.0 + r);
    let p_value = if one_minus_r2 <= 0.0 {
        0.0
    } else {
        let t = r * (df / one_minus_r2).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df).ok()?;
        (2.0 * dist.sf(t.abs())).min(1.0)
    };
    let std_err = (one_minus_r2.max(0.0) * syy / sxx / df).sqrt();

    Some(LinearFit {
        slope,
        intercept,
        r_value: r,
        p_value,
        std_err,
        n,
    })
}

/// Pairs `(x[i], y[i])` where both values are finite.
fn finite_pairs(x: &[f64], y: &[f64]) -> Vec<(f64, f64)> {
    x.iter()
        .zip(y.iter())
        .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
        .map(|(xi, yi)| (*xi, *yi))
        .collect()
}
