//! Correlation and ratio statistics.

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Pearson correlation with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    pub coefficient: f64,
    pub p_value: f64,
}

/// Pearson correlation of two equal-length samples.
///
/// The p-value tests against zero correlation with a Student-t distribution
/// on `n - 2` degrees of freedom; with exactly two points it is 1.
///
/// Returns `None` when the lengths differ, fewer than two points are given,
/// or either sample is constant (the coefficient is undefined).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<Correlation> {
    let n = xs.len();
    if n != ys.len() || n < 2 || is_constant(xs) || is_constant(ys) {
        return None;
    }

    let mean_x = mean(xs)?;
    let mean_y = mean(ys)?;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let coefficient = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    Some(Correlation {
        coefficient,
        p_value: two_sided_p_value(coefficient, n),
    })
}

fn two_sided_p_value(r: f64, n: usize) -> f64 {
    if n == 2 {
        return 1.0;
    }
    if r.abs() == 1.0 {
        return 0.0;
    }

    let df = (n - 2) as f64;
    let t = r * (df / ((1.0 - r) * (1.0 + r))).sqrt();

    StudentsT::new(0.0, 1.0, df)
        .map(|dist| (2.0 * dist.sf(t.abs())).min(1.0))
        .unwrap_or(f64::NAN)
}

/// True when every value equals the first one.
pub fn is_constant(values: &[f64]) -> bool {
    values
        .first()
        .map_or(true, |first| values.iter().all(|value| value == first))
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divisor N).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mu = mean(values)?;
    let variance = values
        .iter()
        .map(|value| (value - mu).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Standard deviations between `latest` and `mu`; `None` when `sigma` is zero.
pub fn z_score(latest: f64, mu: f64, sigma: f64) -> Option<f64> {
    if sigma == 0.0 {
        return None;
    }
    Some((latest - mu) / sigma)
}
