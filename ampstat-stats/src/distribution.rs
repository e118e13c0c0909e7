//! Reference Distributions
//!
//! Full-precision standard normal quantile and chi-square (1 df) upper tail,
//! built on the error-function family from `statrs`.

use statrs::function::erf::{erf_inv, erfc};
use std::f64::consts::SQRT_2;

/// Standard normal quantile (inverse CDF)
///
/// `normal_quantile(0.975)` is `1.959963984540054…`; callers that need
/// reference-matching Wilson bounds rely on this precision.
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    SQRT_2 * erf_inv(2.0 * p - 1.0)
}

/// Upper-tail probability `P(X > x)` for a chi-square variable with one degree of freedom
///
/// With one degree of freedom `X = Z²`, so the tail equals `erfc(sqrt(x / 2))`.
/// This is `1 - CDF(x)` without the cancellation of the subtraction.
pub fn chi_square_survival_1df(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    erfc((x / 2.0).sqrt()).clamp(0.0, 1.0)
}
