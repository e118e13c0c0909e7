//! Wilson Score Interval
//!
//! Binomial proportion confidence interval that stays well-behaved at small
//! sample sizes and at proportions near 0 or 1, where the normal
//! approximation collapses or escapes `[0, 1]`.

use crate::distribution::normal_quantile;
use serde::{Deserialize, Serialize};

/// Confidence interval bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Lower bound
    pub lower: f64,
    /// Upper bound
    pub upper: f64,
    /// Confidence level the bounds were computed for (e.g. 0.95)
    pub level: f64,
}

impl ConfidenceInterval {
    /// The empty interval `(0, 0)` used when there are no trials
    pub fn degenerate(level: f64) -> Self {
        Self {
            lower: 0.0,
            upper: 0.0,
            level,
        }
    }

    /// Rescale a fractional interval to percentage points
    pub fn to_percent(self) -> Self {
        Self {
            lower: self.lower * 100.0,
            upper: self.upper * 100.0,
            level: self.level,
        }
    }

    /// Distance between the bounds
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Whether `value` lies within the bounds (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Wilson score interval for `successes` out of `trials`, as fractions in `[0, 1]`
///
/// Zero trials yield `(0, 0)` rather than an undefined interval.
pub fn wilson_interval(successes: u64, trials: u64, confidence: f64) -> ConfidenceInterval {
    if trials == 0 {
        return ConfidenceInterval::degenerate(confidence);
    }

    let z = normal_quantile(1.0 - (1.0 - confidence) / 2.0);
    let z2 = z * z;
    let n = trials as f64;
    let p = successes as f64 / n;

    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half_width = z * ((p * (1.0 - p) + z2 / (4.0 * n)) / n).sqrt() / denom;

    ConfidenceInterval {
        lower: (center - half_width).max(0.0),
        upper: (center + half_width).min(1.0),
        level: confidence,
    }
}
