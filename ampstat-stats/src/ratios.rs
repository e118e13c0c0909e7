//! Likelihood and Odds Ratios
//!
//! Undefined ratios are reported as [`f64::INFINITY`], never as an error.

use crate::diagnostic::ConfusionCounts;
use serde::{Deserialize, Serialize};

/// Positive and negative likelihood ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodRatios {
    /// LR+ = sens / (1 - spec); infinite when specificity is 100%
    pub positive: f64,
    /// LR- = (1 - sens) / spec; infinite when specificity is 0%
    pub negative: f64,
}

/// Likelihood ratios from sensitivity and specificity percentages
pub fn likelihood_ratios(sensitivity_pct: f64, specificity_pct: f64) -> LikelihoodRatios {
    let sens = sensitivity_pct / 100.0;
    let spec = specificity_pct / 100.0;

    let positive = if 1.0 - spec > 0.0 {
        sens / (1.0 - spec)
    } else {
        f64::INFINITY
    };

    let negative = if spec > 0.0 {
        (1.0 - sens) / spec
    } else {
        f64::INFINITY
    };

    LikelihoodRatios { positive, negative }
}

/// Diagnostic odds ratio `(tp * tn) / (fn * fp)`
///
/// Infinite whenever either off-diagonal cell is empty, including the all-zero matrix.
pub fn diagnostic_odds_ratio(counts: ConfusionCounts) -> f64 {
    if counts.false_negatives == 0 || counts.false_positives == 0 {
        return f64::INFINITY;
    }
    let concordant = counts.true_positives as f64 * counts.true_negatives as f64;
    let discordant = counts.false_negatives as f64 * counts.false_positives as f64;
    concordant / discordant
}
