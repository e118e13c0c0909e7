//! Diagnostic Performance
//!
//! Sensitivity, specificity, predictive values and accuracy from a 2x2
//! confusion matrix, each paired with a Wilson score interval.

use crate::DEFAULT_CONFIDENCE_LEVEL;
use crate::wilson::{ConfidenceInterval, wilson_interval};
use serde::{Deserialize, Serialize};

/// Confusion-matrix counts for one assay against a reference standard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ConfusionCounts {
    /// True positives
    #[serde(rename = "tp")]
    pub true_positives: u64,
    /// False negatives
    #[serde(rename = "fn")]
    pub false_negatives: u64,
    /// True negatives
    #[serde(rename = "tn")]
    pub true_negatives: u64,
    /// False positives
    #[serde(rename = "fp")]
    pub false_positives: u64,
}

impl ConfusionCounts {
    /// Build counts in the conventional `(tp, fn, tn, fp)` order
    pub fn new(tp: u64, fn_: u64, tn: u64, fp: u64) -> Self {
        Self {
            true_positives: tp,
            false_negatives: fn_,
            true_negatives: tn,
            false_positives: fp,
        }
    }

    /// Sum of all four cells, saturating at `u64::MAX`
    ///
    /// Use [`ConfusionCounts::checked_total`] to reject matrices that do not fit.
    pub fn total(&self) -> u64 {
        self.true_positives
            .saturating_add(self.false_negatives)
            .saturating_add(self.true_negatives)
            .saturating_add(self.false_positives)
    }

    /// Sum of all four cells, or `None` if it overflows `u64`
    pub fn checked_total(&self) -> Option<u64> {
        self.true_positives
            .checked_add(self.false_negatives)?
            .checked_add(self.true_negatives)?
            .checked_add(self.false_positives)
    }

    /// Subjects with the condition (`tp + fn`)
    pub fn condition_positive(&self) -> u64 {
        self.true_positives.saturating_add(self.false_negatives)
    }

    /// Subjects without the condition (`tn + fp`)
    pub fn condition_negative(&self) -> u64 {
        self.true_negatives.saturating_add(self.false_positives)
    }

    /// Positive test results (`tp + fp`)
    pub fn test_positive(&self) -> u64 {
        self.true_positives.saturating_add(self.false_positives)
    }

    /// Negative test results (`tn + fn`)
    pub fn test_negative(&self) -> u64 {
        self.true_negatives.saturating_add(self.false_negatives)
    }
}

/// A rate in percent with its confidence interval (also in percent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Point estimate, 0..=100
    pub value: f64,
    /// Wilson interval, 0..=100
    pub ci: ConfidenceInterval,
}

/// Full diagnostic summary for one confusion matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// True-positive rate
    pub sensitivity: Metric,
    /// True-negative rate
    pub specificity: Metric,
    /// Positive predictive value
    pub ppv: Metric,
    /// Negative predictive value
    pub npv: Metric,
    /// Fraction of correct classifications
    pub accuracy: Metric,
    /// Echo of the input counts
    pub counts: ConfusionCounts,
    /// `tp + fn + tn + fp`
    pub total: u64,
}

/// Compute diagnostic statistics with 95% Wilson intervals
pub fn diagnostic_stats(counts: ConfusionCounts) -> DiagnosticResult {
    diagnostic_stats_with_confidence(counts, DEFAULT_CONFIDENCE_LEVEL)
}

/// Compute diagnostic statistics with Wilson intervals at `confidence`
///
/// Every rate whose denominator is zero is reported as 0 with a `(0, 0)` interval.
/// Cell sums saturate at `u64::MAX` instead of overflowing, so each successes
/// count stays within its trials count.
pub fn diagnostic_stats_with_confidence(
    counts: ConfusionCounts,
    confidence: f64,
) -> DiagnosticResult {
    let tp = counts.true_positives;
    let tn = counts.true_negatives;
    let total = counts.total();

    let metric = |successes: u64, trials: u64| Metric {
        value: percent_or_zero(successes, trials),
        ci: wilson_interval(successes, trials, confidence).to_percent(),
    };

    DiagnosticResult {
        sensitivity: metric(tp, counts.condition_positive()),
        specificity: metric(tn, counts.condition_negative()),
        ppv: metric(tp, counts.test_positive()),
        npv: metric(tn, counts.test_negative()),
        accuracy: metric(tp.saturating_add(tn), total),
        counts,
        total,
    }
}

fn percent_or_zero(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}
