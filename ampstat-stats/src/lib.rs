#![warn(missing_docs)]
//! AmpStat Statistical Engine
//!
//! Closed-form diagnostic-performance statistics over 2x2 confusion-matrix counts:
//! - Sensitivity, specificity, PPV, NPV and accuracy with Wilson score intervals
//! - Approximate inter-method agreement (Cohen's Kappa proxy) from summary percentages
//! - Approximate McNemar test from summary percentage differences
//! - Likelihood ratios and the diagnostic odds ratio
//!
//! Every function is pure: no I/O, no shared state, no validation of inputs.
//! Division by zero never fails; rates fall back to `0.0` and ratios to
//! [`f64::INFINITY`].
//!
//! The agreement and McNemar computations only see sensitivity/specificity
//! percentages, never paired raw classifications. They reproduce a fixed
//! heuristic and are not textbook-exact inferential statistics.

mod agreement;
mod diagnostic;
mod distribution;
mod ratios;
mod wilson;

pub use agreement::{
    KappaInterpretation, KappaResult, McNemarResult, TechniqueMetrics, cohens_kappa_approx,
    interpret_kappa, mcnemar_approx,
};
pub use diagnostic::{
    ConfusionCounts, DiagnosticResult, Metric, diagnostic_stats,
    diagnostic_stats_with_confidence,
};
pub use distribution::{chi_square_survival_1df, normal_quantile};
pub use ratios::{LikelihoodRatios, diagnostic_odds_ratio, likelihood_ratios};
pub use wilson::{ConfidenceInterval, wilson_interval};

/// Default confidence level (95%)
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Conventional significance threshold for the McNemar p-value
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
