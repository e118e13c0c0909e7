#![warn(missing_docs)]
//! # AmpStat
//!
//! Diagnostic-performance statistics for comparing nucleic-acid amplification
//! assays (PCR, qPCR, RPA, LAMP, NASBA, ...) against a reference standard.
//!
//! - **Diagnostic Accuracy**: sensitivity, specificity, PPV, NPV and accuracy from 2x2 counts
//! - **Wilson Intervals**: robust binomial confidence intervals at small N and extreme rates
//! - **Agreement**: approximate Cohen's Kappa and McNemar test from summary percentages
//! - **Derived Ratios**: LR+, LR- and the diagnostic odds ratio
//! - **Import/Export**: CSV rows in, JSON or CSV reports out
//!
//! ## Quick Start
//!
//! ```
//! use ampstat::{ConfusionCounts, diagnostic_stats};
//!
//! let result = diagnostic_stats(ConfusionCounts::new(85, 7, 97, 11));
//! assert!((result.sensitivity.value - 92.391).abs() < 1e-3);
//! ```
//!
//! ## Degenerate Inputs
//!
//! Nothing in the engine fails. A rate with an empty denominator is `0.0` with a
//! `(0, 0)` interval; an undefined likelihood or odds ratio is [`f64::INFINITY`].

// Re-export the engine
pub use ampstat_stats::{
    ConfidenceInterval, ConfusionCounts, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_SIGNIFICANCE_LEVEL,
    DiagnosticResult, KappaInterpretation, KappaResult, LikelihoodRatios, McNemarResult, Metric,
    TechniqueMetrics, cohens_kappa_approx, diagnostic_odds_ratio, diagnostic_stats,
    diagnostic_stats_with_confidence, interpret_kappa, likelihood_ratios, mcnemar_approx,
    wilson_interval,
};

// Re-export report types
pub use ampstat_report::{
    ComparisonReport, ImportError, OutputFormat, Report, TechniqueCounts, TechniqueReport,
    generate_csv_report, generate_json_report, import_counts, read_counts,
};

/// Run the AmpStat CLI.
///
/// ```ignore
/// fn main() -> anyhow::Result<()> {
///     ampstat::run()
/// }
/// ```
pub use ampstat_cli::run;
