//! Report Data Structures

use ampstat_stats::{
    ConfusionCounts, DiagnosticResult, KappaInterpretation, KappaResult, LikelihoodRatios,
    McNemarResult, TechniqueMetrics, cohens_kappa_approx, diagnostic_odds_ratio,
    diagnostic_stats_with_confidence, interpret_kappa, likelihood_ratios, mcnemar_approx,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Current report schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Complete analysis report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub meta: ReportMeta,
    pub techniques: Vec<TechniqueReport>,
    pub comparison: Option<ComparisonReport>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub confidence_level: f64,
}

/// Diagnostic performance of one technique
#[derive(Debug, Clone, Serialize)]
pub struct TechniqueReport {
    /// Technique label
    pub technique: String,
    /// Rates and intervals
    pub diagnostics: DiagnosticResult,
    /// LR+ and LR-
    pub likelihood_ratios: LikelihoodRatios,
    /// Diagnostic odds ratio (infinite when FN or FP is zero)
    pub diagnostic_odds_ratio: f64,
}

impl TechniqueReport {
    /// Run every per-technique statistic for one confusion matrix
    pub fn compute(
        technique: impl Into<String>,
        counts: ConfusionCounts,
        confidence_level: f64,
    ) -> Self {
        let diagnostics = diagnostic_stats_with_confidence(counts, confidence_level);
        let likelihood_ratios =
            likelihood_ratios(diagnostics.sensitivity.value, diagnostics.specificity.value);

        Self {
            technique: technique.into(),
            diagnostics,
            likelihood_ratios,
            diagnostic_odds_ratio: diagnostic_odds_ratio(counts),
        }
    }

    /// Summary percentages used by the agreement statistics
    pub fn metrics(&self) -> TechniqueMetrics {
        TechniqueMetrics::from(&self.diagnostics)
    }
}

/// Agreement and paired-difference statistics between two techniques
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub technique_a: String,
    pub technique_b: String,
    pub metrics_a: TechniqueMetrics,
    pub metrics_b: TechniqueMetrics,
    pub kappa: KappaResult,
    pub interpretation: KappaInterpretation,
    pub mcnemar: McNemarResult,
    /// Threshold the McNemar p-value was judged against
    pub significance_level: f64,
    /// Whether `mcnemar.p_value < significance_level`
    pub significant: bool,
}

impl ComparisonReport {
    /// Compare two techniques from their summary percentages
    pub fn compute(
        technique_a: impl Into<String>,
        metrics_a: TechniqueMetrics,
        technique_b: impl Into<String>,
        metrics_b: TechniqueMetrics,
        significance_level: f64,
    ) -> Self {
        let kappa = cohens_kappa_approx(metrics_a, metrics_b);
        let mcnemar = mcnemar_approx(metrics_a, metrics_b);

        Self {
            technique_a: technique_a.into(),
            technique_b: technique_b.into(),
            metrics_a,
            metrics_b,
            kappa,
            interpretation: interpret_kappa(kappa.kappa),
            mcnemar,
            significance_level,
            significant: mcnemar.is_significant(significance_level),
        }
    }
}

impl Report {
    /// Empty report stamped with the current time
    pub fn new(confidence_level: f64) -> Self {
        Self {
            meta: ReportMeta {
                schema_version: SCHEMA_VERSION,
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                confidence_level,
            },
            techniques: Vec::new(),
            comparison: None,
        }
    }

    /// Look up a technique by label, ignoring ASCII case
    pub fn find_technique(&self, name: &str) -> Option<&TechniqueReport> {
        self.techniques
            .iter()
            .find(|t| t.technique.eq_ignore_ascii_case(name))
    }
}
