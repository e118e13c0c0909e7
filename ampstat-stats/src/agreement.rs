//! Inter-Method Agreement
//!
//! Agreement and paired-difference statistics between two assays, derived
//! from their summary sensitivity/specificity percentages only.
//!
//! Both statistics here are proxies. A true Cohen's Kappa or McNemar test needs
//! the paired contingency table of raw classifications, which summary
//! percentages cannot recover. The arithmetic is kept fixed so results stay
//! comparable with previously published figures; do not "correct" it.

use crate::diagnostic::DiagnosticResult;
use crate::distribution::chi_square_survival_1df;
use serde::{Deserialize, Serialize};

/// Fixed multiplier used for the Kappa interval
const KAPPA_Z: f64 = 1.96;

/// Fixed pseudo sample size in the Kappa standard error
const KAPPA_PSEUDO_N: f64 = 100.0;

/// Scale from a percentage-point difference to a pseudo discordant count
const DISCORDANT_SCALE: f64 = 0.1;

/// Summary performance of one technique, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechniqueMetrics {
    /// Sensitivity, 0..=100
    pub sensitivity_pct: f64,
    /// Specificity, 0..=100
    pub specificity_pct: f64,
}

impl TechniqueMetrics {
    /// Create from sensitivity and specificity percentages
    pub fn new(sensitivity_pct: f64, specificity_pct: f64) -> Self {
        Self {
            sensitivity_pct,
            specificity_pct,
        }
    }
}

impl From<&DiagnosticResult> for TechniqueMetrics {
    fn from(result: &DiagnosticResult) -> Self {
        Self::new(result.sensitivity.value, result.specificity.value)
    }
}

/// Approximate agreement between two techniques
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KappaResult {
    /// Kappa estimate; not clamped to `[-1, 1]`
    pub kappa: f64,
    /// Lower 95% bound
    pub ci_lower: f64,
    /// Upper 95% bound
    pub ci_upper: f64,
    /// Observed agreement `po`, 0..=1
    pub observed_agreement: f64,
    /// Chance agreement `pe`, 0..=1
    pub expected_agreement: f64,
}

/// Landis & Koch style reading of a Kappa value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KappaInterpretation {
    /// kappa < 0
    Poor,
    /// 0 <= kappa < 0.20
    Slight,
    /// 0.20 <= kappa < 0.40
    Fair,
    /// 0.40 <= kappa < 0.60
    Moderate,
    /// 0.60 <= kappa < 0.80
    Substantial,
    /// kappa >= 0.80
    AlmostPerfect,
}

impl KappaInterpretation {
    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            KappaInterpretation::Poor => "Poor agreement (worse than chance)",
            KappaInterpretation::Slight => "Slight agreement",
            KappaInterpretation::Fair => "Fair agreement",
            KappaInterpretation::Moderate => "Moderate agreement",
            KappaInterpretation::Substantial => "Substantial agreement",
            KappaInterpretation::AlmostPerfect => "Almost perfect agreement",
        }
    }
}

impl std::fmt::Display for KappaInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Approximate McNemar test between two techniques
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct McNemarResult {
    /// Continuity-corrected statistic, >= 0
    pub chi_square: f64,
    /// Upper-tail probability under chi-square(1)
    pub p_value: f64,
    /// Synthesized "A positive, B negative" count, >= 1
    pub discordant_b: u64,
    /// Synthesized "A negative, B positive" count, >= 1
    pub discordant_c: u64,
}

impl McNemarResult {
    /// Whether the p-value falls strictly below `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Approximate Cohen's Kappa from summary percentages
pub fn cohens_kappa_approx(a: TechniqueMetrics, b: TechniqueMetrics) -> KappaResult {
    let sens_a = a.sensitivity_pct / 100.0;
    let spec_a = a.specificity_pct / 100.0;
    let sens_b = b.sensitivity_pct / 100.0;
    let spec_b = b.specificity_pct / 100.0;

    let po = (sens_a.min(sens_b) + spec_a.min(spec_b)) / 2.0;
    let pe = ((sens_a + sens_b) / 2.0) * 0.5 + ((spec_a + spec_b) / 2.0) * 0.5;

    let kappa = if 1.0 - pe != 0.0 {
        (po - pe) / (1.0 - pe)
    } else {
        0.0
    };

    let se = (po * (1.0 - po) / KAPPA_PSEUDO_N).sqrt();

    KappaResult {
        kappa,
        ci_lower: kappa - KAPPA_Z * se,
        ci_upper: kappa + KAPPA_Z * se,
        observed_agreement: po,
        expected_agreement: pe,
    }
}

/// Classify a Kappa value; each bucket includes its lower boundary
pub fn interpret_kappa(kappa: f64) -> KappaInterpretation {
    if kappa < 0.0 {
        KappaInterpretation::Poor
    } else if kappa < 0.20 {
        KappaInterpretation::Slight
    } else if kappa < 0.40 {
        KappaInterpretation::Fair
    } else if kappa < 0.60 {
        KappaInterpretation::Moderate
    } else if kappa < 0.80 {
        KappaInterpretation::Substantial
    } else {
        KappaInterpretation::AlmostPerfect
    }
}

/// Approximate McNemar test from summary percentage differences
pub fn mcnemar_approx(a: TechniqueMetrics, b: TechniqueMetrics) -> McNemarResult {
    let sens_diff = (a.sensitivity_pct - b.sensitivity_pct).abs();
    let spec_diff = (a.specificity_pct - b.specificity_pct).abs();

    let discordant_b = discordant_count(sens_diff);
    let discordant_c = discordant_count(spec_diff);

    let pairs = discordant_b.saturating_add(discordant_c);
    // Unreachable while both counts are floored at 1
    if pairs == 0 {
        return McNemarResult {
            chi_square: 0.0,
            p_value: 1.0,
            discordant_b,
            discordant_c,
        };
    }

    let excess = discordant_b.abs_diff(discordant_c) as f64 - 1.0;
    let chi_square = excess * excess / pairs as f64;

    McNemarResult {
        chi_square,
        p_value: chi_square_survival_1df(chi_square),
        discordant_b,
        discordant_c,
    }
}

fn discordant_count(diff_pct: f64) -> u64 {
    ((diff_pct * DISCORDANT_SCALE).floor() as u64).max(1)
}
