//! Output Formatting
//!
//! Human-readable output formatting for analysis reports.
//!
//! Generates terminal-friendly output with:
//! - The confusion matrix of each technique
//! - Rates with their confidence intervals
//! - Likelihood ratios and diagnostic odds ratio
//! - Agreement and McNemar results for a technique comparison

use ampstat_report::{ComparisonReport, Report, TechniqueReport};
use ampstat_stats::Metric;

/// Format a report for human-readable terminal display
///
/// `precision` is the number of decimal places for percentages and ratios.
pub fn format_human_output(report: &Report, precision: usize) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("AmpStat Results\n");
    output.push_str(&"=".repeat(60));
    output.push_str("\n\n");

    for technique in &report.techniques {
        format_technique(&mut output, technique, report.meta.confidence_level, precision);
    }

    if let Some(cmp) = &report.comparison {
        format_comparison(&mut output, cmp);
    }

    output
}

fn format_technique(output: &mut String, t: &TechniqueReport, level: f64, precision: usize) {
    let d = &t.diagnostics;
    let c = &d.counts;

    output.push_str(&format!("Technique: {}\n", t.technique));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    output.push_str(&format!(
        "  {:<18}{:>20}{:>20}\n",
        "", "Predicted Positive", "Predicted Negative"
    ));
    output.push_str(&format!(
        "  {:<18}{:>20}{:>20}\n",
        "Actual Positive", c.true_positives, c.false_negatives
    ));
    output.push_str(&format!(
        "  {:<18}{:>20}{:>20}\n",
        "Actual Negative", c.false_positives, c.true_negatives
    ));
    output.push_str(&format!("  total: {}\n\n", d.total));

    let ci_label = format!("{:.0}% CI", level * 100.0);
    output.push_str(&format!("  {:<14}{:>10}   {}\n", "Metric", "Value", ci_label));
    for (name, metric) in [
        ("Sensitivity", &d.sensitivity),
        ("Specificity", &d.specificity),
        ("PPV", &d.ppv),
        ("NPV", &d.npv),
        ("Accuracy", &d.accuracy),
    ] {
        output.push_str(&format_metric(name, metric, precision));
    }

    output.push_str(&format!(
        "\n  LR+: {}  LR-: {}  DOR: {}\n\n",
        format_ratio(t.likelihood_ratios.positive, precision),
        format_ratio(t.likelihood_ratios.negative, precision),
        format_ratio(t.diagnostic_odds_ratio, precision),
    ));
}

fn format_metric(name: &str, metric: &Metric, precision: usize) -> String {
    format!(
        "  {:<14}{:>9.prec$}%   ({:.prec$}% - {:.prec$}%)\n",
        name,
        metric.value,
        metric.ci.lower,
        metric.ci.upper,
        prec = precision
    )
}

fn format_comparison(output: &mut String, cmp: &ComparisonReport) {
    output.push_str(&format!(
        "Comparison: {} vs {}\n",
        cmp.technique_a, cmp.technique_b
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    // Kappa is conventionally quoted to four places
    output.push_str(&format!(
        "  Cohen's Kappa (approx.): {:.4}  95% CI: [{:.4}, {:.4}]\n",
        cmp.kappa.kappa, cmp.kappa.ci_lower, cmp.kappa.ci_upper
    ));
    output.push_str(&format!(
        "  observed agreement: {:.4}  expected agreement: {:.4}\n",
        cmp.kappa.observed_agreement, cmp.kappa.expected_agreement
    ));
    output.push_str(&format!("  Interpretation: {}\n\n", cmp.interpretation));

    output.push_str(&format!(
        "  McNemar (approx.): chi-square {:.4}  p-value {:.4}  (b = {}, c = {})\n",
        cmp.mcnemar.chi_square,
        cmp.mcnemar.p_value,
        cmp.mcnemar.discordant_b,
        cmp.mcnemar.discordant_c
    ));
    if cmp.significant {
        output.push_str(&format!(
            "  Significant difference detected between techniques (p < {})\n",
            cmp.significance_level
        ));
    } else {
        output.push_str(&format!(
            "  No significant difference detected between techniques (p ≥ {})\n",
            cmp.significance_level
        ));
    }
    output.push_str(
        "  Note: both statistics are approximations from summary percentages, not paired data\n",
    );
}

fn format_ratio(value: f64, precision: usize) -> String {
    if value.is_infinite() {
        "∞".to_string()
    } else {
        format!("{:.prec$}", value, prec = precision)
    }
}
