//! Integration tests for AmpStat
//!
//! These tests verify the end-to-end behavior from counts and CSV rows to reports.

use ampstat::{
    ConfusionCounts, KappaInterpretation, Report, TechniqueMetrics, TechniqueReport,
    cohens_kappa_approx, diagnostic_odds_ratio, diagnostic_stats, generate_csv_report,
    generate_json_report, interpret_kappa, likelihood_ratios, mcnemar_approx, read_counts,
    wilson_interval,
};
use ampstat_cli::{Cli, run_with_cli};
use approx::assert_abs_diff_eq;
use clap::Parser;
use proptest::prelude::*;
use std::io::Write;

const REFERENCE_CSV: &str = "\
Technique,TP,FN,TN,FP
PCR (Polymerase Chain Reaction),85,7,97,11
qPCR (Quantitative PCR),83,7,88,2
RPA (Recombinase Polymerase Amplification),87,6,92,5
LAMP (Loop-mediated Isothermal Amplification),89,4,106,6
";

/// The PCR row of the reference table, end to end
#[test]
fn test_pcr_row_statistics() {
    let counts = ConfusionCounts::new(85, 7, 97, 11);
    let result = diagnostic_stats(counts);

    assert_abs_diff_eq!(result.sensitivity.value, 92.3913043478, epsilon = 1e-9);
    assert_abs_diff_eq!(result.specificity.value, 89.8148148148, epsilon = 1e-9);
    assert_abs_diff_eq!(result.sensitivity.ci.lower, 85.1188, epsilon = 1e-4);
    assert_abs_diff_eq!(result.sensitivity.ci.upper, 96.2656, epsilon = 1e-4);
    assert_abs_diff_eq!(result.specificity.ci.lower, 82.6775, epsilon = 1e-4);
    assert_abs_diff_eq!(result.specificity.ci.upper, 94.2171, epsilon = 1e-4);

    assert_abs_diff_eq!(diagnostic_odds_ratio(counts), 107.0779, epsilon = 1e-4);

    let lr = likelihood_ratios(result.sensitivity.value, result.specificity.value);
    assert!(lr.positive > 1.0);
    assert!(lr.negative < 1.0);
}

/// An empty confusion matrix is representable and yields zeros everywhere
#[test]
fn test_empty_matrix() {
    let result = diagnostic_stats(ConfusionCounts::new(0, 0, 0, 0));
    assert_eq!(result.total, 0);
    assert_eq!(result.accuracy.value, 0.0);
    assert_eq!(result.accuracy.ci.lower, 0.0);
    assert_eq!(result.accuracy.ci.upper, 0.0);
    assert_eq!(
        diagnostic_odds_ratio(ConfusionCounts::default()),
        f64::INFINITY
    );
}

/// Wilson bounds reach the edges of [0, 1] for all-fail and all-pass samples
#[test]
fn test_wilson_extremes() {
    for n in [1u64, 5, 20, 500] {
        assert_abs_diff_eq!(wilson_interval(0, n, 0.95).lower, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wilson_interval(n, n, 0.95).upper, 1.0, epsilon = 1e-12);
    }
}

/// Kappa interpretation boundaries belong to the upper bucket
#[test]
fn test_kappa_boundaries() {
    assert_eq!(interpret_kappa(0.0).label(), "Slight agreement");
    assert_eq!(interpret_kappa(0.20).label(), "Fair agreement");
    assert_eq!(interpret_kappa(0.80).label(), "Almost perfect agreement");
}

/// Equal summaries give the floored discordant counts b = c = 1
#[test]
fn test_mcnemar_equal_summaries() {
    let metrics = TechniqueMetrics::new(93.55, 95.83);
    let result = mcnemar_approx(metrics, metrics);
    assert_eq!((result.discordant_b, result.discordant_c), (1, 1));
    assert_abs_diff_eq!(result.chi_square, 0.5, epsilon = 1e-15);
    assert!(result.p_value > 0.47 && result.p_value < 0.49);
}

/// CSV rows through the report pipeline to JSON and CSV
#[test]
fn test_csv_to_reports() {
    let rows = read_counts(REFERENCE_CSV.as_bytes()).unwrap();
    assert_eq!(rows.len(), 4);

    let mut report = Report::new(0.95);
    report.techniques = rows
        .iter()
        .map(|row| TechniqueReport::compute(row.technique.clone(), row.counts, 0.95))
        .collect();

    let json = generate_json_report(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["techniques"].as_array().unwrap().len(), 4);
    assert_eq!(
        value["techniques"][0]["technique"],
        "PCR (Polymerase Chain Reaction)"
    );

    let csv = generate_csv_report(&report).unwrap();
    let reimported = read_counts(csv.as_bytes()).unwrap();
    assert_eq!(reimported, rows);
}

/// Comparison of two imported techniques uses their computed rates
#[test]
fn test_compare_imported_techniques() {
    let rows = read_counts(REFERENCE_CSV.as_bytes()).unwrap();
    let pcr = TechniqueMetrics::from(&diagnostic_stats(rows[0].counts));
    let lamp = TechniqueMetrics::from(&diagnostic_stats(rows[3].counts));

    let kappa = cohens_kappa_approx(pcr, lamp);
    assert!(kappa.ci_lower <= kappa.kappa && kappa.kappa <= kappa.ci_upper);
    assert!((0.0..=1.0).contains(&kappa.observed_agreement));
    assert!((0.0..=1.0).contains(&kappa.expected_agreement));
    assert_eq!(interpret_kappa(kappa.kappa), KappaInterpretation::Poor);

    let mcnemar = mcnemar_approx(pcr, lamp);
    assert!(mcnemar.chi_square >= 0.0);
    assert!((0.0..=1.0).contains(&mcnemar.p_value));
}

/// Import from a file on disk, honoring a config file, written to an output file
#[test]
fn test_import_command_end_to_end() {
    let dir = tempfile::tempdir().unwrap();

    let csv_path = dir.path().join("assays.csv");
    std::fs::write(&csv_path, REFERENCE_CSV).unwrap();
    let rows = ampstat::import_counts(&csv_path).unwrap();
    assert_eq!(rows.len(), 4);

    let config_path = dir.path().join("ampstat.toml");
    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(config, "[analysis]").unwrap();
    writeln!(config, "confidence_level = 0.90").unwrap();
    writeln!(config, "[output]").unwrap();
    writeln!(config, "format = \"json\"").unwrap();
    drop(config);

    let out_path = dir.path().join("report.json");
    let cli = Cli::parse_from([
        "ampstat",
        "import",
        csv_path.to_str().unwrap(),
        "--config",
        config_path.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    run_with_cli(cli).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["meta"]["confidence_level"], 0.90);
    assert_eq!(json["techniques"].as_array().unwrap().len(), 4);
    assert_eq!(json["techniques"][3]["diagnostics"]["total"], 205);
}

/// A command-line format overrides the config file
#[test]
fn test_compare_command_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("assays.csv");
    std::fs::write(&csv_path, REFERENCE_CSV).unwrap();
    let out_path = dir.path().join("comparison.csv");

    let cli = Cli::parse_from([
        "ampstat",
        "compare",
        csv_path.to_str().unwrap(),
        "--a",
        "PCR (Polymerase Chain Reaction)",
        "--b",
        "LAMP (Loop-mediated Isothermal Amplification)",
        "--format",
        "csv",
        "--output",
        out_path.to_str().unwrap(),
    ]);
    run_with_cli(cli).unwrap();

    let written = std::fs::read_to_string(&out_path).unwrap();
    let rows = read_counts(written.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].counts, ConfusionCounts::new(89, 4, 106, 6));
}

proptest! {
    /// Every engine function is a pure function of its inputs
    #[test]
    fn prop_engine_is_deterministic(
        tp in 0u64..1_000,
        fn_ in 0u64..1_000,
        tn in 0u64..1_000,
        fp in 0u64..1_000,
        sens in 0.0f64..=100.0,
        spec in 0.0f64..=100.0,
    ) {
        let counts = ConfusionCounts::new(tp, fn_, tn, fp);
        prop_assert_eq!(diagnostic_stats(counts), diagnostic_stats(counts));
        prop_assert_eq!(
            diagnostic_odds_ratio(counts).to_bits(),
            diagnostic_odds_ratio(counts).to_bits()
        );

        let a = TechniqueMetrics::new(sens, spec);
        let b = TechniqueMetrics::new(spec, sens);
        prop_assert_eq!(mcnemar_approx(a, b), mcnemar_approx(a, b));
        let k1 = cohens_kappa_approx(a, b);
        let k2 = cohens_kappa_approx(a, b);
        prop_assert_eq!(k1.kappa.to_bits(), k2.kappa.to_bits());
        prop_assert_eq!(likelihood_ratios(sens, spec), likelihood_ratios(sens, spec));
    }

    /// McNemar output stays inside its documented ranges
    #[test]
    fn prop_mcnemar_ranges(
        sa in 0.0f64..=100.0, pa in 0.0f64..=100.0,
        sb in 0.0f64..=100.0, pb in 0.0f64..=100.0,
    ) {
        let result = mcnemar_approx(TechniqueMetrics::new(sa, pa), TechniqueMetrics::new(sb, pb));
        prop_assert!(result.discordant_b >= 1 && result.discordant_c >= 1);
        prop_assert!(result.chi_square >= 0.0);
        prop_assert!((0.0..=1.0).contains(&result.p_value));
    }
}
