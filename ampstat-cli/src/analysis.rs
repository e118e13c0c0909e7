//! Batch Analysis
//!
//! Runs the statistics engine over imported rows and resolves technique
//! comparisons.
//!
//! Rows are independent and every engine call is pure, so the per-row work is
//! spread across the Rayon pool; `collect` keeps the input order.

use ampstat_report::{ComparisonReport, Report, TechniqueCounts, TechniqueReport};
use rayon::prelude::*;

/// Compute a report for every imported row (parallelized with Rayon)
pub fn compute_reports(rows: &[TechniqueCounts], confidence_level: f64) -> Vec<TechniqueReport> {
    rows.par_iter()
        .map(|row| TechniqueReport::compute(row.technique.clone(), row.counts, confidence_level))
        .collect()
}

/// Compare two techniques picked by label from a computed report
///
/// Labels match ignoring ASCII case; with duplicate labels the first row wins.
pub fn compare_techniques(
    report: &Report,
    name_a: &str,
    name_b: &str,
    significance_level: f64,
) -> anyhow::Result<ComparisonReport> {
    if name_a.eq_ignore_ascii_case(name_b) {
        return Err(anyhow::anyhow!(
            "Cannot compare technique '{}' with itself; select two different techniques",
            name_a
        ));
    }

    let find = |name: &str| {
        report.find_technique(name).ok_or_else(|| {
            let available: Vec<&str> = report
                .techniques
                .iter()
                .map(|r| r.technique.as_str())
                .collect();
            anyhow::anyhow!(
                "Technique '{}' not found. Available techniques: {}",
                name,
                available.join(", ")
            )
        })
    };

    let a = find(name_a)?;
    let b = find(name_b)?;

    Ok(ComparisonReport::compute(
        a.technique.clone(),
        a.metrics(),
        b.technique.clone(),
        b.metrics(),
        significance_level,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampstat_stats::ConfusionCounts;

    fn report_of(rows: &[TechniqueCounts]) -> Report {
        let mut report = Report::new(0.95);
        report.techniques = compute_reports(rows, 0.95);
        report
    }

    fn rows() -> Vec<TechniqueCounts> {
        vec![
            TechniqueCounts {
                technique: "PCR".to_string(),
                counts: ConfusionCounts::new(85, 7, 97, 11),
            },
            TechniqueCounts {
                technique: "qPCR".to_string(),
                counts: ConfusionCounts::new(83, 7, 88, 2),
            },
            TechniqueCounts {
                technique: "LAMP".to_string(),
                counts: ConfusionCounts::new(89, 4, 106, 6),
            },
        ]
    }

    #[test]
    fn test_compute_reports_preserves_order() {
        let reports = compute_reports(&rows(), 0.95);
        let names: Vec<&str> = reports.iter().map(|r| r.technique.as_str()).collect();
        assert_eq!(names, vec!["PCR", "qPCR", "LAMP"]);
        assert_eq!(reports[1].diagnostics.total, 180);
    }

    #[test]
    fn test_compare_techniques() {
        let cmp = compare_techniques(&report_of(&rows()), "pcr", "LAMP", 0.05).unwrap();
        assert_eq!(cmp.technique_a, "PCR");
        assert_eq!(cmp.technique_b, "LAMP");
        assert!(cmp.mcnemar.discordant_b >= 1);
        assert!(cmp.mcnemar.discordant_c >= 1);
    }

    #[test]
    fn test_compare_unknown_technique() {
        let err = compare_techniques(&report_of(&rows()), "PCR", "NASBA", 0.05).unwrap_err();
        assert!(err.to_string().contains("NASBA"));
        assert!(err.to_string().contains("qPCR"));
    }

    #[test]
    fn test_compare_same_technique() {
        assert!(compare_techniques(&report_of(&rows()), "PCR", "pcr", 0.05).is_err());
    }

    #[test]
    fn test_compare_duplicate_label_uses_first_row() {
        let mut rows = rows();
        rows.push(TechniqueCounts {
            technique: "pcr".to_string(),
            counts: ConfusionCounts::new(10, 90, 10, 90),
        });
        let report = report_of(&rows);
        let cmp = compare_techniques(&report, "PCR", "LAMP", 0.05).unwrap();
        assert_eq!(cmp.metrics_a, report.techniques[0].metrics());
    }
}
