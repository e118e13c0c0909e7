//! CSV Output
//!
//! One row per technique, in the same column vocabulary the importer accepts,
//! so an exported file can be fed straight back in.

use crate::report::Report;
use ampstat_stats::Metric;

const HEADER: [&str; 24] = [
    "Technique",
    "TP",
    "FN",
    "TN",
    "FP",
    "Total",
    "Sensitivity (%)",
    "Sensitivity CI Lower",
    "Sensitivity CI Upper",
    "Specificity (%)",
    "Specificity CI Lower",
    "Specificity CI Upper",
    "PPV (%)",
    "PPV CI Lower",
    "PPV CI Upper",
    "NPV (%)",
    "NPV CI Lower",
    "NPV CI Upper",
    "Accuracy (%)",
    "Accuracy CI Lower",
    "Accuracy CI Upper",
    "LR+",
    "LR-",
    "DOR",
];

/// Generate a CSV export of every technique in the report
///
/// Infinite ratios are written as `inf`.
pub fn generate_csv_report(report: &Report) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for t in &report.techniques {
        let d = &t.diagnostics;
        let mut record = vec![
            t.technique.clone(),
            d.counts.true_positives.to_string(),
            d.counts.false_negatives.to_string(),
            d.counts.true_negatives.to_string(),
            d.counts.false_positives.to_string(),
            d.total.to_string(),
        ];
        for metric in [d.sensitivity, d.specificity, d.ppv, d.npv, d.accuracy] {
            record.extend(metric_cells(&metric));
        }
        record.push(t.likelihood_ratios.positive.to_string());
        record.push(t.likelihood_ratios.negative.to_string());
        record.push(t.diagnostic_odds_ratio.to_string());

        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn metric_cells(metric: &Metric) -> [String; 3] {
    [
        metric.value.to_string(),
        metric.ci.lower.to_string(),
        metric.ci.upper.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::read_counts;
    use crate::report::TechniqueReport;
    use ampstat_stats::ConfusionCounts;

    fn sample_report() -> Report {
        let mut report = Report::new(0.95);
        report.techniques.push(TechniqueReport::compute(
            "PCR, conventional",
            ConfusionCounts::new(85, 7, 97, 11),
            0.95,
        ));
        report.techniques.push(TechniqueReport::compute(
            "RPA",
            ConfusionCounts::new(87, 6, 92, 0),
            0.95,
        ));
        report
    }

    #[test]
    fn test_csv_shape() {
        let csv = generate_csv_report(&sample_report()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Technique,TP,FN,TN,FP,Total,Sensitivity (%)"));
        // Labels containing commas are quoted
        assert!(lines[1].starts_with("\"PCR, conventional\",85,7,97,11,200,"));
        // FP = 0 makes LR+ and DOR infinite
        let fields: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(fields.len(), HEADER.len());
        assert_eq!(fields[21], "inf");
        assert_eq!(fields[23], "inf");
    }

    #[test]
    fn test_csv_reimports() {
        let csv = generate_csv_report(&sample_report()).unwrap();
        let rows = read_counts(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].technique, "PCR, conventional");
        assert_eq!(rows[0].counts, ConfusionCounts::new(85, 7, 97, 11));
        assert_eq!(rows[1].counts, ConfusionCounts::new(87, 6, 92, 0));
    }
}
