#![warn(missing_docs)]
//! AmpStat Report - Import and Export
//!
//! Moves data between files and the statistics engine:
//! - CSV import of confusion-matrix rows (`TP`, `FN`, `TN`, `FP`, optional `Technique`)
//! - Report data structures shared by every output format
//! - JSON (machine-readable) and CSV (spreadsheet-compatible) export

mod csv_report;
mod import;
mod json;
mod report;

pub use csv_report::generate_csv_report;
pub use import::{ImportError, REQUIRED_COLUMNS, TechniqueCounts, import_counts, read_counts};
pub use json::generate_json_report;
pub use report::{ComparisonReport, Report, ReportMeta, SCHEMA_VERSION, TechniqueReport};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON with full schema
    Json,
    /// CSV for spreadsheets
    Csv,
    /// Human-readable terminal output
    Human,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
