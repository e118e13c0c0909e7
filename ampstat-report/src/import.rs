//! CSV Import
//!
//! Reads confusion-matrix rows from CSV. Required columns are `TP`, `FN`,
//! `TN` and `FP` (matched case-insensitively); an optional `Technique` column
//! labels each row. Unlabeled rows become `Technique_<row number>`.

use ampstat_stats::ConfusionCounts;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Columns every import file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["TP", "FN", "TN", "FP"];

const TECHNIQUE_COLUMN: &str = "Technique";

/// One labeled confusion matrix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueCounts {
    /// Technique label
    pub technique: String,
    /// Confusion-matrix counts
    pub counts: ConfusionCounts,
}

/// Errors raised while importing counts
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns: {missing:?}. Expected: TP, FN, TN, FP")]
    MissingColumns { missing: Vec<String> },

    #[error("Row {row}: column {column} has invalid count '{value}'")]
    InvalidCount {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Row {row}: counts sum past {max}", max = u64::MAX)]
    CountOverflow { row: usize },
}

/// Import counts from a CSV file on disk
pub fn import_counts(path: impl AsRef<Path>) -> Result<Vec<TechniqueCounts>, ImportError> {
    let file = std::fs::File::open(path.as_ref())?;
    let rows = read_counts(file)?;
    tracing::info!(
        path = %path.as_ref().display(),
        rows = rows.len(),
        "imported confusion-matrix rows"
    );
    Ok(rows)
}

/// Import counts from any CSV reader
pub fn read_counts<R: Read>(reader: R) -> Result<Vec<TechniqueCounts>, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| find(**c).is_none())
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns { missing });
    }

    // Presence checked above
    let indices: Vec<usize> = REQUIRED_COLUMNS.iter().filter_map(|c| find(*c)).collect();
    let technique_idx = find(TECHNIQUE_COLUMN);

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let row = idx + 1;

        let mut cells = [0u64; 4];
        for (slot, (&col, &name)) in indices.iter().zip(REQUIRED_COLUMNS.iter()).enumerate() {
            let raw = record.get(col).unwrap_or("");
            cells[slot] = parse_count(raw).ok_or_else(|| ImportError::InvalidCount {
                row,
                column: name,
                value: raw.to_string(),
            })?;
        }

        let technique = match technique_idx.and_then(|i| record.get(i)) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => {
                let label = format!("Technique_{}", row);
                tracing::debug!(row, label = %label, "row has no technique label");
                label
            }
        };

        let counts = ConfusionCounts::new(cells[0], cells[1], cells[2], cells[3]);
        if counts.checked_total().is_none() {
            return Err(ImportError::CountOverflow { row });
        }

        rows.push(TechniqueCounts { technique, counts });
    }

    if rows.is_empty() {
        tracing::warn!("CSV input contained a header but no data rows");
    }

    Ok(rows)
}

/// Parse a non-negative integral count; spreadsheet exports often write `85.0`
fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    (f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64).then_some(f as u64)
}
