#![warn(missing_docs)]
//! AmpStat CLI Library
//!
//! Command-line surface for the AmpStat statistics engine: manual entry of a
//! single confusion matrix, batch CSV import, and pairwise technique comparison.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     ampstat_cli::run()
//! }
//! ```

mod analysis;
mod config;
mod formatting;

pub use analysis::{compare_techniques, compute_reports};
pub use config::*;
pub use formatting::format_human_output;

use ampstat_report::{
    ComparisonReport, OutputFormat, Report, TechniqueReport, generate_csv_report,
    generate_json_report, import_counts,
};
use ampstat_stats::{ConfusionCounts, TechniqueMetrics};
use anyhow::Context;
use clap::{Parser, Subcommand};
use rayon::ThreadPoolBuilder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// AmpStat CLI arguments
#[derive(Parser, Debug)]
#[command(name = "ampstat")]
#[command(
    author,
    version,
    about = "AmpStat - diagnostic performance statistics for nucleic-acid amplification assays"
)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: human, json, csv (defaults to ampstat.toml, then human)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Confidence level for Wilson intervals (e.g. 0.95)
    #[arg(long, global = true)]
    pub confidence: Option<f64>,

    /// Significance level for the McNemar verdict (e.g. 0.05)
    #[arg(long, global = true)]
    pub alpha: Option<f64>,

    /// Explicit configuration file (skips ampstat.toml discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads for batch computation
    /// 0 = use all available cores (default), 1 = single-threaded
    #[arg(long, short = 'j', default_value = "0", global = true)]
    pub threads: usize,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute diagnostic statistics for one confusion matrix
    Stats {
        /// True positives
        #[arg(long)]
        tp: u64,
        /// False negatives
        #[arg(long = "fn")]
        fn_: u64,
        /// True negatives
        #[arg(long)]
        tn: u64,
        /// False positives
        #[arg(long)]
        fp: u64,
        /// Technique label
        #[arg(long, default_value = "Custom Technique")]
        name: String,
    },
    /// Compute diagnostic statistics for every row of a CSV file
    Import {
        /// CSV with columns TP, FN, TN, FP and optionally Technique
        file: PathBuf,
    },
    /// Compare two techniques (approximate Kappa and McNemar)
    Compare {
        /// CSV to pick both techniques from; omit to pass percentages directly
        file: Option<PathBuf>,
        /// First technique (label in the CSV, or display name)
        #[arg(long)]
        a: Option<String>,
        /// Second technique (label in the CSV, or display name)
        #[arg(long)]
        b: Option<String>,
        /// Sensitivity of technique A in percent
        #[arg(long)]
        sens_a: Option<f64>,
        /// Specificity of technique A in percent
        #[arg(long)]
        spec_a: Option<f64>,
        /// Sensitivity of technique B in percent
        #[arg(long)]
        sens_b: Option<f64>,
        /// Specificity of technique B in percent
        #[arg(long)]
        spec_b: Option<f64>,
    },
    /// Write a default ampstat.toml
    Init {
        /// Destination path
        #[arg(default_value = CONFIG_FILE_NAME)]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the AmpStat CLI with the process arguments.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the AmpStat CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    if let Commands::Init { ref path, force } = cli.command {
        return write_default_config(path, force);
    }

    let settings = load_settings(&cli)?;
    tracing::debug!(?settings, "resolved settings");

    // Configure Rayon thread pool for batch computation
    if cli.threads > 0 {
        ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok();
    }

    let report = build_report(&cli.command, &settings)?;
    let output = render(&report, &settings)?;
    write_output(cli.output.as_deref(), &output)
}

/// Load ampstat.toml (explicit path or discovered) and apply CLI overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let config = match cli.config {
        Some(ref path) => AmpConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AmpConfig::discover().unwrap_or_default(),
    };
    config.resolve(cli.format.as_deref(), cli.confidence, cli.alpha)
}

fn build_report(command: &Commands, settings: &Settings) -> anyhow::Result<Report> {
    match command {
        Commands::Stats {
            tp,
            fn_,
            tn,
            fp,
            name,
        } => {
            let counts = ConfusionCounts::new(*tp, *fn_, *tn, *fp);
            if counts.checked_total().is_none() {
                return Err(anyhow::anyhow!(
                    "Counts sum past {}; totals must fit in an unsigned 64-bit integer",
                    u64::MAX
                ));
            }
            Ok(single_report(name, counts, settings))
        }
        Commands::Import { file } => import_report(file, settings),
        Commands::Compare {
            file: Some(file),
            a,
            b,
            ..
        } => {
            let (Some(a), Some(b)) = (a, b) else {
                return Err(anyhow::anyhow!(
                    "Comparing from a file requires --a and --b technique names"
                ));
            };
            compare_from_file(file, a, b, settings)
        }
        Commands::Compare {
            file: None,
            a,
            b,
            sens_a,
            spec_a,
            sens_b,
            spec_b,
        } => {
            let (Some(sens_a), Some(spec_a), Some(sens_b), Some(spec_b)) =
                (*sens_a, *spec_a, *sens_b, *spec_b)
            else {
                return Err(anyhow::anyhow!(
                    "Without a file, --sens-a, --spec-a, --sens-b and --spec-b are all required"
                ));
            };
            for (flag, value) in [
                ("--sens-a", sens_a),
                ("--spec-a", spec_a),
                ("--sens-b", sens_b),
                ("--spec-b", spec_b),
            ] {
                if !(0.0..=100.0).contains(&value) {
                    return Err(anyhow::anyhow!(
                        "{} must be a percentage between 0 and 100, got {}",
                        flag,
                        value
                    ));
                }
            }
            Ok(compare_from_percentages(
                a.as_deref().unwrap_or("Technique A"),
                TechniqueMetrics::new(sens_a, spec_a),
                b.as_deref().unwrap_or("Technique B"),
                TechniqueMetrics::new(sens_b, spec_b),
                settings,
            ))
        }
        Commands::Init { .. } => Err(anyhow::anyhow!("init does not produce a report")),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "ampstat=debug" } else { "ampstat=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    // A second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Report for one manually entered confusion matrix
pub fn single_report(name: &str, counts: ConfusionCounts, settings: &Settings) -> Report {
    let mut report = Report::new(settings.confidence_level);
    report.techniques.push(TechniqueReport::compute(
        name,
        counts,
        settings.confidence_level,
    ));
    report
}

/// Report for every row of a CSV file
pub fn import_report(file: &Path, settings: &Settings) -> anyhow::Result<Report> {
    let rows = import_counts(file)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    let mut report = Report::new(settings.confidence_level);
    report.techniques = compute_reports(&rows, settings.confidence_level);
    Ok(report)
}

/// Report comparing two techniques picked from a CSV file
pub fn compare_from_file(
    file: &Path,
    name_a: &str,
    name_b: &str,
    settings: &Settings,
) -> anyhow::Result<Report> {
    let mut report = import_report(file, settings)?;
    let comparison = compare_techniques(&report, name_a, name_b, settings.significance_level)?;
    // Keep only the two rows the comparison used, even when labels repeat
    let compared: Vec<TechniqueReport> = [&comparison.technique_a, &comparison.technique_b]
        .into_iter()
        .filter_map(|name| report.find_technique(name).cloned())
        .collect();
    report.techniques = compared;
    report.comparison = Some(comparison);
    Ok(report)
}

/// Report comparing two techniques given as literal percentages
pub fn compare_from_percentages(
    name_a: &str,
    metrics_a: TechniqueMetrics,
    name_b: &str,
    metrics_b: TechniqueMetrics,
    settings: &Settings,
) -> Report {
    let mut report = Report::new(settings.confidence_level);
    report.comparison = Some(ComparisonReport::compute(
        name_a,
        metrics_a,
        name_b,
        metrics_b,
        settings.significance_level,
    ));
    report
}

/// Render a report in the configured format
pub fn render(report: &Report, settings: &Settings) -> anyhow::Result<String> {
    let output = match settings.format {
        OutputFormat::Json => generate_json_report(report)?,
        OutputFormat::Csv => {
            if report.techniques.is_empty() {
                tracing::warn!("CSV export only lists techniques; this report has none");
            }
            generate_csv_report(report)?
        }
        OutputFormat::Human => format_human_output(report, settings.precision),
    };
    Ok(output)
}

fn write_output(path: Option<&Path>, output: &str) -> anyhow::Result<()> {
    if let Some(path) = path {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        return Err(anyhow::anyhow!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ));
    }
    std::fs::write(path, AmpConfig::default_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default configuration");
    Ok(())
}
