use clap::Args;
use dga_core::error::DgaError;
use dga_core::model::{ClassificationMode, FaultCategory};
use dga_core::parsing::{self, RawReading};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::output;

/// Embedded demo dataset: one clean sample per fault category, labeled
/// under the scoring-mode vocabulary.
const DEMO_BATCH_JSON: &str = include_str!("../../data/demo-batch.json");

#[derive(Args)]
pub struct BatchArgs {
    /// JSON array of labeled readings (gas fields plus "expected")
    pub input: Option<PathBuf>,

    /// Use the embedded demo dataset instead of a file
    #[arg(long, conflicts_with = "input")]
    pub demo: bool,

    /// Rule set: scoring (default) or tree
    #[arg(short, long, default_value = "scoring")]
    pub mode: String,

    /// Output format: table (default) or json
    #[arg(short, long, default_value = "table")]
    pub output: String,

    /// Write per-row results to a JSON file
    #[arg(short = 'O', long = "out", value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// One labeled reading from the batch file.
#[derive(Debug, Clone, Deserialize)]
struct LabeledSample {
    #[serde(flatten)]
    reading: RawReading,
    expected: String,
}

/// Outcome for one batch row.
#[derive(Debug, Clone, Serialize)]
pub struct RowResult {
    pub index: usize,
    pub expected: FaultCategory,
    pub predicted: FaultCategory,
    pub correct: bool,
}

/// Accuracy report over a labeled batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub mode: ClassificationMode,
    pub total: usize,
    pub correct: usize,
    pub rows: Vec<RowResult>,
    /// (actual, predicted) -> count. Ordered so table output is stable.
    #[serde(skip)]
    pub matrix: BTreeMap<(FaultCategory, FaultCategory), usize>,
}

impl BatchReport {
    pub fn accuracy_pct(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 * 100.0 / self.total as f64
        }
    }

    /// Every category appearing in the report, in enum priority order.
    pub fn labels(&self) -> Vec<FaultCategory> {
        let mut labels: Vec<FaultCategory> = self
            .rows
            .iter()
            .flat_map(|r| [r.expected, r.predicted])
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }
}

fn build_report(samples: &[LabeledSample], mode: ClassificationMode) -> Result<BatchReport, DgaError> {
    let mut rows = Vec::with_capacity(samples.len());
    let mut matrix: BTreeMap<(FaultCategory, FaultCategory), usize> = BTreeMap::new();
    let mut correct = 0;

    for (index, sample) in samples.iter().enumerate() {
        let expected = FaultCategory::from_str_loose(&sample.expected)
            .ok_or_else(|| DgaError::UnknownCategory(sample.expected.clone()))?;

        let reading = parsing::reading_from_raw(&sample.reading).map_err(|e| {
            DgaError::InvalidReading(format!("row {}: {}", index, e))
        })?;

        let predicted = dga_core::diagnose(&reading, mode)?.category;
        let is_correct = predicted == expected;
        if is_correct {
            correct += 1;
        }
        *matrix.entry((expected, predicted)).or_insert(0) += 1;
        rows.push(RowResult {
            index,
            expected,
            predicted,
            correct: is_correct,
        });
    }

    Ok(BatchReport {
        mode,
        total: samples.len(),
        correct,
        rows,
        matrix,
    })
}

pub fn run(args: BatchArgs) -> Result<(), DgaError> {
    let mode = ClassificationMode::from_str_loose(&args.mode)
        .ok_or_else(|| DgaError::UnknownMode(args.mode.clone()))?;

    let json = match (&args.input, args.demo) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, true) => DEMO_BATCH_JSON.to_string(),
        (None, false) => {
            return Err(DgaError::Usage(
                "no batch input: pass a JSON file or use --demo".into(),
            ))
        }
    };

    let samples: Vec<LabeledSample> = serde_json::from_str(&json)?;
    let report = build_report(&samples, mode)?;

    match args.output.as_str() {
        "json" => output::json::print(&report)?,
        _ => output::table::print_batch(&report),
    }

    if let Some(path) = &args.out {
        let rows_json = serde_json::to_string_pretty(&report.rows)?;
        std::fs::write(path, rows_json)?;
        eprintln!(
            "{} row result(s) written to {}",
            report.rows.len(),
            path.display()
        );
    }

    Ok(())
}
