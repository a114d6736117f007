use crate::gene::{BatchReport, ClassifierConfig};
use crate::io::output_json::write_json;
use crate::io::records::RecordError;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// A saved batch classification: results plus the settings and input that
/// produced them.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunReport {
    /// Version of seqscan that wrote the report.
    pub tool_version: String,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Records file the batch was read from.
    pub input: PathBuf,
    /// Classifier thresholds in effect for this run.
    pub classifier: ClassifierConfig,
    /// Rows rejected before classification (bad field count, bad expression).
    pub rejected: Vec<RecordError>,
    pub results: BatchReport,
}

impl RunReport {
    pub fn new(input: PathBuf, classifier: ClassifierConfig, rejected: Vec<RecordError>, results: BatchReport) -> Self {
        RunReport {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            input,
            classifier,
            rejected,
            results,
        }
    }

    /// Saves the report to the specified path as a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_json(path, self).with_context(|| format!("Failed to save report to {:?}", path))
    }

    /// Loads a `RunReport` from a JSON file at the specified path.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open report file at {:?}", path))?;
        let reader = BufReader::new(file);
        let report: Self = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to deserialize report from {:?}", path))?;
        Ok(report)
    }
}
