use crate::gene::ClassifierConfig;
use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Run configuration, optionally loaded from a JSON file.
///
/// Missing fields fall back to their defaults, so a file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub classifier: ClassifierConfig,
    /// Worker threads for batch classification (default: logical CPUs)
    pub threads: Option<usize>,
}

impl Config {
    /// Loads a configuration file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (lower, upper) = self.classifier.length_bounds;
        if lower >= upper {
            anyhow::bail!("length_bounds lower bound {} must be below upper bound {}", lower, upper);
        }
        if self.classifier.symbols.is_empty() {
            anyhow::bail!("Composition symbol set must not be empty.");
        }
        if self.threads == Some(0) {
            anyhow::bail!("threads must be greater than 0.");
        }
        Ok(())
    }

    pub fn num_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }
}
