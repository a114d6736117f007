use crate::alphabet::Alphabet;
use crate::composition::{self, CompositionResult};
use crate::error::Result;
use crate::sequence::Sequence;
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One input row: species, sequence, display name, expression level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneRecord {
    pub species: String,
    pub sequence: String,
    pub name: String,
    pub expression: i64,
    /// 1-based line in the record source, when read from a file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

/// Thresholds for the three record filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Species epithets matched as a suffix of the species name
    pub epithets: Vec<String>,
    /// Exclusive `(lower, upper)` bounds on sequence length
    pub length_bounds: (usize, usize),
    /// Symbols whose composition ratio is measured
    pub symbols: String,
    /// The ratio must be strictly below this...
    pub max_ratio: f64,
    /// ...and the expression strictly above this
    pub min_expression: i64,
    pub alphabet: Alphabet,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            epithets: vec!["melanogaster".to_string(), "simulans".to_string()],
            length_bounds: (90, 110),
            symbols: "AT".to_string(),
            max_ratio: 0.5,
            min_expression: 200,
            alphabet: Alphabet::Nucleotide,
        }
    }
}

/// Outcome of each filter, reported independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterTags {
    pub species: bool,
    pub length: bool,
    pub expression: bool,
}

impl FilterTags {
    pub fn any(&self) -> bool {
        self.species || self.length || self.expression
    }

    pub fn all(&self) -> bool {
        self.species && self.length && self.expression
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub name: String,
    pub species: String,
    pub length: usize,
    pub composition: CompositionResult,
    pub tags: FilterTags,
}

/// A record that could not be classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position of the record in the classified batch
    pub index: usize,
    /// 1-based line in the record source, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    pub name: String,
    pub reason: String,
}

/// Number of classified records passing each filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterTally {
    pub species: usize,
    pub length: usize,
    pub expression: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Classified records, in input order
    pub classified: Vec<Classification>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchReport {
    pub fn tally(&self) -> FilterTally {
        self.classified.iter().fold(FilterTally::default(), |mut tally, c| {
            tally.species += c.tags.species as usize;
            tally.length += c.tags.length as usize;
            tally.expression += c.tags.expression as usize;
            tally
        })
    }
}

/// Validates the record's sequence, measures its composition, and applies
/// each filter.
pub fn classify_record(record: &GeneRecord, config: &ClassifierConfig) -> Result<Classification> {
    let sequence = Sequence::new(&record.sequence, config.alphabet)?;
    let composition = composition::analyze(&sequence, &config.symbols)?;
    let length = sequence.len();
    let (lower, upper) = config.length_bounds;

    let tags = FilterTags {
        species: config.epithets.iter().any(|e| record.species.ends_with(e.as_str())),
        length: length > lower && length < upper,
        expression: composition.ratio < config.max_ratio && record.expression > config.min_expression,
    };
    debug!("Classified '{}': ratio {:.4} ({}), tags {:?}", record.name, composition.ratio, composition.band, tags);

    Ok(Classification {
        name: record.name.clone(),
        species: record.species.clone(),
        length,
        composition,
        tags,
    })
}

/// Classifies every record in parallel, keeping input order.
///
/// Records that fail validation are collected in `skipped` instead of
/// aborting the batch.
pub fn classify_batch(records: &[GeneRecord], config: &ClassifierConfig) -> BatchReport {
    let results: Vec<Result<Classification>> = records
        .par_iter()
        .map(|record| classify_record(record, config))
        .collect();

    let mut report = BatchReport::default();
    for (index, (record, result)) in records.iter().zip(results).enumerate() {
        match result {
            Ok(classification) => report.classified.push(classification),
            Err(e) => {
                warn!("Skipping record {} ('{}'): {}", index, record.name, e);
                report.skipped.push(SkippedRecord {
                    index,
                    line: record.line,
                    name: record.name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Classified {} records ({} skipped)",
        report.classified.len(),
        report.skipped.len()
    );
    report
}
