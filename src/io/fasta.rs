use anyhow::{Context, Result};
use bio::io::fasta;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Reads sequences from a FASTA file, or from a plain-text file holding a
/// single bare sequence.
///
/// Plain-text input is recognised by its first non-blank character not
/// being `>`; the whole file (minus line breaks) becomes one record named
/// after the file stem.
///
/// Returns:
///     A vector of `(record id, sequence)` tuples in file order.
pub fn read_sequences(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sequence file: {}", path.display()))?;

    let sequences = if content.trim_start().starts_with('>') {
        parse_fasta(&content).with_context(|| format!("Failed to parse FASTA file: {}", path.display()))?
    } else {
        let id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sequence".to_string());
        let sequence: String = content.lines().map(str::trim).collect();
        debug!("Read plain sequence '{}' ({} symbols)", id, sequence.len());
        vec![(id, sequence)]
    };

    if sequences.is_empty() {
        anyhow::bail!("No records found in sequence file: {}", path.display());
    }

    info!("Read {} sequence(s) from {}", sequences.len(), path.display());
    Ok(sequences)
}

/// First record of [`read_sequences`].
pub fn read_first_sequence(path: &Path) -> Result<(String, String)> {
    read_sequences(path)?
        .into_iter()
        .next()
        .with_context(|| format!("No records found in sequence file: {}", path.display()))
}

fn parse_fasta(content: &str) -> Result<Vec<(String, String)>> {
    let reader = fasta::Reader::new(content.as_bytes());
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result.context("Failed to read FASTA record")?;
        let sequence = String::from_utf8(record.seq().to_vec())
            .with_context(|| format!("Record '{}' is not valid UTF-8", record.id()))?;
        debug!("  Record '{}': read {} symbols.", record.id(), sequence.len());
        sequences.push((record.id().to_string(), sequence));
    }

    Ok(sequences)
}
