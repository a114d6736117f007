use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ratios below this are [`Band::Low`].
pub const MEDIUM_LOWER_BOUND: f64 = 0.45;
/// Ratios above this are [`Band::High`].
pub const MEDIUM_UPPER_BOUND: f64 = 0.65;

/// Default residue set for hydrophobic content of a protein.
pub const HYDROPHOBIC_RESIDUES: &str = "AILMFWYV";

/// Classification label for a composition ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Medium,
    High,
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Band::Low => "low",
            Band::Medium => "medium",
            Band::High => "high",
        };
        f.write_str(label)
    }
}

/// A composition ratio together with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    pub ratio: f64,
    pub band: Band,
}

/// Lookup table marking the target symbols in both cases.
fn target_table(symbols: &[u8]) -> [bool; 256] {
    let mut table = [false; 256];
    for &s in symbols {
        table[s.to_ascii_uppercase() as usize] = true;
        table[s.to_ascii_lowercase() as usize] = true;
    }
    table
}

/// Number of positions in `seq` holding one of `symbols`.
///
/// Each target symbol counts once, even if listed twice.
pub fn count_symbols<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> usize {
    let table = target_table(symbols.as_ref());
    seq.as_ref().iter().filter(|&&b| table[b as usize]).count()
}

/// Fraction of `seq` made up of `symbols`, in `[0, 1]`.
pub fn compute_composition<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> Result<f64> {
    let seq = seq.as_ref();
    if seq.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    Ok(count_symbols(seq, symbols) as f64 / seq.len() as f64)
}

/// Bands a ratio: `[0, 0.45)` low, `[0.45, 0.65]` medium, above 0.65 high.
pub fn classify(ratio: f64) -> Band {
    if ratio > MEDIUM_UPPER_BOUND {
        Band::High
    } else if ratio >= MEDIUM_LOWER_BOUND {
        Band::Medium
    } else {
        Band::Low
    }
}

pub fn analyze<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> Result<CompositionResult> {
    let ratio = compute_composition(seq, symbols)?;
    Ok(CompositionResult { ratio, band: classify(ratio) })
}

/// Composition expressed as a percentage.
pub fn percentage<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> Result<f64> {
    Ok(compute_composition(seq, symbols)? * 100.0)
}

/// Number of positions in `seq` that are *not* one of `symbols`.
pub fn excluded_count<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> usize {
    let seq = seq.as_ref();
    seq.len() - count_symbols(seq, symbols)
}

/// True when the excluded symbols make up more than a quarter of `seq`.
pub fn exceeds_quarter<S: AsRef<[u8]>, T: AsRef<[u8]>>(seq: S, symbols: T) -> bool {
    let seq = seq.as_ref();
    excluded_count(seq, symbols) as f64 > 0.25 * seq.len() as f64
}

/// Per-symbol counts (uppercased), in symbol order.
pub fn symbol_counts<S: AsRef<[u8]>>(seq: S) -> BTreeMap<char, usize> {
    let mut counts = BTreeMap::new();
    for &b in seq.as_ref() {
        *counts.entry(b.to_ascii_uppercase() as char).or_insert(0) += 1;
    }
    counts
}
