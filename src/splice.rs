//! Exon extraction: slicing coding sub-ranges out of a sequence and
//! joining them.

use crate::error::{Result, SeqError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A half-open `[start, end)` range; missing bounds default to the
/// sequence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start: Some(start), end: Some(end) }
    }

    /// Resolves missing bounds against `len` and checks both against it.
    pub fn resolve(&self, len: usize) -> Result<(usize, usize)> {
        let start = self.start.unwrap_or(0);
        let end = self.end.unwrap_or(len);
        if start > len || end > len {
            return Err(SeqError::InvalidRange { start, end, len });
        }
        Ok((start, end))
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Self::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(start) = self.start {
            write!(f, "{}", start)?;
        }
        f.write_str(":")?;
        if let Some(end) = self.end {
            write!(f, "{}", end)?;
        }
        Ok(())
    }
}

impl FromStr for Span {
    type Err = String;

    /// Parses `start:end`, where either side may be left empty.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected 'start:end', got '{}'", s))?;
        let parse_bound = |bound: &str| -> std::result::Result<Option<usize>, String> {
            let bound = bound.trim();
            if bound.is_empty() {
                Ok(None)
            } else {
                bound
                    .parse::<usize>()
                    .map(Some)
                    .map_err(|e| format!("Invalid range bound '{}': {}", bound, e))
            }
        };
        Ok(Self { start: parse_bound(start)?, end: parse_bound(end)? })
    }
}

/// A sequence split around one coding span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segments {
    pub leading: String,
    pub exon: String,
    pub trailing: String,
}

/// Spans are byte offsets, so only ASCII input can be cut safely.
fn ensure_ascii(seq: &[u8]) -> Result<()> {
    let Some(position) = seq.iter().position(|b| !b.is_ascii()) else {
        return Ok(());
    };
    let symbol = String::from_utf8_lossy(&seq[position..])
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER);
    Err(SeqError::InvalidSequence { symbol, position })
}

fn text(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Slice of `seq` covered by `(start, end)`; empty when `start >= end`.
fn slice(seq: &[u8], start: usize, end: usize) -> &[u8] {
    if start >= end {
        &[]
    } else {
        &seq[start..end]
    }
}

/// Concatenates `seq[start..end]` for each span, in the order given.
///
/// Overlapping and out-of-order spans are allowed; a bound past the end of
/// the sequence is not.
pub fn extract<S, I>(seq: S, spans: I) -> Result<String>
where
    S: AsRef<[u8]>,
    I: IntoIterator,
    I::Item: Into<Span>,
{
    let seq = seq.as_ref();
    ensure_ascii(seq)?;
    let mut spliced = Vec::new();
    for span in spans {
        let span: Span = span.into();
        let (start, end) = span.resolve(seq.len())?;
        spliced.extend_from_slice(slice(seq, start, end));
    }
    Ok(text(&spliced))
}

/// Splits `seq` into the part before `exon`, the exon itself, and the rest.
pub fn partition<S: AsRef<[u8]>>(seq: S, exon: Span) -> Result<Segments> {
    let seq = seq.as_ref();
    ensure_ascii(seq)?;
    let (start, end) = exon.resolve(seq.len())?;
    let end = end.max(start);
    Ok(Segments {
        leading: text(&seq[..start]),
        exon: text(&seq[start..end]),
        trailing: text(&seq[end..]),
    })
}
