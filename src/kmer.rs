use crate::error::{Result, SeqError};
use std::collections::HashMap;
use std::iter::FusedIterator;

/// Lazy iterator over the overlapping k-mers of a sequence, stride 1.
///
/// Cloning yields an independent iterator from the same position, so a
/// fresh clone taken before iteration restarts the enumeration.
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    seq: &'a str,
    size: usize,
    pos: usize,
}

impl<'a> Kmers<'a> {
    pub fn size(&self) -> usize {
        self.size
    }

    fn remaining(&self) -> usize {
        (self.seq.len() + 1).saturating_sub(self.pos + self.size)
    }
}

impl<'a> Iterator for Kmers<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos + self.size > self.seq.len() {
            return None;
        }
        let kmer = &self.seq[self.pos..self.pos + self.size];
        self.pos += 1;
        Some(kmer)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Kmers<'a> {}

impl<'a> FusedIterator for Kmers<'a> {}

/// Enumerates every window of exactly `size` symbols, left to right.
///
/// A sequence of length `n` yields `max(n - size + 1, 0)` windows; a window
/// longer than the sequence simply yields nothing.
pub fn enumerate_kmers(seq: &str, size: usize) -> Result<Kmers<'_>> {
    if seq.is_empty() {
        return Err(SeqError::EmptySequence);
    }
    if size == 0 {
        return Err(SeqError::InvalidWindow { size });
    }
    // Windows are cut on byte offsets
    if let Some((position, symbol)) = seq.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
        return Err(SeqError::InvalidSequence { symbol, position });
    }
    Ok(Kmers { seq, size, pos: 0 })
}

/// Counts k-mer occurrences, keeping those seen at least `min_count` times.
///
/// Sorted by descending count, ties broken lexicographically.
pub fn count_kmers(seq: &str, size: usize, min_count: usize) -> Result<Vec<(String, usize)>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for kmer in enumerate_kmers(seq, size)? {
        *counts.entry(kmer).or_insert(0) += 1;
    }

    let mut frequent: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .map(|(kmer, count)| (kmer.to_string(), count))
        .collect();
    frequent.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(frequent)
}
