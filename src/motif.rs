use serde::{Deserialize, Serialize};

/// Fragment lengths either side of a motif.
///
/// The boundary sits one past the motif's *start*: `upstream` is the motif
/// index plus one and `downstream` is everything after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragments {
    pub upstream: usize,
    pub downstream: usize,
}

/// Index of the first occurrence of `motif` in `seq`.
///
/// An empty motif matches at 0.
pub fn locate<S: AsRef<[u8]>, M: AsRef<[u8]>>(seq: S, motif: M) -> Option<usize> {
    let (seq, motif) = (seq.as_ref(), motif.as_ref());
    if motif.is_empty() {
        return Some(0);
    }
    seq.windows(motif.len()).position(|w| w == motif)
}

/// Start index of every occurrence of `motif`, overlapping ones included.
pub fn locate_all<S: AsRef<[u8]>, M: AsRef<[u8]>>(seq: S, motif: M) -> Vec<usize> {
    let (seq, motif) = (seq.as_ref(), motif.as_ref());
    if motif.is_empty() {
        return Vec::new();
    }
    seq.windows(motif.len())
        .enumerate()
        .filter(|(_, w)| *w == motif)
        .map(|(i, _)| i)
        .collect()
}

/// Fragments around the first occurrence of `motif`.
///
/// `None` when the motif is absent or empty; an empty motif marks no site.
pub fn fragment_lengths<S: AsRef<[u8]>, M: AsRef<[u8]>>(seq: S, motif: M) -> Option<Fragments> {
    let (seq, motif) = (seq.as_ref(), motif.as_ref());
    if motif.is_empty() {
        return None;
    }
    let index = locate(seq, motif)?;
    let upstream = index + 1;
    Some(Fragments {
        upstream,
        downstream: seq.len().saturating_sub(upstream),
    })
}
