use crate::alphabet::Alphabet;
use crate::error::{Result, SeqError};

/// A symbol substitution table that is total over its alphabet.
///
/// Lookups are case-insensitive and always produce uppercase output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplementTable {
    alphabet: Alphabet,
    map: [Option<u8>; 256],
}

impl ComplementTable {
    /// Builds a table from `(source, target)` pairs, failing if any symbol
    /// of `alphabet` is left unmapped.
    pub fn new<I>(alphabet: Alphabet, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u8)>,
    {
        let mut map = [None; 256];
        for (from, to) in pairs {
            let to = to.to_ascii_uppercase();
            map[from.to_ascii_uppercase() as usize] = Some(to);
            map[from.to_ascii_lowercase() as usize] = Some(to);
        }

        if let Some(&missing) = alphabet.symbols().iter().find(|&&s| map[s as usize].is_none()) {
            return Err(SeqError::IncompleteMapping { symbol: missing as char });
        }

        Ok(Self { alphabet, map })
    }

    /// Watson-Crick pairing: A<->T, G<->C.
    pub fn dna() -> Self {
        let mut map = [None; 256];
        for (from, to) in [(b'A', b'T'), (b'T', b'A'), (b'G', b'C'), (b'C', b'G')] {
            map[from as usize] = Some(to);
            map[from.to_ascii_lowercase() as usize] = Some(to);
        }
        Self { alphabet: Alphabet::Nucleotide, map }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn get(&self, symbol: u8) -> Option<u8> {
        self.map[symbol as usize]
    }

    /// True if applying the table twice restores every alphabet symbol.
    pub fn is_involutive(&self) -> bool {
        self.alphabet.symbols().iter().all(|&s| {
            self.get(s).and_then(|t| self.get(t)) == Some(s)
        })
    }
}

impl Default for ComplementTable {
    fn default() -> Self {
        Self::dna()
    }
}

/// Complements `seq` in one pass.
///
/// Every output symbol is looked up from the original input, so a symbol
/// that was already substituted is never substituted again.
pub fn complement<S: AsRef<[u8]>>(seq: S, table: &ComplementTable) -> Result<String> {
    seq.as_ref()
        .iter()
        .enumerate()
        .map(|(position, &b)| {
            table
                .get(b)
                .map(char::from)
                .ok_or(SeqError::InvalidSequence { symbol: b as char, position })
        })
        .collect()
}

/// Complement of the reversed sequence.
pub fn reverse_complement<S: AsRef<[u8]>>(seq: S, table: &ComplementTable) -> Result<String> {
    let seq = seq.as_ref();
    seq.iter()
        .enumerate()
        .rev()
        .map(|(position, &b)| {
            table
                .get(b)
                .map(char::from)
                .ok_or(SeqError::InvalidSequence { symbol: b as char, position })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LECTURE_SEQ: &str = "ACTGATCGATTACGTATAGTATTTGCTATCATACATATATATCGATGCGTTCAT";

    /// Naive chained replacement, the thing complement must not behave like.
    fn chained_replace(seq: &str) -> String {
        seq.replace('A', "T").replace('T', "A").replace('G', "C").replace('C', "G")
    }

    #[test]
    fn test_complement_is_simultaneous() {
        let table = ComplementTable::dna();
        let result = complement(LECTURE_SEQ, &table).unwrap();

        assert_eq!(result.len(), LECTURE_SEQ.len());
        for (orig, comp) in LECTURE_SEQ.bytes().zip(result.bytes()) {
            assert_eq!(table.get(orig), Some(comp));
        }
        assert_ne!(result, chained_replace(LECTURE_SEQ));
    }

    #[test]
    fn test_complement_round_trip() {
        let table = ComplementTable::dna();
        for seq in ["", "A", "GATTACA", LECTURE_SEQ] {
            let twice = complement(complement(seq, &table).unwrap(), &table).unwrap();
            assert_eq!(twice, seq);
        }
    }

    #[test]
    fn test_complement_uppercases() {
        let table = ComplementTable::dna();
        assert_eq!(complement("atgc", &table).unwrap(), "TACG");
    }

    #[test]
    fn test_unmapped_symbol() {
        let table = ComplementTable::dna();
        let err = complement("ACNT", &table).unwrap_err();
        assert_eq!(err, SeqError::InvalidSequence { symbol: 'N', position: 2 });
    }

    #[test]
    fn test_reverse_complement() {
        let table = ComplementTable::dna();
        assert_eq!(reverse_complement("AAGT", &table).unwrap(), "ACTT");
        assert_eq!(reverse_complement("GAATTC", &table).unwrap(), "GAATTC");
    }

    #[test]
    fn test_table_must_be_total() {
        let err = ComplementTable::new(Alphabet::Nucleotide, [(b'A', b'T'), (b'T', b'A'), (b'G', b'C')])
            .unwrap_err();
        assert_eq!(err, SeqError::IncompleteMapping { symbol: 'C' });
    }

    #[test]
    fn test_involution_check() {
        assert!(ComplementTable::dna().is_involutive());

        // A total but non-involutive rotation
        let rotation = ComplementTable::new(
            Alphabet::Nucleotide,
            [(b'A', b'C'), (b'C', b'G'), (b'G', b'T'), (b'T', b'A')],
        )
        .unwrap();
        assert!(!rotation.is_involutive());
        assert_eq!(complement("ACGT", &rotation).unwrap(), "CGTA");
    }
}
