use crate::alphabet::Alphabet;
use crate::error::{Result, SeqError};
use log::debug;
use serde::Serialize;
use std::fmt;

/// A validated, uppercase, immutable sequence over an [`Alphabet`].
///
/// The only way to obtain one is [`Sequence::new`], so every instance has
/// already passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Sequence {
    symbols: String,
    alphabet: Alphabet,
}

impl Sequence {
    /// Normalizes `raw` (trim + uppercase) and validates it against `alphabet`.
    pub fn new(raw: &str, alphabet: Alphabet) -> Result<Self> {
        let normalized = raw.trim().to_ascii_uppercase();

        // Non-ASCII input cannot be represented byte-for-byte.
        if let Some((position, symbol)) = normalized.chars().enumerate().find(|(_, c)| !c.is_ascii()) {
            return Err(SeqError::InvalidSequence { symbol, position });
        }

        if let Some((position, b)) = alphabet.first_invalid(normalized.as_bytes()) {
            return Err(SeqError::InvalidSequence { symbol: b as char, position });
        }

        debug!("Validated {} sequence of length {}", alphabet, normalized.len());
        Ok(Self { symbols: normalized, alphabet })
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn as_str(&self) -> &str {
        &self.symbols
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.symbols.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols)
    }
}

/// Removes every occurrence of `symbols` from `raw`, ignoring case.
///
/// Used to strip stray annotation letters from a read-in sequence before
/// it is validated.
pub fn purge(raw: &str, symbols: &str) -> String {
    raw.chars()
        .filter(|c| !symbols.chars().any(|s| s.eq_ignore_ascii_case(c)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let seq = Sequence::new("  acgtAC \n", Alphabet::Nucleotide).unwrap();
        assert_eq!(seq.as_str(), "ACGTAC");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.alphabet(), Alphabet::Nucleotide);
    }

    #[test]
    fn test_rejects_symbol_outside_alphabet() {
        let err = Sequence::new("ACGNT", Alphabet::Nucleotide).unwrap_err();
        assert_eq!(err, SeqError::InvalidSequence { symbol: 'N', position: 3 });

        // Interior whitespace is not trimmed
        assert!(Sequence::new("AC GT", Alphabet::Nucleotide).is_err());
    }

    #[test]
    fn test_rejects_non_ascii() {
        let err = Sequence::new("ACé", Alphabet::Nucleotide).unwrap_err();
        assert!(matches!(err, SeqError::InvalidSequence { position: 2, .. }));
    }

    #[test]
    fn test_protein_sequence() {
        let seq = Sequence::new("msrslllrfl", Alphabet::Protein).unwrap();
        assert_eq!(seq.to_string(), "MSRSLLLRFL");
        assert!(Sequence::new("MSRSX", Alphabet::Protein).is_err());
    }

    #[test]
    fn test_empty_sequence_is_valid() {
        let seq = Sequence::new("   ", Alphabet::Nucleotide).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn test_purge_then_validate() {
        let cleaned = purge("ATGxCkSGl", "XKSL");
        assert_eq!(cleaned, "ATGCG");
        assert!(Sequence::new(&cleaned, Alphabet::Nucleotide).is_ok());
    }
}
