use bio::alphabets::{self, dna, protein};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol alphabets a [`Sequence`](crate::sequence::Sequence) may be declared over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// A, C, G, T
    #[default]
    #[serde(alias = "dna")]
    Nucleotide,
    /// The 20 standard amino acids
    #[serde(alias = "aa")]
    Protein,
}

impl Alphabet {
    /// Canonical (uppercase) symbols of the alphabet.
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Nucleotide => b"ACGT",
            Alphabet::Protein => b"ARNDCEQGHILKMFPSTWYV",
        }
    }

    fn to_bio(self) -> alphabets::Alphabet {
        match self {
            Alphabet::Nucleotide => dna::alphabet(),
            Alphabet::Protein => protein::alphabet(),
        }
    }

    /// Returns true if every byte of `text` belongs to the alphabet.
    pub fn is_word(&self, text: &[u8]) -> bool {
        self.to_bio().is_word(text)
    }

    /// Position and value of the first byte outside the alphabet, if any.
    pub fn first_invalid(&self, text: &[u8]) -> Option<(usize, u8)> {
        let bio_alphabet = self.to_bio();
        text.iter()
            .enumerate()
            .find(|(_, b)| !bio_alphabet.is_word([**b]))
            .map(|(i, &b)| (i, b))
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.to_bio().is_word([symbol])
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Nucleotide => write!(f, "nucleotide"),
            Alphabet::Protein => write!(f, "protein"),
        }
    }
}

impl FromStr for Alphabet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nucleotide" | "dna" => Ok(Alphabet::Nucleotide),
            "protein" | "aa" => Ok(Alphabet::Protein),
            other => Err(format!("Unsupported alphabet: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nucleotide_membership() {
        let alphabet = Alphabet::Nucleotide;
        assert!(alphabet.is_word(b"ACGT"));
        assert!(alphabet.contains(b'G'));
        assert!(!alphabet.contains(b'N'));
        assert_eq!(alphabet.first_invalid(b"ACNGT"), Some((2, b'N')));
        assert_eq!(alphabet.first_invalid(b"ACGT"), None);
    }

    #[test]
    fn test_protein_has_twenty_symbols() {
        let alphabet = Alphabet::Protein;
        assert_eq!(alphabet.symbols().len(), 20);
        assert!(alphabet.is_word(b"MSRSLLLRFLLFLLLLPPLP"));
        assert!(!alphabet.contains(b'X'));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("DNA".parse::<Alphabet>().unwrap(), Alphabet::Nucleotide);
        assert_eq!("protein".parse::<Alphabet>().unwrap(), Alphabet::Protein);
        assert!("rna".parse::<Alphabet>().is_err());
        assert_eq!(Alphabet::Protein.to_string(), "protein");
    }
}
