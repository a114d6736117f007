//! Error types for the analysis core.
//!
//! File and CLI handling use `anyhow`; everything below the I/O boundary
//! returns [`SeqError`].

use thiserror::Error;

/// Errors raised by sequence validation and the analysis routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeqError {
    /// A symbol outside the declared alphabet (or complement table).
    #[error("invalid symbol '{symbol}' at position {position}")]
    InvalidSequence { symbol: char, position: usize },

    /// A splice range reaching past the end of the sequence.
    #[error("range {start}..{end} is out of bounds for sequence of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Zero-length input where a ratio or window is undefined.
    #[error("sequence is empty")]
    EmptySequence,

    /// K-mer window of size zero.
    #[error("window size must be at least 1 (got {size})")]
    InvalidWindow { size: usize },

    /// A complement table that leaves an alphabet symbol unmapped.
    #[error("complement table has no mapping for '{symbol}'")]
    IncompleteMapping { symbol: char },
}

/// Convenience alias used throughout the core.
pub type Result<T> = std::result::Result<T, SeqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SeqError::InvalidSequence { symbol: 'X', position: 3 };
        assert_eq!(err.to_string(), "invalid symbol 'X' at position 3");

        let err = SeqError::InvalidRange { start: 2, end: 12, len: 8 };
        assert!(err.to_string().contains("2..12"));
        assert!(err.to_string().contains("length 8"));
    }
}
