// Declare the library modules
pub mod alphabet;
pub mod complement;
pub mod composition;
pub mod config;
pub mod error;
pub mod gene;
pub mod io;
pub mod kmer;
pub mod motif;
pub mod report;
pub mod sequence;
pub mod splice;

// Re-export the engine's entry points for easier access
pub use alphabet::Alphabet;
pub use complement::{complement, reverse_complement, ComplementTable};
pub use composition::{analyze, classify, compute_composition, Band, CompositionResult};
pub use error::{Result, SeqError};
pub use gene::{classify_batch, classify_record, BatchReport, ClassifierConfig, GeneRecord};
pub use kmer::{count_kmers, enumerate_kmers, Kmers};
pub use motif::{fragment_lengths, locate, Fragments};
pub use sequence::Sequence;
pub use splice::{extract, Span};
