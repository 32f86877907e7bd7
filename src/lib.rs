//! # msaread - PHYLIP alignment reader
//!
//! Reads PHYLIP multiple sequence alignments, sequential or interleaved,
//! into named sequences validated against a symbol alphabet. Input that does
//! not conform (including CLUSTAL, FASTA or plain sequence text handed to
//! the PHYLIP reader) is rejected with a diagnostic instead of being
//! returned half-parsed.
//!
//! ## Architecture
//!
//! - `alphabet`: the `Alphabet` capability and the stock alphabets
//! - `model`: `Sequence` and `Alignment` containers
//! - `formats`: format sniffing and the PHYLIP reader
//!
//! ## Example
//!
//! ```
//! use msaread::alphabet::SeqAlphabet;
//! use msaread::formats::phylip;
//!
//! let content = " 2 8\nalpha ACGT\nbeta  ACGA\n\nTTGA\nTTGC\n";
//! let dna = SeqAlphabet::dna();
//! let seqs = phylip::read(content.as_bytes(), Some(&dna)).unwrap();
//! assert_eq!(seqs[1].name(), "beta");
//! assert_eq!(seqs[1].as_str(), "ACGATTGC");
//! ```

pub mod alphabet;
pub mod formats;
pub mod model;

pub use alphabet::{Alphabet, SeqAlphabet};
pub use formats::phylip::{iterseq, read, PhylipError, PhylipReader, PhylipResult};
pub use model::{Alignment, Layout, Sequence};
