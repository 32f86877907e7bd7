//! PHYLIP format reader.
//!
//! Supports both sequential and interleaved PHYLIP layouts.
//!
//! ## PHYLIP Format
//!
//! The first line contains the number of sequences and the sequence length:
//! ```text
//!  3 10
//! ```
//!
//! ### Sequential Format
//! Each sequence name followed by all its data, possibly wrapped over
//! several lines:
//! ```text
//!  3 10
//! Seq1      ACGTACGTAC
//! Seq2      TGCATGCATG
//! Seq3      AAAACCCCGG
//! ```
//!
//! ### Interleaved Format
//! Names on first block, then data continues in subsequent blocks:
//! ```text
//!  3 20
//! Seq1      ACGTACGTAC
//! Seq2      TGCATGCATG
//! Seq3      AAAACCCCGG
//!
//! GTGTGTGTGT
//! CACACACACA
//! TTTTTTTTTT
//! ```
//!
//! ## Strict Parsing
//!
//! The layout is decided once from the first block. Everything after that
//! must agree with it: wrong line counts, over-long or short records and
//! symbols outside the alphabet all reject the whole file. Nothing is ever
//! padded, truncated or skipped, so inputs in other formats (CLUSTAL,
//! FASTA, plain text) fail instead of yielding garbage.
//!
//! Names are read according to [`NameStyle`]; the default takes the first
//! whitespace-delimited token of at most 10 characters.

mod assemble;
mod header;
mod layout;
mod line;
mod validate;

use std::fs::File;
use std::io::{BufReader, Read};
use std::iter::FusedIterator;
use std::path::Path;

use thiserror::Error;

use crate::alphabet::{Alphabet, SeqAlphabet};
use crate::formats::FileFormat;
use crate::model::{Alignment, Layout, Sequence};

pub use header::Header;

/// Classic PHYLIP name field width.
pub const DEFAULT_NAME_WIDTH: usize = 10;

/// Errors that can occur during PHYLIP parsing.
#[derive(Error, Debug)]
pub enum PhylipError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed header at line {line}: {reason}{}", format_hint(.hint))]
    MalformedHeader {
        line: usize,
        reason: String,
        hint: Option<FileFormat>,
    },

    #[error("Invalid layout at line {line}: {reason}")]
    AmbiguousOrInvalidLayout { line: usize, reason: String },

    #[error("Unexpected end of input: {context}")]
    UnexpectedEof { context: String },

    #[error("Line {line}: block has {found} lines, expected {expected} (one per sequence)")]
    RecordCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}: sequence '{name}' is longer than the declared {expected} characters")]
    SequenceTooLong {
        name: String,
        line: usize,
        expected: usize,
    },

    #[error("Sequence '{name}' has length {found}, expected {expected}")]
    SequenceLengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Illegal symbol '{symbol}' at position {position} of sequence '{name}' (allowed: {alphabet})")]
    IllegalSymbol {
        symbol: char,
        position: usize,
        name: String,
        alphabet: String,
    },
}

fn format_hint(hint: &Option<FileFormat>) -> String {
    match hint {
        Some(format) => format!(" (input looks like a {} file)", format),
        None => String::new(),
    }
}

/// Result type for PHYLIP operations.
pub type PhylipResult<T> = Result<T, PhylipError>;

/// How sequence names are cut from the start of a data line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameStyle {
    /// First whitespace-delimited token, at most `name_width` characters.
    /// A longer run continues as sequence data, which matches unpadded
    /// classic names such as `HesperorniCGTTACTCGT`.
    #[default]
    Bounded,
    /// Exactly the first `name_width` columns, trimmed. Names may contain
    /// spaces (`B. virgini`).
    FixedWidth,
    /// First whitespace-delimited token of any length.
    Relaxed,
}

/// Reader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    pub name_style: NameStyle,
    /// Ignored by [`NameStyle::Relaxed`].
    pub name_width: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            name_style: NameStyle::default(),
            name_width: DEFAULT_NAME_WIDTH,
        }
    }
}

/// A configured PHYLIP reader.
///
/// Without an explicit alphabet, sequences are checked against
/// [`SeqAlphabet::generic`].
///
/// ```
/// use msaread::alphabet::SeqAlphabet;
/// use msaread::formats::phylip::{NameStyle, PhylipReader};
///
/// let protein = SeqAlphabet::protein();
/// let reader = PhylipReader::new()
///     .alphabet(&protein)
///     .name_style(NameStyle::Relaxed);
/// let alignment = reader.parse_str("2 4\nfirst_sequence MKVL\nsecond MRVL\n").unwrap();
/// assert_eq!(alignment.get(0).unwrap().name(), "first_sequence");
/// ```
#[derive(Clone, Copy, Default)]
pub struct PhylipReader<'a> {
    options: ReaderOptions,
    alphabet: Option<&'a dyn Alphabet>,
}

impl<'a> PhylipReader<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ReaderOptions) -> Self {
        Self {
            options,
            alphabet: None,
        }
    }

    /// Restricts the accepted symbols.
    pub fn alphabet(mut self, alphabet: &'a dyn Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    pub fn name_style(mut self, name_style: NameStyle) -> Self {
        self.options.name_style = name_style;
        self
    }

    pub fn name_width(mut self, name_width: usize) -> Self {
        self.options.name_width = name_width;
        self
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    /// Reads the whole input and parses it.
    pub fn parse<R: Read>(&self, mut reader: R) -> PhylipResult<Alignment> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Parses PHYLIP content from a string.
    pub fn parse_str(&self, content: &str) -> PhylipResult<Alignment> {
        let generic;
        let alphabet: &dyn Alphabet = match self.alphabet {
            Some(alphabet) => alphabet,
            None => {
                generic = SeqAlphabet::generic();
                &generic
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        let (header_idx, header) = header::parse_header(&lines)?;
        let body = line::body_lines(&lines, header_idx);

        let layout = layout::detect_layout(&body, &header, &self.options)?;
        let records = match layout {
            Layout::Sequential => assemble::assemble_sequential(&body, &header, &self.options)?,
            Layout::Interleaved => assemble::assemble_interleaved(&body, &header, &self.options)?,
        };
        let sequences = validate::validate(records, &header, alphabet)?;

        Ok(Alignment::new(sequences, header.sequence_length, layout))
    }

    /// Parses a PHYLIP file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> PhylipResult<Alignment> {
        let file = File::open(&path)?;
        let capacity = file.metadata().map(|m| m.len() as usize).unwrap_or(0);

        let mut reader = BufReader::with_capacity(1024 * 1024, file);
        let mut content = String::with_capacity(capacity);
        reader.read_to_string(&mut content)?;
        self.parse_str(&content)
    }

    /// Eager read: all sequences, or the first error.
    pub fn read<R: Read>(&self, reader: R) -> PhylipResult<Vec<Sequence>> {
        self.parse(reader).map(Alignment::into_sequences)
    }

    /// Lazy read: see [`Records`].
    pub fn iterseq<R: Read>(&self, reader: R) -> Records<'a, R> {
        Records {
            reader: *self,
            state: RecordsState::Pending(reader),
        }
    }
}

impl std::fmt::Debug for PhylipReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhylipReader")
            .field("options", &self.options)
            .field("alphabet", &self.alphabet.map(|a| a.name()))
            .finish()
    }
}

/// Sequences of one PHYLIP input, delivered one at a time.
///
/// The input is consumed and fully parsed on the first call to `next`; the
/// layout of a PHYLIP file is only known after seeing all of it. A parse
/// failure is yielded once as `Err`, after which the iterator is exhausted.
/// It cannot be restarted.
pub struct Records<'a, R> {
    reader: PhylipReader<'a>,
    state: RecordsState<R>,
}

enum RecordsState<R> {
    Pending(R),
    Ready(std::vec::IntoIter<Sequence>),
    Done,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = PhylipResult<Sequence>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.state, RecordsState::Done) {
                RecordsState::Pending(source) => match self.reader.read(source) {
                    Ok(sequences) => self.state = RecordsState::Ready(sequences.into_iter()),
                    Err(e) => return Some(Err(e)),
                },
                RecordsState::Ready(mut sequences) => {
                    let next = sequences.next();
                    if next.is_some() {
                        self.state = RecordsState::Ready(sequences);
                    }
                    return next.map(Ok);
                }
                RecordsState::Done => return None,
            }
        }
    }
}

impl<R: Read> FusedIterator for Records<'_, R> {}

/// Reads all sequences from a PHYLIP stream.
///
/// `alphabet` restricts the legal symbols; `None` accepts any letter plus
/// `-.*?~`.
pub fn read<R: Read>(reader: R, alphabet: Option<&dyn Alphabet>) -> PhylipResult<Vec<Sequence>> {
    reader_for(alphabet).read(reader)
}

/// Iterates over the sequences of a PHYLIP stream. See [`Records`].
pub fn iterseq<'a, R: Read>(reader: R, alphabet: Option<&'a dyn Alphabet>) -> Records<'a, R> {
    reader_for(alphabet).iterseq(reader)
}

/// Parses PHYLIP content from a string.
pub fn read_str(content: &str, alphabet: Option<&dyn Alphabet>) -> PhylipResult<Vec<Sequence>> {
    reader_for(alphabet).parse_str(content).map(Alignment::into_sequences)
}

/// Parses a PHYLIP file.
pub fn read_file<P: AsRef<Path>>(path: P, alphabet: Option<&dyn Alphabet>) -> PhylipResult<Alignment> {
    reader_for(alphabet).parse_file(path)
}

fn reader_for(alphabet: Option<&dyn Alphabet>) -> PhylipReader<'_> {
    PhylipReader {
        options: ReaderOptions::default(),
        alphabet,
    }
}
