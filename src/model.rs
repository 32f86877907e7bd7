//! Data model for parsed alignments.
//!
//! This module contains the containers the readers produce:
//! - `Sequence`: an immutable name plus validated symbols
//! - `Alignment`: the ordered sequences of one file and how they were laid out

use std::fmt;
use std::ops::Range;

/// Represents a single sequence with its name and data.
///
/// Sequences are immutable once built; the reader only constructs them after
/// every symbol has been checked against the active alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    name: String,
    data: String,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// The sequence name as it appeared in the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Gets the symbol at a specific position.
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.data.chars().nth(pos)
    }

    /// Gets a slice of the sequence data, clamped to the sequence bounds.
    ///
    /// Positions count symbols, not bytes.
    pub fn slice(&self, range: Range<usize>) -> &str {
        let start = self.byte_offset(range.start);
        let end = self.byte_offset(range.end).max(start);
        &self.data[start..end]
    }

    fn byte_offset(&self, pos: usize) -> usize {
        self.data.char_indices().nth(pos).map_or(self.data.len(), |(i, _)| i)
    }

    /// Splits the sequence into its name and data.
    pub fn into_parts(self) -> (String, String) {
        (self.name, self.data)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// How the records of a PHYLIP file were laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Each record is written in full before the next one starts.
    Sequential,
    /// Records are written in blocks, one chunk per record per block.
    Interleaved,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Sequential => write!(f, "sequential"),
            Layout::Interleaved => write!(f, "interleaved"),
        }
    }
}

/// An ordered, validated set of equal-length sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// All sequences in file order
    pub sequences: Vec<Sequence>,
    /// The layout the records were read from
    pub layout: Layout,
    alignment_length: usize,
}

impl Alignment {
    /// Creates an alignment. Every sequence is expected to hold
    /// `alignment_length` symbols.
    pub fn new(sequences: Vec<Sequence>, alignment_length: usize, layout: Layout) -> Self {
        Self {
            sequences,
            layout,
            alignment_length,
        }
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the number of columns.
    pub fn alignment_length(&self) -> usize {
        self.alignment_length
    }

    /// Returns the maximum name length (for display purposes).
    pub fn max_name_length(&self) -> usize {
        self.sequences.iter().map(|s| s.name().len()).max().unwrap_or(0)
    }

    /// Gets a sequence by index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    /// Returns true if the alignment is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn into_sequences(self) -> Vec<Sequence> {
        self.sequences
    }
}

impl IntoIterator for Alignment {
    type Item = Sequence;
    type IntoIter = std::vec::IntoIter<Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_creation() {
        let seq = Sequence::new("seq1", "ACGT");
        assert_eq!(seq.name(), "seq1");
        assert_eq!(seq.as_str(), "ACGT");
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.to_string(), "ACGT");
    }

    #[test]
    fn test_sequence_char_at() {
        let seq = Sequence::new("seq1", "ACGT");
        assert_eq!(seq.char_at(0), Some('A'));
        assert_eq!(seq.char_at(3), Some('T'));
        assert_eq!(seq.char_at(4), None);
    }

    #[test]
    fn test_sequence_slice_is_clamped() {
        let seq = Sequence::new("seq1", "ACGTACGT");
        assert_eq!(seq.slice(0..4), "ACGT");
        assert_eq!(seq.slice(6..20), "GT");
        assert_eq!(seq.slice(12..20), "");
    }

    #[test]
    fn test_sequence_slice_counts_symbols() {
        let seq = Sequence::new("seq1", "AÅCGØT");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.slice(1..3), "ÅC");
        assert_eq!(seq.slice(4..9), "ØT");
        assert_eq!(seq.slice(5..2), "");
        assert!(!seq.is_empty());
        assert!(Sequence::new("empty", "").is_empty());
    }

    #[test]
    fn test_alignment_accessors() {
        let seqs = vec![
            Sequence::new("seq1", "ACGT"),
            Sequence::new("longer_name", "TGCA"),
        ];
        let alignment = Alignment::new(seqs, 4, Layout::Sequential);
        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.alignment_length(), 4);
        assert_eq!(alignment.max_name_length(), 11);
        assert_eq!(alignment.get(1).unwrap().name(), "longer_name");
        assert!(alignment.get(2).is_none());
        let names: Vec<&str> = alignment.iter().map(Sequence::name).collect();
        assert_eq!(names, ["seq1", "longer_name"]);
    }

    #[test]
    fn test_layout_display() {
        assert_eq!(Layout::Sequential.to_string(), "sequential");
        assert_eq!(Layout::Interleaved.to_string(), "interleaved");
    }
}
