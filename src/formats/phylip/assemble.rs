//! Accumulates per-record character buffers for each layout.
//!
//! Records live in a vector indexed by first-appearance order. They only
//! ever grow, and never past the declared sequence length.

use log::trace;

use super::header::Header;
use super::line::{classify, payload_len, split_name, BodyLine};
use super::{PhylipError, PhylipResult, ReaderOptions};

/// Upper bound on the buffer reserved up front for one record; the declared
/// length is untrusted until the data backs it.
const MAX_RESERVED: usize = 1 << 16;

/// A sequence under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawRecord {
    pub name: String,
    pub data: String,
    /// Characters in `data` (not bytes).
    pub len: usize,
}

impl RawRecord {
    fn new(name: &str, capacity: usize) -> Self {
        Self {
            name: name.to_string(),
            data: String::with_capacity(capacity.min(MAX_RESERVED)),
            len: 0,
        }
    }

    /// Appends the non-whitespace characters of `chunk`, refusing to grow
    /// past `limit`.
    fn extend(&mut self, chunk: &str, limit: usize, line: usize) -> PhylipResult<()> {
        for c in chunk.chars().filter(|c| !c.is_whitespace()) {
            if self.len == limit {
                return Err(PhylipError::SequenceTooLong {
                    name: self.name.clone(),
                    line,
                    expected: limit,
                });
            }
            self.data.push(c);
            self.len += 1;
        }
        Ok(())
    }
}

/// Starts a record from a line that must carry a name.
fn named_record(line: &BodyLine<'_>, header: &Header, options: &ReaderOptions) -> PhylipResult<RawRecord> {
    let (name, rest) = split_name(line.text, options).ok_or_else(|| PhylipError::AmbiguousOrInvalidLayout {
        line: line.number,
        reason: "expected a sequence name".to_string(),
    })?;
    let mut record = RawRecord::new(name, header.sequence_length);
    record.extend(rest, header.sequence_length, line.number)?;
    Ok(record)
}

/// Each record: a name line, then continuation lines until the record holds
/// exactly `sequence_length` characters.
pub(crate) fn assemble_sequential(
    body: &[BodyLine<'_>],
    header: &Header,
    options: &ReaderOptions,
) -> PhylipResult<Vec<RawRecord>> {
    let length = header.sequence_length;
    let mut records = Vec::with_capacity(header.sequence_count.min(body.len()));
    let mut lines = body.iter();

    while records.len() < header.sequence_count {
        let line = lines.next().ok_or_else(|| PhylipError::UnexpectedEof {
            context: format!(
                "expected {} sequences, found {}",
                header.sequence_count,
                records.len()
            ),
        })?;
        let mut record = named_record(line, header, options)?;

        while record.len < length {
            let line = lines.next().ok_or_else(|| PhylipError::UnexpectedEof {
                context: format!(
                    "sequence '{}' ended after {} of {} characters",
                    record.name, record.len, length
                ),
            })?;
            record.extend(line.text, length, line.number)?;
        }

        trace!("sequential record {} '{}' complete", records.len(), record.name);
        records.push(record);
    }

    if let Some(extra) = lines.next() {
        let reason = if classify(extra.text).header_like {
            "a second data set follows; only one alignment per file is supported".to_string()
        } else {
            format!(
                "unexpected data after the last of {} sequences",
                header.sequence_count
            )
        };
        return Err(PhylipError::AmbiguousOrInvalidLayout {
            line: extra.number,
            reason,
        });
    }

    Ok(records)
}

/// The first `sequence_count` lines carry the names; every later line is a
/// nameless chunk for the record at its position within the current block.
pub(crate) fn assemble_interleaved(
    body: &[BodyLine<'_>],
    header: &Header,
    options: &ReaderOptions,
) -> PhylipResult<Vec<RawRecord>> {
    let count = header.sequence_count;
    let length = header.sequence_length;

    if body.len() < count {
        return Err(PhylipError::UnexpectedEof {
            context: format!("first block has {} of {} sequences", body.len(), count),
        });
    }

    let (first_block, rest) = body.split_at(count);
    let mut records = first_block
        .iter()
        .map(|line| named_record(line, header, options))
        .collect::<PhylipResult<Vec<_>>>()?;

    let mut slot = 0;
    let mut block_width = 0;
    for line in rest {
        if line.after_blank && slot != 0 {
            return Err(PhylipError::RecordCountMismatch {
                line: line.number,
                expected: count,
                found: slot,
            });
        }

        // Names appear in the first block only.
        if let Some((name, _)) = split_name(line.text, options) {
            if name == records[slot].name {
                return Err(PhylipError::AmbiguousOrInvalidLayout {
                    line: line.number,
                    reason: format!("sequence name '{}' repeated after the first block", name),
                });
            }
        }

        // Every record advances by the same number of columns per block.
        let width = payload_len(line.text);
        if slot == 0 {
            block_width = width;
        } else if width != block_width {
            return Err(PhylipError::AmbiguousOrInvalidLayout {
                line: line.number,
                reason: format!(
                    "block line holds {} characters where the block started with {}",
                    width, block_width
                ),
            });
        }

        records[slot].extend(line.text, length, line.number)?;
        slot = (slot + 1) % count;
    }

    if slot != 0 {
        return Err(PhylipError::RecordCountMismatch {
            line: rest.last().map_or(0, |l| l.number),
            expected: count,
            found: slot,
        });
    }

    trace!("interleaved: {} records from {} lines", records.len(), body.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::phylip::line::body_lines;

    fn body<'a>(lines: &'a [&'a str]) -> Vec<BodyLine<'a>> {
        // Line 0 plays the header.
        body_lines(lines, 0)
    }

    fn header(sequence_count: usize, sequence_length: usize) -> Header {
        Header {
            sequence_count,
            sequence_length,
        }
    }

    fn data(records: &[RawRecord]) -> Vec<(&str, &str)> {
        records.iter().map(|r| (r.name.as_str(), r.data.as_str())).collect()
    }

    #[test]
    fn test_sequential_wrapped() {
        let lines = ["2 10", "one  ACGT AC", "GTAC", "", "two  TTTT", "GGGG CC"];
        let records = assemble_sequential(&body(&lines), &header(2, 10), &ReaderOptions::default()).unwrap();
        assert_eq!(data(&records), [("one", "ACGTACGTAC"), ("two", "TTTTGGGGCC")]);
        assert_eq!(records[1].len, 10);
    }

    #[test]
    fn test_sequential_keeps_duplicate_names() {
        let lines = ["2 4", "x ACGT", "x TTTT"];
        let records = assemble_sequential(&body(&lines), &header(2, 4), &ReaderOptions::default()).unwrap();
        assert_eq!(data(&records), [("x", "ACGT"), ("x", "TTTT")]);
    }

    #[test]
    fn test_sequential_eof_mid_record() {
        let lines = ["2 8", "a ACGT", "ACGT", "b ACGT"];
        let result = assemble_sequential(&body(&lines), &header(2, 8), &ReaderOptions::default());
        match result {
            Err(PhylipError::UnexpectedEof { context }) => assert!(context.contains("'b'"), "{}", context),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sequential_overshoot() {
        let lines = ["1 6", "a ACGT", "ACGT"];
        let result = assemble_sequential(&body(&lines), &header(1, 6), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::SequenceTooLong { line: 3, expected: 6, .. })
        ));
    }

    #[test]
    fn test_sequential_trailing_data() {
        let lines = ["1 4", "a ACGT", "b ACGT"];
        let result = assemble_sequential(&body(&lines), &header(1, 4), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::AmbiguousOrInvalidLayout { line: 3, .. })
        ));

        let lines = ["1 4", "a ACGT", "1 4", "a ACGT"];
        match assemble_sequential(&body(&lines), &header(1, 4), &ReaderOptions::default()) {
            Err(PhylipError::AmbiguousOrInvalidLayout { reason, .. }) => {
                assert!(reason.contains("second data set"), "{}", reason)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_interleaved_blocks() {
        let lines = ["3 6", "a AC", "b GG", "c TT", "", "GT", "CC", "AA", "", "AC", "G T", "TT"];
        let records = assemble_interleaved(&body(&lines), &header(3, 6), &ReaderOptions::default()).unwrap();
        assert_eq!(data(&records), [("a", "ACGTAC"), ("b", "GGCCGT"), ("c", "TTAATT")]);
    }

    #[test]
    fn test_interleaved_without_separators() {
        let lines = ["2 6", "a AC", "b GG", "GT", "CC", "AC", "GT"];
        let records = assemble_interleaved(&body(&lines), &header(2, 6), &ReaderOptions::default()).unwrap();
        assert_eq!(data(&records), [("a", "ACGTAC"), ("b", "GGCCGT")]);
    }

    #[test]
    fn test_interleaved_short_block() {
        let lines = ["2 6", "a AC", "b GG", "", "GT", "", "CC", "AA"];
        let result = assemble_interleaved(&body(&lines), &header(2, 6), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::RecordCountMismatch { line: 7, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_interleaved_eof_mid_block() {
        let lines = ["2 4", "a AC", "b GG", "", "GT"];
        let result = assemble_interleaved(&body(&lines), &header(2, 4), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::RecordCountMismatch { line: 5, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_interleaved_overshoot() {
        let lines = ["2 4", "a AC", "b GG", "", "GT", "CC", "", "AA", "TT"];
        let result = assemble_interleaved(&body(&lines), &header(2, 4), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::SequenceTooLong { ref name, line: 8, expected: 4 }) if name == "a"
        ));
    }

    #[test]
    fn test_interleaved_leaves_short_records_to_validation() {
        let lines = ["2 6", "a AC", "b GG", "", "GT", "CC"];
        let records = assemble_interleaved(&body(&lines), &header(2, 6), &ReaderOptions::default()).unwrap();
        assert_eq!(records[0].len, 4);
        assert_eq!(records[1].len, 4);
    }

    #[test]
    fn test_interleaved_rejects_repeated_names() {
        let lines = ["2 7", "ab ACG", "cd TTA", "", "ab AC", "cd GG"];
        let result = assemble_interleaved(&body(&lines), &header(2, 7), &ReaderOptions::default());
        match result {
            Err(PhylipError::AmbiguousOrInvalidLayout { line, reason }) => {
                assert_eq!(line, 5);
                assert!(reason.contains("'ab'"), "{}", reason);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_interleaved_rejects_ragged_block() {
        // Totals add up, but the second and third blocks disagree on width.
        let lines = ["2 6", "a AC", "b GG", "", "GTA", "C", "", "C", "AAT"];
        let result = assemble_interleaved(&body(&lines), &header(2, 6), &ReaderOptions::default());
        assert!(matches!(
            result,
            Err(PhylipError::AmbiguousOrInvalidLayout { line: 6, .. })
        ));
    }

    #[test]
    fn test_huge_declared_length_reserves_little() {
        let lines = ["1 99999999999999", "a ACGT"];
        let record = named_record(&body(&lines)[0], &header(1, 99_999_999_999_999), &ReaderOptions::default()).unwrap();
        assert_eq!(record.len, 4);
        assert!(record.data.capacity() < 1 << 30);
    }
}
