//! Final checks on assembled records before they become `Sequence`s.

use super::assemble::RawRecord;
use super::header::Header;
use super::{PhylipError, PhylipResult};
use crate::alphabet::Alphabet;
use crate::model::Sequence;

/// Checks every record's length and symbols, in order, and freezes the
/// records into sequences. The first failing record aborts the whole set.
pub(crate) fn validate(
    records: Vec<RawRecord>,
    header: &Header,
    alphabet: &dyn Alphabet,
) -> PhylipResult<Vec<Sequence>> {
    if records.len() != header.sequence_count {
        return Err(PhylipError::UnexpectedEof {
            context: format!(
                "expected {} sequences, found {}",
                header.sequence_count,
                records.len()
            ),
        });
    }

    records
        .into_iter()
        .map(|record| {
            if record.len != header.sequence_length {
                return Err(PhylipError::SequenceLengthMismatch {
                    name: record.name,
                    expected: header.sequence_length,
                    found: record.len,
                });
            }
            if let Some((position, symbol)) = alphabet.first_illegal(&record.data) {
                return Err(PhylipError::IllegalSymbol {
                    symbol,
                    position,
                    name: record.name,
                    alphabet: alphabet.canonical_symbols().to_string(),
                });
            }
            Ok(Sequence::new(record.name, record.data))
        })
        .collect()
}
