//! Sequential vs. interleaved layout detection.
//!
//! The decision is made once, from the first block of the body, and is never
//! revisited: a later inconsistency is a hard error in the assembler rather
//! than a reason to switch layouts.

use log::debug;

use super::header::Header;
use super::line::{classify, payload_len, split_name, BodyLine};
use super::{NameStyle, PhylipError, PhylipResult, ReaderOptions};
use crate::model::Layout;

pub(crate) fn detect_layout(
    body: &[BodyLine<'_>],
    header: &Header,
    options: &ReaderOptions,
) -> PhylipResult<Layout> {
    let count = header.sequence_count;
    let length = header.sequence_length;

    if body.len() < count {
        return Err(PhylipError::UnexpectedEof {
            context: format!(
                "expected at least {} sequence lines after the header, found {}",
                count,
                body.len()
            ),
        });
    }

    let first = &body[0];
    let (name, rest) = split_name(first.text, options).ok_or_else(|| {
        PhylipError::AmbiguousOrInvalidLayout {
            line: first.number,
            reason: "first sequence line has no name".to_string(),
        }
    })?;
    let width = payload_len(rest);

    if width > length {
        return Err(PhylipError::SequenceTooLong {
            name: name.to_string(),
            line: first.number,
            expected: length,
        });
    }

    // First-line evidence wins: a complete sequence on the first line means
    // sequential, whatever the following lines look like.
    let layout = if width == length || count == 1 {
        Layout::Sequential
    } else {
        let sequential = sequential_fits(&body[1..], width, length);
        let interleaved = interleaved_fits(&body[..count], width, options);
        let separated = body.get(count).is_some_and(|l| l.after_blank);

        match (sequential, interleaved) {
            (true, false) => Layout::Sequential,
            (false, true) => Layout::Interleaved,
            (true, true) if separated => Layout::Interleaved,
            (true, true) => {
                return Err(PhylipError::AmbiguousOrInvalidLayout {
                    line: first.number,
                    reason: "first block reads both as sequential and as interleaved data".to_string(),
                })
            }
            (false, false) => {
                return Err(PhylipError::AmbiguousOrInvalidLayout {
                    line: first.number,
                    reason: neither_reason(first.text, options),
                })
            }
        }
    };

    debug!(
        "PHYLIP layout: {} (first chunk {} of {} columns)",
        layout, width, length
    );
    Ok(layout)
}

/// Continuation lines fill the first record to exactly `length` characters.
fn sequential_fits(continuation: &[BodyLine<'_>], width: usize, length: usize) -> bool {
    let mut filled = width;
    for line in continuation {
        if filled >= length {
            break;
        }
        filled += payload_len(line.text);
    }
    filled == length
}

/// The first `count` lines form one contiguous block of named chunks that
/// all have the first chunk's width.
fn interleaved_fits(block: &[BodyLine<'_>], width: usize, options: &ReaderOptions) -> bool {
    width > 0
        && block.iter().enumerate().all(|(i, line)| {
            (i == 0 || !line.after_blank)
                && split_name(line.text, options).is_some_and(|(_, rest)| payload_len(rest) == width)
        })
}

fn neither_reason(first_line: &str, options: &ReaderOptions) -> String {
    let reason = "first block matches neither the sequential nor the interleaved layout";
    if options.name_style == NameStyle::Bounded && classify(first_line).first_token_len > options.name_width {
        format!(
            "{} (names longer than {} characters need the relaxed name style)",
            reason, options.name_width
        )
    } else {
        reason.to_string()
    }
}
