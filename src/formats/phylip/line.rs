//! Line-level helpers: structural facts about raw lines and the split of a
//! data line into name token and payload.

use super::{NameStyle, ReaderOptions};

/// Structural facts about one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineClass {
    pub blank: bool,
    pub token_count: usize,
    pub first_token_len: usize,
    /// Exactly two tokens, both unsigned integers.
    pub header_like: bool,
}

pub(crate) fn classify(line: &str) -> LineClass {
    let mut tokens = line.split_whitespace();
    let first = tokens.next();
    let second = tokens.next();
    let rest = tokens.count();

    let token_count = first.map_or(0, |_| 1) + second.map_or(0, |_| 1) + rest;
    let header_like = match (first, second) {
        (Some(a), Some(b)) if rest == 0 => {
            a.parse::<usize>().is_ok() && b.parse::<usize>().is_ok()
        }
        _ => false,
    };

    LineClass {
        blank: token_count == 0,
        token_count,
        first_token_len: first.map_or(0, |t| t.chars().count()),
        header_like,
    }
}

/// A non-blank line of the alignment body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BodyLine<'a> {
    /// 1-based line number in the input
    pub number: usize,
    pub text: &'a str,
    /// At least one blank line separates this line from the previous one.
    pub after_blank: bool,
}

/// Collects the non-blank lines following the header line.
pub(crate) fn body_lines<'a>(lines: &[&'a str], header_idx: usize) -> Vec<BodyLine<'a>> {
    let mut body = Vec::with_capacity(lines.len().saturating_sub(header_idx + 1));
    let mut after_blank = false;

    for (idx, &text) in lines.iter().enumerate().skip(header_idx + 1) {
        if classify(text).blank {
            after_blank = true;
            continue;
        }
        body.push(BodyLine {
            number: idx + 1,
            text,
            after_blank,
        });
        after_blank = false;
    }

    body
}

/// Splits a data line into its name token and the rest of the line.
///
/// Returns `None` when the line carries no name.
pub(crate) fn split_name<'a>(line: &'a str, options: &ReaderOptions) -> Option<(&'a str, &'a str)> {
    let (name, rest) = match options.name_style {
        NameStyle::FixedWidth => {
            let end = byte_offset(line, options.name_width);
            (line[..end].trim(), &line[end..])
        }
        NameStyle::Bounded => {
            let line = line.trim_start();
            let token_end = line.find(char::is_whitespace).unwrap_or(line.len());
            let end = token_end.min(byte_offset(line, options.name_width));
            (&line[..end], &line[end..])
        }
        NameStyle::Relaxed => {
            let line = line.trim_start();
            let end = line.find(char::is_whitespace).unwrap_or(line.len());
            (&line[..end], &line[end..])
        }
    };

    if name.is_empty() {
        None
    } else {
        Some((name, rest))
    }
}

/// Number of sequence characters in a chunk, ignoring whitespace.
pub(crate) fn payload_len(chunk: &str) -> usize {
    chunk.chars().filter(|c| !c.is_whitespace()).count()
}

/// Byte offset of the `chars`-th character, or the end of the string.
fn byte_offset(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i)
}
