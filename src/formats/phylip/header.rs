//! Header line: `<sequence count> <sequence length>`.

use log::debug;

use super::line::classify;
use super::{PhylipError, PhylipResult};
use crate::formats::{detect_format_from_line, FileFormat};

/// Dimensions declared on the first line of a PHYLIP file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub sequence_count: usize,
    pub sequence_length: usize,
}

/// Finds and parses the header. Returns the header's line index together
/// with the parsed dimensions.
pub(crate) fn parse_header(lines: &[&str]) -> PhylipResult<(usize, Header)> {
    let Some(idx) = lines.iter().position(|l| !classify(l).blank) else {
        return Err(PhylipError::MalformedHeader {
            line: lines.len(),
            reason: "no header line found before end of input".to_string(),
            hint: None,
        });
    };

    let text = lines[idx].trim();
    let malformed = |reason: String| PhylipError::MalformedHeader {
        line: idx + 1,
        reason,
        hint: detect_format_from_line(text).filter(|f| *f != FileFormat::Phylip),
    };

    if classify(text).token_count != 2 {
        return Err(malformed(format!(
            "expected 'ntax nchar' (two integers), got '{}'",
            text
        )));
    }

    let parts: Vec<&str> = text.split_whitespace().collect();
    let sequence_count = parse_dimension(parts[0], "sequence count").map_err(malformed)?;
    let sequence_length = parse_dimension(parts[1], "sequence length").map_err(malformed)?;

    debug!(
        "PHYLIP header at line {}: {} sequences of length {}",
        idx + 1,
        sequence_count,
        sequence_length
    );

    Ok((
        idx,
        Header {
            sequence_count,
            sequence_length,
        },
    ))
}

fn parse_dimension(token: &str, what: &str) -> Result<usize, String> {
    match token.parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).map_err(|_| format!("{} '{}' is too large", what, token)),
        Ok(_) => Err(format!("{} must be positive, got '{}'", what, token)),
        Err(_) => Err(format!("{} '{}' is not a valid number", what, token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_error(lines: &[&str]) -> (usize, String, Option<FileFormat>) {
        match parse_header(lines) {
            Err(PhylipError::MalformedHeader { line, reason, hint }) => (line, reason, hint),
            other => panic!("expected MalformedHeader, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_header_skips_blank_lines() {
        let (idx, header) = parse_header(&["", "   ", "  6   20  ", "x"]).unwrap();
        assert_eq!(idx, 2);
        assert_eq!(header.sequence_count, 6);
        assert_eq!(header.sequence_length, 20);
    }

    #[test]
    fn test_empty_input() {
        let (line, reason, hint) = header_error(&[]);
        assert_eq!(line, 0);
        assert!(reason.contains("no header"));
        assert_eq!(hint, None);
        header_error(&["", "  "]);
    }

    #[test]
    fn test_wrong_token_count() {
        header_error(&["6"]);
        header_error(&["6 20 I"]);
    }

    #[test]
    fn test_non_numeric_and_non_positive() {
        let (_, reason, _) = header_error(&["six 20"]);
        assert!(reason.contains("not a valid number"));
        let (_, reason, _) = header_error(&["6 0"]);
        assert!(reason.contains("must be positive"));
        let (_, reason, _) = header_error(&["-6 20"]);
        assert!(reason.contains("must be positive"));
        header_error(&["6 2.5"]);
    }

    #[test]
    fn test_other_format_hint() {
        let (line, _, hint) = header_error(&["", "CLUSTAL W (1.83) multiple sequence alignment"]);
        assert_eq!(line, 2);
        assert_eq!(hint, Some(FileFormat::Clustal));
        let (_, _, hint) = header_error(&[">seq1 description"]);
        assert_eq!(hint, Some(FileFormat::Fasta));
    }
}
