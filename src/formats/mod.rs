//! Alignment file formats.
//!
//! Only PHYLIP is parsed. The other formats listed in [`FileFormat`] are
//! recognized from their first line so that a PHYLIP parse failure can say
//! what the input actually looks like:
//! - CLUSTAL (`CLUSTAL W (1.83) multiple sequence alignment`)
//! - FASTA (`>name`)
//! - NEXUS (`#NEXUS`)
//! - Stockholm (`# STOCKHOLM 1.0`)
//! - PHYLIP (`ntax nchar`)

pub mod phylip;

/// Alignment format recognized from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Clustal,
    Fasta,
    Nexus,
    Phylip,
    Stockholm,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Clustal => write!(f, "CLUSTAL"),
            FileFormat::Fasta => write!(f, "FASTA"),
            FileFormat::Nexus => write!(f, "NEXUS"),
            FileFormat::Phylip => write!(f, "PHYLIP"),
            FileFormat::Stockholm => write!(f, "Stockholm"),
        }
    }
}

/// Detects the file format by examining the first non-empty line.
pub fn detect_format_from_content(content: &str) -> Option<FileFormat> {
    let line = content.lines().map(str::trim).find(|l| !l.is_empty())?;
    detect_format_from_line(line)
}

/// Classifies a single (non-empty) line as the opening line of a format.
pub(crate) fn detect_format_from_line(line: &str) -> Option<FileFormat> {
    let trimmed = line.trim();
    let upper = trimmed.to_uppercase();

    // NEXUS: starts with #NEXUS (case-insensitive) - most specific
    if upper.starts_with("#NEXUS") {
        return Some(FileFormat::Nexus);
    }

    if upper.starts_with("# STOCKHOLM") {
        return Some(FileFormat::Stockholm);
    }

    if upper.starts_with("CLUSTAL") {
        return Some(FileFormat::Clustal);
    }

    // FASTA: starts with > - very clear indicator
    if trimmed.starts_with('>') {
        return Some(FileFormat::Fasta);
    }

    // PHYLIP: first line is "ntax nchar" (two integers)
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() == 2 && parts.iter().all(|p| p.parse::<usize>().is_ok()) {
        return Some(FileFormat::Phylip);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_fasta() {
        let content = ">seq1\nACGT\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Fasta));
    }

    #[test]
    fn test_detect_phylip() {
        let content = "  3   10\nseq1      ACGTACGTAC\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Phylip));
    }

    #[test]
    fn test_detect_nexus() {
        let content = "#NEXUS\nBEGIN DATA;\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Nexus));

        // Case insensitive
        let content2 = "#nexus\nbegin data;\n";
        assert_eq!(detect_format_from_content(content2), Some(FileFormat::Nexus));
    }

    #[test]
    fn test_detect_clustal_and_stockholm() {
        let clustal = "CLUSTAL W (1.83) multiple sequence alignment\n\nseq1  ACGT\n";
        assert_eq!(detect_format_from_content(clustal), Some(FileFormat::Clustal));
        let stockholm = "# STOCKHOLM 1.0\nseq1 ACGT\n//\n";
        assert_eq!(detect_format_from_content(stockholm), Some(FileFormat::Stockholm));
    }

    #[test]
    fn test_detect_unknown() {
        let content = "This is not a valid sequence file\n";
        assert_eq!(detect_format_from_content(content), None);
        assert_eq!(detect_format_from_content("3 10 5\n"), None);
        assert_eq!(detect_format_from_content(""), None);
    }

    #[test]
    fn test_detect_with_leading_empty_lines() {
        let content = "\n\n  \n>seq1\nACGT\n";
        assert_eq!(detect_format_from_content(content), Some(FileFormat::Fasta));
    }
}
