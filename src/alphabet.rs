//! Symbol alphabets used to validate sequence data.
//!
//! The reader only needs a narrow capability: "is this character a legal
//! residue or gap symbol?" plus a canonical listing of the accepted symbols
//! for error messages. That capability is the [`Alphabet`] trait.
//!
//! [`SeqAlphabet`] is the stock implementation. Letters are matched
//! case-insensitively unless the alphabet is built as case sensitive:
//! `acgt` is accepted by the DNA alphabet, which lists its symbols as
//! `ACGT...`.

use std::fmt;
use std::str::FromStr;

/// Decides which characters are legal sequence symbols.
pub trait Alphabet {
    /// Short name used in diagnostics (e.g. "protein").
    fn name(&self) -> &str;

    /// Returns true if `symbol` may appear in a sequence.
    fn is_legal(&self, symbol: char) -> bool;

    /// The accepted symbols in canonical order.
    fn canonical_symbols(&self) -> &str;

    /// Finds the first rejected character and its 0-based position.
    fn first_illegal(&self, data: &str) -> Option<(usize, char)> {
        data.chars().enumerate().find(|&(_, c)| !self.is_legal(c))
    }
}

const GENERIC_SYMBOLS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ-.*?~";
const PROTEIN_SYMBOLS: &str = "ACDEFGHIKLMNOPQRSTUVWYBJZX*-";
const NUCLEIC_SYMBOLS: &str = "ACGTURYSWKMBDHVN-";
const DNA_SYMBOLS: &str = "GATCRYWSMKHBVDN-";
const RNA_SYMBOLS: &str = "GAUCRYWSMKHBVDN-";

/// A set of ASCII symbols with optional case folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqAlphabet {
    name: String,
    symbols: String,
    /// Lookup table indexed by ASCII code.
    legal: [bool; 128],
}

impl SeqAlphabet {
    /// Builds an alphabet from its canonical symbols.
    ///
    /// When `case_sensitive` is false, the other case of every letter in
    /// `symbols` is accepted as well. Non-ASCII characters in `symbols` are
    /// ignored, so a `SeqAlphabet` never accepts non-ASCII input.
    pub fn custom(name: impl Into<String>, symbols: &str, case_sensitive: bool) -> Self {
        let mut legal = [false; 128];
        let mut canonical = String::with_capacity(symbols.len());

        for c in symbols.chars().filter(char::is_ascii) {
            if legal[c as usize] {
                continue;
            }
            legal[c as usize] = true;
            canonical.push(c);
            if !case_sensitive {
                legal[c.to_ascii_lowercase() as usize] = true;
                legal[c.to_ascii_uppercase() as usize] = true;
            }
        }

        Self {
            name: name.into(),
            symbols: canonical,
            legal,
        }
    }

    /// Any letter plus the usual gap, stop and unknown markers.
    pub fn generic() -> Self {
        Self::custom("generic", GENERIC_SYMBOLS, false)
    }

    /// IUPAC amino acids, including selenocysteine (U), pyrrolysine (O),
    /// the ambiguity codes B, J, Z, X, stop and gap.
    pub fn protein() -> Self {
        Self::custom("protein", PROTEIN_SYMBOLS, false)
    }

    /// IUPAC nucleotides, DNA or RNA.
    pub fn nucleic() -> Self {
        Self::custom("nucleic", NUCLEIC_SYMBOLS, false)
    }

    pub fn dna() -> Self {
        Self::custom("dna", DNA_SYMBOLS, false)
    }

    pub fn rna() -> Self {
        Self::custom("rna", RNA_SYMBOLS, false)
    }
}

impl Default for SeqAlphabet {
    fn default() -> Self {
        Self::generic()
    }
}

impl Alphabet for SeqAlphabet {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_legal(&self, symbol: char) -> bool {
        symbol.is_ascii() && self.legal[symbol as usize]
    }

    fn canonical_symbols(&self) -> &str {
        &self.symbols
    }
}

impl fmt::Display for SeqAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.symbols)
    }
}

/// Error for unknown alphabet names.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown alphabet '{0}' (expected generic, protein, nucleic, dna or rna)")]
pub struct UnknownAlphabet(pub String);

impl FromStr for SeqAlphabet {
    type Err = UnknownAlphabet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::generic()),
            "protein" | "aa" => Ok(Self::protein()),
            "nucleic" | "nt" => Ok(Self::nucleic()),
            "dna" => Ok(Self::dna()),
            "rna" => Ok(Self::rna()),
            _ => Err(UnknownAlphabet(s.to_string())),
        }
    }
}
