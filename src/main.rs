//! msaread - PHYLIP alignment reader
//!
//! ## Usage
//!
//! ```bash
//! msaread <file.phy>                  # summary: dimensions, layout, names
//! msaread -a protein <file.phy>       # validate against the protein alphabet
//! msaread -o out.fasta <file.phy>     # convert to FASTA ("-" for stdout)
//! ```
//!
//! Set `RUST_LOG=debug` to see the header and layout decisions.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use msaread::alphabet::SeqAlphabet;
use msaread::formats::phylip::{NameStyle, PhylipReader, DEFAULT_NAME_WIDTH};
use msaread::model::Alignment;

/// Alphabet specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlphabetArg {
    /// Any letter plus - . * ? ~
    Generic,
    /// IUPAC amino acids
    Protein,
    /// IUPAC nucleotides (DNA or RNA)
    Nucleic,
    /// IUPAC DNA
    Dna,
    /// IUPAC RNA
    Rna,
}

impl From<AlphabetArg> for SeqAlphabet {
    fn from(arg: AlphabetArg) -> Self {
        match arg {
            AlphabetArg::Generic => SeqAlphabet::generic(),
            AlphabetArg::Protein => SeqAlphabet::protein(),
            AlphabetArg::Nucleic => SeqAlphabet::nucleic(),
            AlphabetArg::Dna => SeqAlphabet::dna(),
            AlphabetArg::Rna => SeqAlphabet::rna(),
        }
    }
}

/// msaread - read and validate PHYLIP alignments
///
/// Without -o/--output, prints a summary of the alignment.
/// With -o/--output, writes the sequences as FASTA to a file (or stdout with "-").
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// PHYLIP file (sequential or interleaved)
    file: PathBuf,

    /// Alphabet the sequences are validated against
    #[arg(short = 'a', long = "alphabet", value_enum, default_value = "generic")]
    alphabet: AlphabetArg,

    /// Names are the first N columns and may contain spaces
    #[arg(long = "strict-names", conflicts_with = "relaxed_names")]
    strict_names: bool,

    /// Names are whitespace-delimited tokens of any length
    #[arg(long = "relaxed-names")]
    relaxed_names: bool,

    /// Maximum name width (strict and default name styles)
    #[arg(short = 'w', long = "name-width", default_value_t = DEFAULT_NAME_WIDTH)]
    name_width: usize,

    /// Output FASTA file (enables conversion). Use "-" for stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<String>,
}

impl Args {
    fn name_style(&self) -> NameStyle {
        if self.strict_names {
            NameStyle::FixedWidth
        } else if self.relaxed_names {
            NameStyle::Relaxed
        } else {
            NameStyle::Bounded
        }
    }
}

/// Writes sequences as FASTA, one line per sequence.
fn write_fasta<W: Write>(out: &mut W, alignment: &Alignment) -> io::Result<()> {
    for seq in alignment.iter() {
        writeln!(out, ">{}", seq.name())?;
        writeln!(out, "{}", seq.as_str())?;
    }
    Ok(())
}

fn print_summary(alignment: &Alignment) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(
        handle,
        "{} sequences x {} columns ({})",
        alignment.sequence_count(),
        alignment.alignment_length(),
        alignment.layout
    )?;
    let width = alignment.max_name_length();
    for seq in alignment.iter() {
        writeln!(handle, "  {:<width$}  {}", seq.name(), seq.slice(0..40), width = width)?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.name_width == 0 && !args.relaxed_names {
        anyhow::bail!("Name width must be at least 1 (use --relaxed-names for unbounded names)");
    }

    let alphabet: SeqAlphabet = args.alphabet.into();
    let reader = PhylipReader::new()
        .alphabet(&alphabet)
        .name_style(args.name_style())
        .name_width(args.name_width);
    info!("Reading {} with {:?}", args.file.display(), reader);

    let alignment = reader
        .parse_file(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    match args.output.as_deref() {
        None => print_summary(&alignment)?,
        Some("-") => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_fasta(&mut handle, &alignment)?;
        }
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path))?;
            write_fasta(&mut file, &alignment)?;
            eprintln!(
                "Wrote {} sequences to {}",
                alignment.sequence_count(),
                path
            );
        }
    }

    Ok(())
}
