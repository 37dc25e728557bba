//! alv - console alignment viewer
//!
//! ## Usage
//!
//! ```bash
//! alv <alignment_file>
//! alv -f stockholm PF00244.sto
//! alv -w 60 aln.fasta | less -R   # fixed block width
//! alv -k aln.fasta > colored.txt  # keep colors when redirecting
//! ```
//!
//! Set `RUST_LOG=debug` for diagnostics on stderr.

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, ErrorKind};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info, log_enabled, Level};

use alv::colors::{ColorMapper, ColorScheme};
use alv::formats::{parse_file_as, FileFormat};
use alv::layout::plan_blocks;
use alv::model::SequenceType;
use alv::render::{OutputMode, Renderer};
use alv::terminal::{stdout_is_terminal, terminal_size};

/// Color scheme names for the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemeArg {
    Clustal,
    Zappo,
    Taylor,
    Hydrophobicity,
}

impl From<SchemeArg> for ColorScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::Clustal => ColorScheme::Clustal,
            SchemeArg::Zappo => ColorScheme::Zappo,
            SchemeArg::Taylor => ColorScheme::Taylor,
            SchemeArg::Hydrophobicity => ColorScheme::Hydrophobicity,
        }
    }
}

/// File format specification for command line
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// FASTA format
    Fasta,
    /// Clustal format
    Clustal,
    /// PHYLIP format (sequential or interleaved)
    Phylip,
    /// Stockholm format
    Stockholm,
    /// MACSE output: coding DNA in FASTA, frameshifts marked with '!'
    Macse,
}

impl From<FormatArg> for FileFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Fasta => FileFormat::Fasta,
            FormatArg::Clustal => FileFormat::Clustal,
            FormatArg::Phylip => FileFormat::Phylip,
            FormatArg::Stockholm => FileFormat::Stockholm,
            FormatArg::Macse => FileFormat::Macse,
        }
    }
}

/// Sequence type hint
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TypeArg {
    /// Amino acids
    Aa,
    /// Nucleotides
    Dna,
    /// Coding DNA, colored by codon
    Codon,
    /// Leave the type open (the guess is only reported with RUST_LOG=debug)
    Guess,
}

/// alv - A console-based sequence alignment viewer
///
/// Prints the alignment in blocks that fit the terminal width, with
/// residues colored by the selected scheme.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Alignment file to display
    infile: PathBuf,

    /// Color scheme for amino acids and coding DNA. The clustal scheme is an
    /// approximation, due to the limited color choices for consoles.
    #[arg(short = 'c', long = "color-scheme", value_enum, default_value = "clustal")]
    color_scheme: SchemeArg,

    /// Alignment file format
    #[arg(short = 'f', long = "format", value_enum, default_value = "fasta")]
    format: FormatArg,

    /// Do not strip colors when output is redirected to a file or pipe
    #[arg(short = 'k', long = "keep-colors-when-redirecting")]
    keep_colors_when_redirecting: bool,

    /// Sequence type to assume
    #[arg(short = 't', long = "type", value_enum, default_value = "guess")]
    seq_type: TypeArg,

    /// Width of alignment blocks. 0 means terminal width minus name width
    #[arg(short = 'w', long = "width", default_value = "0")]
    width: usize,
}

fn run(args: Args) -> Result<()> {
    let format: FileFormat = args.format.into();
    let alignment = parse_file_as(&args.infile, format).with_context(|| {
        format!(
            "Cannot read {} as {}",
            args.infile.display(),
            format
        )
    })?;
    let aln_len = alignment
        .validate()
        .with_context(|| format!("Invalid alignment in {}", args.infile.display()))?;
    info!(
        "Loaded {} sequences of length {} from {}",
        alignment.sequence_count(),
        aln_len,
        args.infile.display()
    );

    let seq_type = match args.seq_type {
        TypeArg::Aa => Some(SequenceType::AminoAcid),
        TypeArg::Dna => Some(SequenceType::Nucleotide),
        TypeArg::Codon => Some(SequenceType::Codon),
        TypeArg::Guess => None,
    };
    // The guess does not change the coloring, only the log
    if seq_type.is_none() && log_enabled!(Level::Debug) {
        debug!(
            "Guessed sequence type: {}",
            SequenceType::guess(&alignment.sequences)
        );
    }
    let mapper = ColorMapper::for_sequence_type(args.color_scheme.into(), seq_type)?;

    let margin_width = alignment.margin_width();
    let forced_width = (args.width > 0).then_some(args.width);
    let (columns, _) = terminal_size();
    let blocks = plan_blocks(aln_len, margin_width, columns as usize, forced_width)?;
    debug!(
        "Margin {}, terminal {} columns, {} blocks",
        margin_width,
        columns,
        blocks.len()
    );

    let mode = OutputMode::select(args.keep_colors_when_redirecting, stdout_is_terminal());
    let renderer = Renderer::new(mapper, mode);
    debug!("Output mode: {:?}", renderer.mode());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match renderer.write_to(&mut handle, &alignment.sequences, margin_width, &blocks) {
        // Reader went away (e.g. `alv aln.fa | head`), nothing left to do
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other.context("Failed to write to stdout"),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    run(Args::parse())
}
