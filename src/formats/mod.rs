//! Multi-format alignment file parser.
//!
//! Supports:
//! - FASTA
//! - Clustal (ClustalW, Clustal Omega, MUSCLE)
//! - PHYLIP (sequential and interleaved)
//! - Stockholm
//! - MACSE (FASTA with `!` frameshift markers in coding DNA)
//!
//! The format is always chosen explicitly (`-f/--format`, FASTA by default).

pub mod clustal;
pub mod fasta;
pub mod phylip;
pub mod stockholm;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::model::Alignment;

/// Supported alignment file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Clustal,
    Phylip,
    Stockholm,
    Macse,
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Fasta => write!(f, "FASTA"),
            FileFormat::Clustal => write!(f, "Clustal"),
            FileFormat::Phylip => write!(f, "PHYLIP"),
            FileFormat::Stockholm => write!(f, "Stockholm"),
            FileFormat::Macse => write!(f, "MACSE"),
        }
    }
}

/// Errors that can occur during file parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty file")]
    EmptyFile,

    #[error("FASTA error: {0}")]
    FastaError(#[from] fasta::FastaError),

    #[error("Clustal error: {0}")]
    ClustalError(#[from] clustal::ClustalError),

    #[error("PHYLIP error: {0}")]
    PhylipError(#[from] phylip::PhylipError),

    #[error("Stockholm error: {0}")]
    StockholmError(#[from] stockholm::StockholmError),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses content with a specific format.
pub fn parse_content(content: &str, format: FileFormat) -> ParseResult<Alignment> {
    let alignment = match format {
        FileFormat::Fasta | FileFormat::Macse => fasta::parse_fasta_str(content)?,
        FileFormat::Clustal => clustal::parse_clustal_str(content)?,
        FileFormat::Phylip => phylip::parse_phylip_str(content)?,
        FileFormat::Stockholm => stockholm::parse_stockholm_str(content)?,
    };
    Ok(alignment)
}

/// Reads a sequence file and parses it as `format`.
pub fn parse_file_as<P: AsRef<Path>>(path: P, format: FileFormat) -> ParseResult<Alignment> {
    let file = File::open(&path)?;
    let file_size = file.metadata()?.len() as usize;

    if file_size == 0 {
        return Err(ParseError::EmptyFile);
    }

    let mut reader = BufReader::with_capacity(1024 * 1024, file);
    let mut content = String::with_capacity(file_size);
    reader.read_to_string(&mut content)?;

    parse_content(&content, format)
}
