//! FASTA file parser.
//!
//! Handles both single-line and multi-line sequences. The MACSE dialect
//! (coding DNA with `!` frameshift markers) is plain FASTA as far as
//! parsing goes, so it is read by this module too.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence_identifier optional description
//! ACGTACGTACGT...
//! >another_sequence
//! TGCATGCATGCA...
//! ```

use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// Parses FASTA content from a string.
///
/// The accession is the header text up to the first whitespace.
/// Whitespace inside sequence lines is dropped.
pub fn parse_fasta_str(content: &str) -> FastaResult<Alignment> {
    let mut sequences = Vec::new();
    let mut current_id: Option<&str> = None;
    let mut current_seq: Vec<u8> = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                sequences.push(Sequence::from_bytes(id, std::mem::take(&mut current_seq)));
            }

            let id = header.split_whitespace().next().unwrap_or(header);
            if id.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence identifier at line {}",
                    line_number
                )));
            }
            current_id = Some(id);
        } else {
            if current_id.is_none() {
                return Err(FastaError::SequenceWithoutHeader(line_number));
            }

            // Most lines have no internal whitespace
            if line.bytes().all(|b| !b.is_ascii_whitespace()) {
                current_seq.extend_from_slice(line.as_bytes());
            } else {
                current_seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
            }
        }
    }

    if let Some(id) = current_id {
        sequences.push(Sequence::from_bytes(id, current_seq));
    }

    if sequences.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(Alignment::new(sequences))
}
