//! Data model for the alignment viewer.
//!
//! This module contains the data structures for representing:
//! - Sequences (one accession plus its aligned symbols)
//! - Alignments and their validation
//! - The sequence type hint used when choosing colors
//!
//! Everything here is built once at startup and read-only afterwards.

use std::fmt;
use std::ops::Range;

use thiserror::Error;

/// Smallest left margin, used when all accessions are very short.
pub const MIN_MARGIN_WIDTH: usize = 5;

/// Fraction of non-gap symbols that must be nucleotides for `guess` to say DNA.
const NUCLEOTIDE_FRACTION: f64 = 0.9;

/// Errors raised when an alignment is not usable as such.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("Sequence '{name}' has length {found}, expected {expected} (sequences are not aligned)")]
    InconsistentLength {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Represents a single sequence with its identifier and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    /// The accession (from the header, without '>')
    pub id: String,
    /// The aligned symbols, stored as raw bytes (alignment alphabets are ASCII)
    data: Vec<u8>,
}

impl Sequence {
    /// Creates a new sequence.
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into().into_bytes(),
        }
    }

    /// Creates a sequence from raw bytes, as produced by the parsers.
    pub fn from_bytes(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }

    /// Returns the length of the sequence.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the sequence as text. Non-UTF-8 content is shown as empty.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.data).unwrap_or("")
    }

    /// Gets a slice of the sequence data, clamped to the sequence bounds.
    pub fn slice(&self, range: Range<usize>) -> &[u8] {
        let start = range.start.min(self.data.len());
        let end = range.end.min(self.data.len()).max(start);
        &self.data[start..end]
    }
}

/// What kind of residues an alignment holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceType {
    Nucleotide,
    AminoAcid,
    /// Coding DNA read as codons (MACSE-style)
    Codon,
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceType::Nucleotide => write!(f, "DNA"),
            SequenceType::AminoAcid => write!(f, "amino acid"),
            SequenceType::Codon => write!(f, "codon"),
        }
    }
}

impl SequenceType {
    /// Guesses between nucleotide and amino acid from residue composition.
    ///
    /// Gaps, frameshift markers and other punctuation are ignored. An
    /// alignment without any residue is reported as nucleotide.
    pub fn guess(sequences: &[Sequence]) -> Self {
        let mut residues = 0usize;
        let mut nucleotides = 0usize;
        for b in sequences.iter().flat_map(|s| s.as_bytes()) {
            if !b.is_ascii_alphabetic() {
                continue;
            }
            residues += 1;
            if matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'U' | b'N') {
                nucleotides += 1;
            }
        }
        if residues == 0 || nucleotides as f64 >= NUCLEOTIDE_FRACTION * residues as f64 {
            SequenceType::Nucleotide
        } else {
            SequenceType::AminoAcid
        }
    }
}

/// Represents an alignment of multiple sequences.
#[derive(Debug, Clone)]
pub struct Alignment {
    /// All sequences, in file order
    pub sequences: Vec<Sequence>,
}

impl Alignment {
    /// Creates a new alignment from a vector of sequences.
    pub fn new(sequences: Vec<Sequence>) -> Self {
        Self { sequences }
    }

    /// Checks that all sequences have the same length and returns it.
    ///
    /// An alignment with no sequences has length 0.
    pub fn validate(&self) -> Result<usize, AlignmentError> {
        let Some(first) = self.sequences.first() else {
            return Ok(0);
        };
        let expected = first.len();
        match self.sequences.iter().find(|s| s.len() != expected) {
            Some(bad) => Err(AlignmentError::InconsistentLength {
                name: bad.id.clone(),
                expected,
                found: bad.len(),
            }),
            None => Ok(expected),
        }
    }

    /// Returns the number of sequences.
    pub fn sequence_count(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the maximum identifier length, in characters.
    pub fn max_id_length(&self) -> usize {
        self.sequences
            .iter()
            .map(|s| s.id.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Width of the left margin: the longest accession plus one separating
    /// space, never less than [`MIN_MARGIN_WIDTH`].
    pub fn margin_width(&self) -> usize {
        (self.max_id_length() + 1).max(MIN_MARGIN_WIDTH)
    }

    /// Gets a sequence by index.
    pub fn get(&self, index: usize) -> Option<&Sequence> {
        self.sequences.get(index)
    }
}
