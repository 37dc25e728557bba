//! PHYLIP format parser.
//!
//! Supports both sequential and interleaved PHYLIP formats.
//!
//! ## PHYLIP Format
//!
//! The first line contains the number of sequences and the sequence length:
//! ```text
//!  3 10
//! ```
//!
//! ### Sequential Format
//! Each sequence name followed by all its data, possibly over several lines:
//! ```text
//!  2 20
//! Seq1      ACGTACGTAC
//! GGGGGGGGGG
//! Seq2      TGCATGCATG
//! CCCCCCCCCC
//! ```
//!
//! ### Interleaved Format
//! Names on the first block, then data continues in blank-line separated blocks:
//! ```text
//!  3 20
//! Seq1      ACGTACGTAC
//! Seq2      TGCATGCATG
//! Seq3      AAAACCCCGG
//!
//! GTGTGTGTGT
//! CACACACACA
//! TTTTTTTTTT
//! ```
//!
//! Names are not required to be exactly 10 characters; the name is the
//! first whitespace-separated token of a record's first line.

use log::warn;
use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur during PHYLIP parsing.
#[derive(Error, Debug)]
pub enum PhylipError {
    #[error("Empty PHYLIP file")]
    EmptyFile,

    #[error("Invalid header: expected 'ntax nchar' (two integers), got '{0}'")]
    InvalidHeader(String),

    #[error("Invalid sequence count in header: '{0}' is not a valid number")]
    InvalidSequenceCount(String),

    #[error("Invalid sequence length in header: '{0}' is not a valid number")]
    InvalidSequenceLength(String),

    #[error("No sequence data found after header")]
    NoSequenceData,

    #[error("Line {line}: {message}")]
    ParseError { line: usize, message: String },
}

/// Result type for PHYLIP operations.
pub type PhylipResult<T> = Result<T, PhylipError>;

/// Parses PHYLIP content from a string.
pub fn parse_phylip_str(content: &str) -> PhylipResult<Alignment> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines
        .by_ref()
        .find(|(_, line)| !line.trim().is_empty())
        .ok_or(PhylipError::EmptyFile)?;

    let (ntax, nchar) = parse_header(header.trim())?;

    let sequences = parse_records(lines, ntax, nchar)?;
    if sequences.len() != ntax {
        warn!(
            "PHYLIP header announces {} sequences, found {}",
            ntax,
            sequences.len()
        );
    }

    Ok(Alignment::new(sequences))
}

fn parse_header(header: &str) -> PhylipResult<(usize, usize)> {
    let mut parts = header.split_whitespace();
    let (Some(ntax), Some(nchar)) = (parts.next(), parts.next()) else {
        return Err(PhylipError::InvalidHeader(header.to_string()));
    };

    let ntax: usize = ntax
        .parse()
        .map_err(|_| PhylipError::InvalidSequenceCount(ntax.to_string()))?;
    let nchar: usize = nchar
        .parse()
        .map_err(|_| PhylipError::InvalidSequenceLength(nchar.to_string()))?;

    if ntax == 0 {
        return Err(PhylipError::InvalidSequenceCount("0".to_string()));
    }
    Ok((ntax, nchar))
}

/// Checks if a character is a valid sequence character.
fn is_sequence_char(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '-' | '.' | '*' | '?' | '!')
}

fn residues(text: &str) -> impl Iterator<Item = u8> + '_ {
    text.bytes().filter(|b| !b.is_ascii_whitespace())
}

/// A line continues the previous record when that record is still short,
/// the line holds nothing but sequence characters and its residues fit in
/// what is still missing.
fn is_continuation(previous: Option<&(String, Vec<u8>)>, line: &str, nchar: usize) -> bool {
    let Some((_, data)) = previous else {
        return false;
    };
    let missing = nchar.saturating_sub(data.len());
    missing > 0
        && line
            .chars()
            .all(|c| c.is_whitespace() || is_sequence_char(c))
        && residues(line).count() <= missing
}

fn parse_records<'a>(
    lines: impl Iterator<Item = (usize, &'a str)>,
    ntax: usize,
    nchar: usize,
) -> PhylipResult<Vec<Sequence>> {
    let mut records: Vec<(String, Vec<u8>)> = Vec::with_capacity(ntax);
    let mut interleaved = false;
    let mut row = 0;

    for (idx, line) in lines {
        let line = line.trim();

        if line.is_empty() {
            // A blank line after the first ntax names starts an interleaved block
            if records.len() == ntax {
                interleaved = true;
                row = 0;
            }
            continue;
        }

        if interleaved {
            let (name, data) = &mut records[row % ntax];
            // Some writers repeat the name on every block
            let rest = match line.split_once(char::is_whitespace) {
                Some((first, rest)) if first == name.as_str() => rest,
                _ => line,
            };
            data.extend(residues(rest));
            row += 1;
        } else if records.len() < ntax && !is_continuation(records.last(), line, nchar) {
            let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
            records.push((name.to_string(), residues(rest).collect()));
        } else if let Some((_, data)) = records.last_mut() {
            data.extend(residues(line));
        } else {
            return Err(PhylipError::ParseError {
                line: idx + 1,
                message: "sequence data before any sequence name".to_string(),
            });
        }

        if records.len() == ntax && records.iter().all(|(_, data)| data.len() >= nchar) {
            break;
        }
    }

    if records.is_empty() {
        return Err(PhylipError::NoSequenceData);
    }

    Ok(records
        .into_iter()
        .map(|(name, data)| Sequence::from_bytes(name, data))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequential_simple() {
        let content = " 3 10
Seq1      ACGTACGTAC
Seq2      TGCATGCATG
Seq3      AAAACCCCGG
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 3);
        assert_eq!(alignment.get(0).unwrap().id, "Seq1");
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGTACGTAC");
        assert_eq!(alignment.get(2).unwrap().id, "Seq3");
    }

    #[test]
    fn test_parse_sequential_multiline() {
        let content = " 2 20
Seq1      ACGTACGTAC
GGGGG GGGGG
Seq2      TGCATGCATG
CCCCCCCCCC
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGTACGTACGGGGGGGGGG");
        assert_eq!(alignment.get(1).unwrap().as_str(), "TGCATGCATGCCCCCCCCCC");
    }

    #[test]
    fn test_parse_interleaved() {
        let content = " 3 20
Seq1      ACGTACGTAC
Seq2      TGCATGCATG
Seq3      AAAACCCCGG

GGGGGGGGGG
CCCCCCCCCC
TTTTTTTTTT
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 3);
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGTACGTACGGGGGGGGGG");
        assert_eq!(alignment.get(1).unwrap().as_str(), "TGCATGCATGCCCCCCCCCC");
        assert_eq!(alignment.get(2).unwrap().as_str(), "AAAACCCCGGTTTTTTTTTT");
    }

    #[test]
    fn test_parse_interleaved_with_repeated_names() {
        let content = "2 8
human ACGT
mouse AC-T

human GGGG
mouse GG-G
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.get(0).unwrap().as_str(), "ACGTGGGG");
        assert_eq!(alignment.get(1).unwrap().as_str(), "AC-TGG-G");
    }

    #[test]
    fn test_parse_relaxed_names() {
        let content = "3 10
seq1 ACGTACGTAC
seq2 TGCATGCATG
seq3 AAAACCCCGG
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 3);
        assert_eq!(alignment.get(0).unwrap().id, "seq1");
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_phylip_str(""), Err(PhylipError::EmptyFile)));
    }

    #[test]
    fn test_invalid_header() {
        let result = parse_phylip_str("not a valid header\nSeq1 ACGT\n");
        assert!(matches!(result, Err(PhylipError::InvalidSequenceCount(_))));

        let result = parse_phylip_str("invalid\nSeq1 ACGT\n");
        assert!(matches!(result, Err(PhylipError::InvalidHeader(_))));
    }

    #[test]
    fn test_no_data_after_header() {
        assert!(matches!(
            parse_phylip_str(" 2 10\n\n"),
            Err(PhylipError::NoSequenceData)
        ));
    }

    #[test]
    fn test_too_few_sequences() {
        let content = " 3 10
Seq1      ACGTACGTAC
Seq2      TGCATGCATG
";
        let alignment = parse_phylip_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 2);
    }
}
