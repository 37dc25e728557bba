//! Stockholm format parser.
//!
//! Reads the first alignment of a Stockholm 1.0 file (Pfam, Rfam, HMMER).
//! `#=GF`, `#=GS`, `#=GR` and `#=GC` annotation lines are skipped; only
//! `name aligned_sequence` lines are kept. Interleaved blocks are
//! concatenated per name. Reading stops at the `//` terminator.

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur during Stockholm parsing.
#[derive(Error, Debug)]
pub enum StockholmError {
    #[error("Empty Stockholm file")]
    EmptyFile,

    #[error("Line {line}: expected exactly two fields (name and sequence), got '{content}'")]
    MalformedLine { line: usize, content: String },

    #[error("No sequences found")]
    NoSequences,
}

/// Result type for Stockholm operations.
pub type StockholmResult<T> = Result<T, StockholmError>;

/// Parses Stockholm content from a string.
pub fn parse_stockholm_str(content: &str) -> StockholmResult<Alignment> {
    if content.trim().is_empty() {
        return Err(StockholmError::EmptyFile);
    }

    let mut order: Vec<String> = Vec::new();
    let mut data: HashMap<String, Vec<u8>> = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with("//") {
            break;
        }

        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(aligned), None) => {
                data.entry(name.to_string())
                    .or_insert_with(|| {
                        order.push(name.to_string());
                        Vec::new()
                    })
                    .extend_from_slice(aligned.as_bytes());
            }
            _ => {
                return Err(StockholmError::MalformedLine {
                    line: idx + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    if order.is_empty() {
        return Err(StockholmError::NoSequences);
    }

    let sequences = order
        .into_iter()
        .map(|name| {
            let seq = data.remove(&name).unwrap_or_default();
            Sequence::from_bytes(name, seq)
        })
        .collect();

    Ok(Alignment::new(sequences))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PFAM_LIKE: &str = "# STOCKHOLM 1.0
#=GF ID   CBS
#=GS O83071/192-246 AC O83071
O83071/192-246          MTCRAQLIAVPRASSLAE..AIACAQKM
O31698/18-71            MIEADKVAHVQVGNNLEH..ALLVLTKT
#=GC SS_cons            CCCHHHHHHHHHHHHHHH..EEEEEEEE
//
";

    #[test]
    fn test_parse_skips_annotations() {
        let alignment = parse_stockholm_str(PFAM_LIKE).unwrap();
        assert_eq!(alignment.sequence_count(), 2);
        assert_eq!(alignment.get(0).unwrap().id, "O83071/192-246");
        assert_eq!(
            alignment.get(0).unwrap().as_str(),
            "MTCRAQLIAVPRASSLAE..AIACAQKM"
        );
    }

    #[test]
    fn test_parse_interleaved_blocks() {
        let content = "# STOCKHOLM 1.0
s1 AC-G
s2 ACTG

s1 TT
s2 T-
//
";
        let alignment = parse_stockholm_str(content).unwrap();
        assert_eq!(alignment.get(0).unwrap().as_str(), "AC-GTT");
        assert_eq!(alignment.get(1).unwrap().as_str(), "ACTGT-");
    }

    #[test]
    fn test_stops_at_terminator() {
        let content = "# STOCKHOLM 1.0\ns1 ACGT\n//\n# STOCKHOLM 1.0\ns9 TTTT\n//\n";
        let alignment = parse_stockholm_str(content).unwrap();
        assert_eq!(alignment.sequence_count(), 1);
    }

    #[test]
    fn test_malformed_line() {
        let content = "# STOCKHOLM 1.0\ns1 AC GT\n//\n";
        assert!(matches!(
            parse_stockholm_str(content),
            Err(StockholmError::MalformedLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_no_sequences() {
        let content = "# STOCKHOLM 1.0\n#=GF ID x\n//\n";
        assert!(matches!(
            parse_stockholm_str(content),
            Err(StockholmError::NoSequences)
        ));
    }
}
