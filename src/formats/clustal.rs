//! Clustal format parser.
//!
//! Reads ClustalW / Clustal Omega (and MUSCLE's Clustal-like) output:
//! a `CLUSTAL` header line followed by blocks of `name fragment` lines.
//! Conservation lines (starting with whitespace) and the optional
//! trailing residue counts are ignored.
//!
//! ```text
//! CLUSTAL W (1.83) multiple sequence alignment
//!
//! seq1      ATG-CTG 7
//! seq2      AT-ACT- 5
//!           **  **
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Alignment, Sequence};

/// Errors that can occur during Clustal parsing.
#[derive(Error, Debug)]
pub enum ClustalError {
    #[error("Empty Clustal file")]
    EmptyFile,

    #[error("Missing CLUSTAL header line")]
    MissingHeader,

    #[error("Line {0}: missing sequence fragment")]
    MissingFragment(usize),

    #[error("No sequences found")]
    NoSequences,
}

/// Result type for Clustal operations.
pub type ClustalResult<T> = Result<T, ClustalError>;

/// Parses Clustal content from a string.
///
/// Fragments belonging to the same name are concatenated in block order;
/// sequences keep the order of their first appearance.
pub fn parse_clustal_str(content: &str) -> ClustalResult<Alignment> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let (_, header) = lines.next().ok_or(ClustalError::EmptyFile)?;
    let header = header.trim_start();
    if !(header.starts_with("CLUSTAL") || header.starts_with("MUSCLE")) {
        return Err(ClustalError::MissingHeader);
    }

    let mut order: Vec<String> = Vec::new();
    let mut fragments: HashMap<String, Vec<u8>> = HashMap::new();

    for (idx, line) in lines {
        // Conservation lines are indented
        if line.starts_with(char::is_whitespace) || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(name), fragment) = (fields.next(), fields.next()) else {
            continue;
        };
        let fragment = fragment.ok_or(ClustalError::MissingFragment(idx + 1))?;

        fragments
            .entry(name.to_string())
            .or_insert_with(|| {
                order.push(name.to_string());
                Vec::new()
            })
            .extend_from_slice(fragment.as_bytes());
    }

    if order.is_empty() {
        return Err(ClustalError::NoSequences);
    }

    let sequences = order
        .into_iter()
        .map(|name| {
            let data = fragments.remove(&name).unwrap_or_default();
            Sequence::from_bytes(name, data)
        })
        .collect();

    Ok(Alignment::new(sequences))
}
