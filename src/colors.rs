//! Residue color schemes.
//!
//! A color scheme is a data table mapping alignment symbols to a
//! [`ColorCategory`]; each category has a fixed terminal [`ColorDirective`].
//! Only the Clustal approximation has a table so far. Selecting another
//! scheme is an error rather than a silent fallback.

use std::fmt;

use crossterm::style::Color;
use thiserror::Error;

use crate::model::SequenceType;

/// Named color schemes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Clustal,
    Zappo,
    Taylor,
    Hydrophobicity,
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorScheme::Clustal => write!(f, "clustal"),
            ColorScheme::Zappo => write!(f, "zappo"),
            ColorScheme::Taylor => write!(f, "taylor"),
            ColorScheme::Hydrophobicity => write!(f, "hydrophobicity"),
        }
    }
}

/// Errors raised when a coloring cannot be set up.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("Color scheme '{0}' is not yet supported (available: clustal)")]
    SchemeNotImplemented(ColorScheme),

    #[error("Coloring for {0} sequences is not yet supported (use --type aa or --type dna)")]
    SequenceTypeNotSupported(SequenceType),
}

/// Display class of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCategory {
    Hydrophobic,
    Positive,
    Negative,
    Polar,
    Glycine,
    Proline,
    Aromatic,
    /// Frameshift or stop marker (`*`, `!`)
    Frameshift,
    /// Gaps and anything unrecognized
    Other,
}

/// Terminal attributes applied around a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDirective {
    pub background: Color,
    pub foreground: Option<Color>,
    pub bold: bool,
}

impl ColorCategory {
    pub fn directive(self) -> ColorDirective {
        let background = match self {
            ColorCategory::Hydrophobic => Color::DarkBlue,
            ColorCategory::Positive => Color::DarkRed,
            ColorCategory::Negative => Color::DarkMagenta,
            ColorCategory::Polar => Color::DarkGreen,
            ColorCategory::Glycine | ColorCategory::Proline => Color::DarkYellow,
            ColorCategory::Aromatic => Color::DarkCyan,
            ColorCategory::Frameshift => Color::Black,
            ColorCategory::Other => Color::Grey,
        };
        match self {
            ColorCategory::Frameshift => ColorDirective {
                background,
                foreground: Some(Color::White),
                bold: true,
            },
            _ => ColorDirective {
                background,
                foreground: None,
                bold: false,
            },
        }
    }
}

type SchemeTable = &'static [(ColorCategory, &'static str)];

const CLUSTAL_TABLE: SchemeTable = &[
    (ColorCategory::Hydrophobic, "AILMFWVC"),
    (ColorCategory::Positive, "KR"),
    (ColorCategory::Negative, "ED"),
    (ColorCategory::Polar, "NQST"),
    (ColorCategory::Glycine, "G"),
    (ColorCategory::Proline, "P"),
    (ColorCategory::Aromatic, "HY"),
    (ColorCategory::Frameshift, "*!"),
];

/// Table for `scheme`, or `None` if it has not been written yet.
fn scheme_table(scheme: ColorScheme) -> Option<SchemeTable> {
    match scheme {
        ColorScheme::Clustal => Some(CLUSTAL_TABLE),
        ColorScheme::Zappo | ColorScheme::Taylor | ColorScheme::Hydrophobicity => None,
    }
}

/// ASCII lookup table for one scheme, built once per run.
#[derive(Debug, Clone)]
pub struct ColorMapper {
    lut: [ColorCategory; 128],
}

impl ColorMapper {
    /// Builds the lookup table for `scheme`.
    ///
    /// Lookups are case-insensitive: lower-case residues share the
    /// category of their upper-case form.
    pub fn new(scheme: ColorScheme) -> Result<Self, ColorError> {
        let table = scheme_table(scheme).ok_or(ColorError::SchemeNotImplemented(scheme))?;
        let mut lut = [ColorCategory::Other; 128];
        for &(category, symbols) in table {
            for b in symbols.bytes() {
                lut[b as usize] = category;
                lut[b.to_ascii_lowercase() as usize] = category;
            }
        }
        Ok(Self { lut })
    }

    /// Like [`ColorMapper::new`], also refusing sequence types without coloring.
    ///
    /// `None` stands for an unspecified type; the clustal table colors
    /// amino acids and nucleotides alike, so it needs no further check.
    pub fn for_sequence_type(
        scheme: ColorScheme,
        seq_type: Option<SequenceType>,
    ) -> Result<Self, ColorError> {
        if let Some(SequenceType::Codon) = seq_type {
            return Err(ColorError::SequenceTypeNotSupported(SequenceType::Codon));
        }
        Self::new(scheme)
    }

    /// Non-ASCII symbols fall in [`ColorCategory::Other`].
    pub fn category(&self, symbol: char) -> ColorCategory {
        if symbol.is_ascii() {
            self.lut[symbol as usize]
        } else {
            ColorCategory::Other
        }
    }
}

/// Category of a single symbol under `scheme`.
///
/// Non-ASCII symbols and anything not in the table land in
/// [`ColorCategory::Other`].
pub fn color_for_symbol(symbol: char, scheme: ColorScheme) -> Result<ColorCategory, ColorError> {
    Ok(ColorMapper::new(scheme)?.category(symbol))
}
