//! # alv - console alignment viewer
//!
//! Prints a multiple sequence alignment as colored, line-wrapped text
//! sized to the terminal, repeating the sequence names on every block.
//!
//! ## Architecture
//!
//! - `model`: Sequences, alignments, margin width, sequence type guessing
//! - `formats`: FASTA, Clustal, PHYLIP, Stockholm and MACSE parsing
//! - `colors`: Color scheme tables and per-symbol color lookup
//! - `layout`: Splitting alignment columns into terminal-width blocks
//! - `render`: Producing the (optionally colored) output lines
//! - `terminal`: Terminal size and tty detection

pub mod colors;
pub mod formats;
pub mod layout;
pub mod model;
pub mod render;
pub mod terminal;
