//! Text rendering of an alignment as colored blocks.
//!
//! For each block, every sequence gets one line: its accession padded to
//! the margin width, then the block's columns with one color directive per
//! symbol. A position line closes each block.
//!
//! Whether escapes are emitted is decided by an explicit [`OutputMode`],
//! so rendering to a `Vec<String>` is the same as rendering to stdout.

use std::fmt::Write as _;
use std::io::{self, Write};

use crossterm::style::{Attribute, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::colors::ColorMapper;
use crate::layout::BlockDescriptor;
use crate::model::Sequence;

/// Whether ANSI color escapes are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Color,
    Plain,
}

impl OutputMode {
    /// Colors go to terminals, and to pipes/files only when asked for.
    pub fn select(keep_colors_when_redirecting: bool, stdout_is_terminal: bool) -> Self {
        if stdout_is_terminal || keep_colors_when_redirecting {
            OutputMode::Color
        } else {
            OutputMode::Plain
        }
    }
}

/// Renders sequences block by block.
#[derive(Debug, Clone)]
pub struct Renderer {
    mapper: ColorMapper,
    mode: OutputMode,
}

impl Renderer {
    pub fn new(mapper: ColorMapper, mode: OutputMode) -> Self {
        Self { mapper, mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// All output lines, in order, without trailing newlines.
    pub fn lines<'a>(
        &'a self,
        sequences: &'a [Sequence],
        margin_width: usize,
        blocks: &'a [BlockDescriptor],
    ) -> impl Iterator<Item = String> + 'a {
        blocks.iter().flat_map(move |block| {
            sequences
                .iter()
                .map(move |seq| self.sequence_line(seq, margin_width, block))
                .chain(std::iter::once(position_line(margin_width, block)))
        })
    }

    /// Collects [`Renderer::lines`].
    pub fn render_lines(
        &self,
        sequences: &[Sequence],
        margin_width: usize,
        blocks: &[BlockDescriptor],
    ) -> Vec<String> {
        self.lines(sequences, margin_width, blocks).collect()
    }

    /// Streams the rendering to `out`, one line at a time.
    pub fn write_to<W: Write>(
        &self,
        out: &mut W,
        sequences: &[Sequence],
        margin_width: usize,
        blocks: &[BlockDescriptor],
    ) -> io::Result<()> {
        for line in self.lines(sequences, margin_width, blocks) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    fn sequence_line(&self, seq: &Sequence, margin_width: usize, block: &BlockDescriptor) -> String {
        // Columns are bytes; a multi-byte symbol cut by a block edge shows as U+FFFD
        let symbols = String::from_utf8_lossy(seq.slice(block.range()));
        let mut line = String::with_capacity(margin_width + symbols.len() * 24);
        let _ = write!(line, "{:<width$}", seq.id, width = margin_width);
        match self.mode {
            OutputMode::Plain => line.push_str(&symbols),
            OutputMode::Color => {
                for c in symbols.chars() {
                    self.push_colored(&mut line, c);
                }
            }
        }
        line
    }

    /// Appends one symbol wrapped in its directive, reset right after.
    fn push_colored(&self, line: &mut String, symbol: char) {
        let directive = self.mapper.category(symbol).directive();
        let _ = write!(line, "{}", SetBackgroundColor(directive.background));
        if let Some(fg) = directive.foreground {
            let _ = write!(line, "{}", SetForegroundColor(fg));
        }
        if directive.bold {
            let _ = write!(line, "{}", SetAttribute(Attribute::Bold));
        }
        line.push(symbol);
        let _ = write!(line, "{}", SetAttribute(Attribute::Reset));
    }
}

/// Margin-wide indent followed by the column where the next block starts.
fn position_line(margin_width: usize, block: &BlockDescriptor) -> String {
    format!("{:width$}{}", "", block.end(), width = margin_width)
}
