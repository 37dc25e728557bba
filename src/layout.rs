//! Block layout planning.
//!
//! An alignment wider than the terminal is printed as a series of blocks,
//! each showing a contiguous range of columns for every sequence. This
//! module decides where the blocks start and how wide they are.
//!
//! With an automatic width, blocks fill the space right of the name margin.
//! If that would leave a trailing block of 10 columns or fewer, every block
//! is made a little narrower so the last one grows to a useful width.

use std::ops::Range;

use log::debug;
use thiserror::Error;

/// Trailing blocks this narrow or narrower trigger the shrink.
pub const MIN_LAST_BLOCK_WIDTH: usize = 10;

/// A contiguous range of alignment columns shown together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub start: usize,
    pub width: usize,
}

impl BlockDescriptor {
    /// One past the last column of the block.
    pub fn end(&self) -> usize {
        self.start + self.width
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LayoutError {
    #[error(
        "Terminal too narrow: {terminal_width} columns leave no room after the \
         {margin_width}-column name margin.\n\
         Hint: set the block width explicitly with -w/--width"
    )]
    TerminalTooNarrow {
        terminal_width: usize,
        margin_width: usize,
    },
}

/// Splits `aln_len` columns into blocks.
///
/// A positive `forced_width` is used as is, with only the last block
/// possibly narrower. Otherwise the plan comes from [`auto_blocks`].
/// The result always covers `0..aln_len` exactly once, in order; an
/// empty alignment gives an empty plan.
pub fn plan_blocks(
    aln_len: usize,
    margin_width: usize,
    terminal_width: usize,
    forced_width: Option<usize>,
) -> Result<Vec<BlockDescriptor>, LayoutError> {
    match forced_width.filter(|&w| w > 0) {
        Some(width) => Ok(split_columns(aln_len, width)),
        None => auto_blocks(aln_len, margin_width, terminal_width),
    }
}

/// Blocks that fit right of the margin without a sliver-like last block.
///
/// When the trailing remainder is 10 columns or fewer, each of the full
/// blocks gives up `sacrifice` columns and the last block takes them, so
/// it ends up `remainder + sacrifice * n_blocks` wide. If that last block
/// would not fit the terminal, the columns are spread evenly over as few
/// blocks as fit instead.
pub fn auto_blocks(
    aln_len: usize,
    margin_width: usize,
    terminal_width: usize,
) -> Result<Vec<BlockDescriptor>, LayoutError> {
    let available = terminal_width
        .checked_sub(margin_width)
        .filter(|&a| a >= 1)
        .ok_or(LayoutError::TerminalTooNarrow {
            terminal_width,
            margin_width,
        })?;

    if aln_len <= available {
        return Ok(split_columns(aln_len, available));
    }

    let n_blocks = aln_len / available; // full blocks, not counting the remainder
    let remainder = aln_len % available;

    if remainder == 0 || remainder > MIN_LAST_BLOCK_WIDTH {
        return Ok(split_columns(aln_len, available));
    }

    let sacrifice = (MIN_LAST_BLOCK_WIDTH - remainder)
        .div_ceil(n_blocks)
        .max(1);
    debug!(
        "Last block would be {} columns wide; narrowing blocks by {} (from {})",
        remainder, sacrifice, available
    );

    let narrowed = available.saturating_sub(sacrifice);
    let last = aln_len - narrowed * n_blocks;
    if narrowed == 0 || last > available {
        debug!("Widened last block does not fit, spreading columns evenly");
        return Ok(spread_evenly(aln_len, available));
    }

    let mut widths = vec![narrowed; n_blocks];
    widths.push(last);
    Ok(from_widths(widths))
}

fn split_columns(aln_len: usize, stride: usize) -> Vec<BlockDescriptor> {
    (0..aln_len)
        .step_by(stride)
        .map(|start| BlockDescriptor {
            start,
            width: stride.min(aln_len - start),
        })
        .collect()
}

/// As few blocks as fit in `available`, widths differing by at most one.
fn spread_evenly(aln_len: usize, available: usize) -> Vec<BlockDescriptor> {
    let n_blocks = aln_len.div_ceil(available);
    let base = aln_len / n_blocks;
    let wider = aln_len % n_blocks;
    from_widths((0..n_blocks).map(|i| if i < wider { base + 1 } else { base }))
}

fn from_widths(widths: impl IntoIterator<Item = usize>) -> Vec<BlockDescriptor> {
    let mut start = 0;
    widths
        .into_iter()
        .map(|width| {
            let block = BlockDescriptor { start, width };
            start += width;
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(blocks: &[BlockDescriptor]) -> Vec<usize> {
        blocks.iter().map(|b| b.width).collect()
    }

    fn assert_partition(blocks: &[BlockDescriptor], aln_len: usize) {
        let mut expected_start = 0;
        for block in blocks {
            assert_eq!(block.start, expected_start);
            assert!(block.width > 0);
            expected_start = block.end();
        }
        assert_eq!(expected_start, aln_len);
    }

    #[test]
    fn test_short_alignment_is_one_block() {
        let blocks = plan_blocks(20, 5, 30, None).unwrap();
        assert_eq!(blocks, vec![BlockDescriptor { start: 0, width: 20 }]);
    }

    #[test]
    fn test_wide_remainder_keeps_full_width() {
        let blocks = plan_blocks(100, 10, 90, None).unwrap();
        assert_eq!(widths(&blocks), vec![80, 20]);
    }

    #[test]
    fn test_narrow_remainder_is_widened() {
        let blocks = plan_blocks(85, 10, 90, None).unwrap();
        assert_eq!(widths(&blocks), vec![75, 10]);
        assert_partition(&blocks, 85);
    }

    #[test]
    fn test_sacrifice_is_spread_over_blocks() {
        // available 40, 3 full blocks, remainder 1: each block gives up 3
        let blocks = plan_blocks(121, 10, 50, None).unwrap();
        assert_eq!(widths(&blocks), vec![37, 37, 37, 10]);
    }

    #[test]
    fn test_sacrifice_is_at_least_one() {
        // remainder 10 still counts as narrow, (10 - 10) / n rounds to 0
        let blocks = plan_blocks(90, 10, 90, None).unwrap();
        assert_eq!(widths(&blocks), vec![79, 11]);
    }

    #[test]
    fn test_exact_multiple_needs_no_shrink() {
        let blocks = plan_blocks(160, 10, 90, None).unwrap();
        assert_eq!(widths(&blocks), vec![80, 80]);
    }

    #[test]
    fn test_forced_width() {
        let blocks = plan_blocks(25, 5, 30, Some(10)).unwrap();
        assert_eq!(
            blocks,
            vec![
                BlockDescriptor { start: 0, width: 10 },
                BlockDescriptor { start: 10, width: 10 },
                BlockDescriptor { start: 20, width: 5 },
            ]
        );
    }

    #[test]
    fn test_forced_width_ignores_terminal() {
        // Would be too narrow for the margin, but the user decided
        let blocks = plan_blocks(7, 40, 20, Some(3)).unwrap();
        assert_eq!(widths(&blocks), vec![3, 3, 1]);
    }

    #[test]
    fn test_zero_forced_width_means_auto() {
        assert_eq!(
            plan_blocks(100, 10, 90, Some(0)).unwrap(),
            plan_blocks(100, 10, 90, None).unwrap()
        );
    }

    #[test]
    fn test_terminal_too_narrow() {
        let err = plan_blocks(100, 30, 30, None).unwrap_err();
        assert_eq!(
            err,
            LayoutError::TerminalTooNarrow {
                terminal_width: 30,
                margin_width: 30,
            }
        );
        assert!(err.to_string().contains("--width"));
        assert!(plan_blocks(100, 40, 30, None).is_err());
    }

    #[test]
    fn test_empty_alignment() {
        assert!(plan_blocks(0, 5, 80, None).unwrap().is_empty());
        assert!(plan_blocks(0, 5, 80, Some(10)).unwrap().is_empty());
    }

    #[test]
    fn test_narrow_terminal_avoids_sliver() {
        // available 12, remainder 1: the single full block gives up 9
        assert_eq!(widths(&plan_blocks(13, 5, 17, None).unwrap()), vec![3, 10]);
        assert_eq!(widths(&plan_blocks(16, 5, 20, None).unwrap()), vec![6, 10]);
        assert_eq!(widths(&plan_blocks(11, 5, 15, None).unwrap()), vec![1, 10]);
    }

    #[test]
    fn test_spreads_evenly_when_last_block_cannot_grow() {
        // available 6: widened last block (11) would not fit
        assert_eq!(widths(&plan_blocks(13, 5, 11, None).unwrap()), vec![5, 4, 4]);
    }

    #[test]
    fn test_blocks_partition_alignment() {
        for aln_len in 0..250 {
            for margin in [1, 5, 12] {
                for terminal in (margin + 1)..(margin + 45) {
                    let blocks = plan_blocks(aln_len, margin, terminal, None).unwrap();
                    assert_partition(&blocks, aln_len);
                    assert!(blocks.iter().all(|b| b.width <= terminal - margin));
                }
            }
        }
    }

    #[test]
    fn test_forced_blocks_partition_alignment() {
        for aln_len in 1..200 {
            for forced in 1..30 {
                let blocks = plan_blocks(aln_len, 5, 80, Some(forced)).unwrap();
                assert_partition(&blocks, aln_len);
                let (last, full) = blocks.split_last().unwrap();
                assert!(full.iter().all(|b| b.width == forced));
                assert!((1..=forced).contains(&last.width));
            }
        }
    }

    #[test]
    fn test_narrow_remainder_moves_columns_to_last_block() {
        let margin = 5;
        for aln_len in 1..300 {
            for terminal in (margin + 1)..(margin + 70) {
                let available = terminal - margin;
                let n_blocks = aln_len / available;
                let remainder = aln_len % available;
                if n_blocks == 0 || remainder == 0 || remainder > MIN_LAST_BLOCK_WIDTH {
                    continue;
                }
                let sacrifice = (MIN_LAST_BLOCK_WIDTH - remainder).div_ceil(n_blocks).max(1);
                let widened = remainder + sacrifice * n_blocks;
                let blocks = plan_blocks(aln_len, margin, terminal, None).unwrap();
                let w = widths(&blocks);
                assert_partition(&blocks, aln_len);

                if sacrifice < available && widened <= available {
                    assert_eq!(w.len(), n_blocks + 1, "L={} T={}", aln_len, terminal);
                    assert!(w[..n_blocks].iter().all(|&x| x == available - sacrifice));
                    assert_eq!(w[n_blocks], widened, "L={} T={}", aln_len, terminal);
                    assert!(w[n_blocks] >= MIN_LAST_BLOCK_WIDTH);
                } else {
                    assert_eq!(w.len(), aln_len.div_ceil(available), "L={} T={}", aln_len, terminal);
                    let (min, max) = (w.iter().min().unwrap(), w.iter().max().unwrap());
                    assert!(max - min <= 1);
                    assert!(*max <= available);
                }
            }
        }
    }
}
