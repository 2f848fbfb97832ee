//! Classification of matrix entries into declared diagonal blocks
//!
//! A block-structured operator is described only by the row count of each
//! consecutive diagonal block. The [`RowExtentPartitioner`] walks those
//! extents alongside a row-ordered scan of the entries, so classifying all
//! entries costs a single pass over the matrix and the block list.

use crate::error::{Result, SplitError};

/// Validated block row-counts, with zero-sized blocks removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSizes {
    sizes: Vec<usize>,
}

impl BlockSizes {
    /// Validates the raw block-size array of an `n × n` operator.
    ///
    /// Zero entries are discarded. Negative entries and a total different
    /// from `n` are rejected.
    pub fn new(raw: &[i32], n: usize) -> Result<Self> {
        let mut sizes = Vec::with_capacity(raw.len());
        for (position, &size) in raw.iter().enumerate() {
            if size < 0 {
                return Err(SplitError::NegativeBlockSize {
                    position,
                    size: i64::from(size),
                });
            }
            if size > 0 {
                sizes.push(size as usize);
            }
        }

        let sum: usize = sizes.iter().sum();
        if sum != n {
            return Err(SplitError::BlockSumMismatch { sum, n });
        }

        Ok(Self { sizes })
    }

    /// Row counts of the non-empty blocks, in order
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Number of non-empty blocks
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// True if no block was declared
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Total dimension covered by the blocks
    pub fn dimension(&self) -> usize {
        self.sizes.iter().sum()
    }
}

/// One of the two output buckets of the two-coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// First output matrix / list
    A,
    /// Second output matrix / list
    B,
}

impl Color {
    /// Color of the first declared block.
    ///
    /// The first block always goes to `B`, so block `k` is `B` for even `k`
    /// and `A` for odd `k`.
    pub const FIRST: Color = Color::B;

    /// The other color
    pub fn flip(self) -> Color {
        match self {
            Color::A => Color::B,
            Color::B => Color::A,
        }
    }

    /// Position of the bucket in the `(A, B)` output pair
    pub fn index(self) -> usize {
        match self {
            Color::A => 0,
            Color::B => 1,
        }
    }

    /// Color of the block with the given 0-based index
    pub fn of_block(block: usize) -> Color {
        if block % 2 == 0 {
            Color::FIRST
        } else {
            Color::FIRST.flip()
        }
    }
}

/// Position of an entry in the block structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSlot {
    /// 0-based index of the block among the non-empty declared blocks
    pub block: usize,
    /// Color of that block
    pub color: Color,
}

/// Assigns row-ordered entries to the declared block containing their row
#[derive(Debug)]
pub struct RowExtentPartitioner<'a> {
    sizes: &'a [usize],
    block: usize,
    /// Exclusive upper row bound of the current block
    row_end: usize,
    color: Color,
    last_row: Option<usize>,
}

impl<'a> RowExtentPartitioner<'a> {
    /// Starts a scan at the first block
    pub fn new(blocks: &'a BlockSizes) -> Self {
        Self {
            sizes: blocks.sizes(),
            block: 0,
            row_end: blocks.sizes().first().copied().unwrap_or(0),
            color: Color::FIRST,
            last_row: None,
        }
    }

    /// Classifies the next entry of the scan by its row index.
    ///
    /// Rows must be non-decreasing across calls. When a row lies past the
    /// current block, the scan advances block by block (flipping the color
    /// each time) until the block containing the row is reached; the size
    /// list is only consulted at those boundaries.
    pub fn classify(&mut self, row: usize) -> Result<BlockSlot> {
        if let Some(previous) = self.last_row {
            if row < previous {
                return Err(SplitError::UnsortedRows { previous, row });
            }
        }
        self.last_row = Some(row);

        while row >= self.row_end {
            let next = self.block + 1;
            let size = *self
                .sizes
                .get(next)
                .ok_or(SplitError::RowOutOfBlocks { row })?;
            self.block = next;
            self.row_end += size;
            self.color = self.color.flip();
        }

        Ok(self.current())
    }

    /// Block the scan currently sits in
    pub fn current(&self) -> BlockSlot {
        BlockSlot {
            block: self.block,
            color: self.color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sizes_drop_zeros() {
        let blocks = BlockSizes::new(&[0, 2, 0, 3, 1, 0], 6).unwrap();
        assert_eq!(blocks.sizes(), &[2, 3, 1]);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks.dimension(), 6);
    }

    #[test]
    fn test_block_sizes_rejects_bad_input() {
        assert_eq!(
            BlockSizes::new(&[2, -1, 3], 4),
            Err(SplitError::NegativeBlockSize { position: 1, size: -1 })
        );
        assert_eq!(
            BlockSizes::new(&[2, 3], 6),
            Err(SplitError::BlockSumMismatch { sum: 5, n: 6 })
        );
        assert!(BlockSizes::new(&[0, 0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_color_flip_and_parity() {
        assert_eq!(Color::A.flip(), Color::B);
        assert_eq!(Color::B.flip().flip(), Color::B);
        assert_eq!(Color::of_block(0), Color::B);
        assert_eq!(Color::of_block(1), Color::A);
        assert_eq!(Color::of_block(4), Color::B);
        assert_eq!(Color::A.index(), 0);
        assert_eq!(Color::B.index(), 1);
    }

    #[test]
    fn test_classify_rows() {
        let blocks = BlockSizes::new(&[2, 3, 1], 6).unwrap();
        let mut partitioner = RowExtentPartitioner::new(&blocks);

        let slots: Vec<_> = [0, 1, 1, 2, 4, 5]
            .iter()
            .map(|&row| partitioner.classify(row).unwrap().block)
            .collect();
        assert_eq!(slots, vec![0, 0, 0, 1, 1, 2]);
    }

    #[test]
    fn test_classify_skips_empty_blocks() {
        let blocks = BlockSizes::new(&[1, 1, 1, 1], 4).unwrap();
        let mut partitioner = RowExtentPartitioner::new(&blocks);

        assert_eq!(partitioner.classify(0).unwrap(), BlockSlot { block: 0, color: Color::B });
        // Rows 1 and 2 hold nothing; block 3 keeps its parity
        assert_eq!(partitioner.classify(3).unwrap(), BlockSlot { block: 3, color: Color::A });
    }

    #[test]
    fn test_classify_rejects_unsorted_rows() {
        let blocks = BlockSizes::new(&[2, 2], 4).unwrap();
        let mut partitioner = RowExtentPartitioner::new(&blocks);

        partitioner.classify(3).unwrap();
        assert_eq!(
            partitioner.classify(1),
            Err(SplitError::UnsortedRows { previous: 3, row: 1 })
        );
    }

    #[test]
    fn test_classify_past_last_block() {
        let blocks = BlockSizes::new(&[2], 2).unwrap();
        let mut partitioner = RowExtentPartitioner::new(&blocks);

        assert_eq!(partitioner.classify(2), Err(SplitError::RowOutOfBlocks { row: 2 }));
    }
}
