//! Near-equal contiguous chunking of an ordered sequence

use std::ops::Range;

/// Iterator over `n` contiguous index ranges covering `0..len`.
///
/// Each chunk takes `ceil(remaining / chunks_left)` elements, so when `len`
/// is not divisible by `n` the larger chunks come first: `10` split in `3`
/// gives lengths `4, 3, 3`. With `n > len` the trailing chunks are empty.
#[derive(Debug, Clone)]
pub struct ChunkRanges {
    start: usize,
    len: usize,
    chunks_left: usize,
}

impl ChunkRanges {
    /// Chunks `0..len` into `n` ranges.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    pub fn new(len: usize, n: usize) -> Self {
        assert!(n > 0, "chunk count must be at least 1");
        Self {
            start: 0,
            len,
            chunks_left: n,
        }
    }
}

impl Iterator for ChunkRanges {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.chunks_left == 0 {
            return None;
        }
        let remaining = self.len - self.start;
        let size = (remaining + self.chunks_left - 1) / self.chunks_left;
        let range = self.start..self.start + size;
        self.start += size;
        self.chunks_left -= 1;
        Some(range)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chunks_left, Some(self.chunks_left))
    }
}

impl ExactSizeIterator for ChunkRanges {}

/// Splits `seq` into `n` contiguous sub-slices of near-equal length.
///
/// The concatenation of the result is `seq`; see [`ChunkRanges`] for how
/// the remainder is distributed.
///
/// # Examples
///
/// ```
/// use blocksplit::split_list;
///
/// let seq: Vec<usize> = (0..10).collect();
/// let chunks = split_list(&seq, 3);
/// let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
/// assert_eq!(lengths, vec![4, 3, 3]);
/// ```
pub fn split_list<T>(seq: &[T], n: usize) -> Vec<&[T]> {
    ChunkRanges::new(seq.len(), n).map(|r| &seq[r]).collect()
}
