//! Two-coloring of consecutive diagonal blocks
//!
//! Adjacent blocks of an upper-triangular, block-structured operator may
//! overlap in triangular storage, so they must never be processed together.
//! Alternating blocks are therefore sent to alternating outputs: block `k`
//! goes to `B` when `k` is even and to `A` when `k` is odd (see
//! [`Color::of_block`]). Both splitters here follow that convention.

use log::debug;
use num_traits::Num;
use sprs::TriMat;

use crate::error::{Result, SplitError};
use crate::matrix::SparseMatrixCSR;
use crate::utils::formats::sprs_triplets;
use super::partition::{BlockSizes, Color, RowExtentPartitioner};

type Entry<T> = (usize, usize, T);

/// Splits an operator into two block-diagonal matrices `(A, B)`.
///
/// `block_sizes` lists the row count of each consecutive diagonal block
/// (zeros are ignored) and must add up to `n`. Every stored entry ends up in
/// exactly one of the two outputs, so `A + B` reproduces `matrix`.
///
/// # Panics
///
/// Panics if `matrix` is not `n × n`, has entries below the diagonal, or if
/// the block sizes are negative or do not sum to `n`.
///
/// # Examples
///
/// ```
/// use blocksplit::{SparseMatrixCSR, split_ab};
///
/// // Blocks of 2, 1 and 2 rows
/// let h = SparseMatrixCSR::from_triplets(5, 5, &[
///     (0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0),
///     (2, 2, 4.0),
///     (3, 3, 5.0), (3, 4, 6.0), (4, 4, 7.0),
/// ]);
///
/// let (a, b) = split_ab(&h, &[2, 1, 2], 5);
/// assert_eq!(a.nnz(), 1);
/// assert_eq!(b.nnz(), 6);
/// ```
pub fn split_ab<T>(
    matrix: &SparseMatrixCSR<T>,
    block_sizes: &[i32],
    n: usize,
) -> (SparseMatrixCSR<T>, SparseMatrixCSR<T>)
where
    T: Copy + Num,
{
    try_split_ab(matrix, block_sizes, n).unwrap_or_else(|e| panic!("{}", e))
}

/// Fallible form of [`split_ab`]
pub fn try_split_ab<T>(
    matrix: &SparseMatrixCSR<T>,
    block_sizes: &[i32],
    n: usize,
) -> Result<(SparseMatrixCSR<T>, SparseMatrixCSR<T>)>
where
    T: Copy + Num,
{
    check_shape(matrix.n_rows, matrix.n_cols, n)?;
    let blocks = BlockSizes::new(block_sizes, n)?;
    bucket_scan(matrix.triplet_iter().map(|(i, j, &v)| (i, j, v)), &blocks, n)
}

/// [`split_ab`] for an operator in coordinate form.
///
/// Unlike CSR storage, the triplet order is not guaranteed to be row-major
/// and is checked during the scan. Duplicate entries are summed.
pub fn split_ab_triplets<T>(
    matrix: &TriMat<T>,
    block_sizes: &[i32],
    n: usize,
) -> (SparseMatrixCSR<T>, SparseMatrixCSR<T>)
where
    T: Copy + Num,
{
    try_split_ab_triplets(matrix, block_sizes, n).unwrap_or_else(|e| panic!("{}", e))
}

/// Fallible form of [`split_ab_triplets`]
pub fn try_split_ab_triplets<T>(
    matrix: &TriMat<T>,
    block_sizes: &[i32],
    n: usize,
) -> Result<(SparseMatrixCSR<T>, SparseMatrixCSR<T>)>
where
    T: Copy + Num,
{
    check_shape(matrix.rows(), matrix.cols(), n)?;
    let blocks = BlockSizes::new(block_sizes, n)?;
    bucket_scan(sprs_triplets(matrix), &blocks, n)
}

/// Splits an operator into two lists of individual blocks.
///
/// Same scan as [`split_ab`], but every declared block is emitted as its own
/// `n × n` matrix. The lists are ordered by increasing row offset; declared
/// blocks without stored entries produce no matrix but still take their
/// turn in the alternation.
///
/// # Panics
///
/// Same preconditions as [`split_ab`].
pub fn split_ab_blocks<T>(
    matrix: &SparseMatrixCSR<T>,
    block_sizes: &[i32],
    n: usize,
) -> (Vec<SparseMatrixCSR<T>>, Vec<SparseMatrixCSR<T>>)
where
    T: Copy + Num,
{
    try_split_ab_blocks(matrix, block_sizes, n).unwrap_or_else(|e| panic!("{}", e))
}

/// Fallible form of [`split_ab_blocks`]
pub fn try_split_ab_blocks<T>(
    matrix: &SparseMatrixCSR<T>,
    block_sizes: &[i32],
    n: usize,
) -> Result<(Vec<SparseMatrixCSR<T>>, Vec<SparseMatrixCSR<T>>)>
where
    T: Copy + Num,
{
    check_shape(matrix.n_rows, matrix.n_cols, n)?;
    let blocks = BlockSizes::new(block_sizes, n)?;
    block_scan(matrix.triplet_iter().map(|(i, j, &v)| (i, j, v)), &blocks, n)
}

fn check_shape(rows: usize, cols: usize, n: usize) -> Result<()> {
    if rows != n || cols != n {
        return Err(SplitError::ShapeMismatch { rows, cols, n });
    }
    Ok(())
}

fn check_entry(row: usize, col: usize, n: usize) -> Result<()> {
    if row >= n || col >= n {
        return Err(SplitError::EntryOutOfBounds { row, col, n });
    }
    if col < row {
        return Err(SplitError::NotUpperTriangular { row, col });
    }
    Ok(())
}

fn bucket_scan<T, I>(
    entries: I,
    blocks: &BlockSizes,
    n: usize,
) -> Result<(SparseMatrixCSR<T>, SparseMatrixCSR<T>)>
where
    T: Copy + Num,
    I: IntoIterator<Item = Entry<T>>,
{
    let mut partitioner = RowExtentPartitioner::new(blocks);
    let mut buckets: [Vec<Entry<T>>; 2] = [Vec::new(), Vec::new()];

    for (row, col, value) in entries {
        check_entry(row, col, n)?;
        let slot = partitioner.classify(row)?;
        buckets[slot.color.index()].push((row, col, value));
    }

    let [a, b] = buckets;
    debug!(n, blocks = blocks.len(), nnz_a = a.len(), nnz_b = b.len(); "Split operator into two colors");

    Ok((
        SparseMatrixCSR::from_triplets(n, n, &a),
        SparseMatrixCSR::from_triplets(n, n, &b),
    ))
}

fn block_scan<T, I>(
    entries: I,
    blocks: &BlockSizes,
    n: usize,
) -> Result<(Vec<SparseMatrixCSR<T>>, Vec<SparseMatrixCSR<T>>)>
where
    T: Copy + Num,
    I: IntoIterator<Item = Entry<T>>,
{
    let mut partitioner = RowExtentPartitioner::new(blocks);
    let mut lists: [Vec<SparseMatrixCSR<T>>; 2] = [Vec::new(), Vec::new()];
    let mut scratch: Vec<Entry<T>> = Vec::new();
    let mut scratch_slot = partitioner.current();

    let mut flush = |scratch: &mut Vec<Entry<T>>, color: Color| {
        if !scratch.is_empty() {
            lists[color.index()].push(SparseMatrixCSR::from_triplets(n, n, scratch));
            scratch.clear();
        }
    };

    for (row, col, value) in entries {
        check_entry(row, col, n)?;
        let slot = partitioner.classify(row)?;
        if slot.block != scratch_slot.block {
            flush(&mut scratch, scratch_slot.color);
            scratch_slot = slot;
        }
        scratch.push((row, col, value));
    }
    flush(&mut scratch, scratch_slot.color);

    let [a, b] = lists;
    debug!(n, blocks = blocks.len(), list_a = a.len(), list_b = b.len(); "Extracted block lists");

    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Blocks of 2, 1 and 2 rows, each block fully populated
    fn three_block_matrix() -> SparseMatrixCSR<f64> {
        SparseMatrixCSR::from_triplets(5, 5, &[
            (0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0),
            (2, 2, 4.0),
            (3, 3, 5.0), (3, 4, 6.0), (4, 4, 7.0),
        ])
    }

    #[test]
    fn test_split_ab_first_block_goes_to_b() {
        let (a, b) = split_ab(&three_block_matrix(), &[2, 1, 2], 5);

        let a_entries: Vec<_> = a.triplet_iter().map(|(i, j, &v)| (i, j, v)).collect();
        assert_eq!(a_entries, vec![(2, 2, 4.0)]);

        let b_entries: Vec<_> = b.triplet_iter().map(|(i, j, &v)| (i, j, v)).collect();
        assert_eq!(
            b_entries,
            vec![(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0), (3, 3, 5.0), (3, 4, 6.0), (4, 4, 7.0)]
        );
        assert_eq!((a.n_rows, a.n_cols), (5, 5));
    }

    #[test]
    fn test_split_ab_zero_block_sizes_ignored() {
        let matrix = three_block_matrix();
        assert_eq!(
            split_ab(&matrix, &[0, 2, 0, 1, 2, 0], 5),
            split_ab(&matrix, &[2, 1, 2], 5)
        );
    }

    #[test]
    fn test_split_ab_single_block() {
        let matrix = three_block_matrix();
        let (a, b) = split_ab(&matrix, &[5], 5);
        assert_eq!(a.nnz(), 0);
        assert_eq!(b, matrix);
    }

    #[test]
    fn test_split_ab_empty_matrix() {
        let (a, b) = split_ab(&SparseMatrixCSR::<f64>::zeros(0, 0), &[0, 0], 0);
        assert_eq!(a.nnz() + b.nnz(), 0);
    }

    #[test]
    fn test_split_ab_blocks_alternate() {
        let (list_a, list_b) = split_ab_blocks(&three_block_matrix(), &[2, 1, 2], 5);

        assert_eq!(list_a.len(), 1);
        assert_eq!(list_b.len(), 2);
        assert_eq!(list_b[0].nnz(), 3);
        assert_eq!(list_a[0].nnz(), 1);
        assert_eq!(list_b[1].nnz(), 3);
        assert_eq!(list_b[1].row_ptr, vec![0, 0, 0, 0, 2, 3]);
    }

    #[test]
    fn test_split_ab_blocks_empty_block_keeps_parity() {
        // Middle block (row 2) holds nothing
        let matrix = SparseMatrixCSR::from_triplets(5, 5, &[(0, 1, 1.0), (3, 4, 2.0)]);
        let (list_a, list_b) = split_ab_blocks(&matrix, &[2, 1, 2], 5);

        assert!(list_a.is_empty());
        assert_eq!(list_b.len(), 2);
    }

    #[test]
    fn test_try_split_rejects_lower_entries() {
        let matrix = SparseMatrixCSR::from_triplets(3, 3, &[(0, 0, 1.0), (2, 1, 1.0)]);
        assert_eq!(
            try_split_ab(&matrix, &[3], 3),
            Err(SplitError::NotUpperTriangular { row: 2, col: 1 })
        );
    }

    #[test]
    fn test_try_split_rejects_shape_mismatch() {
        let matrix = SparseMatrixCSR::<f64>::zeros(3, 4);
        assert_eq!(
            try_split_ab_blocks(&matrix, &[3], 3),
            Err(SplitError::ShapeMismatch { rows: 3, cols: 4, n: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "block sizes sum to 4, expected matrix dimension 5")]
    fn test_split_ab_block_sum_mismatch() {
        split_ab(&three_block_matrix(), &[2, 2], 5);
    }

    #[test]
    fn test_split_triplets_requires_row_order() {
        let mut tri = TriMat::new((4, 4));
        tri.add_triplet(2, 3, 1.0);
        tri.add_triplet(0, 1, 1.0);

        assert_eq!(
            try_split_ab_triplets(&tri, &[2, 2], 4),
            Err(SplitError::UnsortedRows { previous: 2, row: 0 })
        );
    }

    #[test]
    fn test_split_triplets_matches_csr() {
        let mut tri = TriMat::new((5, 5));
        for (i, j, v) in [(0, 0, 1.0), (0, 1, 2.0), (1, 1, 3.0), (2, 2, 4.0), (3, 4, 6.0)] {
            tri.add_triplet(i, j, v);
        }
        let csr = crate::utils::from_sprs_triplets(&tri);

        assert_eq!(split_ab_triplets(&tri, &[2, 1, 2], 5), split_ab(&csr, &[2, 1, 2], 5));
    }
}
