//! Restriction of a diagonal operator to contiguous index chunks

use log::debug;
use num_traits::Num;

use crate::error::{Result, SplitError};
use crate::matrix::SparseMatrixCSR;
use super::ranges::ChunkRanges;

/// Splits a diagonal operator into `n_blocks` diagonal operators.
///
/// Output `k` keeps the diagonal entries whose index falls in the `k`-th
/// range of [`ChunkRanges`] and is zero elsewhere. The outputs have
/// disjoint supports and sum to `matrix`.
///
/// # Panics
///
/// Panics if `matrix` is not square ([`SplitError::ShapeMismatch`]), has an
/// off-diagonal entry ([`SplitError::NotDiagonal`]), or if `n_blocks` is zero.
pub fn split_diagonal<T>(matrix: &SparseMatrixCSR<T>, n_blocks: usize) -> Vec<SparseMatrixCSR<T>>
where
    T: Copy + Num,
{
    try_split_diagonal(matrix, n_blocks).unwrap_or_else(|e| panic!("{}", e))
}

/// Fallible form of [`split_diagonal`]
pub fn try_split_diagonal<T>(
    matrix: &SparseMatrixCSR<T>,
    n_blocks: usize,
) -> Result<Vec<SparseMatrixCSR<T>>>
where
    T: Copy + Num,
{
    if n_blocks == 0 {
        return Err(SplitError::ZeroChunks { what: "chunk count" });
    }
    if matrix.n_rows != matrix.n_cols {
        return Err(SplitError::ShapeMismatch {
            rows: matrix.n_rows,
            cols: matrix.n_cols,
            n: matrix.n_rows,
        });
    }
    if let Some((row, col)) = matrix.find_off_diagonal() {
        return Err(SplitError::NotDiagonal { row, col });
    }

    let n = matrix.n_rows;
    let restrictions: Vec<_> = ChunkRanges::new(n, n_blocks)
        .map(|range| {
            // Rows before the chunk are empty, rows after it repeat its nnz
            let lo = matrix.row_ptr[range.start];
            let hi = matrix.row_ptr[range.end];
            let row_ptr = (0..=n)
                .map(|i| matrix.row_ptr[i.clamp(range.start, range.end)] - lo)
                .collect();
            SparseMatrixCSR::new(
                n,
                n,
                row_ptr,
                matrix.col_idx[lo..hi].to_vec(),
                matrix.values[lo..hi].to_vec(),
            )
        })
        .collect();

    debug!(n, n_blocks; "Split diagonal operator");
    Ok(restrictions)
}
