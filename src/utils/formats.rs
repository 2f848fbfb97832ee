//! Utilities for converting between our matrix format and sprs

use crate::matrix::SparseMatrixCSR;
use sprs::{CsMat, TriMat};
use num_traits::Num;

/// Converts our CSR matrix format to sprs CsMat format
///
/// Column indices inside each row must be sorted, as sprs requires.
pub fn to_sprs_csr<T>(matrix: &SparseMatrixCSR<T>) -> CsMat<T>
where
    T: Copy + Num + Default,
{
    CsMat::new(
        (matrix.n_rows, matrix.n_cols),
        matrix.row_ptr.clone(),
        matrix.col_idx.clone(),
        matrix.values.clone(),
    )
}

/// Converts a sprs CsMat (CSR or CSC storage) to our SparseMatrixCSR format
pub fn from_sprs<T>(matrix: CsMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num + Default,
{
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::new(n_rows, n_cols, indptr, indices, data)
}

/// Coordinate entries of a sprs triplet matrix, in storage order
pub fn sprs_triplets<T>(matrix: &TriMat<T>) -> Vec<(usize, usize, T)>
where
    T: Copy,
{
    matrix
        .row_inds()
        .iter()
        .zip(matrix.col_inds())
        .zip(matrix.data())
        .map(|((&i, &j), &v)| (i, j, v))
        .collect()
}

/// Converts a sprs triplet matrix to our SparseMatrixCSR format
///
/// Duplicate entries are summed.
pub fn from_sprs_triplets<T>(matrix: &TriMat<T>) -> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    SparseMatrixCSR::from_triplets(matrix.rows(), matrix.cols(), &sprs_triplets(matrix))
}
