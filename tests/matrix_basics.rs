//! Basic tests for matrix construction and sprs conversions

use blocksplit::{from_sprs, from_sprs_triplets, to_sprs_csr, SparseMatrixCSR};
use sprs::TriMat;

#[test]
fn test_matrix_creation_csr() {
    let matrix = SparseMatrixCSR::new(
        3,
        3,
        vec![0, 2, 3, 4],
        vec![0, 1, 1, 2],
        vec![1.0, 2.0, 3.0, 4.0],
    );

    assert_eq!(matrix.n_rows, 3);
    assert_eq!(matrix.n_cols, 3);
    assert_eq!(matrix.nnz(), 4);
    assert!(matrix.is_upper_triangular());

    let first_row: Vec<_> = matrix.row_iter(0).collect();
    assert_eq!(first_row, vec![(0, &1.0), (1, &2.0)]);

    let third_row: Vec<_> = matrix.row_iter(2).collect();
    assert_eq!(third_row, vec![(2, &4.0)]);
}

#[test]
fn test_dense_view() {
    //    [1 2 0]
    //    [0 3 0]
    //    [0 0 4]
    let matrix = SparseMatrixCSR::from_triplets(3, 3, &[(1, 1, 3), (0, 1, 2), (2, 2, 4), (0, 0, 1)]);

    assert_eq!(
        matrix.to_dense(),
        vec![vec![1, 2, 0], vec![0, 3, 0], vec![0, 0, 4]]
    );
}

#[test]
fn test_triplet_matrix_conversion() {
    let mut tri = TriMat::new((4, 4));
    tri.add_triplet(3, 3, 2.0f64);
    tri.add_triplet(0, 2, 1.0);
    tri.add_triplet(1, 1, 5.0);

    let csr = from_sprs_triplets(&tri);
    assert_eq!(csr.row_ptr, vec![0, 1, 2, 2, 3]);
    assert_eq!(csr.col_idx, vec![2, 1, 3]);

    // sprs builds the same compressed structure
    let via_sprs = from_sprs(tri.to_csr());
    assert_eq!(via_sprs, csr);
    assert_eq!(from_sprs(to_sprs_csr(&csr)), csr);
}
