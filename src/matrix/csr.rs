//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use num_traits::Num;

use crate::utils::exclusive_scan;

/// A sparse matrix in Compressed Sparse Row (CSR) format
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 containing indices into col_idx and values arrays
/// - col_idx: Array of size nnz containing column indices of non-zero elements
/// - values: Array of size nnz containing the non-zero values
///
/// Operators handed to the block splitter store only their upper triangle, and
/// every extracted block is again a full-size `n × n` CSR matrix.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<T> {
    /// Number of rows in the matrix
    pub n_rows: usize,

    /// Number of columns in the matrix
    pub n_cols: usize,

    /// Row pointers (size: n_rows + 1)
    /// row_ptr[i] is the index in col_idx and values where row i starts
    /// row_ptr[n_rows] is equal to nnz
    pub row_ptr: Vec<usize>,

    /// Column indices (size: nnz)
    pub col_idx: Vec<usize>,

    /// Non-zero values (size: nnz)
    pub values: Vec<T>,
}

impl<T> SparseMatrixCSR<T>
where
    T: Copy + Num,
{
    /// Creates a new CSR matrix with the given dimensions and data
    ///
    /// # Panics
    ///
    /// Panics if the input arrays are inconsistent:
    /// - row_ptr.len() must be n_rows + 1
    /// - col_idx.len() must equal values.len()
    /// - row_ptr[n_rows] must equal col_idx.len()
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<usize>,
        col_idx: Vec<usize>,
        values: Vec<T>,
    ) -> Self {
        assert_eq!(row_ptr.len(), n_rows + 1, "row_ptr.len() must be n_rows + 1");
        assert_eq!(col_idx.len(), values.len(), "col_idx.len() must equal values.len()");
        assert_eq!(
            row_ptr[n_rows], col_idx.len(),
            "row_ptr[n_rows] must equal col_idx.len()"
        );

        for &col in &col_idx {
            assert!(col < n_cols, "Column index {} out of bounds (n_cols = {})", col, n_cols);
        }

        Self {
            n_rows,
            n_cols,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Builds a CSR matrix from coordinate entries `(row, col, value)`.
    ///
    /// Entries may come in any order; they are sorted row-major and
    /// duplicates at the same position are summed.
    ///
    /// # Panics
    ///
    /// Panics if an entry lies outside `n_rows × n_cols`.
    pub fn from_triplets(n_rows: usize, n_cols: usize, triplets: &[(usize, usize, T)]) -> Self {
        let mut sorted = triplets.to_vec();
        sorted.sort_by_key(|&(i, j, _)| (i, j));

        let mut counts = vec![0; n_rows];
        let mut col_idx: Vec<usize> = Vec::with_capacity(sorted.len());
        let mut values: Vec<T> = Vec::with_capacity(sorted.len());
        let mut last: Option<(usize, usize)> = None;

        for (i, j, v) in sorted {
            assert!(i < n_rows, "Row index {} out of bounds (n_rows = {})", i, n_rows);
            if last == Some((i, j)) {
                if let Some(acc) = values.last_mut() {
                    *acc = *acc + v;
                }
                continue;
            }
            counts[i] += 1;
            col_idx.push(j);
            values.push(v);
            last = Some((i, j));
        }

        Self::new(n_rows, n_cols, exclusive_scan(&counts), col_idx, values)
    }

    /// Returns the number of non-zero elements in the matrix
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns an iterator over the non-zero elements in row i
    ///
    /// Each item is a tuple (col_idx, value) representing a non-zero element
    pub fn row_iter(&self, i: usize) -> impl Iterator<Item = (usize, &T)> {
        assert!(i < self.n_rows, "Row index out of bounds");

        let start = self.row_ptr[i];
        let end = self.row_ptr[i + 1];

        self.col_idx[start..end]
            .iter()
            .zip(&self.values[start..end])
            .map(|(&col, val)| (col, val))
    }

    /// Iterates over all stored entries as `(row, col, value)` in row order
    pub fn triplet_iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        (0..self.n_rows).flat_map(move |i| self.row_iter(i).map(move |(j, v)| (i, j, v)))
    }

    /// Returns the first stored entry below the diagonal, if any
    pub fn find_below_diagonal(&self) -> Option<(usize, usize)> {
        self.triplet_iter()
            .find(|&(i, j, _)| j < i)
            .map(|(i, j, _)| (i, j))
    }

    /// Returns the first stored entry off the diagonal, if any
    pub fn find_off_diagonal(&self) -> Option<(usize, usize)> {
        self.triplet_iter()
            .find(|&(i, j, _)| j != i)
            .map(|(i, j, _)| (i, j))
    }

    /// True if no entry is stored below the diagonal
    pub fn is_upper_triangular(&self) -> bool {
        self.find_below_diagonal().is_none()
    }

    /// True if the matrix is square and every stored entry sits on the diagonal
    pub fn is_diagonal(&self) -> bool {
        self.n_rows == self.n_cols && self.find_off_diagonal().is_none()
    }

    /// Diagonal values, with zero where nothing is stored
    pub fn diagonal(&self) -> Vec<T> {
        let mut diag = vec![T::zero(); self.n_rows.min(self.n_cols)];
        for (i, j, &v) in self.triplet_iter() {
            if i == j {
                diag[i] = diag[i] + v;
            }
        }
        diag
    }

    /// Dense row-major copy, for inspection of small matrices
    pub fn to_dense(&self) -> Vec<Vec<T>> {
        let mut dense = vec![vec![T::zero(); self.n_cols]; self.n_rows];
        for (i, j, &v) in self.triplet_iter() {
            dense[i][j] = dense[i][j] + v;
        }
        dense
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            row_ptr: vec![0; n_rows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates an identity matrix of the given size
    pub fn identity(n: usize) -> Self {
        Self {
            n_rows: n,
            n_cols: n,
            row_ptr: (0..=n).collect(),
            col_idx: (0..n).collect(),
            values: vec![T::one(); n],
        }
    }
}

impl<T: fmt::Debug + Copy + Num> fmt::Debug for SparseMatrixCSR<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  nnz: {}", self.nnz())?;

        // Only rows holding data; blocks are mostly empty
        let mut printed = 0;
        for i in 0..self.n_rows {
            let start = self.row_ptr[i];
            let end = self.row_ptr[i + 1];
            if start == end {
                continue;
            }
            if printed == 5 {
                writeln!(f, "    ...")?;
                break;
            }

            write!(f, "    row {}: ", i)?;
            let max_elements = 5.min(end - start);
            for k in start..(start + max_elements) {
                write!(f, "({}, {:?}) ", self.col_idx[k], self.values[k])?;
            }
            if end - start > max_elements {
                write!(f, "... ({} more)", end - start - max_elements)?;
            }
            writeln!(f)?;
            printed += 1;
        }

        write!(f, "}}")
    }
}
