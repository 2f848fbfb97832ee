//! # Parallel application of a thread assignment
//!
//! The downstream propagation applies the operator one thread bin at a time:
//! every worker walks its own blocks in order and the partial products are
//! summed afterwards. This module provides that product with Rayon, which
//! also makes it possible to check that a distribution reproduces `H · x`.

use ndarray::{Array1, ArrayView1};
use num_traits::Num;
use rayon::prelude::*;
use std::ops::AddAssign;

use crate::balance::{Cost, ThreadAssignment, ThreadBin};
use crate::matrix::SparseMatrixCSR;

/// Computes the cost of every block in parallel
pub fn par_block_costs<B>(blocks: &[B]) -> Vec<usize>
where
    B: Cost + Sync,
{
    blocks.par_iter().map(Cost::cost).collect()
}

impl<T> ThreadAssignment<SparseMatrixCSR<T>>
where
    T: Copy + Num + AddAssign + Send + Sync,
{
    /// Multiplies the assigned blocks with `x`, one Rayon task per thread bin.
    ///
    /// The result is the product of `x` with the sum of all blocks, i.e. with
    /// the stored (upper-triangular) operator the blocks were extracted from.
    ///
    /// # Panics
    ///
    /// Panics if a block's column count differs from `x.len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blocksplit::{SparseMatrixCSR, split_ab_blocks, distribute_keep_together};
    /// use ndarray::array;
    ///
    /// let h = SparseMatrixCSR::from_triplets(3, 3, &[(0, 0, 2.0), (1, 2, 1.0), (2, 2, 3.0)]);
    /// let (a, b) = split_ab_blocks(&h, &[1, 2], 3);
    /// let assignment = distribute_keep_together(b.into_iter().chain(a).collect(), 2);
    ///
    /// let y = assignment.par_apply(array![1.0, 1.0, 1.0].view());
    /// assert_eq!(y, array![2.0, 1.0, 3.0]);
    /// ```
    pub fn par_apply(&self, x: ArrayView1<'_, T>) -> Array1<T> {
        let n = x.len();
        self.bins()
            .par_iter()
            .map(|bin| apply_bin(bin, x, n))
            .reduce(|| Array1::zeros(n), |a, b| a + b)
    }
}

/// Sequential product of one bin's blocks with `x`
fn apply_bin<T>(bin: &ThreadBin<SparseMatrixCSR<T>>, x: ArrayView1<'_, T>, n: usize) -> Array1<T>
where
    T: Copy + Num + AddAssign,
{
    let mut y = Array1::zeros(n);
    for block in bin.blocks() {
        assert_eq!(block.n_cols, n, "block has {} columns, vector has {} entries", block.n_cols, n);
        for (i, j, &v) in block.triplet_iter() {
            y[i] += v * x[j];
        }
    }
    y
}
