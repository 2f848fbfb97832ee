//! Distribution of ordered blocks across worker threads
//!
//! Each worker processes a contiguous run of blocks in their original order,
//! so a distribution is fully described by the run boundaries. The load of a
//! block is its [`Cost`], the number of stored entries for sparse blocks.

pub mod config;
pub mod distribute;

use num_traits::Num;
use sprs::CsMat;

use crate::matrix::SparseMatrixCSR;

pub use config::BalanceConfig;
pub use distribute::{distribute_keep_together, distribute_with_config, try_distribute_with_config};

/// Computational load of one unit of work
pub trait Cost {
    /// Load used for balancing
    fn cost(&self) -> usize;
}

impl<T: Copy + Num> Cost for SparseMatrixCSR<T> {
    fn cost(&self) -> usize {
        self.nnz()
    }
}

impl<T> Cost for CsMat<T> {
    fn cost(&self) -> usize {
        self.nnz()
    }
}

/// A bare cost, for planning a distribution before blocks are materialized
impl Cost for usize {
    fn cost(&self) -> usize {
        *self
    }
}

impl<B: Cost + ?Sized> Cost for &B {
    fn cost(&self) -> usize {
        (**self).cost()
    }
}

/// Blocks assigned to one worker thread, in global block order
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadBin<B> {
    blocks: Vec<B>,
    cost: usize,
}

impl<B> ThreadBin<B> {
    pub(crate) fn new(blocks: Vec<B>, cost: usize) -> Self {
        Self { blocks, cost }
    }

    /// The blocks, in processing order
    pub fn blocks(&self) -> &[B] {
        &self.blocks
    }

    /// Summed cost of the blocks
    pub fn cost(&self) -> usize {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn into_blocks(self) -> Vec<B> {
        self.blocks
    }
}

/// Summary of a distribution run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceReport {
    /// Mean cost per thread
    pub target: f64,
    /// Imbalance right after the greedy assignment
    pub greedy_imbalance: f64,
    /// Imbalance of the returned assignment
    pub final_imbalance: f64,
    /// Number of accepted rebalancing passes
    pub passes: usize,
}

/// Ordered per-thread assignment of all blocks
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadAssignment<B> {
    bins: Vec<ThreadBin<B>>,
    report: BalanceReport,
}

impl<B> ThreadAssignment<B> {
    pub(crate) fn new(bins: Vec<ThreadBin<B>>, report: BalanceReport) -> Self {
        Self { bins, report }
    }

    /// One bin per thread, in thread order
    pub fn bins(&self) -> &[ThreadBin<B>] {
        &self.bins
    }

    pub fn n_threads(&self) -> usize {
        self.bins.len()
    }

    /// Accumulated cost of every thread
    pub fn costs(&self) -> Vec<usize> {
        self.bins.iter().map(ThreadBin::cost).collect()
    }

    /// Number of blocks on every thread
    pub fn block_counts(&self) -> Vec<usize> {
        self.bins.iter().map(ThreadBin::len).collect()
    }

    pub fn total_cost(&self) -> usize {
        self.bins.iter().map(ThreadBin::cost).sum()
    }

    /// Mean absolute deviation of the thread costs from their mean
    pub fn imbalance(&self) -> f64 {
        imbalance(&self.costs())
    }

    pub fn report(&self) -> &BalanceReport {
        &self.report
    }

    pub fn into_bins(self) -> Vec<ThreadBin<B>> {
        self.bins
    }

    /// All blocks in thread order, which is the original block order
    pub fn into_blocks(self) -> Vec<B> {
        self.bins.into_iter().flat_map(ThreadBin::into_blocks).collect()
    }
}

/// Mean absolute deviation of `costs` from their mean.
///
/// Zero for an empty slice.
pub fn imbalance(costs: &[usize]) -> f64 {
    if costs.is_empty() {
        return 0.0;
    }
    let n = costs.len() as f64;
    let target = costs.iter().sum::<usize>() as f64 / n;
    costs.iter().map(|&c| (c as f64 - target).abs()).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_impls() {
        let block = SparseMatrixCSR::from_triplets(3, 3, &[(0, 0, 1.0), (0, 2, 1.0)]);
        assert_eq!(block.cost(), 2);
        assert_eq!((&block).cost(), 2);
        assert_eq!(crate::utils::to_sprs_csr(&block).cost(), 2);
        assert_eq!(7usize.cost(), 7);
    }

    #[test]
    fn test_imbalance() {
        assert_eq!(imbalance(&[]), 0.0);
        assert_eq!(imbalance(&[5, 5, 5]), 0.0);
        assert_eq!(imbalance(&[40, 100]), 30.0);
        assert!((imbalance(&[3, 3, 2]) - 4.0 / 9.0).abs() < 1e-12);
    }
}
