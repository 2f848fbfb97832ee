//! Greedy distribution of ordered blocks with pairwise rebalancing
//!
//! Blocks are never reordered. The distribution is built in two phases:
//!
//! 1. **Greedy**: walk the blocks in order and move on to the next thread as
//!    soon as the current thread's load plus half of the candidate block
//!    would reach the per-thread target.
//! 2. **Rebalancing**: sweep the adjacent thread pairs downwards and then
//!    upwards, handing boundary blocks from the heavier to the lighter thread
//!    of each pair until the heavier one drops to the pair's mean. A pass is
//!    kept only if it strictly lowers the overall imbalance; the first pass
//!    that does not is rolled back and ends the search.
//!
//! Both phases only move run boundaries, so the blocks themselves are touched
//! once, when the final bins are filled.

use log::debug;

use crate::error::{Result, SplitError};
use crate::utils::exclusive_scan;
use super::{BalanceConfig, BalanceReport, Cost, ThreadAssignment, ThreadBin};

/// Distributes `blocks` over `n_threads` threads, keeping their order.
///
/// Concatenating the returned bins in thread order gives back `blocks`.
///
/// # Panics
///
/// Panics if `n_threads` is zero.
///
/// # Examples
///
/// ```
/// use blocksplit::distribute_keep_together;
///
/// let assignment = distribute_keep_together(vec![10usize, 10, 10, 10, 100], 2);
/// assert_eq!(assignment.costs(), vec![40, 100]);
/// assert_eq!(assignment.block_counts(), vec![4, 1]);
/// ```
pub fn distribute_keep_together<B: Cost>(blocks: Vec<B>, n_threads: usize) -> ThreadAssignment<B> {
    distribute_with_config(blocks, &BalanceConfig::with_threads(n_threads))
}

/// [`distribute_keep_together`] with explicit balancing options
///
/// # Panics
///
/// Panics if `config.n_threads` is zero.
pub fn distribute_with_config<B: Cost>(blocks: Vec<B>, config: &BalanceConfig) -> ThreadAssignment<B> {
    try_distribute_with_config(blocks, config).unwrap_or_else(|e| panic!("{}", e))
}

/// Fallible form of [`distribute_with_config`]
pub fn try_distribute_with_config<B: Cost>(
    blocks: Vec<B>,
    config: &BalanceConfig,
) -> Result<ThreadAssignment<B>> {
    let n_threads = config.n_threads;
    if n_threads == 0 {
        return Err(SplitError::ZeroChunks { what: "thread count" });
    }

    let costs: Vec<usize> = blocks.iter().map(Cost::cost).collect();
    let runs = Runs::new(&costs, n_threads);
    let total = runs.total();

    let mut bounds = runs.greedy(&costs);
    let greedy_deviation = runs.deviation(&bounds);
    debug!(n_threads, blocks = costs.len(), total; "Greedy assignment done");

    let mut deviation = greedy_deviation;
    let mut passes = 0;

    if config.rebalance && n_threads > 1 {
        while config.max_passes.map_or(true, |max| passes < max) {
            let snapshot = bounds.clone();
            runs.rebalance_pass(&mut bounds);

            let next = runs.deviation(&bounds);
            if next < deviation {
                deviation = next;
                passes += 1;
                debug!(pass = passes, imbalance = runs.imbalance(next); "Accepted rebalancing pass");
            } else {
                bounds = snapshot;
                break;
            }
        }
    }

    let report = BalanceReport {
        target: total as f64 / n_threads as f64,
        greedy_imbalance: runs.imbalance(greedy_deviation),
        final_imbalance: runs.imbalance(deviation),
        passes,
    };
    debug!(
        passes,
        greedy = report.greedy_imbalance,
        imbalance = report.final_imbalance;
        "Distributed blocks"
    );

    let mut blocks = blocks.into_iter();
    let bins = bounds
        .windows(2)
        .map(|w| {
            let run: Vec<B> = blocks.by_ref().take(w[1] - w[0]).collect();
            ThreadBin::new(run, runs.load_between(w[0], w[1]))
        })
        .collect();

    Ok(ThreadAssignment::new(bins, report))
}

/// Cost bookkeeping for contiguous runs of blocks.
///
/// A distribution is a boundary vector `bounds` of length `n_threads + 1`:
/// thread `t` owns blocks `bounds[t]..bounds[t + 1]`.
struct Runs {
    /// prefix[k] = summed cost of the first k blocks
    prefix: Vec<usize>,
    n_threads: usize,
}

impl Runs {
    fn new(costs: &[usize], n_threads: usize) -> Self {
        Self {
            prefix: exclusive_scan(costs),
            n_threads,
        }
    }

    fn total(&self) -> usize {
        self.prefix.last().copied().unwrap_or(0)
    }

    fn load_between(&self, start: usize, end: usize) -> usize {
        self.prefix[end] - self.prefix[start]
    }

    fn load(&self, bounds: &[usize], thread: usize) -> usize {
        self.load_between(bounds[thread], bounds[thread + 1])
    }

    /// Phase 1: look-ahead greedy fill.
    ///
    /// Advances at most one thread per block, before placing it, so a block
    /// whose half already reaches the target leaves the current thread empty.
    /// Never moves on when the target is zero, so cost-free inputs all stay
    /// on thread 0.
    fn greedy(&self, costs: &[usize]) -> Vec<usize> {
        let target = self.total() as f64 / self.n_threads as f64;
        let mut bounds = vec![costs.len(); self.n_threads + 1];
        bounds[0] = 0;

        let mut thread = 0;
        let mut load = 0;
        for (k, &cost) in costs.iter().enumerate() {
            if thread + 1 < self.n_threads
                && target > 0.0
                && load as f64 + cost as f64 / 2.0 >= target
            {
                thread += 1;
                bounds[thread] = k;
                load = 0;
            }
            load += cost;
        }

        bounds
    }

    /// One downward then upward sweep over all adjacent thread pairs
    fn rebalance_pass(&self, bounds: &mut [usize]) {
        for left in (0..self.n_threads - 1).rev() {
            self.balance_pair(bounds, left);
        }
        for left in 0..self.n_threads - 1 {
            self.balance_pair(bounds, left);
        }
    }

    /// Moves boundary blocks between threads `left` and `left + 1`, one at a
    /// time, from the heavier to the lighter side, until the heavier side is
    /// no longer above the pair's mean.
    fn balance_pair(&self, bounds: &mut [usize], left: usize) {
        let right = left + 1;
        let pair = self.load(bounds, left) + self.load(bounds, right);

        if self.load(bounds, left) > self.load(bounds, right) {
            while 2 * self.load(bounds, left) > pair && bounds[right] > bounds[left] {
                bounds[right] -= 1;
            }
        } else {
            while 2 * self.load(bounds, right) > pair && bounds[right] < bounds[right + 1] {
                bounds[right] += 1;
            }
        }
    }

    /// Imbalance scaled by `n_threads²`, in exact integer arithmetic:
    /// `Σ_t |n_threads · load_t − total|`
    fn deviation(&self, bounds: &[usize]) -> u128 {
        let n = self.n_threads as u128;
        let total = self.total() as u128;
        (0..self.n_threads)
            .map(|t| (n * self.load(bounds, t) as u128).abs_diff(total))
            .sum()
    }

    fn imbalance(&self, deviation: u128) -> f64 {
        let n = self.n_threads as f64;
        deviation as f64 / (n * n)
    }
}
