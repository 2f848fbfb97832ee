//! # blocksplit: block decomposition and thread balancing for sparse Hamiltonians
//!
//! Propagating a quantum state with a large, block-structured Hamiltonian is
//! done by a parallel matrix-vector product. This crate prepares the operator
//! for that product:
//!
//! - Operators are stored as their upper triangle and consist of contiguous
//!   rectangular blocks on the diagonal, described by a vector of block row
//!   counts.
//! - Neighbouring blocks may overlap in triangular storage, so they are
//!   separated by a two-coloring into two block-diagonal matrices
//!   ([`split_ab`]) or two lists of individual blocks ([`split_ab_blocks`]).
//! - Blocks are spread over a fixed number of worker threads in their
//!   original order, balancing the number of stored entries per thread
//!   ([`distribute_keep_together`]).
//! - Diagonal drift operators are cut into per-chunk restrictions along a
//!   different axis ([`split_diagonal`], [`split_list`]).
//!
//! ## Usage
//!
//! ```
//! use blocksplit::{SparseMatrixCSR, split_ab_blocks, distribute_keep_together};
//!
//! // Three diagonal blocks of 2, 1 and 2 rows (upper triangle only)
//! let h = SparseMatrixCSR::from_triplets(5, 5, &[
//!     (0, 0, 1.0), (0, 1, 0.5), (1, 1, 1.0),
//!     (2, 2, 2.0),
//!     (3, 3, 3.0), (3, 4, 0.5), (4, 4, 3.0),
//! ]);
//!
//! let (list_a, list_b) = split_ab_blocks(&h, &[2, 1, 2], 5);
//! assert_eq!((list_a.len(), list_b.len()), (1, 2));
//!
//! let assignment = distribute_keep_together(list_b, 2);
//! assert_eq!(assignment.costs(), vec![3, 3]);
//! ```
//!
//! All operations are single-threaded, allocate only per call and keep no
//! global state, so independent operators can be prepared concurrently.
//! Malformed input (entries below the diagonal, unsorted coordinates,
//! inconsistent block sizes) is a bug in the code that assembled the
//! operator and makes the plain functions panic; the `try_*` variants
//! report the same conditions as [`SplitError`].

pub mod balance;
pub mod error;
pub mod matrix;
pub mod parallel;
pub mod splitting;
pub mod utils;

// Re-export primary components
pub use balance::{
    distribute_keep_together, distribute_with_config, imbalance, try_distribute_with_config,
    BalanceConfig, BalanceReport, Cost, ThreadAssignment, ThreadBin,
};
pub use error::{Result, SplitError};
pub use matrix::SparseMatrixCSR;
pub use parallel::par_block_costs;
pub use splitting::{
    split_ab, split_ab_blocks, split_ab_triplets, split_diagonal, split_list, try_split_ab,
    try_split_ab_blocks, try_split_ab_triplets, try_split_diagonal, BlockSizes, ChunkRanges,
    Color,
};
pub use utils::{from_sprs, from_sprs_triplets, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
