//! Decomposition of block-structured operators
//!
//! - [`partition`]: block sizes, the two-color selector and the row scan
//!   that places every entry in its declared block
//! - [`two_color`]: splitting into two block-diagonal matrices or into
//!   alternating block lists
//! - [`ranges`]: near-equal contiguous chunking
//! - [`diagonal`]: per-chunk restrictions of a diagonal operator

pub mod diagonal;
pub mod partition;
pub mod ranges;
pub mod two_color;

pub use diagonal::{split_diagonal, try_split_diagonal};
pub use partition::{BlockSizes, BlockSlot, Color, RowExtentPartitioner};
pub use ranges::{split_list, ChunkRanges};
pub use two_color::{
    split_ab, split_ab_blocks, split_ab_triplets, try_split_ab, try_split_ab_blocks,
    try_split_ab_triplets,
};
