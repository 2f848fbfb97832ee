//! Error types for block splitting and thread distribution.

use thiserror::Error;

/// Precondition violations detected on input operators and block layouts.
///
/// The public splitting functions treat all of these as fatal and panic with
/// the error's message; the `try_*` variants hand them back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The operator has stored entries below the diagonal.
    #[error("matrix must be upper triangular: entry ({row}, {col}) lies below the diagonal")]
    NotUpperTriangular { row: usize, col: usize },

    /// Coordinate entries are not sorted by row.
    #[error("entries must be sorted by row: row {row} follows row {previous}")]
    UnsortedRows { previous: usize, row: usize },

    /// A declared block has negative size.
    #[error("block size {size} at position {position} is negative")]
    NegativeBlockSize { position: usize, size: i64 },

    /// The declared block sizes do not add up to the matrix dimension.
    #[error("block sizes sum to {sum}, expected matrix dimension {n}")]
    BlockSumMismatch { sum: usize, n: usize },

    /// The matrix shape does not match the requested dimension.
    #[error("matrix is {rows}x{cols}, expected {n}x{n}")]
    ShapeMismatch { rows: usize, cols: usize, n: usize },

    /// A coordinate entry lies outside the `n × n` operator.
    #[error("entry ({row}, {col}) lies outside a {n}x{n} matrix")]
    EntryOutOfBounds { row: usize, col: usize, n: usize },

    /// An entry lies beyond the last declared block.
    #[error("row {row} lies outside the declared blocks")]
    RowOutOfBlocks { row: usize },

    /// The operator given to the diagonal restriction builder is not diagonal.
    #[error("matrix must be diagonal: entry ({row}, {col}) is off the diagonal")]
    NotDiagonal { row: usize, col: usize },

    /// A chunk or thread count of zero was requested.
    #[error("{what} must be at least 1")]
    ZeroChunks { what: &'static str },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SplitError>;
