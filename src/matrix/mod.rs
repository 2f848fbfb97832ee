// Matrix data structures

pub mod csr;

pub use csr::SparseMatrixCSR;
