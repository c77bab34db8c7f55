//! Backend abstraction for dense kernels.
//!
//! # Backends
//!
//! - `GenericBackend`: loop-based permutation (always available)
//!
//! # faer Integration
//!
//! The `faer_interop` module views row-major tensors as faer matrices so the
//! GEMM contraction path can hand them to `faer::linalg::matmul::matmul`.

mod faer_interop;
mod generic;
mod permutation;

pub use faer_interop::{AsFaerMat, faer_par};
pub use generic::GenericBackend;
pub use permutation::PermutationBackend;
