//! lazyptr - matrix-free reduced density operators
//!
//! Applies the partial trace of `|ψ⟩⟨ψ|`, optionally followed by a partial
//! transpose on a sub-block, to a vector without building the reduced
//! operator. The state is contracted directly against the vector, so the
//! result can back the `matvec` of an iterative eigensolver on systems whose
//! reduced operator would not fit in memory.
//!
//! # Architecture
//!
//! ```text
//! Partition            validated roles: kept / transposed / traced
//!     → ContractionPlan    axis labels for ket, bra, vector, output
//!         → apply_plan         one einsum over {ψ, ψ*, v}
//!             → contract           naive loops or faer GEMM, pairwise
//! ```
//!
//! # Example
//!
//! ```
//! use lazyptr::{lazy_ptr_dot, lazy_ptr_ppt_dot};
//!
//! // |ψ⟩ = (|00⟩ + |11⟩)/√2 over two qubits
//! let s = std::f64::consts::FRAC_1_SQRT_2;
//! let psi = [s, 0.0, 0.0, s];
//!
//! // Tr_0 |ψ⟩⟨ψ| = I/2
//! let y = lazy_ptr_dot(&psi, &[1.0, 0.0], &[2, 2], &[1]).unwrap();
//! assert!((y[0] - 0.5).abs() < 1e-12);
//!
//! // Partial transpose on qubit 0 gives SWAP/2
//! let y = lazy_ptr_ppt_dot(&psi, &[0.0, 0.0, 1.0, 0.0], &[2, 2], &[0], &[1]).unwrap();
//! assert!((y[1] - 0.5).abs() < 1e-12);
//! ```

pub mod apply;
pub mod backend;
pub mod contract;
pub mod error;
pub mod labels;
pub mod operations;
pub mod operator;
pub mod partition;
pub mod plan;
pub mod random;
pub mod reference;
pub mod scalar;
pub mod strides;
pub mod tensor;

pub use apply::{apply_plan, lazy_ptr_dot, lazy_ptr_ppt_dot};
pub use contract::{ContractBackend, ContractOptions, Parallelism, einsum};
pub use error::{PartitionFault, TensorError};
pub use labels::{Label, LabelAllocator};
pub use operator::{LazyPtrOperator, LinearOperator};
pub use partition::{Partition, Role};
pub use plan::{ContractionPlan, ptr_dot_plan, ptr_ppt_dot_plan};
pub use random::{RandomNormal, RandomUniform, rand_ket};
pub use scalar::{Scalar, c64};
pub use tensor::{Tensor, TensorView};
