//! Contraction configuration.

/// Which pairwise kernel the contraction primitive uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractBackend {
    /// Loop-based kernel.
    Naive,
    /// Permute + faer GEMM, falling back to loops where GEMM does not apply.
    #[default]
    Gemm,
}

/// Thread parallelism handed to faer's GEMM kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    #[default]
    Sequential,
    /// Rayon parallelism with the given thread count (0 = all available).
    Threads(usize),
}

/// Options for one contraction call.
///
/// # Example
///
/// ```
/// use lazyptr::contract::{ContractBackend, ContractOptions};
///
/// let opts = ContractOptions::default().with_backend(ContractBackend::Naive);
/// assert!(opts.check_finite);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractOptions {
    pub backend: ContractBackend,
    pub parallelism: Parallelism,
    /// Reject non-finite operands and results with `ArithmeticFailure`.
    pub check_finite: bool,
}

impl Default for ContractOptions {
    fn default() -> Self {
        Self {
            backend: ContractBackend::default(),
            parallelism: Parallelism::default(),
            check_finite: true,
        }
    }
}

impl ContractOptions {
    pub fn with_backend(mut self, backend: ContractBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }
}
