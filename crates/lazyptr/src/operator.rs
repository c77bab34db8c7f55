//! Matrix-free operator interface for iterative solvers.

use crate::apply::{apply_with_bra, check_state, conjugate_state};
use crate::contract::ContractOptions;
use crate::error::TensorError;
use crate::partition::Partition;
use crate::plan::ContractionPlan;
use crate::scalar::Scalar;

/// A square linear map known only through its action on vectors.
pub trait LinearOperator<T: Scalar> {
    /// Dimension of the space the operator acts on.
    fn dim(&self) -> usize;

    /// Compute `A · x`.
    fn apply(&self, x: &[T]) -> Result<Vec<T>, TensorError>;
}

/// Reduced density operator of a borrowed pure state, applied lazily.
///
/// Partition, dimensions and state length are validated once when the
/// operator is built; each [`apply`](LinearOperator::apply) then only checks
/// the input vector. The conjugated bra is computed once at construction for
/// complex scalars. The operator holds shared borrows and immutable data, so
/// one instance can serve concurrent applications.
///
/// # Example
///
/// ```
/// use lazyptr::{ContractOptions, LazyPtrOperator, LinearOperator};
///
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let psi = [s, 0.0, 0.0, s];
/// let dims = [2, 2];
/// let op = LazyPtrOperator::ptr(&psi, &dims, &[0], ContractOptions::default()).unwrap();
///
/// assert_eq!(op.dim(), 2);
/// let y = op.apply(&[2.0, 0.0]).unwrap();
/// assert!((y[0] - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LazyPtrOperator<'a, T: Scalar> {
    psi: &'a [T],
    // `None` for real scalars, where the bra is `psi` itself.
    bra: Option<Vec<T>>,
    dims: &'a [usize],
    plan: ContractionPlan,
    options: ContractOptions,
}

impl<'a, T: Scalar> LazyPtrOperator<'a, T> {
    /// `Tr_C |psi⟩⟨psi|` over the kept subsystems `sysa`.
    pub fn ptr(
        psi: &'a [T],
        dims: &'a [usize],
        sysa: &[usize],
        options: ContractOptions,
    ) -> Result<Self, TensorError> {
        let partition = Partition::plain(dims.len(), sysa)?;
        Self::new(psi, dims, &partition, options)
    }

    /// Partial transpose on `sysa` of `Tr_C |psi⟩⟨psi|`, kept `sysa ∪ sysb`.
    pub fn ptr_ppt(
        psi: &'a [T],
        dims: &'a [usize],
        sysa: &[usize],
        sysb: &[usize],
        options: ContractOptions,
    ) -> Result<Self, TensorError> {
        let partition = Partition::transposed(dims.len(), sysa, sysb)?;
        Self::new(psi, dims, &partition, options)
    }

    fn new(
        psi: &'a [T],
        dims: &'a [usize],
        partition: &Partition,
        options: ContractOptions,
    ) -> Result<Self, TensorError> {
        let plan = ContractionPlan::for_partition(partition);
        check_state(&plan, dims, psi.len())?;
        Ok(Self {
            psi,
            bra: conjugate_state(psi),
            dims,
            plan,
            options,
        })
    }

    pub fn plan(&self) -> &ContractionPlan {
        &self.plan
    }

    pub fn dims(&self) -> &[usize] {
        self.dims
    }
}

impl<T: Scalar> LinearOperator<T> for LazyPtrOperator<'_, T> {
    fn dim(&self) -> usize {
        self.plan.operator_dim(self.dims)
    }

    fn apply(&self, x: &[T]) -> Result<Vec<T>, TensorError> {
        let bra = self.bra.as_deref().unwrap_or(self.psi);
        apply_with_bra(&self.plan, self.dims, self.psi, bra, x, &self.options)
    }
}
