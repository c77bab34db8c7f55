//! Lazy application of reduced density operators.
//!
//! The flat state is viewed as an `n`-axis tensor with shape `dims` and the
//! flat input vector with the plan's vector-axis sizes. One `einsum` call over
//! `{ket, bra, vector}` then yields the operator-vector product, so the
//! reduced operator itself is never formed unless it is the cheapest
//! intermediate.

use faer_traits::ComplexField;
use tracing::instrument;

use crate::contract::{ContractOptions, einsum};
use crate::error::TensorError;
use crate::partition::Partition;
use crate::plan::ContractionPlan;
use crate::scalar::Scalar;
use crate::tensor::TensorView;

/// Apply a prebuilt plan: `out = op(psi) · v`.
///
/// `psi` is the flat state over `dims` (first subsystem slowest-varying) and
/// `v` the flat input vector over the plan's vector axes. The result is laid
/// out along the plan's output axes.
///
/// # Errors
///
/// * `InvalidDimensions` if `dims` has the wrong length or a zero entry;
/// * `DimensionMismatch` if `psi` or `v` has the wrong length;
/// * `ArithmeticFailure` for non-finite data when `options.check_finite`.
pub fn apply_plan<T: Scalar>(
    plan: &ContractionPlan,
    dims: &[usize],
    psi: &[T],
    v: &[T],
    options: &ContractOptions,
) -> Result<Vec<T>, TensorError> {
    check_state(plan, dims, psi.len())?;
    let conjugated = conjugate_state(psi);
    apply_with_bra(
        plan,
        dims,
        psi,
        conjugated.as_deref().unwrap_or(psi),
        v,
        options,
    )
}

/// Check `dims` against the plan and `len` against `∏ dims`.
pub(crate) fn check_state(
    plan: &ContractionPlan,
    dims: &[usize],
    len: usize,
) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidDimensions {
        dims: dims.to_vec(),
        n: plan.n(),
    };
    if dims.len() != plan.n() || dims.contains(&0) {
        return Err(invalid());
    }
    let expected = dims
        .iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(invalid)?;
    if len != expected {
        return Err(TensorError::DimensionMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Conjugated copy of the state for the bra, `None` for real scalars.
pub(crate) fn conjugate_state<T: Scalar>(psi: &[T]) -> Option<Vec<T>> {
    if <T as ComplexField>::IS_REAL {
        None
    } else {
        Some(psi.iter().map(|&x| x.conjugate()).collect())
    }
}

/// Contract `{ket, bra, v}` for a state already checked by [`check_state`].
pub(crate) fn apply_with_bra<T: Scalar>(
    plan: &ContractionPlan,
    dims: &[usize],
    ket: &[T],
    bra: &[T],
    v: &[T],
    options: &ContractOptions,
) -> Result<Vec<T>, TensorError> {
    plan.check_vector(dims, v.len())?;

    let vector_dims = plan.vector_dims(dims);
    let ket = TensorView::from_slice(ket, dims)?;
    let bra = TensorView::from_slice(bra, dims)?;
    let vector = TensorView::from_slice(v, &vector_dims)?;

    let out = einsum(
        &[
            (ket, plan.ket()),
            (bra, plan.bra()),
            (vector, plan.vector()),
        ],
        plan.output(),
        options,
    )?;
    Ok(out.into_data())
}

/// Apply the partial trace of `|psi⟩⟨psi|` keeping `sysa` to `v`.
///
/// The reduced operator acts on the subsystems `sysa` in the given order, so
/// `v` has length `∏ dims[sysa]` and axes ordered like `sysa`.
///
/// # Example
///
/// ```
/// use lazyptr::lazy_ptr_dot;
///
/// // Bell state (|00⟩ + |11⟩)/√2: the reduced operator is I/2.
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let psi = [s, 0.0, 0.0, s];
/// let out = lazy_ptr_dot(&psi, &[1.0, 3.0], &[2, 2], &[1]).unwrap();
/// assert!((out[0] - 0.5).abs() < 1e-12);
/// assert!((out[1] - 1.5).abs() < 1e-12);
/// ```
#[instrument(skip_all, fields(n = dims.len(), kept = sysa.len()))]
pub fn lazy_ptr_dot<T: Scalar>(
    psi: &[T],
    v: &[T],
    dims: &[usize],
    sysa: &[usize],
) -> Result<Vec<T>, TensorError> {
    let partition = Partition::plain(dims.len(), sysa)?;
    partition.check_dims(dims)?;
    let plan = ContractionPlan::for_partition(&partition);
    apply_plan(&plan, dims, psi, v, &ContractOptions::default())
}

/// Apply the partial transpose on `sysa` of the partial trace of
/// `|psi⟩⟨psi|` over the complement of `sysa ∪ sysb` to `v`.
///
/// `v` and the result are laid out over `sysa ∪ sysb` in ascending subsystem
/// order.
#[instrument(skip_all, fields(n = dims.len(), transposed = sysa.len(), kept = sysb.len()))]
pub fn lazy_ptr_ppt_dot<T: Scalar>(
    psi: &[T],
    v: &[T],
    dims: &[usize],
    sysa: &[usize],
    sysb: &[usize],
) -> Result<Vec<T>, TensorError> {
    let partition = Partition::transposed(dims.len(), sysa, sysb)?;
    partition.check_dims(dims)?;
    let plan = ContractionPlan::for_partition(&partition);
    apply_plan(&plan, dims, psi, v, &ContractOptions::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractBackend;
    use crate::error::PartitionFault;
    use crate::plan::ptr_dot_plan;
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    #[test]
    fn test_product_state_reduces_to_projector() {
        // |psi⟩ = |a⟩ ⊗ |b⟩ with |b⟩ = (0.6, 0.8): rho_B = |b⟩⟨b|
        let psi = [0.0, 0.0, 0.6, 0.8];
        let out = lazy_ptr_dot(&psi, &[1.0, 0.0], &[2, 2], &[1]).unwrap();
        assert_relative_eq!(out[0], 0.36, epsilon = 1e-12);
        assert_relative_eq!(out[1], 0.48, epsilon = 1e-12);
    }

    #[test]
    fn test_complex_state_uses_conjugate_bra() {
        // |psi⟩ = |0⟩ ⊗ (|0⟩ + i|1⟩)/√2, rho_B = [[1, -i], [i, 1]] / 2
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let zero = c64::new(0.0, 0.0);
        let psi = [c64::new(s, 0.0), c64::new(0.0, s), zero, zero];
        let one = c64::new(1.0, 0.0);

        let out = lazy_ptr_dot(&psi, &[one, zero], &[2, 2], &[1]).unwrap();
        assert_relative_eq!(out[0].re, 0.5, epsilon = 1e-12);
        assert_relative_eq!(out[0].im, 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[1].im, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_transpose_of_bell_state_is_swap() {
        // For the Bell state, PT_A(|Φ⟩⟨Φ|) = SWAP / 2.
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let psi = [s, 0.0, 0.0, s];
        // v = |01⟩ -> SWAP/2 v = |10⟩ / 2
        let out = lazy_ptr_ppt_dot(&psi, &[0.0, 1.0, 0.0, 0.0], &[2, 2], &[0], &[1]).unwrap();
        for (got, want) in out.iter().zip([0.0, 0.0, 0.5, 0.0]) {
            assert_relative_eq!(*got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_vector_length_checked_before_contraction() {
        let psi = vec![0.0; 35];
        let err = lazy_ptr_dot(&psi, &[1.0; 6], &[5, 7], &[1]).unwrap_err();
        assert_eq!(
            err,
            TensorError::DimensionMismatch {
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_state_length_checked() {
        let err = lazy_ptr_dot(&[1.0; 5], &[1.0; 2], &[2, 3], &[0]).unwrap_err();
        assert_eq!(
            err,
            TensorError::DimensionMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_partition_errors() {
        let psi = [1.0; 6];
        assert_eq!(
            lazy_ptr_dot(&psi, &[1.0; 2], &[2, 3], &[0, 0]).unwrap_err(),
            TensorError::InvalidPartition(PartitionFault::Duplicate { index: 0 })
        );
        assert_eq!(
            lazy_ptr_ppt_dot(&psi, &[1.0; 6], &[2, 3], &[0], &[1, 0]).unwrap_err(),
            TensorError::InvalidPartition(PartitionFault::Overlap { index: 0 })
        );
    }

    #[test]
    fn test_non_finite_state() {
        let psi = [1.0, f64::NAN, 0.0, 0.0];
        let err = lazy_ptr_dot(&psi, &[1.0, 0.0], &[2, 2], &[1]).unwrap_err();
        assert!(matches!(err, TensorError::ArithmeticFailure { .. }));
    }

    #[test]
    fn test_apply_plan_backends_agree() {
        let dims = [2, 3, 2];
        let psi: Vec<f64> = (0..12).map(|x| (x as f64 * 0.37).sin()).collect();
        let v: Vec<f64> = (0..6).map(|x| x as f64 - 2.0).collect();
        let plan = ptr_dot_plan(3, &[2, 1]).unwrap();

        let naive = ContractOptions::default().with_backend(ContractBackend::Naive);
        let a = apply_plan(&plan, &dims, &psi, &v, &naive).unwrap();
        let b = apply_plan(&plan, &dims, &psi, &v, &ContractOptions::default()).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_apply_plan_rejects_wrong_dims() {
        let plan = ptr_dot_plan(2, &[0]).unwrap();
        let err = apply_plan(&plan, &[2, 2, 2], &[1.0; 8], &[1.0; 2], &ContractOptions::default())
            .unwrap_err();
        assert!(matches!(err, TensorError::InvalidDimensions { n: 2, .. }));
    }

    #[test]
    fn test_apply_plan_rejects_overflowing_dims() {
        let plan = ptr_dot_plan(3, &[0]).unwrap();
        let err = apply_plan(
            &plan,
            &[usize::MAX / 2, 4, 4],
            &[1.0; 4],
            &[1.0; 2],
            &ContractOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TensorError::InvalidDimensions { n: 3, .. }));
    }

    #[test]
    fn test_conjugate_state() {
        assert!(conjugate_state(&[1.0, -2.0]).is_none());
        let bra = conjugate_state(&[c64::new(1.0, 2.0)]).unwrap();
        assert_eq!(bra, vec![c64::new(1.0, -2.0)]);
    }
}
