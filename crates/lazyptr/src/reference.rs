//! Explicit reduced density matrices.
//!
//! These build the dense reduced operator that the lazy path avoids, and
//! exist to cross-check it. Cost is quadratic in the kept dimension, so keep
//! them to small systems.

use crate::error::TensorError;
use crate::partition::Partition;
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides, increment_index, linear_to_cartesian};
use crate::tensor::{Tensor, shape_len};

/// Reduced density matrix `Tr_C |psi⟩⟨psi|` over the subsystems `keep`.
///
/// Rows and columns run over the kept subsystems in ascending position
/// order, whatever the order of `keep`. The result has shape `[dA, dA]`.
///
/// # Example
///
/// ```
/// use lazyptr::reference::partial_trace;
///
/// let s = std::f64::consts::FRAC_1_SQRT_2;
/// let rho = partial_trace(&[s, 0.0, 0.0, s], &[2, 2], &[0]).unwrap();
/// assert!((rho.get(&[0, 0]).unwrap() - 0.5).abs() < 1e-12);
/// assert_eq!(rho.get(&[0, 1]), Some(&0.0));
/// ```
pub fn partial_trace<T: Scalar>(
    psi: &[T],
    dims: &[usize],
    keep: &[usize],
) -> Result<Tensor<T>, TensorError> {
    let partition = Partition::plain(dims.len(), keep)?;
    let total = partition.check_dims(dims)?;
    if psi.len() != total {
        return Err(TensorError::DimensionMismatch {
            expected: total,
            actual: psi.len(),
        });
    }

    let kept = partition.ab_sorted();
    let traced = partition.complement();
    let kept_dims: Vec<usize> = kept.iter().map(|&p| dims[p]).collect();
    let traced_dims: Vec<usize> = traced.iter().map(|&p| dims[p]).collect();
    let da = shape_len(&kept_dims);
    let dc = shape_len(&traced_dims);
    let kept_strides = compute_strides(&kept_dims);
    let traced_strides = compute_strides(&traced_dims);

    // psi regrouped as a (dA, dC) matrix
    let mut m = vec![T::zero(); da * dc];
    let mut idx = vec![0usize; dims.len()];
    for &amp in psi {
        let a: usize = kept.iter().zip(&kept_strides).map(|(&p, &s)| idx[p] * s).sum();
        let c: usize = traced
            .iter()
            .zip(&traced_strides)
            .map(|(&p, &s)| idx[p] * s)
            .sum();
        m[a * dc + c] = amp;
        increment_index(&mut idx, dims);
    }

    let mut rho = Tensor::<T>::zeros(&[da, da]);
    let out = rho.data_mut();
    for a in 0..da {
        for b in 0..da {
            let mut sum = T::zero();
            for c in 0..dc {
                sum = sum + m[a * dc + c] * m[b * dc + c].conjugate();
            }
            out[a * da + b] = sum;
        }
    }
    Ok(rho)
}

/// Partial transpose of `rho` on the subsystems `sysa`.
///
/// `rho` is a square operator over subsystems `dims`; the row and column
/// indices of every subsystem in `sysa` are swapped.
pub fn partial_transpose<T: Scalar>(
    rho: &Tensor<T>,
    dims: &[usize],
    sysa: &[usize],
) -> Result<Tensor<T>, TensorError> {
    let partition = Partition::plain(dims.len(), sysa)?;
    let d = partition.check_dims(dims)?;
    if rho.shape() != [d, d].as_slice() {
        return Err(TensorError::DimensionMismatch {
            expected: d * d,
            actual: rho.len(),
        });
    }

    let strides = compute_strides(dims);
    let mut out = Tensor::<T>::zeros(&[d, d]);
    let dst = out.data_mut();
    for (offset, &value) in rho.data().iter().enumerate() {
        let mut row = linear_to_cartesian(offset / d, dims);
        let mut col = linear_to_cartesian(offset % d, dims);
        for &p in sysa {
            std::mem::swap(&mut row[p], &mut col[p]);
        }
        let r = cartesian_to_linear(&row, &strides);
        let c = cartesian_to_linear(&col, &strides);
        dst[r * d + c] = value;
    }
    Ok(out)
}

/// Dense matrix-vector product.
pub fn matvec<T: Scalar>(matrix: &Tensor<T>, v: &[T]) -> Result<Vec<T>, TensorError> {
    let [rows, cols] = matrix.shape() else {
        return Err(TensorError::WrongNumberOfIndices {
            expected: 2,
            actual: matrix.ndim(),
        });
    };
    let (rows, cols) = (*rows, *cols);
    if v.len() != cols {
        return Err(TensorError::DimensionMismatch {
            expected: cols,
            actual: v.len(),
        });
    }

    let data = matrix.data();
    Ok((0..rows)
        .map(|i| {
            data[i * cols..(i + 1) * cols]
                .iter()
                .zip(v)
                .fold(T::zero(), |acc, (&m, &x)| acc + m * x)
        })
        .collect())
}
