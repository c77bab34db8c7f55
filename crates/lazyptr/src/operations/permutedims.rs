//! Permutation of tensor axes.

use crate::backend::{GenericBackend, PermutationBackend};
use crate::error::TensorError;
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorView};

/// Permute the axes of a tensor view, returning a new owned tensor.
///
/// `perm[i]` gives the source axis for axis `i` of the result.
///
/// # Errors
///
/// Returns error if `perm` is not a permutation of `0..ndim`.
///
/// # Examples
///
/// ```
/// use lazyptr::Tensor;
/// use lazyptr::operations::permutedims;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// let t2 = permutedims(&t.view(), &[1, 0]).unwrap();
/// assert_eq!(t2.shape(), &[3, 2]);
/// assert_eq!(t.get(&[1, 0]), t2.get(&[0, 1]));
/// ```
pub fn permutedims<T: Scalar>(
    tensor: &TensorView<'_, T>,
    perm: &[usize],
) -> Result<Tensor<T>, TensorError> {
    validate_permutation(perm, tensor.ndim())?;
    let new_shape: Vec<usize> = perm.iter().map(|&p| tensor.shape()[p]).collect();
    let mut result = Tensor::zeros(&new_shape);
    permutedims_into(&mut result, tensor, perm);
    Ok(result)
}

/// Permute axes into an existing tensor of the permuted shape.
///
/// # Panics
///
/// Panics if `dest`'s shape doesn't match the permuted `src` shape.
pub fn permutedims_into<T: Scalar>(dest: &mut Tensor<T>, src: &TensorView<'_, T>, perm: &[usize]) {
    GenericBackend::permute_into(dest, src, perm);
}

/// Check that `perm` is a permutation of `0..ndim`.
pub fn validate_permutation(perm: &[usize], ndim: usize) -> Result<(), TensorError> {
    let invalid = || TensorError::InvalidPermutation {
        perm: perm.to_vec(),
        ndim,
    };
    if perm.len() != ndim {
        return Err(invalid());
    }
    let mut seen = vec![false; ndim];
    for &p in perm {
        if p >= ndim || seen[p] {
            return Err(invalid());
        }
        seen[p] = true;
    }
    Ok(())
}

/// Whether `perm` is the identity permutation.
pub(crate) fn is_identity_perm(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(i, &p)| i == p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::c64;

    fn check_transpose<T: Scalar>() {
        let data: Vec<T> = (1..=6).map(|x| T::from_real(x as f64)).collect();
        let t = Tensor::from_vec(data, &[2, 3]).unwrap();
        let t2 = permutedims(&t.view(), &[1, 0]).unwrap();
        assert_eq!(t2.shape(), &[3, 2]);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.get(&[i, j]), t2.get(&[j, i]));
            }
        }
    }

    #[test]
    fn test_permutedims_transpose_f64() {
        check_transpose::<f64>();
    }

    #[test]
    fn test_permutedims_transpose_c64() {
        check_transpose::<c64>();
    }

    #[test]
    fn test_permutedims_identity() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let t2 = permutedims(&t.view(), &[0, 1]).unwrap();
        assert_eq!(t.data(), t2.data());
        assert!(is_identity_perm(&[0, 1, 2]));
        assert!(!is_identity_perm(&[1, 0]));
    }

    #[test]
    fn test_permutedims_invalid() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        assert!(permutedims(&t.view(), &[0]).is_err());
        assert!(permutedims(&t.view(), &[0, 1, 2]).is_err());
        assert!(permutedims(&t.view(), &[0, 2]).is_err());
        assert!(permutedims(&t.view(), &[0, 0]).is_err());
    }
}
