//! GEMM-based pairwise contraction using faer.
//!
//! Operands are permuted so the summed axes are contiguous, viewed as
//! matrices and multiplied with faer's `matmul`. Because tensors are
//! row-major and faer views are column-major, the product is formed as
//! `C^T = B^T * A^T`, which lands C in row-major order directly.

use faer::linalg::matmul::matmul;
use faer::{Accum, Par};

use crate::backend::AsFaerMat;
use crate::contract::properties::ContractionProperties;
use crate::contract::{check_keep, label_sizes, naive};
use crate::error::TensorError;
use crate::labels::Label;
use crate::operations::permutedims;
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorView};

/// Contract two tensors through a single matrix product.
///
/// Same semantics as [`contract`](crate::contract::contract). Pairs with batch
/// labels or one-sided sums are delegated to the loop kernel.
///
/// # Example
///
/// ```
/// use faer::Par;
/// use lazyptr::Tensor;
/// use lazyptr::contract::contract_gemm;
///
/// let a = Tensor::<f64>::ones(&[2, 3]);
/// let b = Tensor::<f64>::ones(&[3, 4]);
///
/// let c = contract_gemm(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2], Par::Seq).unwrap();
/// assert_eq!(c.shape(), &[2, 4]);
/// assert_eq!(c.data()[0], 3.0);
/// ```
pub fn contract_gemm<T: Scalar>(
    a: &TensorView<'_, T>,
    labels_a: &[Label],
    b: &TensorView<'_, T>,
    labels_b: &[Label],
    keep: &[Label],
    par: Par,
) -> Result<Tensor<T>, TensorError> {
    let sizes = label_sizes(&[(labels_a, a.shape()), (labels_b, b.shape())])?;
    check_keep(keep, &sizes)?;

    let props = ContractionProperties::compute(labels_a, a.shape(), labels_b, b.shape(), keep);
    if !props.gemm_compatible {
        return naive::contract(a, labels_a, b, labels_b, keep);
    }

    let out_shape: Vec<usize> = props
        .output_labels
        .iter()
        .map(|&l| crate::contract::size_of(&sizes, l))
        .collect();

    let (m, k, n) = (props.dleft, props.dmid, props.dright);
    if m == 0 || n == 0 || k == 0 {
        let zeros = Tensor::zeros(&out_shape);
        return finish(zeros, &props);
    }

    // A as (m, k) row-major, B as (k, n) row-major
    let a_perm;
    let a_work = if props.permute_a {
        a_perm = permutedims(a, &props.perm_a)?;
        a_perm.view()
    } else {
        *a
    };
    let b_perm;
    let b_work = if props.permute_b {
        b_perm = permutedims(b, &props.perm_b)?;
        b_perm.view()
    } else {
        *b
    };

    let a_t = a_work.as_faer_mat(k, m);
    let b_t = b_work.as_faer_mat(n, k);

    let mut c = Tensor::<T>::zeros(&[m, n]);
    let mut c_t = c.as_faer_mat_mut(n, m);

    // C^T = 1 * B^T * A^T
    matmul(c_t.as_mut(), Accum::Replace, b_t, a_t, T::one(), par);

    let result = c.reshape(&out_shape)?;
    finish(result, &props)
}

/// Bring the GEMM output into `keep` order.
fn finish<T: Scalar>(
    result: Tensor<T>,
    props: &ContractionProperties,
) -> Result<Tensor<T>, TensorError> {
    if props.permute_c {
        permutedims(&result.view(), &props.perm_c)
    } else {
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::contract;
    use crate::scalar::c64;
    use approx::assert_relative_eq;

    fn assert_close(x: &Tensor<f64>, y: &Tensor<f64>) {
        assert_eq!(x.shape(), y.shape());
        for (a, b) in x.data().iter().zip(y.data()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    fn ramp(shape: &[usize]) -> Tensor<f64> {
        let len: usize = shape.iter().product();
        Tensor::from_vec((0..len).map(|x| x as f64 * 0.5 - 1.0).collect(), shape).unwrap()
    }

    #[test]
    fn test_gemm_matrix_multiply() {
        let a = ramp(&[2, 3]);
        let b = ramp(&[3, 4]);

        let c_gemm = contract_gemm(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2], Par::Seq).unwrap();
        let c_naive = contract(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2]).unwrap();
        assert_close(&c_gemm, &c_naive);
    }

    #[test]
    fn test_gemm_permuted_operands_and_output() {
        // C[l,i] = A[k,i,j] * B[j,l,k]
        let a = ramp(&[4, 2, 3]);
        let b = ramp(&[3, 5, 4]);

        let c_gemm =
            contract_gemm(&a.view(), &[2, 0, 1], &b.view(), &[1, 3, 2], &[3, 0], Par::Seq).unwrap();
        let c_naive = contract(&a.view(), &[2, 0, 1], &b.view(), &[1, 3, 2], &[3, 0]).unwrap();
        assert_eq!(c_gemm.shape(), &[5, 2]);
        assert_close(&c_gemm, &c_naive);
    }

    #[test]
    fn test_gemm_inner_product() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();

        let c = contract_gemm(&a.view(), &[0], &b.view(), &[0], &[], Par::Seq).unwrap();
        assert_eq!(c.ndim(), 0);
        assert_relative_eq!(c.data()[0], 32.0);
    }

    #[test]
    fn test_gemm_outer_product() {
        let a = Tensor::from_vec(vec![1.0, 2.0], &[2]).unwrap();
        let b = Tensor::from_vec(vec![3.0, 4.0, 5.0], &[3]).unwrap();

        let c_gemm = contract_gemm(&a.view(), &[0], &b.view(), &[1], &[0, 1], Par::Seq).unwrap();
        let c_naive = contract(&a.view(), &[0], &b.view(), &[1], &[0, 1]).unwrap();
        assert_close(&c_gemm, &c_naive);
    }

    #[test]
    fn test_gemm_falls_back_for_batch() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
        let b = Tensor::from_vec(vec![4.0, 5.0, 6.0], &[3]).unwrap();

        let c = contract_gemm(&a.view(), &[0], &b.view(), &[0], &[0], Par::Seq).unwrap();
        assert_eq!(c.data(), &[4.0, 10.0, 18.0]);
    }

    #[test]
    fn test_gemm_dimension_mismatch() {
        let a = Tensor::<f64>::ones(&[2, 3]);
        let b = Tensor::<f64>::ones(&[4, 5]);

        let result = contract_gemm(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2], Par::Seq);
        assert!(result.is_err());
    }

    #[test]
    fn test_gemm_complex() {
        let a = Tensor::from_vec(
            vec![
                c64::new(1.0, 0.5),
                c64::new(2.0, 0.0),
                c64::new(3.0, -1.0),
                c64::new(4.0, 0.0),
            ],
            &[2, 2],
        )
        .unwrap();
        let b = Tensor::from_vec(
            vec![
                c64::new(1.0, 0.0),
                c64::new(0.0, 1.0),
                c64::new(0.0, -1.0),
                c64::new(1.0, 0.0),
            ],
            &[2, 2],
        )
        .unwrap();

        let c_gemm = contract_gemm(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2], Par::Seq).unwrap();
        let c_naive = contract(&a.view(), &[0, 1], &b.view(), &[1, 2], &[0, 2]).unwrap();

        for (g, n) in c_gemm.data().iter().zip(c_naive.data()) {
            assert_relative_eq!(g.re, n.re, epsilon = 1e-10);
            assert_relative_eq!(g.im, n.im, epsilon = 1e-10);
        }
    }
}
