//! Zero-copy views of tensors as faer matrices.
//!
//! faer's slice constructors are column-major while tensors here are
//! row-major. A row-major `m x k` block therefore appears to faer as its
//! `k x m` transpose; the GEMM path computes `C^T = B^T A^T` so no data is
//! ever moved to satisfy the layout.

use faer::{MatMut, MatRef, Par};

use crate::contract::Parallelism;
use crate::scalar::Scalar;
use crate::tensor::{Tensor, TensorView};

/// View flat tensor storage as a column-major faer matrix.
pub trait AsFaerMat<T: Scalar> {
    /// View the data as a column-major `rows x cols` matrix (zero-copy).
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` differs from the element count.
    ///
    /// # Example
    ///
    /// ```
    /// use lazyptr::Tensor;
    /// use lazyptr::backend::AsFaerMat;
    ///
    /// // Row-major 2x3 data seen by faer as its 3x2 transpose.
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// let mat = t.as_faer_mat(3, 2);
    /// assert_eq!(mat[(0, 1)], 4.0);
    /// ```
    fn as_faer_mat(&self, rows: usize, cols: usize) -> MatRef<'_, T>;
}

fn check_size(rows: usize, cols: usize, len: usize) {
    assert_eq!(
        rows * cols,
        len,
        "Matrix dimensions ({} x {} = {}) must match tensor size ({})",
        rows,
        cols,
        rows * cols,
        len
    );
}

impl<T: Scalar> AsFaerMat<T> for Tensor<T> {
    fn as_faer_mat(&self, rows: usize, cols: usize) -> MatRef<'_, T> {
        check_size(rows, cols, self.len());
        MatRef::from_column_major_slice(self.data(), rows, cols)
    }
}

impl<T: Scalar> AsFaerMat<T> for TensorView<'_, T> {
    fn as_faer_mat(&self, rows: usize, cols: usize) -> MatRef<'_, T> {
        check_size(rows, cols, self.len());
        MatRef::from_column_major_slice(self.data(), rows, cols)
    }
}

impl<T: Scalar> Tensor<T> {
    /// Mutable column-major `rows x cols` view of the storage (zero-copy).
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` differs from the element count.
    pub fn as_faer_mat_mut(&mut self, rows: usize, cols: usize) -> MatMut<'_, T> {
        check_size(rows, cols, self.len());
        MatMut::from_column_major_slice_mut(self.data_mut(), rows, cols)
    }
}

/// Map the configured parallelism onto faer's `Par`.
pub fn faer_par(parallelism: Parallelism) -> Par {
    match parallelism {
        Parallelism::Sequential => Par::Seq,
        Parallelism::Threads(n) => Par::rayon(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_is_transpose_of_row_major() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
        let view = t.view();
        let mat = view.as_faer_mat(3, 2);
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(mat[(j, i)], *t.get(&[i, j]).unwrap());
            }
        }
    }

    #[test]
    #[should_panic(expected = "must match tensor size")]
    fn test_size_mismatch_panics() {
        let t: Tensor<f64> = Tensor::zeros(&[2, 3]);
        let _ = t.as_faer_mat(4, 2);
    }

    #[test]
    fn test_faer_par_sequential() {
        assert!(matches!(faer_par(Parallelism::Sequential), Par::Seq));
    }
}
